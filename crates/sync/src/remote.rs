// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote mutation service abstraction.
//!
//! The concrete community and library backends live in the host app. The
//! engine only needs create/update/delete for each kind of content, so it
//! can be driven by a mock in tests.

use std::future::Future;
use std::pin::Pin;

use lv_core::{
    Bookmark, GroupAction, Highlight, LibraryKind, Mutation, Note, Prayer, RemoteCall, SyncKind,
};

/// Error type for remote operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The request never reached the server.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error status.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The session is missing or expired.
    #[error("not authorized")]
    Unauthorized,

    /// The server refused the mutation.
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by every remote operation.
pub type RemoteFuture<'a> = Pin<Box<dyn Future<Output = RemoteResult<()>> + Send + 'a>>;

/// Remote service that applies queued mutations.
pub trait RemoteMutationService: Send + Sync {
    fn create_prayer<'a>(&'a self, prayer: &'a Prayer) -> RemoteFuture<'a>;
    fn update_prayer<'a>(&'a self, prayer: &'a Prayer) -> RemoteFuture<'a>;
    fn delete_prayer<'a>(&'a self, id: &'a str) -> RemoteFuture<'a>;

    fn create_group_action<'a>(&'a self, action: &'a GroupAction) -> RemoteFuture<'a>;
    fn update_group_action<'a>(&'a self, action: &'a GroupAction) -> RemoteFuture<'a>;
    fn delete_group_action<'a>(&'a self, id: &'a str) -> RemoteFuture<'a>;

    fn create_bookmark<'a>(&'a self, bookmark: &'a Bookmark) -> RemoteFuture<'a>;
    fn update_bookmark<'a>(&'a self, bookmark: &'a Bookmark) -> RemoteFuture<'a>;
    fn delete_bookmark<'a>(&'a self, id: &'a str) -> RemoteFuture<'a>;

    fn create_note<'a>(&'a self, note: &'a Note) -> RemoteFuture<'a>;
    fn update_note<'a>(&'a self, note: &'a Note) -> RemoteFuture<'a>;
    fn delete_note<'a>(&'a self, id: &'a str) -> RemoteFuture<'a>;

    fn create_highlight<'a>(&'a self, highlight: &'a Highlight) -> RemoteFuture<'a>;
    fn update_highlight<'a>(&'a self, highlight: &'a Highlight) -> RemoteFuture<'a>;
    fn delete_highlight<'a>(&'a self, id: &'a str) -> RemoteFuture<'a>;
}

/// Sends a decoded call to the matching remote operation.
pub async fn dispatch(remote: &dyn RemoteMutationService, call: &RemoteCall) -> RemoteResult<()> {
    match call {
        RemoteCall::Create(mutation) => match mutation {
            Mutation::Prayer(p) => remote.create_prayer(p).await,
            Mutation::Group(g) => remote.create_group_action(g).await,
            Mutation::Bookmark(b) => remote.create_bookmark(b).await,
            Mutation::Note(n) => remote.create_note(n).await,
            Mutation::Highlight(h) => remote.create_highlight(h).await,
        },
        RemoteCall::Update(mutation) => match mutation {
            Mutation::Prayer(p) => remote.update_prayer(p).await,
            Mutation::Group(g) => remote.update_group_action(g).await,
            Mutation::Bookmark(b) => remote.update_bookmark(b).await,
            Mutation::Note(n) => remote.update_note(n).await,
            Mutation::Highlight(h) => remote.update_highlight(h).await,
        },
        RemoteCall::Delete { kind, id } => match kind {
            SyncKind::Prayer => remote.delete_prayer(id).await,
            SyncKind::Group => remote.delete_group_action(id).await,
            SyncKind::Library(LibraryKind::Bookmark) => remote.delete_bookmark(id).await,
            SyncKind::Library(LibraryKind::Note) => remote.delete_note(id).await,
            SyncKind::Library(LibraryKind::Highlight) => remote.delete_highlight(id).await,
        },
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
