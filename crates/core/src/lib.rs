// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! lv-core: Shared library for the Leavn offline sync engine
//!
//! This crate provides the data model for pending mutations and cached
//! passages, and the file-backed store both are persisted in.

pub mod error;
pub mod id;
pub mod item;
pub mod mutation;
pub mod passage;
pub mod store;

pub use error::{Error, Result};
pub use item::{LibraryKind, RemoteCall, SyncAction, SyncItem, SyncKind};
pub use mutation::{
    Bookmark, EntityRef, GroupAction, GroupActionKind, Highlight, Mutation, Note, Prayer,
};
pub use passage::{AudioClip, AudioFormat, OfflinePassage};
pub use store::DurableStore;
