// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Domain objects that can be mutated offline.
//!
//! Each object is serialized to JSON as the payload of a
//! [`SyncItem`](crate::item::SyncItem). Every object carries a string `id`,
//! which is all a delete needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::item::{LibraryKind, SyncKind};

/// A prayer request posted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prayer {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub is_answered: bool,
    pub created_at: DateTime<Utc>,
}

/// What the user did in a community group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupActionKind {
    Join,
    Leave,
    Post,
    React,
}

/// An action performed against a community group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAction {
    pub id: String,
    pub group_id: String,
    pub action: GroupActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A saved position in the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    /// Book/chapter/verse reference, e.g. "John 3:16".
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A free-text note attached to a passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub reference: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

/// A colored highlight over a passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: String,
    pub reference: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// Identity of a domain object, used for delete-by-id payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
}

/// A domain object together with the kind it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Prayer(Prayer),
    Group(GroupAction),
    Bookmark(Bookmark),
    Note(Note),
    Highlight(Highlight),
}

impl Mutation {
    /// Returns the sync kind this object is queued under.
    pub fn kind(&self) -> SyncKind {
        match self {
            Mutation::Prayer(_) => SyncKind::Prayer,
            Mutation::Group(_) => SyncKind::Group,
            Mutation::Bookmark(_) => SyncKind::Library(LibraryKind::Bookmark),
            Mutation::Note(_) => SyncKind::Library(LibraryKind::Note),
            Mutation::Highlight(_) => SyncKind::Library(LibraryKind::Highlight),
        }
    }

    /// Returns the id of the wrapped object.
    pub fn id(&self) -> &str {
        match self {
            Mutation::Prayer(p) => &p.id,
            Mutation::Group(g) => &g.id,
            Mutation::Bookmark(b) => &b.id,
            Mutation::Note(n) => &n.id,
            Mutation::Highlight(h) => &h.id,
        }
    }

    /// Serializes the wrapped object (without any kind tag).
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Mutation::Prayer(p) => serde_json::to_vec(p)?,
            Mutation::Group(g) => serde_json::to_vec(g)?,
            Mutation::Bookmark(b) => serde_json::to_vec(b)?,
            Mutation::Note(n) => serde_json::to_vec(n)?,
            Mutation::Highlight(h) => serde_json::to_vec(h)?,
        };
        Ok(bytes)
    }

    /// Decodes a payload as the object type declared by `kind`.
    ///
    /// Switches on the discriminant first, then on the library subkind.
    pub fn decode(kind: SyncKind, payload: &[u8]) -> Result<Self> {
        let decoded = match kind {
            SyncKind::Prayer => serde_json::from_slice(payload).map(Mutation::Prayer),
            SyncKind::Group => serde_json::from_slice(payload).map(Mutation::Group),
            SyncKind::Library(sub) => match sub {
                LibraryKind::Bookmark => serde_json::from_slice(payload).map(Mutation::Bookmark),
                LibraryKind::Note => serde_json::from_slice(payload).map(Mutation::Note),
                LibraryKind::Highlight => {
                    serde_json::from_slice(payload).map(Mutation::Highlight)
                }
            },
        };
        decoded.map_err(|e| Error::CorruptedData(format!("{} payload: {}", kind, e)))
    }
}

#[cfg(test)]
#[path = "mutation_tests.rs"]
mod tests;
