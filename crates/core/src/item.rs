// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pending local mutations ("sync items").
//!
//! A sync item is written to disk as one JSON document:
//!
//! ```json
//! {"id":"sync-…","kind":"library","subkind":"bookmark","action":"create",
//!  "payload":"<base64>","timestamp":"2024-01-10T12:00:00Z","retryCount":0}
//! ```
//!
//! `kind` is the discriminant and `subkind` is only present for library items.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::id::{generate_id, SYNC_ITEM_PREFIX};
use crate::mutation::{EntityRef, Mutation};

/// Library content that can be synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryKind {
    Bookmark,
    Note,
    Highlight,
}

impl LibraryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryKind::Bookmark => "bookmark",
            LibraryKind::Note => "note",
            LibraryKind::Highlight => "highlight",
        }
    }
}

impl FromStr for LibraryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bookmark" => Ok(LibraryKind::Bookmark),
            "note" => Ok(LibraryKind::Note),
            "highlight" => Ok(LibraryKind::Highlight),
            _ => Err(Error::InvalidSubkind(s.to_string())),
        }
    }
}

/// The remote collection a sync item targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncKind {
    Prayer,
    Group,
    Library(LibraryKind),
}

impl SyncKind {
    /// The discriminant written to the `kind` field.
    pub fn discriminant(&self) -> &'static str {
        match self {
            SyncKind::Prayer => "prayer",
            SyncKind::Group => "group",
            SyncKind::Library(_) => "library",
        }
    }

    /// The value written to the `subkind` field, if any.
    pub fn subkind(&self) -> Option<LibraryKind> {
        match self {
            SyncKind::Library(sub) => Some(*sub),
            _ => None,
        }
    }

    /// Rebuilds a kind from its serialized discriminant and subkind.
    pub fn from_parts(kind: &str, subkind: Option<&str>) -> Result<Self> {
        match kind {
            "prayer" => Ok(SyncKind::Prayer),
            "group" => Ok(SyncKind::Group),
            "library" => {
                let sub = subkind.ok_or_else(|| {
                    Error::CorruptedData("library item is missing its subkind".to_string())
                })?;
                Ok(SyncKind::Library(sub.parse()?))
            }
            other => Err(Error::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for SyncKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncKind::Library(sub) => write!(f, "library.{}", sub.as_str()),
            other => write!(f, "{}", other.discriminant()),
        }
    }
}

impl FromStr for SyncKind {
    type Err = Error;

    /// Parses the display form: `prayer`, `group`, or `library.<subkind>`.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('.') {
            Some((kind, sub)) => SyncKind::from_parts(kind, Some(sub)),
            None => SyncKind::from_parts(s, None),
        }
    }
}

/// What a sync item does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    Create,
    Update,
    Delete,
}

impl SyncAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncAction::Create => "create",
            SyncAction::Update => "update",
            SyncAction::Delete => "delete",
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded sync item, ready to be sent to the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    Create(Mutation),
    Update(Mutation),
    Delete { kind: SyncKind, id: String },
}

/// A pending local mutation awaiting remote application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SyncItemRecord", try_from = "SyncItemRecord")]
pub struct SyncItem {
    pub id: String,
    pub kind: SyncKind,
    pub action: SyncAction,
    /// Serialized domain object. `None` only for legacy delete-by-id items.
    pub payload: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
    pub retry_count: u32,
}

impl SyncItem {
    /// Creates a new item stamped with the current time and a fresh id.
    pub fn new(kind: SyncKind, action: SyncAction, payload: Option<Vec<u8>>) -> Self {
        let created_at = Utc::now();
        SyncItem {
            id: generate_id(SYNC_ITEM_PREFIX, &kind.to_string(), &created_at),
            kind,
            action,
            payload,
            created_at,
            retry_count: 0,
        }
    }

    /// Creates an item for a domain object.
    ///
    /// Deletes only carry the object's id.
    pub fn for_mutation(mutation: &Mutation, action: SyncAction) -> Result<Self> {
        let payload = match action {
            SyncAction::Delete => serde_json::to_vec(&EntityRef {
                id: mutation.id().to_string(),
            })?,
            SyncAction::Create | SyncAction::Update => mutation.to_payload()?,
        };
        Ok(SyncItem::new(mutation.kind(), action, Some(payload)))
    }

    /// Creates a delete item from a kind and an object id.
    pub fn delete_by_id(kind: SyncKind, id: &str) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(Error::InvalidInput("cannot delete an empty id".to_string()));
        }
        let payload = serde_json::to_vec(&EntityRef { id: id.to_string() })?;
        Ok(SyncItem::new(kind, SyncAction::Delete, Some(payload)))
    }

    /// Decodes the payload into the call the remote service must receive.
    ///
    /// Fails with [`Error::CorruptedData`] when the payload is absent or does
    /// not match the declared kind.
    pub fn decode(&self) -> Result<RemoteCall> {
        let payload = self.payload.as_deref().ok_or_else(|| {
            Error::CorruptedData(format!("sync item {} has no payload", self.id))
        })?;

        match self.action {
            SyncAction::Create => Ok(RemoteCall::Create(Mutation::decode(self.kind, payload)?)),
            SyncAction::Update => Ok(RemoteCall::Update(Mutation::decode(self.kind, payload)?)),
            SyncAction::Delete => {
                let target: EntityRef = serde_json::from_slice(payload).map_err(|e| {
                    Error::CorruptedData(format!("{} delete payload: {}", self.kind, e))
                })?;
                Ok(RemoteCall::Delete {
                    kind: self.kind,
                    id: target.id,
                })
            }
        }
    }

    /// Queue ordering: oldest first, ties broken by id.
    pub fn queue_order(a: &SyncItem, b: &SyncItem) -> Ordering {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// On-disk shape of a [`SyncItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SyncItemRecord {
    id: String,
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subkind: Option<String>,
    action: SyncAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<String>,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    retry_count: u32,
}

impl From<SyncItem> for SyncItemRecord {
    fn from(item: SyncItem) -> Self {
        SyncItemRecord {
            id: item.id,
            kind: item.kind.discriminant().to_string(),
            subkind: item.kind.subkind().map(|s| s.as_str().to_string()),
            action: item.action,
            payload: item.payload.map(|bytes| STANDARD.encode(bytes)),
            timestamp: item.created_at,
            retry_count: item.retry_count,
        }
    }
}

impl TryFrom<SyncItemRecord> for SyncItem {
    type Error = Error;

    fn try_from(record: SyncItemRecord) -> Result<Self> {
        let kind = SyncKind::from_parts(&record.kind, record.subkind.as_deref())?;
        let payload = record
            .payload
            .map(|encoded| {
                STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(|e| Error::CorruptedData(format!("payload is not base64: {}", e)))
            })
            .transpose()?;

        Ok(SyncItem {
            id: record.id,
            kind,
            action: record.action,
            payload,
            created_at: record.timestamp,
            retry_count: record.retry_count,
        })
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
