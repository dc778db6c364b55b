// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for lv-core operations.

use thiserror::Error;

/// All possible errors that can occur in lv-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid sync kind: '{0}'\n  hint: valid kinds are: prayer, group, library")]
    InvalidKind(String),

    #[error("invalid library subkind: '{0}'\n  hint: valid subkinds are: bookmark, note, highlight")]
    InvalidSubkind(String),

    #[error("invalid audio format: '{0}'\n  hint: valid formats are: m4a, mp3, wav, caf")]
    InvalidAudioFormat(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("storage root is locked: {0}\n  hint: another process already owns this storage root")]
    StoreLocked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for lv-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
