// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors reported by the `lvsync` commands.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sync(#[from] leavn_sync::Error),

    #[error(transparent)]
    Core(#[from] lv_core::Error),

    #[error("sync item not found: {0}\n  hint: run 'lvsync pending' to list queued items")]
    SyncItemNotFound(String),

    #[error("no cached passage for '{0}'\n  hint: run 'lvsync passages' to list cached passages")]
    PassageNotFound(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
