// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

use super::open_store;

/// Deletes a queued sync item so the engine never applies it.
pub fn run(root: &Path, id: &str) -> Result<()> {
    let store = open_store(root)?;
    if !store.contains_sync_item(id) {
        return Err(Error::SyncItemNotFound(id.to_string()));
    }
    store.delete_sync_item(id);
    info!(id, "dropped sync item");
    println!("Dropped {}", id);
    Ok(())
}
