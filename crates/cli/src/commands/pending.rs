// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use chrono::{DateTime, Utc};
use lv_core::{SyncAction, SyncItem};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;

use super::{format_age, open_store};

/// JSON representation of a queued sync item.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PendingItemJson {
    id: String,
    kind: String,
    action: SyncAction,
    retry_count: u32,
    created_at: DateTime<Utc>,
    payload_bytes: usize,
}

impl From<&SyncItem> for PendingItemJson {
    fn from(item: &SyncItem) -> Self {
        PendingItemJson {
            id: item.id.clone(),
            kind: item.kind.to_string(),
            action: item.action,
            retry_count: item.retry_count,
            created_at: item.created_at,
            payload_bytes: item.payload.as_ref().map_or(0, Vec::len),
        }
    }
}

pub fn run(root: &Path, output: OutputFormat) -> Result<()> {
    let store = open_store(root)?;
    let items = store.load_pending_sync_items()?;

    match output {
        OutputFormat::Text => {
            if items.is_empty() {
                println!("No pending sync items");
            }
            let now = Utc::now();
            for item in &items {
                println!("{}", format_item_line(item, now));
            }
        }
        OutputFormat::Json => {
            let json: Vec<PendingItemJson> = items.iter().map(PendingItemJson::from).collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

pub(crate) fn format_item_line(item: &SyncItem, now: DateTime<Utc>) -> String {
    format!(
        "{}  {:<18} {:<6} retries={}  {}",
        item.id,
        item.kind.to_string(),
        item.action.to_string(),
        item.retry_count,
        format_age(item.created_at, now)
    )
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
