// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod config;
pub mod drop;
pub mod passages;
pub mod pending;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use leavn_sync::SyncConfig;
use lv_core::DurableStore;

use crate::error::Result;

/// Uses `--root` when given, otherwise the app's default data directory.
pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => SyncConfig::default_root().ok_or_else(|| leavn_sync::Error::NoStorageRoot.into()),
    }
}

/// Opens the store, taking the storage root lock.
pub fn open_store(root: &Path) -> Result<DurableStore> {
    Ok(DurableStore::open(root)?)
}

/// Short human age such as `45s`, `12m`, `3h` or `2d`.
pub fn format_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    match secs {
        s if s < 60 => format!("{}s", s),
        s if s < 3600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3600),
        s => format!("{}d", s / 86_400),
    }
}

/// Byte count with a binary unit, e.g. `512 B` or `1.5 KiB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for &next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{:.1} {}", value, unit)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
