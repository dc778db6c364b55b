// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// Prefix for sync item identifiers.
pub const SYNC_ITEM_PREFIX: &str = "sync";

/// Prefix for offline passage identifiers.
pub const PASSAGE_PREFIX: &str = "psg";

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate an identifier from prefix, a label, and timestamp.
/// Format: {prefix}-{hash} where hash is first 16 hex chars of
/// SHA256(label + timestamp + sequence).
pub fn generate_id(prefix: &str, label: &str, at: &DateTime<Utc>) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let input = format!(
        "{}{}{}",
        label,
        at.to_rfc3339_opts(SecondsFormat::Nanos, true),
        seq
    );
    let hash = Sha256::digest(input.as_bytes());
    format!("{}-{}", prefix, hex::encode(&hash[..8]))
}

/// Check that an identifier is safe to use as a file or directory name.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
