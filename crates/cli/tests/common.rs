// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

use lv_core::{AudioClip, AudioFormat, DurableStore, SyncItem, SyncKind};

pub fn lvsync(root: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("lvsync");
    cmd.arg("--root").arg(root.path());
    cmd
}

/// Queues delete items for `ids` and returns the generated item ids.
///
/// The store is closed again before returning so the binary can lock it.
pub fn seed_deletes(root: &TempDir, kind: SyncKind, ids: &[&str]) -> Vec<String> {
    let store = DurableStore::open(root.path()).unwrap();
    ids.iter()
        .map(|id| {
            let item = SyncItem::delete_by_id(kind, id).unwrap();
            store.save_sync_item(&item).unwrap();
            item.id
        })
        .collect()
}

pub fn seed_passage(root: &TempDir, reference: &str, text: &str, audio: bool) {
    let store = DurableStore::open(root.path()).unwrap();
    let clip = AudioClip {
        bytes: vec![0u8; 1024],
        format: AudioFormat::M4a,
    };
    store
        .save_passage(reference, text, audio.then_some(&clip))
        .unwrap();
}
