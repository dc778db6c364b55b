// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory view of the pending sync items.
//!
//! The durable store is the source of truth. The queue mirrors it so the
//! engine can snapshot, count and order items without touching disk.

use std::collections::HashSet;

use lv_core::SyncItem;

/// Pending items ordered by creation time.
#[derive(Debug, Default)]
pub struct SyncQueue {
    items: Vec<SyncItem>,
}

impl SyncQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a queue from items loaded at startup.
    pub fn from_items(mut items: Vec<SyncItem>) -> Self {
        items.sort_by(SyncItem::queue_order);
        SyncQueue { items }
    }

    /// Appends a newly enqueued item.
    pub fn push(&mut self, item: SyncItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyncItem> {
        self.items.iter()
    }

    /// Copies the queue for a pass, in processing order.
    pub fn snapshot(&self) -> Vec<SyncItem> {
        let mut items = self.items.clone();
        items.sort_by(SyncItem::queue_order);
        items
    }

    /// Replaces the snapshotted items with what a pass retained.
    ///
    /// Items enqueued after the snapshot was taken keep their place after the
    /// retained ones.
    pub fn replace_after_pass(&mut self, retained: Vec<SyncItem>, snapshot_ids: &HashSet<String>) {
        let arrived: Vec<SyncItem> = self
            .items
            .drain(..)
            .filter(|item| !snapshot_ids.contains(&item.id))
            .collect();
        self.items = retained;
        self.items.extend(arrived);
    }
}
