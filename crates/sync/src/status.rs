// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Observable engine status.

use serde::Serialize;
use tokio::sync::watch;

use crate::connectivity::ConnectionType;
use crate::sync::PassReport;

/// Where the engine is in its pass cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// No pass has run since the engine started. Never published again
    /// once a pass finishes.
    #[default]
    Idle,
    Syncing,
    /// The last pass emptied the queue.
    Completed,
    /// The last pass left items behind for a retry.
    Failed,
}

/// Everything an observer can see about the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub is_online: bool,
    pub connection_type: ConnectionType,
    pub sync_status: SyncStatus,
    pub pending_count: usize,
    /// Number of passes finished since start.
    pub passes: u64,
    pub last_report: Option<PassReport>,
}

pub type StatusReceiver = watch::Receiver<StatusSnapshot>;

/// Write side of the status channel, owned by the engine actor.
#[derive(Debug)]
pub struct StatusPublisher {
    tx: watch::Sender<StatusSnapshot>,
}

impl StatusPublisher {
    pub fn new(initial: StatusSnapshot) -> Self {
        let (tx, _rx) = watch::channel(initial);
        StatusPublisher { tx }
    }

    pub fn subscribe(&self) -> StatusReceiver {
        self.tx.subscribe()
    }

    pub fn current(&self) -> StatusSnapshot {
        self.tx.borrow().clone()
    }

    /// Applies `f` to the snapshot. Observers are woken only if it changed.
    pub fn update(&self, f: impl FnOnce(&mut StatusSnapshot)) -> bool {
        self.tx.send_if_modified(|snapshot| {
            let before = snapshot.clone();
            f(snapshot);
            *snapshot != before
        })
    }

    pub fn set_connectivity(&self, is_online: bool, connection_type: ConnectionType) -> bool {
        self.update(|s| {
            s.is_online = is_online;
            s.connection_type = connection_type;
        })
    }

    pub fn set_sync_status(&self, sync_status: SyncStatus) -> bool {
        self.update(|s| s.sync_status = sync_status)
    }

    pub fn set_pending_count(&self, pending_count: usize) -> bool {
        self.update(|s| s.pending_count = pending_count)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
