// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Applies a snapshot of the queue to the remote service.

use std::sync::Arc;

use lv_core::{DurableStore, SyncItem};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::remote::{dispatch, RemoteMutationService};

/// Bounded retry for failed remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Failed attempts after which an item is dropped.
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy { max_retries: 3 }
    }
}

/// What one pass did with its snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Applied remotely and removed.
    pub applied: usize,
    /// Failed, kept for the next pass.
    pub retained: usize,
    /// Failed for the last allowed time and discarded.
    pub dropped: usize,
    /// Undecodable payloads, discarded without a remote call.
    pub malformed: usize,
}

impl PassReport {
    pub fn total(&self) -> usize {
        self.applied + self.retained + self.dropped + self.malformed
    }
}

/// Result of a pass: the report plus the items still pending, in order.
#[derive(Debug)]
pub struct PassOutcome {
    pub report: PassReport,
    pub retained: Vec<SyncItem>,
}

/// Runs passes against the store and the remote service.
#[derive(Clone)]
pub struct SyncProcessor {
    store: Arc<DurableStore>,
    remote: Arc<dyn RemoteMutationService>,
    policy: RetryPolicy,
}

impl SyncProcessor {
    pub fn new(
        store: Arc<DurableStore>,
        remote: Arc<dyn RemoteMutationService>,
        policy: RetryPolicy,
    ) -> Self {
        SyncProcessor {
            store,
            remote,
            policy,
        }
    }

    /// Processes `snapshot` in order, one remote call at a time.
    ///
    /// Only items in the snapshot are touched on disk.
    ///
    /// A failed attempt is only counted once the new count is saved, so a
    /// retained item's `retry_count` always matches its file.
    pub async fn run_pass(&self, snapshot: Vec<SyncItem>) -> PassOutcome {
        let mut report = PassReport::default();
        let mut retained = Vec::new();

        for mut item in snapshot {
            let call = match item.decode() {
                Ok(call) => call,
                Err(e) => {
                    warn!(id = %item.id, kind = %item.kind, error = %e, "dropping malformed sync item");
                    self.store.delete_sync_item(&item.id);
                    report.malformed += 1;
                    continue;
                }
            };

            match dispatch(self.remote.as_ref(), &call).await {
                Ok(()) => {
                    debug!(id = %item.id, kind = %item.kind, action = %item.action, "applied");
                    self.store.delete_sync_item(&item.id);
                    report.applied += 1;
                }
                Err(e) => {
                    item.retry_count += 1;
                    if item.retry_count < self.policy.max_retries {
                        debug!(id = %item.id, attempt = item.retry_count, error = %e, "remote call failed, will retry");
                        if let Err(save_err) = self.store.save_sync_item(&item) {
                            // Keep memory in step with disk.
                            item.retry_count -= 1;
                            warn!(id = %item.id, error = %save_err, "failed to persist retry count");
                        }
                        retained.push(item);
                        report.retained += 1;
                    } else {
                        warn!(
                            id = %item.id,
                            kind = %item.kind,
                            action = %item.action,
                            attempts = item.retry_count,
                            error = %e,
                            "giving up on sync item"
                        );
                        self.store.delete_sync_item(&item.id);
                        report.dropped += 1;
                    }
                }
            }
        }

        info!(
            applied = report.applied,
            retained = report.retained,
            dropped = report.dropped,
            malformed = report.malformed,
            "sync pass finished"
        );
        PassOutcome { report, retained }
    }
}
