// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Engine actor that owns the queue, the status and the retry timer.
//!
//! The engine runs as a single tokio task. Callers talk to it through a
//! [`SyncHandle`], which only sends commands and reads the status channel.
//! Passes run in their own task so the actor keeps accepting enqueues while
//! remote calls are in flight.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use lv_core::{DurableStore, SyncItem};
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::processor::{PassOutcome, RetryPolicy, SyncProcessor};
use super::queue::SyncQueue;
use crate::config::SyncConfig;
use crate::connectivity::{ConnectivityMonitor, NetworkPath, Transition};
use crate::error::{Error, Result};
use crate::remote::RemoteMutationService;
use crate::status::{StatusPublisher, StatusReceiver, StatusSnapshot, SyncStatus};

/// Messages accepted by the engine actor.
enum Command {
    Enqueue {
        item: SyncItem,
        reply: oneshot::Sender<Result<()>>,
    },
    PathUpdate(NetworkPath),
    SyncNow,
    /// Sent by the retry timer. Carries the timer's generation.
    RetryFired(u64),
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Cloneable handle to a running engine.
#[derive(Clone)]
pub struct SyncHandle {
    commands: mpsc::Sender<Command>,
    status: StatusReceiver,
}

impl SyncHandle {
    /// Persists `item` and adds it to the queue.
    ///
    /// Returns once the item is on disk. If the device is online a pass is
    /// requested right away.
    pub async fn enqueue(&self, item: SyncItem) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Enqueue { item, reply }).await?;
        rx.await.map_err(|_| Error::EngineStopped)?
    }

    /// Forwards an OS network path update.
    pub async fn report_path(&self, path: NetworkPath) -> Result<()> {
        self.send(Command::PathUpdate(path)).await
    }

    /// Requests a pass now. Ignored if one is running, the queue is empty or
    /// the device is offline.
    pub async fn sync_now(&self) -> Result<()> {
        self.send(Command::SyncNow).await
    }

    /// Stops the engine after any running pass completes.
    ///
    /// Calling this on an engine that already stopped is a no-op.
    pub async fn shutdown(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        if self.commands.send(Command::Shutdown { reply }).await.is_err() {
            return Ok(());
        }
        let _ = rx.await;
        Ok(())
    }

    pub fn status(&self) -> StatusSnapshot {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> StatusReceiver {
        self.status.clone()
    }

    /// Forwards every path update from `paths` until either side closes.
    pub fn spawn_path_feed(&self, mut paths: mpsc::Receiver<NetworkPath>) -> JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            while let Some(path) = paths.recv().await {
                if handle.report_path(path).await.is_err() {
                    break;
                }
            }
        })
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| Error::EngineStopped)
    }
}

struct InFlightPass {
    handle: JoinHandle<PassOutcome>,
    snapshot_ids: HashSet<String>,
}

/// State owned by the actor task.
pub struct SyncEngine {
    store: Arc<DurableStore>,
    queue: SyncQueue,
    processor: SyncProcessor,
    monitor: ConnectivityMonitor,
    status: StatusPublisher,
    retry_delay: Duration,
    retry_timer: Option<CancellationToken>,
    retry_generation: u64,
    in_flight: Option<InFlightPass>,
    /// Weak so pending timers do not keep the actor alive.
    commands: mpsc::WeakSender<Command>,
}

impl SyncEngine {
    /// Loads pending items from `store` and spawns the actor.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        store: Arc<DurableStore>,
        remote: Arc<dyn RemoteMutationService>,
        config: &SyncConfig,
    ) -> Result<SyncHandle> {
        config.validate()?;
        let queue = SyncQueue::from_items(store.load_pending_sync_items()?);
        let status = StatusPublisher::new(StatusSnapshot {
            pending_count: queue.len(),
            ..Default::default()
        });

        let (tx, rx) = mpsc::channel(config.command_buffer);
        let policy = RetryPolicy {
            max_retries: config.max_retries,
        };
        let engine = SyncEngine {
            processor: SyncProcessor::new(Arc::clone(&store), remote, policy),
            store,
            queue,
            monitor: ConnectivityMonitor::new(),
            retry_delay: config.retry_delay(),
            retry_timer: None,
            retry_generation: 0,
            in_flight: None,
            commands: tx.downgrade(),
            status,
        };
        let handle = SyncHandle {
            commands: tx,
            status: engine.status.subscribe(),
        };

        info!(pending = engine.queue.len(), "sync engine started");
        tokio::spawn(engine.run(rx));
        Ok(handle)
    }

    async fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        loop {
            tokio::select! {
                joined = join_pass(&mut self.in_flight) => self.finish_pass(joined),
                command = rx.recv() => match command {
                    Some(Command::Shutdown { reply }) => {
                        self.stop().await;
                        // Release the store before acknowledging.
                        drop(self);
                        let _ = reply.send(());
                        return;
                    }
                    Some(command) => self.handle(command),
                    None => {
                        self.stop().await;
                        return;
                    }
                },
            }
        }
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Enqueue { item, reply } => {
                let result = self.enqueue(item);
                let accepted = result.is_ok();
                let _ = reply.send(result);
                if accepted && self.monitor.is_online() {
                    self.request_pass("enqueue");
                }
            }
            Command::PathUpdate(path) => {
                let transition = self.monitor.observe(&path);
                self.status
                    .set_connectivity(self.monitor.is_online(), self.monitor.connection_type());
                match transition {
                    Transition::CameOnline => {
                        info!(connection = ?self.monitor.connection_type(), "network available");
                        self.request_pass("connectivity");
                    }
                    Transition::WentOffline => info!("network lost"),
                    Transition::InterfaceChanged | Transition::Unchanged => {}
                }
            }
            Command::SyncNow => self.request_pass("manual"),
            Command::RetryFired(generation) => {
                if generation != self.retry_generation || self.retry_timer.is_none() {
                    debug!(generation, "ignoring stale retry timer");
                    return;
                }
                self.retry_timer = None;
                self.request_pass("retry timer");
            }
            Command::Shutdown { .. } => {}
        }
    }

    fn enqueue(&mut self, item: SyncItem) -> Result<()> {
        self.store.save_sync_item(&item)?;
        debug!(id = %item.id, kind = %item.kind, action = %item.action, "enqueued");
        self.queue.push(item);
        self.status.set_pending_count(self.queue.len());
        Ok(())
    }

    /// Starts a pass if none is running, the queue has items and the device
    /// is online.
    fn request_pass(&mut self, trigger: &'static str) {
        if self.in_flight.is_some() {
            debug!(trigger, "pass already running");
            return;
        }
        if self.queue.is_empty() {
            debug!(trigger, "queue empty");
            return;
        }
        if !self.monitor.is_online() {
            debug!(trigger, "offline, deferring pass");
            return;
        }

        self.cancel_retry();
        let snapshot = self.queue.snapshot();
        let snapshot_ids = snapshot.iter().map(|item| item.id.clone()).collect();
        self.status.set_sync_status(SyncStatus::Syncing);
        info!(trigger, items = snapshot.len(), "starting sync pass");

        let processor = self.processor.clone();
        let handle = tokio::spawn(async move { processor.run_pass(snapshot).await });
        self.in_flight = Some(InFlightPass {
            handle,
            snapshot_ids,
        });
    }

    fn finish_pass(&mut self, joined: std::result::Result<PassOutcome, JoinError>) {
        let Some(pass) = self.in_flight.take() else {
            return;
        };

        let report = match joined {
            Ok(outcome) => {
                self.queue
                    .replace_after_pass(outcome.retained, &pass.snapshot_ids);
                Some(outcome.report)
            }
            Err(e) => {
                warn!(error = %e, "sync pass aborted, reloading queue from disk");
                match self.store.load_pending_sync_items() {
                    Ok(items) => self.queue = SyncQueue::from_items(items),
                    Err(e) => warn!(error = %e, "failed to reload sync queue"),
                }
                None
            }
        };

        let pending = self.queue.len();
        let sync_status = if pending == 0 {
            SyncStatus::Completed
        } else {
            SyncStatus::Failed
        };
        self.status.update(|s| {
            s.pending_count = pending;
            s.sync_status = sync_status;
            s.passes += 1;
            if report.is_some() {
                s.last_report = report;
            }
        });

        if pending > 0 {
            self.schedule_retry();
        }
    }

    /// Arms the single retry timer, replacing any previous one.
    fn schedule_retry(&mut self) {
        self.cancel_retry();
        self.retry_generation += 1;

        let generation = self.retry_generation;
        let token = CancellationToken::new();
        let cancel = token.clone();
        let commands = self.commands.clone();
        let delay = self.retry_delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if let Some(tx) = commands.upgrade() {
                        let _ = tx.send(Command::RetryFired(generation)).await;
                    }
                }
            }
        });

        debug!(delay_secs = delay.as_secs(), "retry scheduled");
        self.retry_timer = Some(token);
    }

    fn cancel_retry(&mut self) {
        if let Some(token) = self.retry_timer.take() {
            token.cancel();
        }
    }

    async fn stop(&mut self) {
        if self.in_flight.is_some() {
            let joined = join_pass(&mut self.in_flight).await;
            self.finish_pass(joined);
        }
        self.cancel_retry();
        info!(pending = self.queue.len(), "sync engine stopped");
    }
}

/// Waits for the running pass, or forever if there is none.
async fn join_pass(
    in_flight: &mut Option<InFlightPass>,
) -> std::result::Result<PassOutcome, JoinError> {
    match in_flight {
        Some(pass) => (&mut pass.handle).await,
        None => std::future::pending().await,
    }
}
