// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Application-facing entry point.

use std::path::Path;
use std::sync::Arc;

use lv_core::{DurableStore, Mutation, OfflinePassage, SyncAction, SyncItem, SyncKind};

use crate::cache::OfflineCache;
use crate::config::SyncConfig;
use crate::connectivity::NetworkPath;
use crate::error::Result;
use crate::provider::PassageProvider;
use crate::remote::RemoteMutationService;
use crate::status::{StatusReceiver, StatusSnapshot};
use crate::sync::{SyncEngine, SyncHandle};

/// Offline sync service for one storage root.
///
/// Owns the durable store, the passage cache and a running sync engine.
/// Construct it once at app start and share it.
pub struct OfflineSync {
    store: Arc<DurableStore>,
    cache: OfflineCache,
    engine: SyncHandle,
    config: SyncConfig,
}

impl OfflineSync {
    /// Opens `root` with the config found there (or the defaults).
    pub async fn open(
        root: &Path,
        remote: Arc<dyn RemoteMutationService>,
        provider: Arc<dyn PassageProvider>,
    ) -> Result<Self> {
        let config = SyncConfig::load(root)?;
        Self::with_config(root, remote, provider, config).await
    }

    pub async fn with_config(
        root: &Path,
        remote: Arc<dyn RemoteMutationService>,
        provider: Arc<dyn PassageProvider>,
        config: SyncConfig,
    ) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(DurableStore::open(root)?);
        let cache = OfflineCache::new(Arc::clone(&store), provider, &config);
        let engine = SyncEngine::start(Arc::clone(&store), remote, &config)?;
        Ok(OfflineSync {
            store,
            cache,
            engine,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    // Offline content

    pub async fn download_for_offline(&self, reference: &str) -> Result<OfflinePassage> {
        self.cache.download(reference).await
    }

    pub async fn get_offline(&self, reference: &str) -> Result<Option<OfflinePassage>> {
        self.cache.get(reference).await
    }

    pub async fn delete_offline(&self, reference: &str) -> bool {
        self.cache.delete(reference).await
    }

    pub async fn list_offline(&self) -> Result<Vec<OfflinePassage>> {
        self.cache.list_all().await
    }

    pub async fn offline_size(&self) -> Result<u64> {
        self.cache.total_size().await
    }

    // Mutations

    /// Records a mutation for the remote service and returns the queued item id.
    pub async fn enqueue(&self, mutation: &Mutation, action: SyncAction) -> Result<String> {
        let item = SyncItem::for_mutation(mutation, action)?;
        let id = item.id.clone();
        self.engine.enqueue(item).await?;
        Ok(id)
    }

    /// Records a delete when only the object's id is at hand.
    pub async fn enqueue_delete(&self, kind: SyncKind, id: &str) -> Result<String> {
        let item = SyncItem::delete_by_id(kind, id)?;
        let item_id = item.id.clone();
        self.engine.enqueue(item).await?;
        Ok(item_id)
    }

    // Engine

    pub async fn report_path(&self, path: NetworkPath) -> Result<()> {
        self.engine.report_path(path).await
    }

    pub async fn sync_now(&self) -> Result<()> {
        self.engine.sync_now().await
    }

    pub fn status(&self) -> StatusSnapshot {
        self.engine.status()
    }

    pub fn subscribe(&self) -> StatusReceiver {
        self.engine.subscribe()
    }

    /// Handle for feeding path updates or driving the engine elsewhere.
    pub fn handle(&self) -> SyncHandle {
        self.engine.clone()
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.engine.shutdown().await
    }
}

#[cfg(test)]
#[path = "offline_tests.rs"]
mod tests;
