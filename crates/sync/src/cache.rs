// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline passage cache.
//!
//! Downloads go through the [`PassageProvider`]. Everything else reads the
//! durable store only.

use std::sync::Arc;

use lv_core::{DurableStore, OfflinePassage};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::SyncConfig;
use crate::error::Result;
use crate::provider::PassageProvider;

/// Passage text and narration kept for disconnected reading.
pub struct OfflineCache {
    store: Arc<DurableStore>,
    provider: Arc<dyn PassageProvider>,
    voice: String,
    download_audio: bool,
    /// Serializes writes to the passage directory.
    write_lock: Mutex<()>,
}

impl OfflineCache {
    pub fn new(
        store: Arc<DurableStore>,
        provider: Arc<dyn PassageProvider>,
        config: &SyncConfig,
    ) -> Self {
        OfflineCache {
            store,
            provider,
            voice: config.voice.clone(),
            download_audio: config.download_audio,
            write_lock: Mutex::new(()),
        }
    }

    /// Fetches `reference` and caches it, replacing any previous copy.
    ///
    /// A failed narration is logged and the text is cached on its own.
    pub async fn download(&self, reference: &str) -> Result<OfflinePassage> {
        if reference.trim().is_empty() {
            return Err(lv_core::Error::InvalidInput("passage reference is empty".to_string()).into());
        }

        let text = self.provider.fetch_text(reference).await?;
        let audio = if self.download_audio {
            match self.provider.synthesize_audio(&text, &self.voice).await {
                Ok(clip) => Some(clip),
                Err(e) => {
                    warn!(reference, error = %e, "narration unavailable, caching text only");
                    None
                }
            }
        } else {
            None
        };

        let _guard = self.write_lock.lock().await;
        let passage = self.store.save_passage(reference, &text, audio.as_ref())?;
        info!(
            reference,
            bytes = passage.size_in_bytes,
            audio = passage.audio_path.is_some(),
            "passage cached"
        );
        Ok(passage)
    }

    pub async fn get(&self, reference: &str) -> Result<Option<OfflinePassage>> {
        Ok(self.store.get_passage(reference)?)
    }

    /// Returns whether a cached copy existed.
    pub async fn delete(&self, reference: &str) -> bool {
        let _guard = self.write_lock.lock().await;
        self.store.delete_passage(reference)
    }

    pub async fn list_all(&self) -> Result<Vec<OfflinePassage>> {
        Ok(self.store.all_passages()?)
    }

    /// Bytes used by all cached passages.
    pub async fn total_size(&self) -> Result<u64> {
        Ok(self.store.cache_size()?)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
