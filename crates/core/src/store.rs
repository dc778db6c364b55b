// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed persistence for sync items and offline passages.
//!
//! Layout under the storage root:
//!
//! ```text
//! SyncQueue/<item-id>.json
//! OfflinePassages/<passage-id>/text.txt
//! OfflinePassages/<passage-id>/audio.<ext>
//! OfflinePassages/<passage-id>/metadata.json
//! .lock
//! ```
//!
//! Every JSON document is written to a temp file, fsynced and renamed into
//! place, so a crash never leaves a half-written item behind.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;

use crate::error::{Error, Result};
use crate::id::{generate_id, is_valid_id, PASSAGE_PREFIX};
use crate::item::SyncItem;
use crate::passage::{AudioClip, OfflinePassage, PassageMetadata};

/// Directory holding one JSON file per pending sync item.
pub const SYNC_QUEUE_DIR: &str = "SyncQueue";
/// Directory holding one sub-directory per cached passage.
pub const PASSAGES_DIR: &str = "OfflinePassages";

const LOCK_NAME: &str = ".lock";
const TEXT_FILE: &str = "text.txt";
const METADATA_FILE: &str = "metadata.json";
const AUDIO_STEM: &str = "audio";
const JSON_EXT: &str = "json";
const TMP_EXT: &str = "tmp";

/// Durable store rooted at an app-private directory.
///
/// Holds an exclusive lock on the root for its whole lifetime.
pub struct DurableStore {
    root: PathBuf,
    sync_dir: PathBuf,
    passages_dir: PathBuf,
    _lock: File,
}

impl std::fmt::Debug for DurableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableStore")
            .field("root", &self.root)
            .finish()
    }
}

impl DurableStore {
    /// Opens (creating if needed) the store at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreLocked`] if another store already owns `root`.
    pub fn open(root: &Path) -> Result<Self> {
        let sync_dir = root.join(SYNC_QUEUE_DIR);
        let passages_dir = root.join(PASSAGES_DIR);
        fs::create_dir_all(&sync_dir)?;
        fs::create_dir_all(&passages_dir)?;

        let lock = acquire_lock(&root.join(LOCK_NAME))
            .map_err(|_| Error::StoreLocked(root.display().to_string()))?;

        let store = DurableStore {
            root: root.to_path_buf(),
            sync_dir,
            passages_dir,
            _lock: lock,
        };
        store.purge_stale_temp_files();
        Ok(store)
    }

    /// The storage root this store was opened on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ---------------------------------------------------------------------
    // Sync items
    // ---------------------------------------------------------------------

    fn sync_item_path(&self, id: &str) -> Result<PathBuf> {
        if !is_valid_id(id) {
            return Err(Error::InvalidInput(format!("invalid sync item id: '{}'", id)));
        }
        Ok(self.sync_dir.join(format!("{}.{}", id, JSON_EXT)))
    }

    /// Writes `item`, replacing any item with the same id.
    pub fn save_sync_item(&self, item: &SyncItem) -> Result<()> {
        let path = self.sync_item_path(&item.id)?;
        let json = serde_json::to_vec_pretty(item)?;
        write_atomic(&path, &json)
    }

    /// Removes the item's file. Missing files and removal errors are ignored.
    pub fn delete_sync_item(&self, id: &str) {
        let path = match self.sync_item_path(id) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("not deleting sync item: {}", e);
                return;
            }
        };
        remove_file_quietly(&path);
    }

    /// Returns whether an item with `id` is stored.
    pub fn contains_sync_item(&self, id: &str) -> bool {
        self.sync_item_path(id).map(|p| p.exists()).unwrap_or(false)
    }

    /// Loads every stored item, oldest first.
    ///
    /// Unparseable files are skipped with a warning, as are files whose
    /// name does not match the item's id.
    pub fn load_pending_sync_items(&self) -> Result<Vec<SyncItem>> {
        let mut items = Vec::new();

        for entry in fs::read_dir(&self.sync_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(JSON_EXT) {
                continue;
            }

            let bytes = match fs::read(&path) {
                Ok(b) => b,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            let item = match serde_json::from_slice::<SyncItem>(&bytes) {
                Ok(item) => item,
                Err(e) => {
                    tracing::warn!("skipping corrupt sync item {}: {}", path.display(), e);
                    continue;
                }
            };

            let stem = path.file_stem().and_then(|s| s.to_str());
            if !is_valid_id(&item.id) || stem != Some(item.id.as_str()) {
                tracing::warn!(
                    "skipping sync item {}: file name does not match id '{}'",
                    path.display(),
                    item.id
                );
                continue;
            }
            items.push(item);
        }

        items.sort_by(SyncItem::queue_order);
        Ok(items)
    }

    /// Number of items currently stored.
    pub fn pending_count(&self) -> Result<usize> {
        Ok(self.load_pending_sync_items()?.len())
    }

    // ---------------------------------------------------------------------
    // Offline passages
    // ---------------------------------------------------------------------

    /// Caches `text` (and optional narration) for `reference`.
    ///
    /// Any existing entry for the same reference is replaced. The old entry
    /// is only removed once the new one is fully written.
    pub fn save_passage(
        &self,
        reference: &str,
        text: &str,
        audio: Option<&AudioClip>,
    ) -> Result<OfflinePassage> {
        if reference.trim().is_empty() {
            return Err(Error::InvalidInput("passage reference is empty".to_string()));
        }

        let downloaded_at = Utc::now();
        let id = generate_id(PASSAGE_PREFIX, reference, &downloaded_at);
        self.replace_passage(&id, reference, text, audio, downloaded_at)
    }

    /// Writes the entry `id` for `reference`, then prunes older entries.
    fn replace_passage(
        &self,
        id: &str,
        reference: &str,
        text: &str,
        audio: Option<&AudioClip>,
        downloaded_at: DateTime<Utc>,
    ) -> Result<OfflinePassage> {
        let dir = self.passages_dir.join(id);

        let written = self.write_passage_files(&dir, text, audio);
        let (size_in_bytes, audio_path) = match written {
            Ok(v) => v,
            Err(e) => {
                remove_dir_quietly(&dir);
                return Err(e);
            }
        };

        let metadata = PassageMetadata {
            id: id.to_string(),
            reference: reference.to_string(),
            audio_available: audio.is_some(),
            audio_format: audio.map(|a| a.format),
            downloaded_at,
            size_in_bytes,
        };
        let json = serde_json::to_vec_pretty(&metadata)?;
        if let Err(e) = write_atomic(&dir.join(METADATA_FILE), &json) {
            remove_dir_quietly(&dir);
            return Err(e);
        }

        self.remove_passages(reference, Some(id));

        Ok(OfflinePassage {
            id: id.to_string(),
            reference: reference.to_string(),
            text: text.to_string(),
            audio_path,
            downloaded_at,
            size_in_bytes,
        })
    }

    /// Writes text and audio into `dir` and returns the summed file sizes.
    fn write_passage_files(
        &self,
        dir: &Path,
        text: &str,
        audio: Option<&AudioClip>,
    ) -> Result<(u64, Option<PathBuf>)> {
        fs::create_dir_all(dir)?;

        let text_path = dir.join(TEXT_FILE);
        write_atomic(&text_path, text.as_bytes())?;
        let mut size = fs::metadata(&text_path)?.len();

        let audio_path = match audio {
            Some(clip) => {
                let path = dir.join(format!("{}.{}", AUDIO_STEM, clip.format.extension()));
                write_atomic(&path, &clip.bytes)?;
                size += fs::metadata(&path)?.len();
                Some(path)
            }
            None => None,
        };

        Ok((size, audio_path))
    }

    /// Finds the cached passage for `reference`, if any.
    pub fn get_passage(&self, reference: &str) -> Result<Option<OfflinePassage>> {
        for (dir, metadata) in self.scan_metadata()? {
            if metadata.reference == reference {
                return self.load_passage(&dir, metadata).map(Some);
            }
        }
        Ok(None)
    }

    /// Removes every cached entry for `reference`.
    ///
    /// Returns whether anything was removed. Errors are logged, not returned.
    pub fn delete_passage(&self, reference: &str) -> bool {
        self.remove_passages(reference, None)
    }

    /// Removes the entries for `reference`, sparing the one with id `keep`.
    fn remove_passages(&self, reference: &str, keep: Option<&str>) -> bool {
        let entries = match self.scan_metadata() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("failed to scan offline passages: {}", e);
                return false;
            }
        };

        let mut removed = false;
        for (dir, metadata) in entries {
            if metadata.reference == reference && Some(metadata.id.as_str()) != keep {
                remove_dir_quietly(&dir);
                removed = true;
            }
        }
        removed
    }

    /// Loads every cached passage, oldest download first.
    pub fn all_passages(&self) -> Result<Vec<OfflinePassage>> {
        let mut passages = Vec::new();
        for (dir, metadata) in self.scan_metadata()? {
            match self.load_passage(&dir, metadata) {
                Ok(p) => passages.push(p),
                Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!("skipping incomplete passage {}", dir.display());
                }
                Err(e) => return Err(e),
            }
        }
        passages.sort_by(|a, b| {
            a.downloaded_at
                .cmp(&b.downloaded_at)
                .then_with(|| a.reference.cmp(&b.reference))
        });
        Ok(passages)
    }

    /// Total bytes recorded for all cached passages.
    pub fn cache_size(&self) -> Result<u64> {
        Ok(self
            .scan_metadata()?
            .iter()
            .map(|(_, m)| m.size_in_bytes)
            .sum())
    }

    fn load_passage(&self, dir: &Path, metadata: PassageMetadata) -> Result<OfflinePassage> {
        let text = fs::read_to_string(dir.join(TEXT_FILE))?;
        let audio_path = if metadata.audio_available {
            match metadata.audio_format {
                Some(format) => Some(dir.join(format!("{}.{}", AUDIO_STEM, format.extension()))),
                None => find_audio_file(dir)?,
            }
        } else {
            None
        };

        Ok(OfflinePassage {
            id: metadata.id,
            reference: metadata.reference,
            text,
            audio_path,
            downloaded_at: metadata.downloaded_at,
            size_in_bytes: metadata.size_in_bytes,
        })
    }

    /// Reads every passage directory's metadata sidecar.
    ///
    /// Directories without a sidecar, or with an unparseable one, are skipped.
    fn scan_metadata(&self) -> Result<Vec<(PathBuf, PassageMetadata)>> {
        let mut found = Vec::new();

        for entry in fs::read_dir(&self.passages_dir)? {
            let dir = entry?.path();
            if !dir.is_dir() {
                continue;
            }

            let bytes = match fs::read(dir.join(METADATA_FILE)) {
                Ok(b) => b,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            match serde_json::from_slice::<PassageMetadata>(&bytes) {
                Ok(metadata) => found.push((dir, metadata)),
                Err(e) => {
                    tracing::warn!("skipping corrupt passage metadata {}: {}", dir.display(), e);
                }
            }
        }

        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }

    /// Removes `*.tmp` files left behind by interrupted writes.
    fn purge_stale_temp_files(&self) {
        let mut dirs = vec![self.sync_dir.clone()];
        if let Ok(entries) = fs::read_dir(&self.passages_dir) {
            dirs.extend(entries.flatten().map(|e| e.path()).filter(|p| p.is_dir()));
        }

        for dir in dirs {
            let Ok(entries) = fs::read_dir(&dir) else {
                continue;
            };
            for path in entries.flatten().map(|e| e.path()) {
                if path.extension().and_then(|e| e.to_str()) == Some(TMP_EXT) {
                    tracing::debug!("removing stale temp file {}", path.display());
                    remove_file_quietly(&path);
                }
            }
        }
    }
}

fn acquire_lock(lock_path: &Path) -> std::io::Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(lock_path)?;
    file.try_lock_exclusive()?;
    Ok(file)
}

/// Writes `bytes` to a sibling temp file, fsyncs it, then renames it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension(TMP_EXT);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    if let Err(e) = fs::rename(&tmp, path) {
        remove_file_quietly(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn find_audio_file(dir: &Path) -> Result<Option<PathBuf>> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.file_stem().and_then(|s| s.to_str()) == Some(AUDIO_STEM) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

fn remove_file_quietly(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("failed to remove {}: {}", path.display(), e),
    }
}

fn remove_dir_quietly(path: &Path) {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("failed to remove {}: {}", path.display(), e),
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
