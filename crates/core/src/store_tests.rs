// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::item::SyncKind;
use crate::passage::AudioFormat;
use chrono::TimeZone;
use tempfile::tempdir;

fn item_at(secs: i64) -> SyncItem {
    let mut item = SyncItem::delete_by_id(SyncKind::Prayer, &format!("pr-{}", secs)).unwrap();
    item.created_at = chrono::Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
    item
}

#[test]
fn open_creates_layout() {
    let dir = tempdir().unwrap();
    let _store = DurableStore::open(dir.path()).unwrap();
    assert!(dir.path().join(SYNC_QUEUE_DIR).is_dir());
    assert!(dir.path().join(PASSAGES_DIR).is_dir());
}

#[test]
fn second_open_on_same_root_is_locked() {
    let dir = tempdir().unwrap();
    let _store = DurableStore::open(dir.path()).unwrap();
    assert!(matches!(
        DurableStore::open(dir.path()),
        Err(Error::StoreLocked(_))
    ));
}

#[test]
fn lock_is_released_on_drop() {
    let dir = tempdir().unwrap();
    drop(DurableStore::open(dir.path()).unwrap());
    assert!(DurableStore::open(dir.path()).is_ok());
}

#[test]
fn save_writes_one_file_per_item() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let item = item_at(1);

    store.save_sync_item(&item).unwrap();

    let file = dir.path().join(SYNC_QUEUE_DIR).join(format!("{}.json", item.id));
    assert!(file.is_file());
    assert!(store.contains_sync_item(&item.id));
}

#[test]
fn save_overwrites_existing_item() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let mut item = item_at(1);
    store.save_sync_item(&item).unwrap();

    item.retry_count = 2;
    store.save_sync_item(&item).unwrap();

    let loaded = store.load_pending_sync_items().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].retry_count, 2);
}

#[test]
fn delete_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let item = item_at(1);
    store.save_sync_item(&item).unwrap();

    store.delete_sync_item(&item.id);
    store.delete_sync_item(&item.id);

    assert!(!store.contains_sync_item(&item.id));
    assert_eq!(store.pending_count().unwrap(), 0);
}

#[test]
fn load_orders_by_created_at() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let (a, b, c) = (item_at(30), item_at(10), item_at(20));
    for item in [&a, &b, &c] {
        store.save_sync_item(item).unwrap();
    }

    let ids: Vec<_> = store
        .load_pending_sync_items()
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec![b.id, c.id, a.id]);
}

#[test]
fn load_skips_corrupt_and_foreign_files() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    store.save_sync_item(&item_at(1)).unwrap();

    let queue_dir = dir.path().join(SYNC_QUEUE_DIR);
    std::fs::write(queue_dir.join("sync-bad.json"), "{ not json").unwrap();
    std::fs::write(queue_dir.join("README"), "ignore me").unwrap();

    assert_eq!(store.load_pending_sync_items().unwrap().len(), 1);
}

#[test]
fn load_skips_file_copied_under_another_name() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let item = item_at(1);
    store.save_sync_item(&item).unwrap();

    let queue_dir = dir.path().join(SYNC_QUEUE_DIR);
    let original = queue_dir.join(format!("{}.json", item.id));
    std::fs::copy(&original, queue_dir.join("copy.json")).unwrap();
    std::fs::copy(&original, queue_dir.join("sync-0000000000000000.json")).unwrap();

    let loaded = store.load_pending_sync_items().unwrap();
    assert_eq!(loaded, vec![item.clone()]);

    store.delete_sync_item(&item.id);
    assert!(store.load_pending_sync_items().unwrap().is_empty());
}

#[test]
fn load_skips_item_with_invalid_id() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    store.save_sync_item(&item_at(1)).unwrap();

    let mut upper = item_at(2);
    upper.id = "SYNC-UPPER".to_string();
    let json = serde_json::to_vec_pretty(&upper).unwrap();
    std::fs::write(dir.path().join(SYNC_QUEUE_DIR).join("SYNC-UPPER.json"), json).unwrap();

    let loaded = store.load_pending_sync_items().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_ne!(loaded[0].id, "SYNC-UPPER");
}

#[test]
fn reload_reconstructs_identical_queue() {
    let dir = tempdir().unwrap();
    let before = {
        let store = DurableStore::open(dir.path()).unwrap();
        for secs in [5, 1, 3] {
            let mut item = item_at(secs);
            item.retry_count = (secs % 3) as u32;
            store.save_sync_item(&item).unwrap();
        }
        store.load_pending_sync_items().unwrap()
    };

    let store = DurableStore::open(dir.path()).unwrap();
    assert_eq!(store.load_pending_sync_items().unwrap(), before);
}

#[test]
fn open_removes_stale_temp_files() {
    let dir = tempdir().unwrap();
    let queue_dir = dir.path().join(SYNC_QUEUE_DIR);
    std::fs::create_dir_all(&queue_dir).unwrap();
    std::fs::write(queue_dir.join("sync-0001.tmp"), "partial").unwrap();

    let _store = DurableStore::open(dir.path()).unwrap();
    assert!(!queue_dir.join("sync-0001.tmp").exists());
}

#[test]
fn invalid_item_id_is_rejected() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let mut item = item_at(1);
    item.id = "../escape".to_string();
    assert!(matches!(
        store.save_sync_item(&item),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn passage_round_trip() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let text = "For God so loved the world";

    let saved = store.save_passage("John 3:16", text, None).unwrap();
    let loaded = store.get_passage("John 3:16").unwrap().unwrap();

    assert_eq!(loaded.text, text);
    assert_eq!(loaded.size_in_bytes, text.len() as u64);
    assert_eq!(loaded.id, saved.id);
    assert!(loaded.audio_path.is_none());
}

#[test]
fn passage_with_audio_counts_both_files() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let clip = AudioClip {
        bytes: vec![7u8; 256],
        format: AudioFormat::M4a,
    };

    let saved = store.save_passage("Psalm 23", "The Lord is my shepherd", Some(&clip)).unwrap();

    assert_eq!(saved.size_in_bytes, 23 + 256);
    let audio_path = saved.audio_path.unwrap();
    assert!(audio_path.ends_with("audio.m4a"));
    assert_eq!(std::fs::read(&audio_path).unwrap().len(), 256);

    let loaded = store.get_passage("Psalm 23").unwrap().unwrap();
    assert_eq!(loaded.audio_path, Some(audio_path));
}

#[test]
fn metadata_sidecar_uses_interchange_format() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let saved = store.save_passage("Genesis 1", "In the beginning", None).unwrap();

    let raw = std::fs::read_to_string(
        dir.path()
            .join(PASSAGES_DIR)
            .join(&saved.id)
            .join("metadata.json"),
    )
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["reference"], "Genesis 1");
    assert_eq!(json["audioAvailable"], false);
    assert_eq!(json["sizeInBytes"], 16);
    assert!(chrono::DateTime::parse_from_rfc3339(json["downloadedAt"].as_str().unwrap()).is_ok());
}

#[test]
fn saving_same_reference_twice_keeps_one_entry() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();

    store.save_passage("Romans 8", "old text", None).unwrap();
    store.save_passage("Romans 8", "new text", None).unwrap();

    let all = store.all_passages().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].text, "new text");
}

#[test]
fn failed_replacement_keeps_cached_passage() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    store.save_passage("Romans 8", "old text", None).unwrap();

    // A plain file where the new entry's directory would go
    std::fs::write(dir.path().join(PASSAGES_DIR).join("psg-blocked"), "").unwrap();
    let result = store.replace_passage("psg-blocked", "Romans 8", "new text", None, Utc::now());
    assert!(result.is_err());

    let kept = store.get_passage("Romans 8").unwrap().unwrap();
    assert_eq!(kept.text, "old text");
}

#[test]
fn replacement_prunes_older_entries_only_after_writing() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let old = store.save_passage("Romans 8", "old text", None).unwrap();
    let other = store.save_passage("Romans 9", "other", None).unwrap();

    let new = store
        .replace_passage("psg-replacement", "Romans 8", "new text", None, Utc::now())
        .unwrap();

    let passages_dir = dir.path().join(PASSAGES_DIR);
    assert!(!passages_dir.join(&old.id).exists());
    assert!(passages_dir.join(&new.id).exists());
    assert!(passages_dir.join(&other.id).exists());
    assert_eq!(store.get_passage("Romans 8").unwrap().unwrap().text, "new text");
}

#[test]
fn get_missing_passage_is_none() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    assert!(store.get_passage("Jude 1").unwrap().is_none());
}

#[test]
fn delete_passage_removes_directory() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    let saved = store.save_passage("Mark 1", "The beginning", None).unwrap();

    assert!(store.delete_passage("Mark 1"));
    assert!(!store.delete_passage("Mark 1"));
    assert!(!dir.path().join(PASSAGES_DIR).join(saved.id).exists());
    assert!(store.get_passage("Mark 1").unwrap().is_none());
}

#[test]
fn all_passages_skips_corrupt_metadata() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    store.save_passage("Luke 2", "And it came to pass", None).unwrap();

    let broken = dir.path().join(PASSAGES_DIR).join("psg-broken");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("metadata.json"), "garbage").unwrap();

    let all = store.all_passages().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].reference, "Luke 2");
}

#[test]
fn cache_size_sums_passages() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    store.save_passage("A 1", "1234", None).unwrap();
    store.save_passage("B 2", "123456", None).unwrap();
    assert_eq!(store.cache_size().unwrap(), 10);
}

#[test]
fn empty_reference_is_rejected() {
    let dir = tempdir().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    assert!(matches!(
        store.save_passage(" ", "text", None),
        Err(Error::InvalidInput(_))
    ));
}
