// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test doubles for the remote service and the passage provider.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use lv_core::{AudioClip, AudioFormat, Bookmark, GroupAction, Highlight, Mutation, Note, Prayer};

use crate::provider::{PassageProvider, ProviderError, ProviderFuture};
use crate::remote::{RemoteError, RemoteFuture, RemoteMutationService};

/// Remote service that records every call and fails on demand.
#[derive(Default)]
pub struct MockRemote {
    calls: Mutex<Vec<String>>,
    /// Remaining failures per entity id. `u32::MAX` fails forever.
    failures: Mutex<HashMap<String, u32>>,
    latency: Mutex<Option<Duration>>,
}

impl MockRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail the next `n` calls for `id`.
    pub fn fail_times(&self, id: &str, n: u32) {
        self.failures.lock().unwrap().insert(id.to_string(), n);
    }

    /// Fail every call for `id`.
    pub fn fail_always(&self, id: &str) {
        self.fail_times(id, u32::MAX);
    }

    /// Makes every call take `latency` to complete.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    /// Calls made so far, formatted as `<operation>:<id>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, id: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.ends_with(&format!(":{}", id)))
            .count()
    }

    fn record(&self, operation: &str, id: &str) -> RemoteFuture<'static> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", operation, id));

        let mut failures = self.failures.lock().unwrap();
        let result = match failures.get_mut(id) {
            Some(remaining) if *remaining > 0 => {
                if *remaining != u32::MAX {
                    *remaining -= 1;
                }
                Err(RemoteError::Network("connection reset".to_string()))
            }
            _ => Ok(()),
        };
        let latency = *self.latency.lock().unwrap();
        Box::pin(async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            result
        })
    }
}

impl RemoteMutationService for MockRemote {
    fn create_prayer<'a>(&'a self, prayer: &'a Prayer) -> RemoteFuture<'a> {
        self.record("create_prayer", &prayer.id)
    }
    fn update_prayer<'a>(&'a self, prayer: &'a Prayer) -> RemoteFuture<'a> {
        self.record("update_prayer", &prayer.id)
    }
    fn delete_prayer<'a>(&'a self, id: &'a str) -> RemoteFuture<'a> {
        self.record("delete_prayer", id)
    }

    fn create_group_action<'a>(&'a self, action: &'a GroupAction) -> RemoteFuture<'a> {
        self.record("create_group_action", &action.id)
    }
    fn update_group_action<'a>(&'a self, action: &'a GroupAction) -> RemoteFuture<'a> {
        self.record("update_group_action", &action.id)
    }
    fn delete_group_action<'a>(&'a self, id: &'a str) -> RemoteFuture<'a> {
        self.record("delete_group_action", id)
    }

    fn create_bookmark<'a>(&'a self, bookmark: &'a Bookmark) -> RemoteFuture<'a> {
        self.record("create_bookmark", &bookmark.id)
    }
    fn update_bookmark<'a>(&'a self, bookmark: &'a Bookmark) -> RemoteFuture<'a> {
        self.record("update_bookmark", &bookmark.id)
    }
    fn delete_bookmark<'a>(&'a self, id: &'a str) -> RemoteFuture<'a> {
        self.record("delete_bookmark", id)
    }

    fn create_note<'a>(&'a self, note: &'a Note) -> RemoteFuture<'a> {
        self.record("create_note", &note.id)
    }
    fn update_note<'a>(&'a self, note: &'a Note) -> RemoteFuture<'a> {
        self.record("update_note", &note.id)
    }
    fn delete_note<'a>(&'a self, id: &'a str) -> RemoteFuture<'a> {
        self.record("delete_note", id)
    }

    fn create_highlight<'a>(&'a self, highlight: &'a Highlight) -> RemoteFuture<'a> {
        self.record("create_highlight", &highlight.id)
    }
    fn update_highlight<'a>(&'a self, highlight: &'a Highlight) -> RemoteFuture<'a> {
        self.record("update_highlight", &highlight.id)
    }
    fn delete_highlight<'a>(&'a self, id: &'a str) -> RemoteFuture<'a> {
        self.record("delete_highlight", id)
    }
}

/// Provider serving a fixed set of passages.
#[derive(Default)]
pub struct MockProvider {
    texts: HashMap<String, String>,
    audio_fails: bool,
    fetches: AtomicUsize,
    syntheses: AtomicUsize,
}

impl MockProvider {
    pub fn with_passage(mut self, reference: &str, text: &str) -> Self {
        self.texts.insert(reference.to_string(), text.to_string());
        self
    }

    pub fn with_failing_audio(mut self) -> Self {
        self.audio_fails = true;
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn syntheses(&self) -> usize {
        self.syntheses.load(Ordering::SeqCst)
    }
}

impl PassageProvider for MockProvider {
    fn fetch_text<'a>(&'a self, reference: &'a str) -> ProviderFuture<'a, String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let result = self
            .texts
            .get(reference)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(reference.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn synthesize_audio<'a>(
        &'a self,
        text: &'a str,
        _voice: &'a str,
    ) -> ProviderFuture<'a, AudioClip> {
        self.syntheses.fetch_add(1, Ordering::SeqCst);
        let result = if self.audio_fails {
            Err(ProviderError::Synthesis("voice unavailable".to_string()))
        } else {
            Ok(AudioClip {
                bytes: text.as_bytes().repeat(4),
                format: AudioFormat::Mp3,
            })
        };
        Box::pin(std::future::ready(result))
    }
}

pub fn bookmark(id: &str) -> Mutation {
    Mutation::Bookmark(Bookmark {
        id: id.to_string(),
        reference: "John 3:16".to_string(),
        label: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
    })
}

pub fn prayer(id: &str) -> Mutation {
    Mutation::Prayer(Prayer {
        id: id.to_string(),
        title: "Strength".to_string(),
        body: "For the week ahead".to_string(),
        is_answered: false,
        created_at: Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
    })
}

pub fn note(id: &str) -> Mutation {
    Mutation::Note(Note {
        id: id.to_string(),
        reference: "Psalm 46:10".to_string(),
        content: "Be still".to_string(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 11, 7, 0, 0).unwrap(),
    })
}
