// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Passage text and narration providers.

use std::future::Future;
use std::pin::Pin;

use lv_core::AudioClip;

/// Error type for provider operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The reference does not resolve to any text.
    #[error("passage not found: {0}")]
    NotFound(String),

    /// The provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// Text-to-speech failed.
    #[error("audio synthesis failed: {0}")]
    Synthesis(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = ProviderResult<T>> + Send + 'a>>;

/// Source of passage text and narration, used only when downloading.
pub trait PassageProvider: Send + Sync {
    /// Fetches the text for a book/chapter/verse reference.
    fn fetch_text<'a>(&'a self, reference: &'a str) -> ProviderFuture<'a, String>;

    /// Synthesizes narration for `text` with the given voice.
    fn synthesize_audio<'a>(&'a self, text: &'a str, voice: &'a str)
        -> ProviderFuture<'a, AudioClip>;
}
