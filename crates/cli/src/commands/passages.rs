// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use chrono::{DateTime, Utc};
use lv_core::OfflinePassage;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::{Error, Result};

use super::{format_size, open_store};

/// JSON representation of a cached passage. Text is left out.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PassageJson {
    id: String,
    reference: String,
    audio: bool,
    size_in_bytes: u64,
    downloaded_at: DateTime<Utc>,
}

impl From<&OfflinePassage> for PassageJson {
    fn from(p: &OfflinePassage) -> Self {
        PassageJson {
            id: p.id.clone(),
            reference: p.reference.clone(),
            audio: p.audio_path.is_some(),
            size_in_bytes: p.size_in_bytes,
            downloaded_at: p.downloaded_at,
        }
    }
}

pub fn run(root: &Path, output: OutputFormat) -> Result<()> {
    let store = open_store(root)?;
    let passages = store.all_passages()?;

    match output {
        OutputFormat::Text => {
            if passages.is_empty() {
                println!("No cached passages");
                return Ok(());
            }
            for passage in &passages {
                println!("{}", format_passage_line(passage));
            }
            println!("total: {}", format_size(store.cache_size()?));
        }
        OutputFormat::Json => {
            let json: Vec<PassageJson> = passages.iter().map(PassageJson::from).collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

pub fn remove(root: &Path, reference: &str) -> Result<()> {
    let store = open_store(root)?;
    if !store.delete_passage(reference) {
        return Err(Error::PassageNotFound(reference.to_string()));
    }
    println!("Removed {}", reference);
    Ok(())
}

pub(crate) fn format_passage_line(passage: &OfflinePassage) -> String {
    let media = if passage.audio_path.is_some() {
        "text+audio"
    } else {
        "text"
    };
    format!(
        "{}  {:<10} {:>10}  {}",
        passage.id,
        media,
        format_size(passage.size_in_bytes),
        passage.reference
    )
}

#[cfg(test)]
#[path = "passages_tests.rs"]
mod tests;
