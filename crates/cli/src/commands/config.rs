// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use leavn_sync::SyncConfig;

use crate::error::Result;

/// Prints the config the engine would run with for `root`.
pub fn run(root: &Path) -> Result<()> {
    let config = SyncConfig::load(root)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
