// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::provider::ProviderError;

/// All possible errors that can occur in the leavn-sync library.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] lv_core::Error),

    #[error("invalid config: {0}\n  hint: check config.toml in the storage root")]
    Config(String),

    #[error("passage provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("sync engine has stopped")]
    EngineStopped,

    #[error("no storage root available\n  hint: pass a storage root explicitly")]
    NoStorageRoot,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
