// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! lvsync: maintenance tool for a Leavn offline sync storage root.
//!
//! Reads the same on-disk layout the app's sync engine writes. The store lock
//! keeps it from running against a root the app currently has open.

mod cli;
mod commands;
pub mod error;

pub use cli::{Cli, Command, OutputFormat};
pub use error::{Error, Result};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs a stderr logger. `verbose` switches from warnings to debug output.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn run(cli: Cli) -> Result<()> {
    let root = commands::resolve_root(cli.root)?;
    match cli.command {
        Command::Pending { output } => commands::pending::run(&root, output),
        Command::Passages { output } => commands::passages::run(&root, output),
        Command::RemovePassage { reference } => commands::passages::remove(&root, &reference),
        Command::Config => commands::config::run(&root),
        Command::Drop { id } => commands::drop::run(&root, &id),
    }
}
