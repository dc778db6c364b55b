// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const QUICKSTART_HELP: &str = "\
Examples:
  lvsync pending                      List mutations waiting for the server
  lvsync passages -o json             List cached passages as JSON
  lvsync drop sync-1a2b3c4d5e6f7a8b   Discard a stuck mutation
  lvsync remove-passage \"John 3:16\"   Evict a cached passage";

#[derive(Parser, Debug)]
#[command(name = "lvsync")]
#[command(about = "Inspect and repair a Leavn offline sync storage root")]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Storage root (defaults to the app's local data directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List sync items waiting to be applied
    Pending {
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// List passages cached for offline reading
    Passages {
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Remove a cached passage by reference
    RemovePassage {
        /// Passage reference, e.g. "John 3:16"
        reference: String,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Discard a pending sync item without applying it
    Drop {
        /// Sync item id
        id: String,
    },
}
