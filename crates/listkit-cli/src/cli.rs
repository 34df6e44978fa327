//! CLI argument definitions for listkit.
//!
//! # Commands
//!
//! | Command | Screen |
//! |---------|--------|
//! | `contacts` | Contacts, cached for premium users |
//! | `instruments` | Payment instruments |
//! | `sent` | Sent transfers |
//! | `received` | Received transfers |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--mock` | `false` | Serve built-in fixtures instead of the network |
//! | `--premium` | `false` | Treat the user as entitled to cached contacts |
//! | `--base-url` | `LISTKIT_API_BASE_URL` | Records API base URL |
//! | `--cache-db` | in memory | DuckDB file for the contact cache |
//! | `--timeout-ms` | `3000` | Per-request timeout |
//!
//! # Examples
//!
//! ```bash
//! listkit --mock sent --format table
//! listkit --mock --premium --cache-db ~/.listkit/cache.duckdb contacts --select 0
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use listkit_core::Screen;

/// listkit - load list screens from the records API
#[derive(Debug, Parser)]
#[command(
    name = "listkit",
    author,
    version,
    about = "Load contacts, instruments and transfers as display rows"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve every API from built-in fixtures.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Treat the user as premium: contacts are cached and used as fallback.
    #[arg(long, global = true, default_value_t = false)]
    pub premium: bool,

    /// Records API base URL; overrides LISTKIT_API_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Persist the contact cache in this DuckDB file.
    #[arg(long, global = true)]
    pub cache_db: Option<PathBuf>,

    /// Per-request timeout in milliseconds; overrides LISTKIT_TIMEOUT_MS.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List contacts.
    Contacts(ListArgs),
    /// List payment instruments.
    Instruments(ListArgs),
    /// List sent transfers.
    Sent(ListArgs),
    /// List received transfers.
    Received(ListArgs),
}

impl Command {
    pub const fn screen(&self) -> Screen {
        match self {
            Self::Contacts(_) => Screen::Contacts,
            Self::Instruments(_) => Screen::Instruments,
            Self::Sent(_) => Screen::SentTransfers,
            Self::Received(_) => Screen::ReceivedTransfers,
        }
    }

    pub const fn args(&self) -> &ListArgs {
        match self {
            Self::Contacts(args)
            | Self::Instruments(args)
            | Self::Sent(args)
            | Self::Received(args) => args,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Select the row at this zero-based index after loading.
    #[arg(long, value_name = "INDEX")]
    pub select: Option<usize>,
}
