//! CLI subcommand definitions

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Main CLI commands
#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Commands {
    /// Price token usage (default)
    Cost(CostArgs),
    /// Show which pricing record a model identifier resolves to
    Resolve {
        /// Model identifier; omit to see the default record
        model: Option<String>,
    },
    /// List the built-in pricing table
    Models,
    /// Check every table entry against the cache rate convention
    Audit,
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct CostArgs {
    /// Input tokens
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) input: i64,

    /// Output tokens
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) output: i64,

    /// Cache write (cache creation) tokens
    #[arg(long, value_name = "TOKENS", allow_negative_numbers = true)]
    pub(crate) cache_write: Option<i64>,

    /// Cache read tokens
    #[arg(long, value_name = "TOKENS", allow_negative_numbers = true)]
    pub(crate) cache_read: Option<i64>,

    /// Read usage JSON / JSON Lines from a file ("-" for stdin) instead of flags
    #[arg(
        short,
        long,
        value_name = "PATH",
        conflicts_with_all = ["input", "output", "cache_write", "cache_read"]
    )]
    pub(crate) usage: Option<PathBuf>,
}
