//! Command-line interface definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for tracing logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TracingFormat {
    /// Human-readable output for local development.
    #[default]
    Pretty,
    /// Newline-delimited JSON for log aggregation.
    Json,
}

impl std::fmt::Display for TracingFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TracingFormat::Pretty => f.write_str("pretty"),
            TracingFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pokedex", version, about = "Sync Pokémon data from PokéAPI")]
pub struct Args {
    /// Log output format.
    #[arg(long, value_enum, default_value_t = TracingFormat::Pretty)]
    pub tracing: TracingFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch Pokémon from the upstream catalog and reconcile them into the
    /// local store.
    Sync {
        /// Number of Pokémon to sync (default: Gen 1).
        #[arg(long, default_value_t = 151)]
        limit: u32,

        /// Starting offset into the upstream listing.
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Number of Pokémon processed per transaction.
        #[arg(long, default_value_t = 20)]
        batch_size: u32,

        /// Seconds to sleep between batches to avoid rate limiting.
        #[arg(long, default_value_t = 0.1)]
        delay: f64,
    },

    /// Fetch evolution chains and link already-synced Pokémon.
    SyncEvolutions {
        /// Number of chains to fetch (default: Gen 1 chain count).
        #[arg(long, default_value_t = 78)]
        limit: u32,

        /// Starting chain id offset.
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
}
