use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Setflow - plan DJ sets with energy, tempo and key checks
#[derive(Parser, Debug)]
#[command(name = "setflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/setflow/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a set and print its flow warnings
    Check {
        #[command(flatten)]
        source: SetSource,

        /// Exit with status 2 when the set has violations
        #[arg(long)]
        strict: bool,
    },

    /// Show the Camelot position of a key and its mixable neighbours
    Camelot {
        /// Key label ("Am", "F#") or Camelot code ("8A")
        key: String,
    },

    /// Check whether two keys can be mixed directly
    Compat {
        key1: String,
        key2: String,
    },

    /// List the built-in set presets
    Presets,

    /// Export a set as a tracklist
    Export {
        #[command(flatten)]
        source: SetSource,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Where a set comes from: a set file or a built-in preset
#[derive(Args, Debug, Clone)]
pub struct SetSource {
    /// Set file (.yaml, .yml or .json)
    #[arg(required_unless_present = "preset", conflicts_with = "preset")]
    pub file: Option<PathBuf>,

    /// Built-in preset name (see `setflow presets`)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Energy scale maximum, overriding the set file and config
    #[arg(long)]
    pub energy_max: Option<u8>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}
