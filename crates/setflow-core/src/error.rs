//! Error types for set files, presets and set list editing
//!
//! Key lookups and flow validation never fail; these errors only come from
//! the file layer and from edits that reference a missing track.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur outside the pure validation core
#[derive(Debug, Error)]
pub enum SetflowError {
    /// IO error reading or writing a set file
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML set file could not be parsed or written
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON set file could not be parsed or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Set file extension is neither YAML nor JSON
    #[error("Unsupported set file format '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    /// No built-in preset matches the requested name
    #[error("Preset '{0}' not found")]
    UnknownPreset(String),

    /// Set list edit referenced a track that does not exist
    #[error("Track index {index} out of range for set of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for set file and set list operations
pub type SetflowResult<T> = Result<T, SetflowError>;
