//! Error types for the license scan

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Main error type for scan operations
///
/// Missing files, unmet dependencies and unclassifiable text are not errors;
/// only failures that abort the whole run end up here.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("No package.json found in {}", .0.display())]
    MissingManifest(PathBuf),

    #[error("Failed to parse manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dependency tree references unknown package #{0}")]
    DanglingNode(usize),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ScanError {
    /// Create an IO error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
