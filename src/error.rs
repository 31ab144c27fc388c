//! Unified error types for eolscan.
//!
//! Only conditions that indicate broken configuration or corrupt trusted
//! lifecycle data surface as errors. A component that is simply not
//! installed, or whose version cannot be read, is absence, not failure.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for eolscan operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EolscanError {
    /// Invalid catalog or scanner configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Corrupt lifecycle records for a product in the trusted catalog
    #[error("corrupt lifecycle data for {product}: {message}")]
    Catalog {
        /// Product whose records failed to convert
        product: String,
        /// What went wrong
        message: String,
    },

    /// The host operating system has a version query, but it produced
    /// no usable version. OS identity should always be resolvable.
    #[error("unable to identify version for os: {0}")]
    UnresolvableOs(String),

    /// On Linux, the catalog is expected to always carry a kernel entry.
    #[error("missing kernel lifecycle entry: {0}")]
    MissingKernelEntry(String),

    /// IO errors with path context
    #[error("io error at {path:?}: {source}")]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote lifecycle data retrieval failed
    #[cfg(feature = "fetch")]
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Catalog document decoding failed
    #[error("yaml decode failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Lifecycle record decoding failed
    #[error("json decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl EolscanError {
    /// Wrap an IO error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EolscanError>;
