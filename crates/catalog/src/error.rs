//! Error types for catalog loading and app launching.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("application source failed: {0}")]
    Source(String),
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("launching apps is not supported on this platform")]
    Unsupported,

    #[error("failed to start launcher: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("could not launch {identifier}: {reason}")]
    Failed { identifier: String, reason: String },
}
