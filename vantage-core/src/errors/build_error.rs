//! Build errors — aggregates subsystem errors via `From` conversions.
//!
//! Most variants are collected as non-fatal in the build report; only
//! structural graph violations abort a build. "No data" conditions (zero
//! accounts, zero critical nodes, absent path endpoints) are never errors.

use super::error_code::VantageErrorCode;
use super::{ConfigError, DiscoveryError, GraphError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl VantageErrorCode for BuildError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Discovery(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
