//! Durable mirror errors. Mirror failures are best-effort: reported, never
//! rolled into the in-memory graph's validity.

use super::error_code::{self, VantageErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

impl VantageErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::STORAGE_MIGRATION,
            Self::Serialization { .. } => error_code::STORAGE_SERIALIZATION,
        }
    }
}
