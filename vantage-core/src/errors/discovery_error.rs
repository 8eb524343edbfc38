//! Per-account discovery errors. All recoverable: a failed account
//! contributes nothing to the build and the build continues.

use super::error_code::{self, VantageErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Discovery timed out for account {account_id} after {timeout_secs}s")]
    Timeout { account_id: String, timeout_secs: u64 },

    #[error("Provider error for account {account_id}: {message}")]
    Provider { account_id: String, message: String },

    #[error("Discovery worker terminated for account {account_id}")]
    WorkerFailed { account_id: String },
}

impl VantageErrorCode for DiscoveryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::DISCOVERY_TIMEOUT,
            Self::Provider { .. } => error_code::DISCOVERY_PROVIDER,
            Self::WorkerFailed { .. } => error_code::DISCOVERY_WORKER,
        }
    }
}
