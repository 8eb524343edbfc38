//! Graph structure errors.

use super::error_code::{self, VantageErrorCode};

/// Structural invariant violations in the in-memory graph.
///
/// `ConflictingNode` is a programmer error and fatal to a build;
/// `MissingEndpoint` fails only the offending edge insertion.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Conflicting kinds for node {id}: {existing} already present, {incoming} incoming")]
    ConflictingNode {
        id: String,
        existing: &'static str,
        incoming: &'static str,
    },

    #[error("Edge {src} -> {target} references missing node {endpoint}")]
    MissingEndpoint {
        src: String,
        target: String,
        endpoint: String,
    },
}

impl VantageErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConflictingNode { .. } => error_code::GRAPH_CONFLICT,
            Self::MissingEndpoint { .. } => error_code::GRAPH_MISSING_ENDPOINT,
        }
    }
}
