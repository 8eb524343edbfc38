//! vantage-storage: durable SQLite mirror of the attack graph.
//!
//! The in-memory graph stays the system of record during a request; this
//! crate replicates finished builds per organization (full replace, not
//! incremental merge) and answers cross-session queries, including the
//! recursive-CTE deep path search from publicly exposed nodes to critical
//! nodes.

pub mod connection;
pub mod migrations;
pub mod mirror;
pub mod queries;

pub use connection::DatabaseManager;
pub use mirror::GraphMirror;
pub use queries::deep_paths::DeepPathRow;
