//! vantage-analysis: the attack-path analysis engine.
//!
//! Pipeline: normalized discovery records → graph builder (per-account
//! fan-out with timeouts) → in-memory attack graph → path analyzer / blast
//! radius / query facade. The builder optionally replicates each build to a
//! durable mirror through the `GraphSink` seam.
//!
//! - `graph`: petgraph-backed attack graph and traversals
//! - `builder`: per-account analyzers and build orchestration
//! - `risk`: per-kind risk scoring tables
//! - `paths`: ranked attack paths, blast radius, high-risk listing
//! - `query`: visualization payload and summary views

pub mod builder;
pub mod graph;
pub mod paths;
pub mod query;
pub mod risk;

pub use builder::{BuildOutcome, BuildReport, GraphBuilder};
pub use graph::AttackGraph;
pub use paths::{BlastRadius, HighRiskNode, HighValueTarget, PathAnalyzer};
pub use query::{visualization, GraphSummary, VisLink, VisNode, VisualizationPayload};
