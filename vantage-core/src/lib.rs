//! vantage-core: Core types, traits, errors, and configuration for the
//! Vantage attack-path analysis engine.
//!
//! This crate holds the vocabulary shared by the analysis engine and the
//! durable graph mirror:
//! - Types: attack nodes/edges/paths, the typed property bag, normalized
//!   discovery records
//! - Traits: the `ResourceDiscoverer` and `GraphSink` seams
//! - Errors: one enum per subsystem, `thiserror` only
//! - Config: layered TOML + environment configuration

pub mod config;
pub mod errors;
pub mod traits;
pub mod types;

pub use config::{AnalysisConfig, BuildConfig, StorageConfig, VantageConfig};
pub use errors::{
    BuildError, ConfigError, DiscoveryError, GraphError, StorageError, VantageErrorCode,
};
pub use traits::{GraphSink, ResourceDiscoverer};
pub use types::{
    AccessGrant, AttackEdge, AttackNode, AttackPath, BucketRecord, CloudAccount, CloudProvider,
    Criticality, DataStoreKind, DataStoreRecord, EdgeKind, FunctionRecord, IdentityRecord,
    InstanceRecord, NetworkFact, NodeKind, PrincipalKind, PropertyMap, PropertyValue,
    ResourceGrant,
};
