//! Cross-crate seams.
//!
//! Both traits exist so the analysis engine can be constructed with explicit
//! collaborators instead of reaching for process-wide singletons: discovery
//! connectors implement [`ResourceDiscoverer`], the durable graph mirror
//! implements [`GraphSink`].

use crate::errors::{DiscoveryError, StorageError};
use crate::types::{
    AttackEdge, AttackNode, BucketRecord, CloudAccount, DataStoreRecord, FunctionRecord,
    IdentityRecord, InstanceRecord, NetworkFact,
};

/// Normalized resource discovery for one cloud account, one method per
/// resource category.
///
/// The trait is synchronous; whether an implementation blocks on provider
/// SDK calls directly or bridges to an async runtime is hidden from the
/// engine. The graph builder runs each account on its own worker thread
/// with a deadline, so implementations may block.
pub trait ResourceDiscoverer: Send + Sync {
    fn discover_identities(
        &self,
        account: &CloudAccount,
    ) -> Result<Vec<IdentityRecord>, DiscoveryError>;

    fn discover_instances(
        &self,
        account: &CloudAccount,
    ) -> Result<Vec<InstanceRecord>, DiscoveryError>;

    fn discover_buckets(&self, account: &CloudAccount)
        -> Result<Vec<BucketRecord>, DiscoveryError>;

    fn discover_functions(
        &self,
        account: &CloudAccount,
    ) -> Result<Vec<FunctionRecord>, DiscoveryError>;

    fn discover_data_stores(
        &self,
        account: &CloudAccount,
    ) -> Result<Vec<DataStoreRecord>, DiscoveryError>;

    fn discover_network(&self, account: &CloudAccount) -> Result<Vec<NetworkFact>, DiscoveryError>;
}

/// Destination for the durable per-organization graph mirror.
///
/// `replace_organization` has full-replace semantics: all prior nodes and
/// edges tagged with the organization id are deleted before the new set is
/// inserted. Implementations must serialize concurrent replaces for the same
/// organization; different organizations may proceed concurrently.
pub trait GraphSink: Send + Sync {
    fn replace_organization(
        &self,
        organization_id: &str,
        nodes: &[AttackNode],
        edges: &[AttackEdge],
    ) -> Result<(), StorageError>;
}
