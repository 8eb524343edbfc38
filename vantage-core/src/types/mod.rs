//! Shared types for the attack graph and its inputs.

pub mod discovery;
pub mod edge;
pub mod node;
pub mod path;
pub mod properties;

pub use discovery::{
    AccessGrant, BucketRecord, CloudAccount, CloudProvider, DataStoreKind, DataStoreRecord,
    FunctionRecord, IdentityRecord, InstanceRecord, NetworkFact, PrincipalKind, ResourceGrant,
};
pub use edge::{AttackEdge, EdgeKind};
pub use node::{AttackNode, Criticality, NodeKind};
pub use path::AttackPath;
pub use properties::{PropertyMap, PropertyValue};
