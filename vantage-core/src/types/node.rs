//! Attack graph node types.

use serde::{Deserialize, Serialize};

use super::properties::PropertyMap;

/// Resource category of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    IamUser,
    IamRole,
    ComputeInstance,
    StorageBucket,
    ServerlessFunction,
    ManagedDatabase,
    KmsKey,
    Secret,
    VirtualNetwork,
    Subnet,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::IamUser => "iam_user",
            Self::IamRole => "iam_role",
            Self::ComputeInstance => "compute_instance",
            Self::StorageBucket => "storage_bucket",
            Self::ServerlessFunction => "serverless_function",
            Self::ManagedDatabase => "managed_database",
            Self::KmsKey => "kms_key",
            Self::Secret => "secret",
            Self::VirtualNetwork => "virtual_network",
            Self::Subnet => "subnet",
        }
    }
}

/// Business-impact tier of a node. Ordered: `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Criticality {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// High-value nodes are path-search targets and blast-radius highlights.
    pub fn is_high_value(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// A node in the attack graph — one cloud resource or identity principal.
///
/// The `id` is the cloud-native globally unique identifier (ARN-equivalent)
/// and is stable across rebuilds for the same account + resource, so repeated
/// scans produce comparable graphs. `risk_score` and `criticality` are always
/// derived by the risk scorer, never hand-set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackNode {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    pub account_id: String,
    /// Region of the resource, or `"global"` for region-less resources.
    pub region: String,
    /// Resource-specific facts. Recognized keys per kind are documented in
    /// [`super::properties`].
    pub properties: PropertyMap,
    /// Exposure estimate in `[0, 100]`, recomputed per scan.
    pub risk_score: f64,
    pub criticality: Criticality,
}

impl AttackNode {
    /// Whether this node is directly reachable from outside the cloud
    /// perimeter, judged from its recognized exposure properties.
    pub fn is_publicly_exposed(&self) -> bool {
        const EXPOSURE_KEYS: &[&str] =
            &["public_access", "public_ip", "public_url", "publicly_accessible"];
        EXPOSURE_KEYS.iter().any(|key| {
            self.properties
                .get(*key)
                .is_some_and(|v| v.as_bool().unwrap_or(false) || v.as_str().is_some())
        })
    }
}
