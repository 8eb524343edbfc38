//! Normalized discovery records.
//!
//! Discovery connectors translate provider-native listings (IAM, compute,
//! object storage, serverless, data stores, network) into these records
//! before they reach the graph builder. All ids are the provider's globally
//! unique resource identifiers (ARN-equivalent strings).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
}

impl CloudProvider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
        }
    }
}

/// An active cloud account belonging to one organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudAccount {
    /// Platform-internal account id.
    pub id: String,
    pub provider: CloudProvider,
    /// Provider-native account number / subscription / project id.
    pub account_ref: String,
    pub regions: Vec<String>,
}

impl CloudAccount {
    /// First configured region, falling back to the provider's default.
    pub fn primary_region(&self) -> &str {
        self.regions.first().map(String::as_str).unwrap_or("us-east-1")
    }
}

/// A grant letting some principal reach the resource carrying the grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    pub principal_id: String,
    /// Provider permission action, e.g. `"s3:GetObject"` or `"ec2:*"`.
    pub action: String,
}

/// A grant letting the resource carrying it reach some other resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceGrant {
    pub resource_id: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    Role,
}

/// An IAM principal with its trust and permission summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub principal_id: String,
    pub kind: PrincipalKind,
    pub name: String,
    pub attached_policies: Vec<String>,
    /// An inline policy grants `*` on `*`.
    pub inline_wildcard: bool,
    /// Users only.
    pub mfa_enabled: bool,
    /// Users only.
    pub access_key_count: u32,
    /// Roles only: the trust policy names the account root.
    pub trusted_root: bool,
    /// Roles only: the trust policy names a `*` principal.
    pub wildcard_trust: bool,
    /// Roles only: foreign account ids appearing in the trust policy.
    pub external_trust_accounts: Vec<String>,
    /// Roles only: principal ids permitted to assume this role.
    pub assumable_by: Vec<String>,
}

/// A compute instance with its exposure and identity attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub instance_id: String,
    pub name: String,
    pub region: String,
    pub instance_type: String,
    pub public_ip: Option<String>,
    /// A security group allows ingress from `0.0.0.0/0`.
    pub open_ingress: bool,
    pub security_groups: Vec<String>,
    /// Role id attached via the instance profile, if any.
    pub instance_profile_role: Option<String>,
    /// Principals with management-plane permissions over this instance.
    pub managed_by: Vec<AccessGrant>,
    pub tags: BTreeMap<String, String>,
}

/// An object-storage bucket with its protection posture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketRecord {
    pub bucket_id: String,
    pub name: String,
    pub region: String,
    /// Server-side encryption algorithm, `None` if disabled.
    pub encryption: Option<String>,
    pub versioning: bool,
    pub public_access: bool,
    /// Classified as holding sensitive data (tags or data-classification
    /// scan).
    pub sensitive_data: bool,
    pub tags: BTreeMap<String, String>,
    /// Principals and resources with read access to the bucket contents.
    pub readers: Vec<AccessGrant>,
}

/// A serverless function with its network and permission summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub function_id: String,
    pub name: String,
    pub region: String,
    pub runtime: String,
    pub memory_mb: u32,
    pub timeout_secs: u32,
    /// Names of configured environment variables (values never leave the
    /// connector).
    pub environment: Vec<String>,
    /// Empty when the function runs outside any VPC.
    pub vpc_subnets: Vec<String>,
    /// The function has a public invocation URL.
    pub public_url: bool,
    pub execution_role: Option<String>,
    /// Principals permitted to invoke the function.
    pub invokers: Vec<AccessGrant>,
    /// Data stores the function's role can reach, with the granted action.
    pub data_access: Vec<ResourceGrant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStoreKind {
    ManagedDatabase,
    KmsKey,
    Secret,
}

/// A managed database, key-management key, or secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataStoreRecord {
    pub resource_id: String,
    pub kind: DataStoreKind,
    pub name: String,
    pub region: String,
    /// Databases only.
    pub publicly_accessible: bool,
    pub encrypted: bool,
    /// Databases only: tagged as holding personal data.
    pub pii: bool,
    /// Databases only.
    pub deletion_protection: bool,
    /// Keys and secrets only.
    pub rotation_enabled: bool,
    /// Keys only: the key policy names a `*` principal.
    pub wildcard_policy: bool,
    /// Secrets only: readable by a broad principal set.
    pub broad_read_access: bool,
    pub readers: Vec<AccessGrant>,
}

/// A discovered network fact. Virtual networks and subnets become nodes;
/// reachability facts become `network_reachable` edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "fact", rename_all = "snake_case")]
pub enum NetworkFact {
    VirtualNetwork {
        vpc_id: String,
        name: String,
        region: String,
        is_default: bool,
        flow_logs_enabled: bool,
        peered_accounts: Vec<String>,
    },
    Subnet {
        subnet_id: String,
        vpc_id: String,
        name: String,
        region: String,
        auto_public_ip: bool,
        internet_gateway_route: bool,
    },
    /// The source can open a connection to the target (security-group and
    /// route analysis).
    Reachability {
        source_id: String,
        target_id: String,
        protocol: String,
        port_range: String,
    },
}
