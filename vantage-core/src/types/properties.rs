//! Typed property bag for nodes and edges.
//!
//! Resource-specific facts travel as a `String → PropertyValue` map instead
//! of a dynamically typed object. The recognized keys per node kind:
//!
//! | Kind | Keys |
//! |---|---|
//! | `iam_user` | `attached_policies` (list), `mfa_enabled` (bool), `access_keys` (int), `inline_wildcard` (bool) |
//! | `iam_role` | `attached_policies` (list), `trusted_root` (bool), `wildcard_trust` (bool), `external_trust_accounts` (list) |
//! | `compute_instance` | `instance_type` (text), `public_ip` (text), `open_ingress` (bool), `security_groups` (list), `instance_profile_role` (text), `tags` (map) |
//! | `storage_bucket` | `encryption` (text), `versioning` (bool), `public_access` (bool), `sensitive_data` (bool), `tags` (map) |
//! | `serverless_function` | `runtime` (text), `memory_mb` (int), `timeout_seconds` (int), `environment_variables` (list of names), `vpc_subnets` (list), `public_url` (bool) |
//! | `managed_database` | `publicly_accessible` (bool), `encrypted` (bool), `pii` (bool), `deletion_protection` (bool) |
//! | `kms_key` | `rotation_enabled` (bool), `wildcard_policy` (bool) |
//! | `secret` | `rotation_enabled` (bool), `broad_read_access` (bool) |
//! | `virtual_network` | `is_default` (bool), `flow_logs_enabled` (bool), `peered_accounts` (list) |
//! | `subnet` | `vpc_id` (text), `auto_public_ip` (bool), `internet_gateway_route` (bool) |
//!
//! Edges recognize `permission` (text) and `condition` (text).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered map so serialization and iteration are deterministic across
/// rebuilds with identical input.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// A JSON-compatible property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v.into_iter().map(PropertyValue::Text).collect())
    }
}

impl From<BTreeMap<String, String>> for PropertyValue {
    fn from(v: BTreeMap<String, String>) -> Self {
        Self::Map(
            v.into_iter()
                .map(|(k, val)| (k, PropertyValue::Text(val)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_is_untagged() {
        let mut map = PropertyMap::new();
        map.insert("public_access".to_string(), PropertyValue::Bool(false));
        map.insert("access_keys".to_string(), PropertyValue::Int(2));
        map.insert(
            "attached_policies".to_string(),
            vec!["AdministratorAccess".to_string()].into(),
        );

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"access_keys":2,"attached_policies":["AdministratorAccess"],"public_access":false}"#
        );

        let back: PropertyMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(PropertyValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(PropertyValue::Float(2.5).as_i64(), None);
        assert_eq!(PropertyValue::Bool(true).as_f64(), None);
    }
}
