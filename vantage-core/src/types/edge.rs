//! Attack graph edge types.

use serde::{Deserialize, Serialize};

use super::properties::{PropertyMap, PropertyValue};

/// Capability relationship between two nodes: the source can perform the
/// named action against or through the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    CanAssume,
    CanAccess,
    CanExecute,
    CanModify,
    NetworkReachable,
    Contains,
    HasPermission,
}

impl EdgeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CanAssume => "can_assume",
            Self::CanAccess => "can_access",
            Self::CanExecute => "can_execute",
            Self::CanModify => "can_modify",
            Self::NetworkReachable => "network_reachable",
            Self::Contains => "contains",
            Self::HasPermission => "has_permission",
        }
    }
}

/// A directed capability edge between two nodes, identified by node ids.
///
/// `weight` estimates traversal ease (analyzers emit 0.7–0.9 depending on the
/// capability). It is carried and persisted but does not feed path ranking,
/// which sums node risk scores only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackEdge {
    pub source_id: String,
    pub target_id: String,
    pub kind: EdgeKind,
    pub properties: PropertyMap,
    pub weight: f64,
}

impl AttackEdge {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind,
            properties: PropertyMap::new(),
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Attach the specific permission action string (e.g. `"sts:AssumeRole"`).
    pub fn with_permission(mut self, action: impl Into<String>) -> Self {
        self.properties
            .insert("permission".to_string(), PropertyValue::Text(action.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_builder_defaults() {
        let edge = AttackEdge::new("a", "b", EdgeKind::CanAssume);
        assert_eq!(edge.weight, 1.0);
        assert!(edge.properties.is_empty());

        let edge = edge.with_weight(0.8).with_permission("sts:AssumeRole");
        assert_eq!(edge.weight, 0.8);
        assert_eq!(
            edge.properties.get("permission").and_then(|v| v.as_str()),
            Some("sts:AssumeRole")
        );
    }
}
