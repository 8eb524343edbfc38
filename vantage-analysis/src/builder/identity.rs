//! Identity analyzer — IAM users and roles, assume-role capability edges.

use vantage_core::types::{
    AttackEdge, AttackNode, CloudAccount, EdgeKind, IdentityRecord, NodeKind, PrincipalKind,
    PropertyMap, PropertyValue,
};

use crate::risk;

use super::WEIGHT_ASSUME;

pub(super) fn analyze(
    account: &CloudAccount,
    records: &[IdentityRecord],
    nodes: &mut Vec<AttackNode>,
    edges: &mut Vec<AttackEdge>,
) {
    for record in records {
        let (risk_score, criticality) = risk::score_identity(record);

        let mut properties = PropertyMap::new();
        properties.insert(
            "attached_policies".to_string(),
            record.attached_policies.clone().into(),
        );
        match record.kind {
            PrincipalKind::User => {
                properties.insert("mfa_enabled".to_string(), record.mfa_enabled.into());
                properties.insert(
                    "access_keys".to_string(),
                    PropertyValue::Int(i64::from(record.access_key_count)),
                );
                properties.insert("inline_wildcard".to_string(), record.inline_wildcard.into());
            }
            PrincipalKind::Role => {
                properties.insert("trusted_root".to_string(), record.trusted_root.into());
                properties.insert("wildcard_trust".to_string(), record.wildcard_trust.into());
                properties.insert(
                    "external_trust_accounts".to_string(),
                    record.external_trust_accounts.clone().into(),
                );
            }
        }

        nodes.push(AttackNode {
            id: record.principal_id.clone(),
            kind: match record.kind {
                PrincipalKind::User => NodeKind::IamUser,
                PrincipalKind::Role => NodeKind::IamRole,
            },
            name: record.name.clone(),
            account_id: account.account_ref.clone(),
            region: "global".to_string(),
            properties,
            risk_score,
            criticality,
        });

        for principal in &record.assumable_by {
            edges.push(
                AttackEdge::new(principal.clone(), record.principal_id.clone(), EdgeKind::CanAssume)
                    .with_permission("sts:AssumeRole")
                    .with_weight(WEIGHT_ASSUME),
            );
        }
    }
}
