//! Data-store analyzer — managed databases, key-management keys, secrets.

use vantage_core::types::{
    AttackEdge, AttackNode, CloudAccount, DataStoreKind, DataStoreRecord, EdgeKind, NodeKind,
    PropertyMap,
};

use crate::risk;

use super::WEIGHT_DATA_ACCESS;

pub(super) fn analyze(
    account: &CloudAccount,
    records: &[DataStoreRecord],
    nodes: &mut Vec<AttackNode>,
    edges: &mut Vec<AttackEdge>,
) {
    for record in records {
        let (risk_score, criticality) = risk::score_data_store(record);

        let mut properties = PropertyMap::new();
        match record.kind {
            DataStoreKind::ManagedDatabase => {
                properties.insert(
                    "publicly_accessible".to_string(),
                    record.publicly_accessible.into(),
                );
                properties.insert("encrypted".to_string(), record.encrypted.into());
                properties.insert("pii".to_string(), record.pii.into());
                properties.insert(
                    "deletion_protection".to_string(),
                    record.deletion_protection.into(),
                );
            }
            DataStoreKind::KmsKey => {
                properties.insert("rotation_enabled".to_string(), record.rotation_enabled.into());
                properties.insert("wildcard_policy".to_string(), record.wildcard_policy.into());
            }
            DataStoreKind::Secret => {
                properties.insert("rotation_enabled".to_string(), record.rotation_enabled.into());
                properties.insert(
                    "broad_read_access".to_string(),
                    record.broad_read_access.into(),
                );
            }
        }

        nodes.push(AttackNode {
            id: record.resource_id.clone(),
            kind: match record.kind {
                DataStoreKind::ManagedDatabase => NodeKind::ManagedDatabase,
                DataStoreKind::KmsKey => NodeKind::KmsKey,
                DataStoreKind::Secret => NodeKind::Secret,
            },
            name: record.name.clone(),
            account_id: account.account_ref.clone(),
            region: record.region.clone(),
            properties,
            risk_score,
            criticality,
        });

        for grant in &record.readers {
            edges.push(
                AttackEdge::new(
                    grant.principal_id.clone(),
                    record.resource_id.clone(),
                    EdgeKind::CanAccess,
                )
                .with_permission(grant.action.clone())
                .with_weight(WEIGHT_DATA_ACCESS),
            );
        }
    }
}
