//! Object-storage analyzer — buckets and data-plane read access.

use vantage_core::types::{
    AttackEdge, AttackNode, BucketRecord, CloudAccount, EdgeKind, NodeKind, PropertyMap,
};

use crate::risk;

use super::WEIGHT_DATA_ACCESS;

pub(super) fn analyze(
    account: &CloudAccount,
    records: &[BucketRecord],
    nodes: &mut Vec<AttackNode>,
    edges: &mut Vec<AttackEdge>,
) {
    for record in records {
        let (risk_score, criticality) = risk::score_bucket(record);

        let mut properties = PropertyMap::new();
        if let Some(encryption) = &record.encryption {
            properties.insert("encryption".to_string(), encryption.clone().into());
        }
        properties.insert("versioning".to_string(), record.versioning.into());
        properties.insert("public_access".to_string(), record.public_access.into());
        properties.insert("sensitive_data".to_string(), record.sensitive_data.into());
        properties.insert("tags".to_string(), record.tags.clone().into());

        nodes.push(AttackNode {
            id: record.bucket_id.clone(),
            kind: NodeKind::StorageBucket,
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
                    record.bucket_id.clone(),
                    EdgeKind::CanAccess,
                )
                .with_permission(grant.action.clone())
                .with_weight(WEIGHT_DATA_ACCESS),
            );
        }
    }
}
