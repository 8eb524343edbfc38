//! Compute analyzer — instances, management-plane access, instance-profile
//! role attachment.

use vantage_core::types::{
    AttackEdge, AttackNode, CloudAccount, EdgeKind, InstanceRecord, NodeKind, PropertyMap,
};

use crate::risk;

use super::{WEIGHT_ASSUME, WEIGHT_MANAGEMENT_ACCESS};

pub(super) fn analyze(
    account: &CloudAccount,
    records: &[InstanceRecord],
    nodes: &mut Vec<AttackNode>,
    edges: &mut Vec<AttackEdge>,
) {
    for record in records {
        let (risk_score, criticality) = risk::score_instance(record);

        let mut properties = PropertyMap::new();
        properties.insert(
            "instance_type".to_string(),
            record.instance_type.clone().into(),
        );
        if let Some(ip) = &record.public_ip {
            properties.insert("public_ip".to_string(), ip.clone().into());
        }
        properties.insert("open_ingress".to_string(), record.open_ingress.into());
        properties.insert(
            "security_groups".to_string(),
            record.security_groups.clone().into(),
        );
        if let Some(role) = &record.instance_profile_role {
            properties.insert("instance_profile_role".to_string(), role.clone().into());
        }
        properties.insert("tags".to_string(), record.tags.clone().into());

        nodes.push(AttackNode {
            id: record.instance_id.clone(),
            kind: NodeKind::ComputeInstance,
            name: record.name.clone(),
            account_id: account.account_ref.clone(),
            region: record.region.clone(),
            properties,
            risk_score,
            criticality,
        });

        for grant in &record.managed_by {
            edges.push(
                AttackEdge::new(
                    grant.principal_id.clone(),
                    record.instance_id.clone(),
                    EdgeKind::CanAccess,
                )
                .with_permission(grant.action.clone())
                .with_weight(WEIGHT_MANAGEMENT_ACCESS),
            );
        }

        // The instance can act as its attached role.
        if let Some(role) = &record.instance_profile_role {
            edges.push(
                AttackEdge::new(record.instance_id.clone(), role.clone(), EdgeKind::CanAssume)
                    .with_permission("sts:AssumeRole")
                    .with_weight(WEIGHT_ASSUME),
            );
        }
    }
}
