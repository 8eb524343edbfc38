//! Serverless analyzer — functions, invocation rights, execution-role
//! attachment, data-store reach.

use vantage_core::types::{
    AttackEdge, AttackNode, CloudAccount, EdgeKind, FunctionRecord, NodeKind, PropertyMap,
    PropertyValue,
};

use crate::risk;

use super::{WEIGHT_ASSUME, WEIGHT_EXECUTE, WEIGHT_SERVICE_ACCESS};

pub(super) fn analyze(
    account: &CloudAccount,
    records: &[FunctionRecord],
    nodes: &mut Vec<AttackNode>,
    edges: &mut Vec<AttackEdge>,
) {
    for record in records {
        let (risk_score, criticality) = risk::score_function(record);

        let mut properties = PropertyMap::new();
        properties.insert("runtime".to_string(), record.runtime.clone().into());
        properties.insert(
            "memory_mb".to_string(),
            PropertyValue::Int(i64::from(record.memory_mb)),
        );
        properties.insert(
            "timeout_seconds".to_string(),
            PropertyValue::Int(i64::from(record.timeout_secs)),
        );
        properties.insert(
            "environment_variables".to_string(),
            record.environment.clone().into(),
        );
        properties.insert("vpc_subnets".to_string(), record.vpc_subnets.clone().into());
        properties.insert("public_url".to_string(), record.public_url.into());

        nodes.push(AttackNode {
            id: record.function_id.clone(),
            kind: NodeKind::ServerlessFunction,
            name: record.name.clone(),
            account_id: account.account_ref.clone(),
            region: record.region.clone(),
            properties,
            risk_score,
            criticality,
        });

        for grant in &record.invokers {
            edges.push(
                AttackEdge::new(
                    grant.principal_id.clone(),
                    record.function_id.clone(),
                    EdgeKind::CanExecute,
                )
                .with_permission(grant.action.clone())
                .with_weight(WEIGHT_EXECUTE),
            );
        }

        if let Some(role) = &record.execution_role {
            edges.push(
                AttackEdge::new(record.function_id.clone(), role.clone(), EdgeKind::CanAssume)
                    .with_permission("sts:AssumeRole")
                    .with_weight(WEIGHT_ASSUME),
            );
        }

        for grant in &record.data_access {
            edges.push(
                AttackEdge::new(
                    record.function_id.clone(),
                    grant.resource_id.clone(),
                    EdgeKind::CanAccess,
                )
                .with_permission(grant.action.clone())
                .with_weight(WEIGHT_SERVICE_ACCESS),
            );
        }
    }
}
