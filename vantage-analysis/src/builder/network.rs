//! Network analyzer — virtual networks, subnets, containment and
//! reachability edges.

use vantage_core::types::{
    AttackEdge, AttackNode, CloudAccount, EdgeKind, NetworkFact, NodeKind, PropertyMap,
    PropertyValue,
};

use crate::risk;

use super::{WEIGHT_CONTAINS, WEIGHT_NETWORK};

pub(super) fn analyze(
    account: &CloudAccount,
    facts: &[NetworkFact],
    nodes: &mut Vec<AttackNode>,
    edges: &mut Vec<AttackEdge>,
) {
    // Nodes first so containment edges always find their endpoints.
    for fact in facts {
        match fact {
            NetworkFact::VirtualNetwork {
                vpc_id,
                name,
                region,
                is_default,
                flow_logs_enabled,
                peered_accounts,
            } => {
                let (risk_score, criticality) =
                    risk::score_virtual_network(*is_default, *flow_logs_enabled, peered_accounts);

                let mut properties = PropertyMap::new();
                properties.insert("is_default".to_string(), (*is_default).into());
                properties.insert("flow_logs_enabled".to_string(), (*flow_logs_enabled).into());
                properties.insert(
                    "peered_accounts".to_string(),
                    peered_accounts.clone().into(),
                );

                nodes.push(AttackNode {
                    id: vpc_id.clone(),
                    kind: NodeKind::VirtualNetwork,
                    name: name.clone(),
                    account_id: account.account_ref.clone(),
                    region: region.clone(),
                    properties,
                    risk_score,
                    criticality,
                });
            }
            NetworkFact::Subnet {
                subnet_id,
                vpc_id,
                name,
                region,
                auto_public_ip,
                internet_gateway_route,
            } => {
                let (risk_score, criticality) =
                    risk::score_subnet(*auto_public_ip, *internet_gateway_route);

                let mut properties = PropertyMap::new();
                properties.insert("vpc_id".to_string(), vpc_id.clone().into());
                properties.insert("auto_public_ip".to_string(), (*auto_public_ip).into());
                properties.insert(
                    "internet_gateway_route".to_string(),
                    (*internet_gateway_route).into(),
                );

                nodes.push(AttackNode {
                    id: subnet_id.clone(),
                    kind: NodeKind::Subnet,
                    name: name.clone(),
                    account_id: account.account_ref.clone(),
                    region: region.clone(),
                    properties,
                    risk_score,
                    criticality,
                });
            }
            NetworkFact::Reachability { .. } => {}
        }
    }

    for fact in facts {
        match fact {
            NetworkFact::Subnet {
                subnet_id, vpc_id, ..
            } => {
                edges.push(
                    AttackEdge::new(vpc_id.clone(), subnet_id.clone(), EdgeKind::Contains)
                        .with_weight(WEIGHT_CONTAINS),
                );
            }
            NetworkFact::Reachability {
                source_id,
                target_id,
                protocol,
                port_range,
            } => {
                let mut edge = AttackEdge::new(
                    source_id.clone(),
                    target_id.clone(),
                    EdgeKind::NetworkReachable,
                )
                .with_weight(WEIGHT_NETWORK);
                edge.properties
                    .insert("protocol".to_string(), PropertyValue::Text(protocol.clone()));
                edge.properties.insert(
                    "port_range".to_string(),
                    PropertyValue::Text(port_range.clone()),
                );
                edges.push(edge);
            }
            NetworkFact::VirtualNetwork { .. } => {}
        }
    }
}
