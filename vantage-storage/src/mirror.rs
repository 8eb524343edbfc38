//! GraphMirror — per-organization durable replace.
//!
//! Replace semantics are destructive per organization: delete everything
//! tagged with the organization id, then insert the new build, inside one
//! BEGIN IMMEDIATE transaction. Concurrent replaces for the same
//! organization serialize on a per-organization lock; different
//! organizations never contend on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use vantage_core::errors::StorageError;
use vantage_core::traits::GraphSink;
use vantage_core::types::{AttackEdge, AttackNode};

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::{deep_paths, edges, nodes};

pub struct GraphMirror {
    db: Arc<DatabaseManager>,
    org_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl GraphMirror {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self {
            db,
            org_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The lock guarding replaces for one organization.
    fn org_lock(&self, organization_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .org_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(
            locks
                .entry(organization_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Replace the organization's mirrored graph with a new build.
    pub fn replace_organization(
        &self,
        organization_id: &str,
        nodes_in: &[AttackNode],
        edges_in: &[AttackEdge],
    ) -> Result<(), StorageError> {
        let lock = self.org_lock(organization_id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                edges::delete_organization_edges(tx, organization_id)?;
                nodes::delete_organization_nodes(tx, organization_id)?;
                let node_count = nodes::insert_nodes(tx, organization_id, nodes_in)?;
                let edge_count = edges::insert_edges(tx, organization_id, edges_in)?;
                debug!(
                    organization_id = %organization_id,
                    nodes = node_count,
                    edges = edge_count,
                    "mirror replace committed"
                );
                Ok(())
            })
        })
    }

    /// Deep path search over the mirrored graph (see
    /// [`deep_paths::deep_attack_paths`]).
    pub fn deep_attack_paths(
        &self,
        organization_id: &str,
        hop_limit: u32,
        limit: usize,
    ) -> Result<Vec<deep_paths::DeepPathRow>, StorageError> {
        self.db
            .with_reader(|conn| deep_paths::deep_attack_paths(conn, organization_id, hop_limit, limit))
    }

    /// Mirrored node/edge counts for one organization.
    pub fn organization_counts(&self, organization_id: &str) -> Result<(i64, i64), StorageError> {
        self.db.with_reader(|conn| {
            let n = nodes::count_nodes(conn, organization_id)?;
            let e = edges::count_edges(conn, organization_id)?;
            Ok((n, e))
        })
    }
}

impl GraphSink for GraphMirror {
    fn replace_organization(
        &self,
        organization_id: &str,
        nodes: &[AttackNode],
        edges: &[AttackEdge],
    ) -> Result<(), StorageError> {
        GraphMirror::replace_organization(self, organization_id, nodes, edges)
    }
}
