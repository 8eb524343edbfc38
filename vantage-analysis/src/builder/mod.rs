//! Graph builder — per-account discovery fan-out and graph assembly.
//!
//! Each active account is discovered on its own worker thread with a
//! deadline; a slow or failing account contributes nothing and the build
//! continues with partial results. The union into the in-memory graph is
//! sequenced after all workers complete, then the graph is optionally
//! replicated to the durable mirror (best-effort).

mod compute;
mod data_stores;
mod identity;
mod network;
mod object_storage;
mod serverless;

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{bounded, RecvTimeoutError};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use vantage_core::config::BuildConfig;
use vantage_core::errors::{BuildError, DiscoveryError, GraphError};
use vantage_core::traits::{GraphSink, ResourceDiscoverer};
use vantage_core::types::{AttackEdge, AttackNode, CloudAccount, NodeKind};

use crate::graph::AttackGraph;

/// Traversal-ease weights per capability, kept in one place so analyzers
/// stay consistent. Produced and persisted, not consumed by ranking.
pub(crate) const WEIGHT_ASSUME: f64 = 0.8;
pub(crate) const WEIGHT_MANAGEMENT_ACCESS: f64 = 0.9;
pub(crate) const WEIGHT_DATA_ACCESS: f64 = 0.7;
pub(crate) const WEIGHT_EXECUTE: f64 = 0.8;
pub(crate) const WEIGHT_SERVICE_ACCESS: f64 = 0.8;
pub(crate) const WEIGHT_NETWORK: f64 = 0.9;
pub(crate) const WEIGHT_CONTAINS: f64 = 1.0;

/// Nodes and edges contributed by one account.
struct AccountFragment {
    nodes: Vec<AttackNode>,
    edges: Vec<AttackEdge>,
}

/// Result of one organization build: the in-memory graph plus a report of
/// what went in and what degraded.
pub struct BuildOutcome {
    pub graph: AttackGraph,
    pub report: BuildReport,
}

/// Build summary with non-fatal error accumulation. Partial results are
/// expected: a failed account or a dropped edge never aborts the build.
#[derive(Debug)]
pub struct BuildReport {
    pub organization_id: String,
    pub accounts_total: usize,
    pub accounts_succeeded: usize,
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges dropped because an endpoint was never emitted (builder bug or
    /// cross-account reference outside the discovered set).
    pub dropped_edges: usize,
    /// Whether the durable mirror accepted this build.
    pub mirror_synced: bool,
    pub errors: Vec<BuildError>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Builds the attack graph for one organization from its active accounts.
pub struct GraphBuilder {
    discoverer: Arc<dyn ResourceDiscoverer>,
    sink: Option<Arc<dyn GraphSink>>,
    config: BuildConfig,
}

impl GraphBuilder {
    pub fn new(discoverer: Arc<dyn ResourceDiscoverer>, config: BuildConfig) -> Self {
        Self {
            discoverer,
            sink: None,
            config,
        }
    }

    /// Attach a durable mirror. Mirror writes are best-effort: a failure is
    /// reported in the build report, never rolled into the in-memory graph.
    pub fn with_sink(mut self, sink: Arc<dyn GraphSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build a fresh graph for the organization.
    ///
    /// Only a structural invariant violation (one id discovered with two
    /// different kinds) is fatal; everything else degrades into the report.
    pub fn build_attack_graph(
        &self,
        organization_id: &str,
        accounts: &[CloudAccount],
    ) -> Result<BuildOutcome, GraphError> {
        let timeout = self.config.account_timeout();
        let deadline = Instant::now() + timeout;
        let mut errors: Vec<BuildError> = Vec::new();

        // Fan out: one worker per account, each with its own result channel.
        let mut workers = Vec::with_capacity(accounts.len());
        for account in accounts {
            let (tx, rx) = bounded(1);
            let discoverer = Arc::clone(&self.discoverer);
            let account = account.clone();
            let account_id = account.id.clone();
            std::thread::spawn(move || {
                let fragment = discover_account(discoverer.as_ref(), &account);
                // The receiver may be gone if the account timed out.
                let _ = tx.send(fragment);
            });
            workers.push((account_id, rx));
        }

        // Collect, sequenced after the fan-out. Every account gets the same
        // absolute deadline measured from build start.
        let mut fragments = Vec::with_capacity(workers.len());
        let mut accounts_succeeded = 0;
        for (account_id, rx) in workers {
            match rx.recv_deadline(deadline) {
                Ok(Ok(fragment)) => {
                    debug!(
                        account_id = %account_id,
                        nodes = fragment.nodes.len(),
                        edges = fragment.edges.len(),
                        "account discovery complete"
                    );
                    accounts_succeeded += 1;
                    fragments.push(fragment);
                }
                Ok(Err(e)) => {
                    warn!(account_id = %account_id, error = %e, "account discovery failed");
                    errors.push(e.into());
                }
                Err(RecvTimeoutError::Timeout) => {
                    let e = DiscoveryError::Timeout {
                        account_id: account_id.clone(),
                        timeout_secs: timeout.as_secs(),
                    };
                    warn!(account_id = %account_id, "account discovery timed out");
                    errors.push(e.into());
                }
                Err(RecvTimeoutError::Disconnected) => {
                    let e = DiscoveryError::WorkerFailed {
                        account_id: account_id.clone(),
                    };
                    warn!(account_id = %account_id, "account discovery worker died");
                    errors.push(e.into());
                }
            }
        }

        // Union with per-build dedup. The same id re-emitted with another
        // kind is a builder bug and fatal.
        let mut seen: FxHashMap<String, NodeKind> = FxHashMap::default();
        let mut nodes: Vec<AttackNode> = Vec::new();
        let mut edges: Vec<AttackEdge> = Vec::new();
        for fragment in fragments {
            for node in fragment.nodes {
                match seen.get(&node.id) {
                    None => {
                        seen.insert(node.id.clone(), node.kind);
                        nodes.push(node);
                    }
                    Some(kind) if *kind == node.kind => {
                        debug!(id = %node.id, "duplicate node id within build, keeping first");
                    }
                    Some(kind) => {
                        return Err(GraphError::ConflictingNode {
                            id: node.id,
                            existing: kind.name(),
                            incoming: node.kind.name(),
                        });
                    }
                }
            }
            edges.extend(fragment.edges);
        }

        // Populate the graph: all nodes first, then edges. A dangling edge
        // fails alone, loudly.
        let mut graph = AttackGraph::new();
        for node in &nodes {
            graph.add_node(node.clone())?;
        }

        let mut kept_edges: Vec<AttackEdge> = Vec::with_capacity(edges.len());
        let mut dropped_edges = 0;
        for edge in edges {
            match graph.add_edge(edge.clone()) {
                Ok(()) => kept_edges.push(edge),
                Err(e) => {
                    warn!(error = %e, "dropping edge with missing endpoint");
                    dropped_edges += 1;
                    errors.push(e.into());
                }
            }
        }

        // Best-effort durable mirror.
        let mut mirror_synced = false;
        if self.config.mirror_enabled() {
            if let Some(sink) = &self.sink {
                match sink.replace_organization(organization_id, &nodes, &kept_edges) {
                    Ok(()) => mirror_synced = true,
                    Err(e) => {
                        warn!(
                            organization_id = %organization_id,
                            error = %e,
                            "durable mirror replace failed, in-memory graph unaffected"
                        );
                        errors.push(e.into());
                    }
                }
            }
        }

        let report = BuildReport {
            organization_id: organization_id.to_string(),
            accounts_total: accounts.len(),
            accounts_succeeded,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            dropped_edges,
            mirror_synced,
            errors,
        };

        info!(
            organization_id = %organization_id,
            accounts = report.accounts_total,
            succeeded = report.accounts_succeeded,
            nodes = report.node_count,
            edges = report.edge_count,
            mirror_synced = report.mirror_synced,
            "attack graph build complete"
        );

        Ok(BuildOutcome { graph, report })
    }
}

/// Discover one account and translate its records into nodes and edges.
///
/// Analyzer order matters: identity first, so capability edges emitted by
/// later analyzers can reference principals by id.
fn discover_account(
    discoverer: &dyn ResourceDiscoverer,
    account: &CloudAccount,
) -> Result<AccountFragment, DiscoveryError> {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    let identities = discoverer.discover_identities(account)?;
    identity::analyze(account, &identities, &mut nodes, &mut edges);

    let instances = discoverer.discover_instances(account)?;
    compute::analyze(account, &instances, &mut nodes, &mut edges);

    let buckets = discoverer.discover_buckets(account)?;
    object_storage::analyze(account, &buckets, &mut nodes, &mut edges);

    let functions = discoverer.discover_functions(account)?;
    serverless::analyze(account, &functions, &mut nodes, &mut edges);

    let stores = discoverer.discover_data_stores(account)?;
    data_stores::analyze(account, &stores, &mut nodes, &mut edges);

    let network_facts = discoverer.discover_network(account)?;
    network::analyze(account, &network_facts, &mut nodes, &mut edges);

    Ok(AccountFragment { nodes, edges })
}
