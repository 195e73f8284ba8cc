use std::collections::{HashMap, VecDeque};
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::config::ServiceRegistry;
use crate::errors::AegisError;
use crate::models::{IntelligenceReport, ScanInput, ScanInputType, SecurityGraph};
use super::integrations::{scan_email, scan_mobile, scan_social};
use super::mapper::{map_to_graph, ROOT_SUB_LABEL};
use super::SecurityProvider;
use tracing::{debug, info};

pub const DEFAULT_GRAPH_CACHE_CAPACITY: usize = 256;

/// Last graph per identity, evicting the oldest identity once full.
struct GraphCache {
    capacity: usize,
    graphs: HashMap<String, SecurityGraph>,
    order: VecDeque<String>,
}

impl GraphCache {
    fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), graphs: HashMap::new(), order: VecDeque::new() }
    }

    fn get(&self, key: &str) -> Option<&SecurityGraph> {
        self.graphs.get(key)
    }

    fn insert(&mut self, key: String, graph: SecurityGraph) {
        if self.graphs.insert(key.clone(), graph).is_some() {
            self.order.retain(|k| k != &key);
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.graphs.remove(&oldest);
                debug!(identity = %oldest, "Evicted cached graph");
            }
        }
    }

    fn len(&self) -> usize {
        self.graphs.len()
    }
}

/// Routes scans to the per-type integrations and caches the derived graph per identity.
pub struct RealProvider {
    services: ServiceRegistry,
    graphs: RwLock<GraphCache>,
}

impl RealProvider {
    pub fn new(services: ServiceRegistry) -> Self {
        Self::with_cache_capacity(services, DEFAULT_GRAPH_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(services: ServiceRegistry, capacity: usize) -> Self {
        Self { services, graphs: RwLock::new(GraphCache::new(capacity)) }
    }
}

fn cache_key(identity: &str) -> String {
    identity.trim().to_lowercase()
}

#[async_trait]
impl SecurityProvider for RealProvider {
    async fn scan_identity(&self, input: &ScanInput) -> Result<IntelligenceReport, AegisError> {
        info!(scan_type = %input.input_type, "Routing scan to live integrations");
        let mut report = match input.input_type {
            ScanInputType::Email => scan_email(&self.services, &input.value),
            ScanInputType::Mobile => scan_mobile(&self.services, &input.value),
            ScanInputType::Social => scan_social(&self.services, &input.value),
        };

        let graph = map_to_graph(&input.value, input.input_type, &report);
        let mut graphs = self.graphs.write().await;
        graphs.insert(cache_key(&input.value), graph.clone());
        debug!(cached = graphs.len(), "Graph cache updated");
        drop(graphs);
        report.graph_data = Some(graph);
        Ok(report)
    }

    async fn threat_graph(&self, identity: &str) -> Result<SecurityGraph, AegisError> {
        if let Some(graph) = self.graphs.read().await.get(&cache_key(identity)) {
            return Ok(graph.clone());
        }
        Ok(SecurityGraph::root_only(&identity.to_uppercase(), Some(ROOT_SUB_LABEL), 0))
    }

    fn provider_name(&self) -> &str {
        "real"
    }
}
