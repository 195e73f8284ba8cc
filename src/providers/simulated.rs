use async_trait::async_trait;
use rand::Rng;
use crate::errors::AegisError;
use crate::models::graph::orbit_position;
use crate::models::{
    GraphEdge, GraphNode, IntelligenceReport, NodeKind, ReportDetails, ScanInput, ScanInputType,
    SecurityGraph, Severity,
};
use crate::pipeline::Pacing;
use super::SecurityProvider;
use tracing::debug;

const SCAN_DELAY_MS: u64 = 2000;
const GRAPH_DELAY_MS: u64 = 800;
const GRAPH_RISK_SCORE: u8 = 85;

struct BreachRecord {
    id: &'static str,
    source: &'static str,
    date: &'static str,
    severity: Severity,
    data_type: &'static str,
}

static BREACH_CATALOG: &[BreachRecord] = &[
    BreachRecord { id: "breach-1", source: "Legacy CRM", date: "2023-11-12", severity: Severity::Critical, data_type: "Password Hash" },
    BreachRecord { id: "breach-2", source: "Git Repo", date: "2024-01-05", severity: Severity::High, data_type: "API Keys" },
    BreachRecord { id: "breach-3", source: "Email Svc", date: "2024-02-20", severity: Severity::Medium, data_type: "Customer List" },
    BreachRecord { id: "breach-4", source: "Int. Wiki", date: "2024-03-10", severity: Severity::Low, data_type: "Internal Docs" },
    BreachRecord { id: "breach-5", source: "AWS Bucket", date: "2024-03-15", severity: Severity::Critical, data_type: "Personal Data" },
    BreachRecord { id: "breach-6", source: "Dev Server", date: "2024-03-18", severity: Severity::High, data_type: "SSH Keys" },
    BreachRecord { id: "breach-7", source: "Slack Token", date: "2024-03-19", severity: Severity::Medium, data_type: "Chat History" },
    BreachRecord { id: "breach-8", source: "Old Analytics", date: "2024-03-20", severity: Severity::Low, data_type: "Metadata" },
];

/// Canned intelligence with cosmetic latency. Never fails.
pub struct SimulatedProvider {
    pacing: Pacing,
}

impl SimulatedProvider {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing }
    }
}

#[async_trait]
impl SecurityProvider for SimulatedProvider {
    async fn scan_identity(&self, input: &ScanInput) -> Result<IntelligenceReport, AegisError> {
        self.pacing.pause(SCAN_DELAY_MS).await;
        debug!(scan_type = %input.input_type, "Simulated scan");

        let (risk_score, found_breaches, summary, kind, confidence) = match input.input_type {
            ScanInputType::Email => (
                85,
                BREACH_CATALOG.len() as u32,
                format!("Email {} found in major breaches. Password rotation recommended.", input.value),
                "Email Exposure",
                0.98,
            ),
            ScanInputType::Mobile => (
                55,
                2,
                format!("Phone {} linked to suspicious SMS campaigns.", input.value),
                "SMS Phishing",
                0.75,
            ),
            ScanInputType::Social => (
                35,
                1,
                format!("Handle {} has high public visibility on 4 platforms.", input.value),
                "OSINT Footprint",
                0.85,
            ),
        };

        Ok(IntelligenceReport {
            success: true,
            risk_score,
            found_breaches,
            summary,
            details: ReportDetails::default()
                .insert("type", kind)
                .insert("confidence", confidence),
            graph_data: None,
        })
    }

    async fn threat_graph(&self, identity: &str) -> Result<SecurityGraph, AegisError> {
        self.pacing.pause(GRAPH_DELAY_MS).await;
        debug!(identity = %identity, "Simulated threat graph");

        let mut breaches: Vec<&BreachRecord> = BREACH_CATALOG.iter().collect();
        breaches.sort_by_key(|b| b.severity.rank());

        let mut graph = SecurityGraph::root_only("IDENTITY ROOT", None, GRAPH_RISK_SCORE);
        let count = breaches.len();
        let mut rng = rand::thread_rng();
        for (i, breach) in breaches.into_iter().enumerate() {
            let radius = rng.gen_range(30.0..40.0);
            let (x, y) = orbit_position(i, count, radius);
            graph.nodes.push(GraphNode {
                id: breach.id.to_string(),
                label: breach.source.to_string(),
                sub_label: Some(breach.data_type.to_string()),
                kind: NodeKind::Breach,
                severity: Some(breach.severity),
                source: Some(breach.source.to_string()),
                icon_type: Some(breach.source.to_string()),
                date: Some(breach.date.to_string()),
                x: Some(x),
                y: Some(y),
            });
            graph.edges.push(GraphEdge::radial(breach.id));
        }
        Ok(graph)
    }

    fn provider_name(&self) -> &str {
        "simulated"
    }
}
