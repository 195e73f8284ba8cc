use crate::models::graph::orbit_position;
use crate::models::{
    GraphEdge, GraphNode, IntelligenceReport, NodeKind, ScanInputType, SecurityGraph, Severity,
};

const ORBIT_RADIUS: f64 = 30.0;
const CLEAN_RISK_SCORE: u8 = 5;
pub const ROOT_SUB_LABEL: &str = "Identity Root";

struct Entity {
    id: String,
    label: String,
    sub_label: &'static str,
    kind: NodeKind,
    severity: Severity,
    source: String,
}

/// Builds the threat graph for one scan report.
pub fn map_to_graph(identity: &str, scan_type: ScanInputType, report: &IntelligenceReport) -> SecurityGraph {
    let root_label = identity.to_uppercase();
    if report.found_breaches == 0 {
        return SecurityGraph::root_only(&root_label, Some(ROOT_SUB_LABEL), CLEAN_RISK_SCORE);
    }

    let details = &report.details;
    let entities: Vec<Entity> = match scan_type {
        ScanInputType::Email => details
            .active_sources()
            .enumerate()
            .map(|(i, s)| Entity {
                id: format!("email-breach-{}", i),
                label: if s.source == "Hunter.io" { "LinkedIn Dump" } else { "Breach Detected" }.to_string(),
                sub_label: "Data Leak",
                kind: NodeKind::Breach,
                severity: Severity::Critical,
                source: s.source.clone(),
            })
            .collect(),
        ScanInputType::Social => details
            .string_list("platformsFound")
            .into_iter()
            .enumerate()
            .map(|(i, platform)| Entity {
                id: format!("social-exp-{}", i),
                label: platform,
                sub_label: "Public Exposure",
                kind: NodeKind::Exposure,
                severity: Severity::Medium,
                source: "Google OSINT".to_string(),
            })
            .collect(),
        ScanInputType::Mobile if details.str_value("lineType") == Some("Virtual") => vec![Entity {
            id: "mobile-risk-0".to_string(),
            label: "Virtual/VoIP Line".to_string(),
            sub_label: "Suspicious Carrier",
            kind: NodeKind::Risk,
            severity: Severity::High,
            source: "NumVerify".to_string(),
        }],
        ScanInputType::Mobile => Vec::new(),
    };

    let mut graph = SecurityGraph::root_only(&root_label, Some(ROOT_SUB_LABEL), report.risk_score);
    let count = entities.len();
    for (i, entity) in entities.into_iter().enumerate() {
        let (x, y) = orbit_position(i, count, ORBIT_RADIUS);
        graph.edges.push(GraphEdge::radial(&entity.id));
        graph.nodes.push(GraphNode {
            id: entity.id,
            label: entity.label,
            sub_label: Some(entity.sub_label.to_string()),
            kind: entity.kind,
            severity: Some(entity.severity),
            icon_type: Some(entity.source.clone()),
            source: Some(entity.source),
            date: None,
            x: Some(x),
            y: Some(y),
        });
    }
    graph
}
