use aegis::config::{AegisConfig, OperationMode};
use aegis::models::{NodeKind, ScanInput, ScanInputType, IntelligenceReport};
use aegis::pipeline::Pacing;
use aegis::providers::mapper::map_to_graph;
use aegis::providers::Providers;

fn providers() -> Providers {
    Providers::from_config(&AegisConfig::default(), Pacing::disabled())
}

#[tokio::test]
async fn test_simulated_graph_is_stable_across_calls() {
    let provider = providers().select(OperationMode::Simulation);
    let first = provider.threat_graph("a@b.com").await.unwrap();
    let second = provider.threat_graph("a@b.com").await.unwrap();

    assert_eq!(first.nodes.len(), second.nodes.len());
    assert_eq!(first.edges.len(), second.edges.len());
    assert_eq!(first.risk_score, second.risk_score);
    assert_eq!(first.nodes[0].kind, NodeKind::User);
    assert!(first.edges.iter().all(|e| e.source == first.nodes[0].id));
}

#[tokio::test]
async fn test_real_scan_without_sources_yields_root_only_graph() {
    let provider = providers().select(OperationMode::Real);
    for input_type in ScanInputType::ALL {
        let value = match input_type {
            ScanInputType::Email => "a@b.com",
            ScanInputType::Mobile => "+15550100999",
            ScanInputType::Social => "@handle",
        };
        let report = provider.scan_identity(&ScanInput::new(input_type, value)).await.unwrap();
        assert_eq!(report.found_breaches, 0);
        let graph = report.graph_data.unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }
}

#[tokio::test]
async fn test_real_graph_lookup_reuses_scan_result() {
    let provider = providers().select(OperationMode::Real);
    provider.scan_identity(&ScanInput::email("Someone@Example.com")).await.unwrap();
    let graph = provider.threat_graph("  someone@example.com ").await.unwrap();
    assert_eq!(graph.nodes[0].label, "SOMEONE@EXAMPLE.COM");
}

#[test]
fn test_mapper_zero_breaches_is_root_only() {
    let graph = map_to_graph("x@y.com", ScanInputType::Email, &IntelligenceReport::baseline("clean"));
    assert_eq!(graph.nodes.len(), 1);
    assert_eq!(graph.nodes[0].label, "X@Y.COM");
}
