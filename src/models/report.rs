use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use super::graph::SecurityGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceState {
    Active,
    Skipped,
    Error,
}

/// Result of one external lookup attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub source: String,
    pub status: SourceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SourceStatus {
    pub fn active(source: &str) -> Self {
        Self { source: source.to_string(), status: SourceState::Active, reason: None }
    }

    pub fn skipped(source: &str, reason: &str) -> Self {
        Self { source: source.to_string(), status: SourceState::Skipped, reason: Some(reason.to_string()) }
    }

    pub fn error(source: &str, reason: &str) -> Self {
        Self { source: source.to_string(), status: SourceState::Error, reason: Some(reason.to_string()) }
    }
}

/// Per-scan details: the source ledger plus free-form keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceStatus>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReportDetails {
    pub fn with_sources(sources: Vec<SourceStatus>) -> Self {
        Self { sources: Some(sources), extra: Map::new() }
    }

    pub fn insert(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub fn active_sources(&self) -> impl Iterator<Item = &SourceStatus> {
        self.sources
            .iter()
            .flatten()
            .filter(|s| s.status == SourceState::Active)
    }

    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.extra
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceReport {
    pub success: bool,
    pub risk_score: u8,
    pub found_breaches: u32,
    pub summary: String,
    #[serde(default)]
    pub details: ReportDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_data: Option<SecurityGraph>,
}

impl IntelligenceReport {
    /// Report used when no intelligence could be gathered.
    pub fn baseline(summary: &str) -> Self {
        Self {
            success: false,
            risk_score: 0,
            found_breaches: 0,
            summary: summary.to_string(),
            details: ReportDetails::default(),
            graph_data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_details_flatten_round_trip() {
        let details = ReportDetails::with_sources(vec![
            SourceStatus::active("Hunter.io"),
            SourceStatus::skipped("EmailRep", "Feature flag disabled"),
        ])
        .insert("reputation", "Suspicious");

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["reputation"], "Suspicious");
        assert_eq!(json["sources"][0]["status"], "ACTIVE");
        assert!(json["sources"][0].get("reason").is_none());
        assert_eq!(json["sources"][1]["reason"], "Feature flag disabled");
    }

    #[test]
    fn test_active_sources_filter() {
        let details = ReportDetails::with_sources(vec![
            SourceStatus::active("Hunter.io"),
            SourceStatus::error("EmailRep", "Missing API Key"),
        ]);
        let active: Vec<_> = details.active_sources().map(|s| s.source.as_str()).collect();
        assert_eq!(active, vec!["Hunter.io"]);
    }

    #[test]
    fn test_report_camel_case_fields() {
        let report: IntelligenceReport = serde_json::from_value(json!({
            "success": true,
            "riskScore": 30,
            "foundBreaches": 2,
            "summary": "Social footprint mapped",
            "details": { "platformsFound": ["Twitter", "LinkedIn"] }
        }))
        .unwrap();
        assert_eq!(report.found_breaches, 2);
        assert_eq!(report.details.string_list("platformsFound"), vec!["Twitter", "LinkedIn"]);
        assert!(report.details.sources.is_none());
    }
}
