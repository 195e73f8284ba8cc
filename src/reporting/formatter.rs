use chrono::{DateTime, SecondsFormat, Utc};
use crate::models::{IntelligenceReport, RemediationOutcome, Tier};

/// Facts recorded in a compliance report.
#[derive(Debug, Clone)]
pub struct ComplianceContext<'a> {
    pub identity: &'a str,
    pub tier: Tier,
    pub threat_id: Option<&'a str>,
    pub audit_id: Option<&'a str>,
    pub generated_at: DateTime<Utc>,
}

pub fn format_compliance_report(ctx: &ComplianceContext<'_>) -> String {
    let mut out = String::new();
    out.push_str("AEGIS COMPLIANCE REPORT\n");
    out.push_str("=======================\n\n");
    out.push_str(&format!("Identity:      {}\n", ctx.identity));
    out.push_str(&format!("Tier:          {}\n", ctx.tier));
    out.push_str(&format!("Threat ID:     {}\n", ctx.threat_id.unwrap_or("Unknown")));
    out.push_str(&format!("Audit record:  {}\n", ctx.audit_id.unwrap_or("unavailable")));
    out.push_str(&format!(
        "Generated at:  {}\n\n",
        ctx.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    out.push_str("Automated remediation was authorized for this identity under the\n");
    out.push_str(&format!("{} tier policy. Workflow: cyber-remediator-ops.\n", ctx.tier));
    out
}

/// Condensed text summary of a scan and its remediation, used by the CLI.
pub fn format_remediation_summary(report: &IntelligenceReport, outcome: &RemediationOutcome) -> String {
    let mut out = format!(
        "Risk score: {}/100\nBreaches found: {}\nSummary: {}\n\nOutcome: {}\n",
        report.risk_score, report.found_breaches, report.summary, outcome.kind
    );
    if let Some(steps) = &outcome.steps {
        for (i, step) in steps.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, step));
        }
    }
    out.push('\n');
    out.push_str(&outcome.content);
    out.push('\n');
    out
}
