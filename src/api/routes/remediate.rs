use axum::{
    body::Bytes,
    extract::State,
    response::Response,
};
use chrono::Utc;
use tokio::sync::mpsc::{self, UnboundedSender};
use crate::accounts::{can_remediate, ACCESS_DENIED_MESSAGE};
use crate::api::models::{parse_json_body, RemediateRequest};
use crate::api::ndjson::ndjson_response;
use crate::api::AppState;
use crate::errors::AegisError;
use crate::models::{IntelligenceReport, LogEntry, ScanInput, ScanInputType, Tier};
use crate::pipeline::LogEmitter;
use crate::reporting::{format_compliance_report, ComplianceContext};
use tracing::{info, warn};

pub const WORKFLOW_ID: &str = "cyber-remediator-ops";

/// Everything the stream producer needs once authorization has passed.
struct RemediationJob {
    email: String,
    tier: Tier,
    threat_id: Option<String>,
    audit_id: Option<String>,
    report_url: Option<String>,
}

pub async fn remediate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AegisError> {
    let req: RemediateRequest = parse_json_body(&body)?;
    let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AegisError::InvalidInput("Email required".into()))?
        .to_string();

    let tier = state.accounts.tier_for(&email);
    if !can_remediate(tier) {
        warn!(identity = %email, tier = %tier, "Remediation denied by tier policy");
        return Err(AegisError::Permission(ACCESS_DENIED_MESSAGE.into()));
    }
    let threat_id = req.threat_id.filter(|t| !t.trim().is_empty());
    info!(identity = %email, tier = %tier, threat_id = ?threat_id, "Remediation authorized");

    let audit_id = match state.audit.append(&email, "AUTHORIZED", tier, threat_id.as_deref()).await {
        Ok(record) => Some(record.id),
        Err(e) => {
            warn!(error_type = e.classify().error_type, error = %e, "Audit write failed");
            None
        }
    };

    let report = format_compliance_report(&ComplianceContext {
        identity: &email,
        tier,
        threat_id: threat_id.as_deref(),
        audit_id: audit_id.as_deref(),
        generated_at: Utc::now(),
    });
    let report_url = match state.reports.store(&email, &report).await {
        Ok(stored) => Some(stored.url),
        Err(e) => {
            warn!(error_type = e.classify().error_type, error = %e, "Compliance report write failed");
            None
        }
    };

    let job = RemediationJob { email, tier, threat_id, audit_id, report_url };
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(produce(state, job, tx));

    Ok(ndjson_response(rx))
}

/// Writes the progress stream. Dropping `tx` on return closes the response.
async fn produce(state: AppState, job: RemediationJob, tx: UnboundedSender<LogEntry>) {
    let log = LogEmitter::new(&tx);
    let pacing = state.pacing;

    log.info(format!("Initiating remediation workflow for {}...", job.email));
    pacing.pause(800).await;
    log.info(format!(
        "[Workflow] Authenticating with Vault for Threat ID: {}",
        job.threat_id.as_deref().unwrap_or("Unknown")
    ));
    pacing.pause(1000).await;
    log.success(format!("[Workflow] RBAC Check Passed: User Tier is {}", job.tier));
    pacing.pause(800).await;

    let provider = state.providers.select(state.config.mode);
    let report = match provider.scan_identity(&ScanInput::email(&job.email)).await {
        Ok(report) => report,
        Err(e) => {
            warn!(provider = provider.provider_name(), error = %e, "Exposure lookup failed");
            log.warning("Exposure lookup unavailable. Continuing with baseline intelligence.");
            IntelligenceReport::baseline("Exposure lookup unavailable")
        }
    };

    let outcome = state
        .orchestrator
        .run(&job.email, ScanInputType::Email, job.tier, &report, &log)
        .await;
    log.success(format!("Remediation outcome: {}", outcome.kind));

    if let Some(id) = &job.audit_id {
        log.info(format!("Audit record {} committed.", id));
    }
    if let Some(url) = &job.report_url {
        log.info(format!("Compliance report stored at {}", url));
    }
    log.success(format!("[Workflow] '{}' completed successfully.", WORKFLOW_ID));
    info!(identity = %job.email, outcome = %outcome.kind, "Remediation stream finished");
}
