use std::sync::Arc;
use crate::llm::LLMProvider;
use crate::models::{IntelligenceReport, RemediationOutcome, ScanInputType, Tier};
use crate::accounts::can_remediate;
use crate::prompts::PromptTable;
use super::emitter::{LogEmitter, LogSink};
use super::engine::{WorkflowEngine, WorkflowTask};
use super::pacing::Pacing;
use super::phase::{WorkflowStep, PREMIUM_WORKFLOW, PRO_WORKFLOW};
use super::state::{HandlerState, TaskState};
use tracing::{info, warn, error};

const PREAMBLE_PACE_MS: u64 = 400;
const AI_OFFLINE_MESSAGE: &str = "AI Brain is currently offline. Please try manual steps.";
const EMPTY_SCRIPT_MESSAGE: &str = "Failed to generate script.";
const PREMIUM_SUCCESS_MESSAGE: &str = "Identity Secured. Workflow finished without errors.";

/// Runs the tiered remediation procedure for one identity.
pub struct RemediationOrchestrator {
    llm: Arc<dyn LLMProvider>,
    engine: Arc<dyn WorkflowEngine>,
    prompts: Arc<PromptTable>,
    pacing: Pacing,
}

enum WorkflowResult {
    Completed(Vec<String>),
    Halted { completed: Vec<String>, failed_step: &'static str },
}

impl RemediationOrchestrator {
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        engine: Arc<dyn WorkflowEngine>,
        prompts: Arc<PromptTable>,
        pacing: Pacing,
    ) -> Self {
        Self { llm, engine, prompts, pacing }
    }

    /// Emits progress through `sink` in order and returns exactly one outcome.
    pub async fn run(
        &self,
        identity: &str,
        scan_type: ScanInputType,
        tier: Tier,
        report: &IntelligenceReport,
        sink: &dyn LogSink,
    ) -> RemediationOutcome {
        let log = LogEmitter::new(sink);
        let handler = HandlerState::dispatch(tier);
        info!(
            identity = %identity,
            scan_type = %scan_type,
            tier = %tier,
            risk_score = report.risk_score,
            handler = ?handler,
            "Starting remediation run"
        );

        // FREE performs no asynchronous work at all.
        let paced = can_remediate(tier);

        log.info("Aegis Vizier Protocol Initiated...");
        if paced { self.pacing.pause(PREAMBLE_PACE_MS).await; }
        log.success(format!("Target Acquired: {}", identity));
        if paced { self.pacing.pause(PREAMBLE_PACE_MS).await; }
        let mode = if paced { "REAL" } else { "MANUAL" };
        log.warning(format!("Mode: ACTIVE_DEFENSE ({})", mode));
        if paced { self.pacing.pause(PREAMBLE_PACE_MS).await; }
        log.info(format!("Selecting protocol for {} tier...", tier));

        match handler {
            HandlerState::FreeHandler => self.handle_free(scan_type),
            HandlerState::ProHandler => self.handle_pro(identity, scan_type, &log).await,
            HandlerState::PremiumHandler => self.handle_premium(&log).await,
        }
    }

    fn handle_free(&self, scan_type: ScanInputType) -> RemediationOutcome {
        RemediationOutcome::text(format!(
            "Manual Recommendation for {}:\n\
             1. Change your primary password immediately.\n\
             2. Enable 2FA on all linked accounts.\n\
             3. Review your public profile visibility.",
            scan_type
        ))
    }

    async fn handle_pro(&self, identity: &str, scan_type: ScanInputType, log: &LogEmitter<'_>) -> RemediationOutcome {
        log.warning("Engaging AI Remediation Brain...");

        let system = self.prompts.system_instruction(scan_type);
        let prompt = self.prompts.user_prompt(identity);

        let outcome = match self.llm.complete(&prompt, Some(system)).await {
            Ok(response) => {
                info!(
                    provider = self.llm.provider_name(),
                    model = %response.model,
                    output_tokens = ?response.output_tokens,
                    "Remediation script generated"
                );
                let script = if response.content.trim().is_empty() {
                    EMPTY_SCRIPT_MESSAGE.to_string()
                } else {
                    response.content
                };
                log.success("Custom Remediation Script Generated.");
                RemediationOutcome::script(script)
            }
            Err(e) => {
                let class = e.classify();
                warn!(
                    provider = self.llm.provider_name(),
                    error_type = class.error_type,
                    error = %e,
                    "Script generation failed, using manual fallback"
                );
                log.warning(AI_OFFLINE_MESSAGE);
                RemediationOutcome::text(AI_OFFLINE_MESSAGE)
            }
        };

        let workflow = self
            .run_workflow("remedy-worker-pro", PRO_WORKFLOW, false, log, |step| step.message.to_string())
            .await;
        if let WorkflowResult::Halted { completed, failed_step } = workflow {
            warn!(failed_step, completed = completed.len(), "PRO workflow finished with skipped steps");
        }

        outcome
    }

    async fn handle_premium(&self, log: &LogEmitter<'_>) -> RemediationOutcome {
        log.warning("Initializing Autonomous Executor (Enterprise Cluster)...");

        let result = self
            .run_workflow("cyber-remediator-ops", PREMIUM_WORKFLOW, true, log, |step| format!("[Workflow] {}", step.message))
            .await;

        match result {
            WorkflowResult::Completed(steps) => {
                log.success("AUTONOMOUS REMEDIATION SUCCESSFUL.");
                RemediationOutcome::execution(PREMIUM_SUCCESS_MESSAGE, steps)
            }
            WorkflowResult::Halted { completed, failed_step } => {
                log.error("AUTONOMOUS REMEDIATION HALTED.");
                RemediationOutcome::execution(
                    format!("Remediation halted at step '{}'. Completed steps were applied.", failed_step),
                    completed,
                )
            }
        }
    }

    /// Runs steps through the engine. PRO keeps going past a failed step; PREMIUM stops.
    async fn run_workflow<F>(
        &self,
        workflow: &'static str,
        steps: &'static [WorkflowStep],
        halt_on_failure: bool,
        log: &LogEmitter<'_>,
        render: F,
    ) -> WorkflowResult
    where
        F: Fn(&WorkflowStep) -> String,
    {
        let mut completed = Vec::with_capacity(steps.len());
        let mut first_failure = None;

        for step in steps {
            let mut task = WorkflowTask::new(workflow, *step);
            if let Err(e) = self.engine.run_task(&mut task).await {
                task.fail(e.to_string());
            }

            if task.state() == TaskState::Completed {
                log.log(step.level, render(step));
                completed.push(step.message.to_string());
                continue;
            }

            let reason = task.error().unwrap_or("task did not complete").to_string();
            if halt_on_failure {
                error!(workflow, task = step.id, engine = self.engine.engine_name(), reason = %reason, "Workflow task failed, halting");
                log.error(format!("[Workflow] Step failed: {}", step.message));
                return WorkflowResult::Halted { completed, failed_step: step.id };
            }
            warn!(workflow, task = step.id, engine = self.engine.engine_name(), reason = %reason, "Workflow task failed, continuing");
            log.warning(format!("Step skipped: {}", step.message));
            first_failure.get_or_insert(step.id);
        }

        match first_failure {
            Some(failed_step) => WorkflowResult::Halted { completed, failed_step },
            None => WorkflowResult::Completed(completed),
        }
    }
}
