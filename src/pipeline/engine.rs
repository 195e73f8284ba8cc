use async_trait::async_trait;
use crate::errors::AegisError;
use super::pacing::Pacing;
use super::phase::WorkflowStep;
use super::state::{validate_transition, TaskState};
use tracing::debug;

/// A workflow step tracked through its lifecycle.
#[derive(Debug, Clone)]
pub struct WorkflowTask {
    pub workflow: &'static str,
    pub step: WorkflowStep,
    state: TaskState,
    error: Option<String>,
}

impl WorkflowTask {
    pub fn new(workflow: &'static str, step: WorkflowStep) -> Self {
        Self { workflow, step, state: TaskState::Pending, error: None }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transition(&mut self, to: TaskState) -> Result<(), AegisError> {
        validate_transition(self.state, to)?;
        debug!(workflow = self.workflow, task = self.step.id, from = %self.state, to = %to, "Task transition");
        self.state = to;
        Ok(())
    }

    /// Marks the task failed from whatever non-terminal state it is in.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
        if !self.state.is_terminal() {
            self.state = TaskState::Failed;
        }
    }
}

/// Executes workflow tasks. The orchestrator only advances once `run_task`
/// has driven the task to a terminal state.
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    async fn run_task(&self, task: &mut WorkflowTask) -> Result<(), AegisError>;

    fn engine_name(&self) -> &str;
}

/// Completes every task after its pacing delay.
pub struct SimulatedEngine {
    pacing: Pacing,
}

impl SimulatedEngine {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing }
    }
}

#[async_trait]
impl WorkflowEngine for SimulatedEngine {
    async fn run_task(&self, task: &mut WorkflowTask) -> Result<(), AegisError> {
        task.transition(TaskState::Running)?;
        self.pacing.pause(task.step.pace_ms).await;
        task.transition(TaskState::Completed)
    }

    fn engine_name(&self) -> &str {
        "simulated"
    }
}
