use serde::{Deserialize, Serialize};
use crate::accounts::can_remediate;
use crate::errors::AegisError;
use crate::models::Tier;

/// Terminal handler selected for one orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandlerState {
    FreeHandler,
    ProHandler,
    PremiumHandler,
}

impl HandlerState {
    pub fn dispatch(tier: Tier) -> Self {
        if !can_remediate(tier) {
            return Self::FreeHandler;
        }
        match tier {
            Tier::Premium => Self::PremiumHandler,
            Tier::Pro => Self::ProHandler,
            Tier::Free => Self::FreeHandler,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Pending,
    Running,
    Completed,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

pub fn allowed_transitions(from: TaskState) -> Vec<TaskState> {
    use TaskState::*;
    match from {
        Pending => vec![Running, Failed],
        Running => vec![Completed, Failed],
        Completed => vec![],
        Failed => vec![],
    }
}

pub fn validate_transition(from: TaskState, to: TaskState) -> Result<(), AegisError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(AegisError::Workflow(format!("Illegal task transition: {} -> {}", from, to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_tier() {
        assert_eq!(HandlerState::dispatch(Tier::Free), HandlerState::FreeHandler);
        assert_eq!(HandlerState::dispatch(Tier::Pro), HandlerState::ProHandler);
        assert_eq!(HandlerState::dispatch(Tier::Premium), HandlerState::PremiumHandler);
    }

    #[test]
    fn test_happy_path_transitions() {
        assert!(validate_transition(TaskState::Pending, TaskState::Running).is_ok());
        assert!(validate_transition(TaskState::Running, TaskState::Completed).is_ok());
        assert!(validate_transition(TaskState::Running, TaskState::Failed).is_ok());
    }

    #[test]
    fn test_terminal_states_are_final() {
        for to in [TaskState::Pending, TaskState::Running, TaskState::Completed, TaskState::Failed] {
            assert!(validate_transition(TaskState::Completed, to).is_err());
            assert!(validate_transition(TaskState::Failed, to).is_err());
        }
        assert!(TaskState::Completed.is_terminal());
        assert!(!TaskState::Running.is_terminal());
    }

    #[test]
    fn test_cannot_skip_running() {
        let err = validate_transition(TaskState::Pending, TaskState::Completed).unwrap_err();
        assert!(err.to_string().contains("pending -> completed"));
    }
}
