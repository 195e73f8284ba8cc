use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutcomeKind {
    Text,
    Script,
    Execution,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "TEXT"),
            Self::Script => write!(f, "SCRIPT"),
            Self::Execution => write!(f, "EXECUTION"),
        }
    }
}

/// Terminal result of one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationOutcome {
    #[serde(rename = "type")]
    pub kind: OutcomeKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
}

impl RemediationOutcome {
    pub fn text(content: impl Into<String>) -> Self {
        Self { kind: OutcomeKind::Text, content: content.into(), steps: None }
    }

    pub fn script(content: impl Into<String>) -> Self {
        Self { kind: OutcomeKind::Script, content: content.into(), steps: None }
    }

    pub fn execution(content: impl Into<String>, steps: Vec<String>) -> Self {
        Self { kind: OutcomeKind::Execution, content: content.into(), steps: Some(steps) }
    }
}
