use crate::models::LogLevel;

/// One fixed step of a remediation workflow.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowStep {
    pub id: &'static str,
    pub message: &'static str,
    pub level: LogLevel,
    /// Cosmetic delay before the step completes.
    pub pace_ms: u64,
}

pub static PRO_WORKFLOW: &[WorkflowStep] = &[
    WorkflowStep {
        id: "provision-worker",
        message: "Provisioning workflow 'remedy-worker-pro'...",
        level: LogLevel::Info,
        pace_ms: 1000,
    },
    WorkflowStep {
        id: "spawn-sandbox",
        message: "Spawning Docker Container (Python 3.11/Alpine) for script execution...",
        level: LogLevel::Warning,
        pace_ms: 1200,
    },
    WorkflowStep {
        id: "validate-parameters",
        message: "Validating AI-suggested parameters against local security policy...",
        level: LogLevel::Info,
        pace_ms: 1500,
    },
    WorkflowStep {
        id: "execute-patch",
        message: "Executing patch logic in isolated sandbox...",
        level: LogLevel::Success,
        pace_ms: 1000,
    },
    WorkflowStep {
        id: "verify-identity",
        message: "Identity state verified. Cleaning up worker containers.",
        level: LogLevel::Info,
        pace_ms: 800,
    },
];

pub static PREMIUM_WORKFLOW: &[WorkflowStep] = &[
    WorkflowStep {
        id: "vault-auth",
        message: "Vault Authentication Handshake",
        level: LogLevel::Info,
        pace_ms: 900,
    },
    WorkflowStep {
        id: "retrieve-secrets",
        message: "Retrieving workflow secrets for 'cyber-ops' namespace",
        level: LogLevel::Info,
        pace_ms: 900,
    },
    WorkflowStep {
        id: "optimize-logic",
        message: "AI: Optimization of remediation logic based on real-time threat graph",
        level: LogLevel::Warning,
        pace_ms: 900,
    },
    WorkflowStep {
        id: "deploy-container",
        message: "Deploying Aegis-Container (Node/Python) to edge node",
        level: LogLevel::Info,
        pace_ms: 900,
    },
    WorkflowStep {
        id: "multi-step",
        message: "Executing Multi-Step Workflow: [Rotate_Keys, Update_Policy, Notify_Admin]",
        level: LogLevel::Info,
        pace_ms: 900,
    },
    WorkflowStep {
        id: "rotate-keys",
        message: "AWS IAM: Successfully rotated compromised access keys",
        level: LogLevel::Success,
        pace_ms: 900,
    },
    WorkflowStep {
        id: "lateral-audit",
        message: "Verifying Resolution: Scanning attack surface for lateral persistence...",
        level: LogLevel::Warning,
        pace_ms: 900,
    },
    WorkflowStep {
        id: "audit-log",
        message: "Post-remediation audit log generated in com.cyber.ops",
        level: LogLevel::Success,
        pace_ms: 900,
    },
];
