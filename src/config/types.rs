use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::accounts::Account;
use crate::errors::AegisError;
use crate::models::Tier;
use super::services::ServiceRegistry;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AegisConfig {
    #[serde(default)]
    pub mode: OperationMode,
    #[serde(default)]
    pub services: ServiceRegistry,
    #[serde(default)]
    pub llm: LLMConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default = "default_accounts")]
    pub accounts: Vec<Account>,
    /// When set, `x-api-key` must match this value exactly.
    pub api_token: Option<String>,
}

impl Default for AegisConfig {
    fn default() -> Self {
        Self {
            mode: OperationMode::default(),
            services: ServiceRegistry::default(),
            llm: LLMConfig::default(),
            pacing: PacingConfig::default(),
            storage: StorageConfig::default(),
            accounts: default_accounts(),
            api_token: None,
        }
    }
}

fn default_accounts() -> Vec<Account> {
    vec![
        Account::new("pro@aegis.com", "Pro Analyst", Tier::Pro),
        Account::new("premium@aegis.com", "Enterprise Admin", Tier::Premium),
    ]
}

/// Selects the simulated or the real provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationMode {
    #[default]
    Simulation,
    Real,
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulation => write!(f, "SIMULATION"),
            Self::Real => write!(f, "REAL"),
        }
    }
}

impl FromStr for OperationMode {
    type Err = AegisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SIMULATION" | "SIM" | "MOCK" => Ok(Self::Simulation),
            "REAL" | "LIVE" => Ok(Self::Real),
            other => Err(AegisError::InvalidInput(format!("Unknown operation mode: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LLMConfig {
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// Directory with `remediation_<type>.txt` overrides for the system prompts.
    pub prompts_dir: Option<PathBuf>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            model: None,
            api_key: None,
            base_url: None,
            prompts_dir: None,
        }
    }
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PacingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Multiplier applied to every cosmetic delay.
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { enabled: true, scale: default_scale() }
    }
}

fn default_true() -> bool {
    true
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_audit_log")]
    pub audit_log: PathBuf,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audit_log: default_audit_log(),
            reports_dir: default_reports_dir(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_audit_log() -> PathBuf {
    PathBuf::from("./data/audit.jsonl")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("./data/reports")
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}
