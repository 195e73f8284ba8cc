use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use super::credentials::resolve_credential;

/// Third-party lookups the real provider knows how to gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum ServiceName {
    #[serde(rename = "HUNTER")]
    Hunter,
    #[serde(rename = "EMAILREP")]
    EmailRep,
    #[serde(rename = "NUMVERIFY")]
    NumVerify,
    #[serde(rename = "GOOGLE_SEARCH")]
    GoogleSearch,
    #[serde(rename = "VIRUSTOTAL")]
    VirusTotal,
}

impl ServiceName {
    pub const ALL: [ServiceName; 5] = [
        ServiceName::Hunter,
        ServiceName::EmailRep,
        ServiceName::NumVerify,
        ServiceName::GoogleSearch,
        ServiceName::VirusTotal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hunter => "HUNTER",
            Self::EmailRep => "EMAILREP",
            Self::NumVerify => "NUMVERIFY",
            Self::GoogleSearch => "GOOGLE_SEARCH",
            Self::VirusTotal => "VIRUSTOTAL",
        }
    }

    /// Label recorded in `SourceStatus.source`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hunter => "Hunter.io",
            Self::EmailRep => "EmailRep",
            Self::NumVerify => "NumVerify",
            Self::GoogleSearch => "Google OSINT",
            Self::VirusTotal => "VirusTotal",
        }
    }

    pub fn enable_var(&self) -> String {
        format!("AEGIS_ENABLE_{}", self.as_str())
    }

    pub fn key_var(&self) -> String {
        match self {
            Self::GoogleSearch => "AEGIS_GOOGLE_API_KEY".to_string(),
            other => format!("AEGIS_{}_API_KEY", other.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceSettings {
    #[serde(default)]
    pub enabled: bool,
    pub api_key: Option<String>,
}

impl ServiceSettings {
    /// Configured key, ignoring blanks.
    pub fn key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// Enablement flag and credential per service. Missing entries are disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ServiceRegistry {
    services: BTreeMap<ServiceName, ServiceSettings>,
}

impl ServiceRegistry {
    pub fn settings(&self, name: ServiceName) -> ServiceSettings {
        self.services.get(&name).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, name: ServiceName, settings: ServiceSettings) {
        self.services.insert(name, settings);
    }

    pub fn is_enabled(&self, name: ServiceName) -> bool {
        self.settings(name).enabled
    }

    /// Resolve `$VAR` references in configured keys.
    pub fn resolve_credentials(&mut self) {
        for settings in self.services.values_mut() {
            if let Some(key) = &settings.api_key {
                settings.api_key = Some(resolve_credential(key));
            }
        }
    }

    /// Overlay `AEGIS_ENABLE_<SERVICE>` / `AEGIS_<SERVICE>_API_KEY` values from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for name in ServiceName::ALL {
            let mut settings = self.settings(name);
            let mut changed = false;
            if let Some(flag) = lookup(&name.enable_var()) {
                settings.enabled = flag.trim().eq_ignore_ascii_case("true");
                changed = true;
            }
            if let Some(key) = lookup(&name.key_var()) {
                settings.api_key = Some(key);
                changed = true;
            }
            if changed {
                debug!(service = name.as_str(), enabled = settings.enabled, "Service override applied");
                self.set(name, settings);
            }
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|var| std::env::var(var).ok());
    }
}
