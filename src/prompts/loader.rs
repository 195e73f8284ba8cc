use std::collections::HashMap;
use std::path::Path;
use crate::errors::AegisError;
use crate::models::ScanInputType;
use tracing::debug;

const EMAIL_PROMPT: &str = "You are a Senior Privacy Advocate. The user's email has been leaked.
Generate a professional GDPR \"Right to Erasure\" (Article 17) request email template.
Include placeholders for the specific service name and user name.
Keep it legally firm and professional.";

const MOBILE_PROMPT: &str = "You are a Telecom Security Expert. The user's mobile number is receiving high spam.
Generate a configuration script (or instructions for a .vcf blocklist) that identifies
common VoIP spam signatures. Provide a technical explanation of how to apply this filter.";

const SOCIAL_PROMPT: &str = "You are an OSINT Privacy Engineer. The user's social media footprint is too wide.
Generate a direct action plan with deep-links to privacy settings for major platforms (Twitter, LinkedIn, Meta).
Provide a \"Privacy Hardening\" script in Python that could theoretically audit these settings.";

/// System instructions for script generation, keyed by scan type.
#[derive(Debug, Clone, Default)]
pub struct PromptTable {
    overrides: HashMap<ScanInputType, String>,
}

impl PromptTable {
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Reads `remediation_<type>.txt` files from `dir`; missing files keep the built-in text.
    pub fn load(dir: Option<&Path>) -> Result<Self, AegisError> {
        let mut table = Self::builtin();
        let Some(dir) = dir else {
            return Ok(table);
        };
        for scan_type in ScanInputType::ALL {
            let path = dir.join(format!("remediation_{}.txt", scan_type.as_str().to_lowercase()));
            if !path.exists() {
                continue;
            }
            let content = std::fs::read_to_string(&path).map_err(|e| {
                AegisError::Config(format!("Failed to read prompt {}: {}", path.display(), e))
            })?;
            if content.trim().is_empty() {
                continue;
            }
            debug!(path = %path.display(), "Loaded prompt override");
            table.overrides.insert(scan_type, content.trim().to_string());
        }
        Ok(table)
    }

    pub fn system_instruction(&self, scan_type: ScanInputType) -> &str {
        if let Some(text) = self.overrides.get(&scan_type) {
            return text;
        }
        match scan_type {
            ScanInputType::Email => EMAIL_PROMPT,
            ScanInputType::Mobile => MOBILE_PROMPT,
            ScanInputType::Social => SOCIAL_PROMPT,
        }
    }

    pub fn user_prompt(&self, identity: &str) -> String {
        format!("Generate a remediation plan for identity: {}", identity)
    }
}
