use async_trait::async_trait;
use crate::errors::AegisError;
use super::provider::LLMProvider;
use super::types::LLMResponse;

/// Stand-in used when no credentials are available. Every call fails, which
/// sends PRO-tier runs down the manual fallback path.
pub struct UnconfiguredProvider {
    provider: String,
}

impl UnconfiguredProvider {
    pub fn new(provider: &str) -> Self {
        Self { provider: provider.to_string() }
    }
}

#[async_trait]
impl LLMProvider for UnconfiguredProvider {
    async fn complete(&self, _prompt: &str, _system: Option<&str>) -> Result<LLMResponse, AegisError> {
        Err(AegisError::Config(format!("No API key configured for {}", self.provider)))
    }

    fn provider_name(&self) -> &str { &self.provider }
    fn model_name(&self) -> &str { "none" }
}
