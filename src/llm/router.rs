use crate::config::LLMConfig;
use crate::errors::AegisError;
use super::provider::LLMProvider;
use super::gemini::GeminiProvider;
use super::openai::OpenAIProvider;
use super::unconfigured::UnconfiguredProvider;
use tracing::warn;

pub fn create_provider(config: &LLMConfig) -> Result<Box<dyn LLMProvider>, AegisError> {
    let provider_name = config.provider.trim().to_lowercase();
    let api_key = config.api_key.as_deref().filter(|k| !k.trim().is_empty());
    let model = config.model.as_deref();

    match (provider_name.as_str(), api_key) {
        ("none" | "offline", _) => Ok(Box::new(UnconfiguredProvider::new("offline"))),
        ("gemini", Some(key)) => Ok(Box::new(match config.base_url.as_deref() {
            Some(url) => GeminiProvider::with_base_url(key, model, url),
            None => GeminiProvider::new(key, model),
        })),
        ("openai", Some(key)) => Ok(Box::new(OpenAIProvider::new(key, model))),
        ("openai_compatible" | "local", key) => {
            let url = config.base_url.as_deref().ok_or_else(|| AegisError::Config(format!(
                "llm.base_url is required for provider {}", provider_name
            )))?;
            Ok(Box::new(OpenAIProvider::with_base_url(key.unwrap_or(""), model, url)))
        }
        ("gemini" | "openai", None) => {
            warn!(provider = %provider_name, "No LLM API key configured; script generation will use the manual fallback");
            Ok(Box::new(UnconfiguredProvider::new(&provider_name)))
        }
        _ => Err(AegisError::Config(format!("Unknown LLM provider: {}", config.provider))),
    }
}
