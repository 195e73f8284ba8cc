use std::collections::HashSet;
use std::path::Path;
use crate::errors::AegisError;
use super::credentials::resolve_credential;
use super::types::AegisConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::{info, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<AegisConfig, AegisError> {
    if !path.exists() {
        return Err(AegisError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(AegisError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: AegisConfig = serde_yaml::from_value(yaml)?;

    // Semantic conflict detection
    validate_conflicts(&config)?;

    Ok(config)
}

/// Load the config file if one is given, otherwise the built-in defaults, then
/// resolve credentials and apply environment overrides.
pub async fn load_config(path: Option<&Path>) -> Result<AegisConfig, AegisError> {
    let mut config = match path {
        Some(p) => {
            let config = parse_config(p).await?;
            info!(path = %p.display(), "Loaded configuration");
            config
        }
        None => AegisConfig::default(),
    };
    apply_overrides(&mut config, |var| std::env::var(var).ok());
    validate_conflicts(&config)?;
    Ok(config)
}

fn apply_overrides<F>(config: &mut AegisConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    config.services.resolve_credentials();
    config.services.apply_overrides(&lookup);

    if let Some(mode) = lookup("AEGIS_MODE") {
        match mode.parse() {
            Ok(parsed) => config.mode = parsed,
            Err(e) => warn!(error = %e, "Ignoring AEGIS_MODE override"),
        }
    }

    config.llm.api_key = config.llm.api_key.as_deref()
        .map(resolve_credential)
        .or_else(|| lookup("GEMINI_API_KEY"))
        .or_else(|| lookup("API_KEY"));

    config.api_token = config.api_token.as_deref()
        .map(resolve_credential)
        .or_else(|| lookup("AEGIS_API_TOKEN"))
        .filter(|t| !t.is_empty());
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), AegisError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| AegisError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| AegisError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        // Advisory: serde decides what actually fails.
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &AegisConfig) -> Result<(), AegisError> {
    let mut seen = HashSet::new();
    for account in &config.accounts {
        let key = account.email.trim().to_lowercase();
        if key.is_empty() {
            return Err(AegisError::Config("Account with empty email".into()));
        }
        if !seen.insert(key) {
            return Err(AegisError::Config(format!(
                "Duplicate account entry: {}", account.email
            )));
        }
    }

    if !config.pacing.scale.is_finite() || config.pacing.scale < 0.0 {
        return Err(AegisError::Config(format!(
            "pacing.scale must be a non-negative number, got {}", config.pacing.scale
        )));
    }

    if config.storage.public_base_url.trim().is_empty() {
        return Err(AegisError::Config("storage.public_base_url must not be empty".into()));
    }

    Ok(())
}
