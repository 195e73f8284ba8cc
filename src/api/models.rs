use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use crate::errors::AegisError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediateRequest {
    pub email: Option<String>,
    pub threat_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(rename = "type")]
    pub input_type: String,
    pub value: String,
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQuery {
    pub identity: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub build_timestamp: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_hash: Option<&'static str>,
    pub mode: String,
}

/// Parses a request body, mapping any syntax or shape error to a 400.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AegisError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AegisError::InvalidInput("Request body is required".into()));
    }
    serde_json::from_slice(body).map_err(|e| AegisError::InvalidInput(format!("Invalid JSON body: {}", e)))
}
