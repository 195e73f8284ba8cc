use super::types::AegisError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Caused by the caller; the message is safe to return verbatim.
    pub client_error: bool,
}

impl AegisError {
    /// Classify this error for structured logging and response shaping.
    pub fn classify(&self) -> ErrorClassification {
        let (error_type, client_error) = match self {
            AegisError::InvalidInput(_) => ("InvalidInputError", true),
            AegisError::Authentication(_) => ("AuthenticationError", true),
            AegisError::Permission(_) => ("PermissionError", true),
            AegisError::NotFound(_) => ("NotFoundError", true),

            AegisError::Config(_) => ("ConfigError", false),
            AegisError::LLMApi(_) => ("LLMApiError", false),
            AegisError::RateLimit(_) => ("RateLimitError", false),
            AegisError::Network(_) => ("NetworkError", false),
            AegisError::Storage(_) => ("StorageError", false),
            AegisError::Workflow(_) => ("WorkflowError", false),
            AegisError::Io(_) => ("IoError", false),
            AegisError::Json(_) => ("JsonError", false),
            AegisError::Yaml(_) => ("YamlError", false),
            AegisError::Internal(_) => ("InternalError", false),
        };
        ErrorClassification { error_type, client_error }
    }
}
