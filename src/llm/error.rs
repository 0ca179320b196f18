use thiserror::Error;

/// Failures at the language-model / tokenizer boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("API key not configured for {0}")]
    ApiKeyMissing(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Context length exceeded: {0}")]
    ContextLengthExceeded(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Completion contained no choices")]
    EmptyCompletion,

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
}

impl ServiceError {
    /// Classify a non-success HTTP response
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::AuthenticationFailed(body.to_string()),
            403 => Self::AuthenticationFailed(format!("Forbidden: {}", body)),
            429 => Self::RateLimited(body.to_string()),
            400 => {
                if body.contains("context_length") || body.contains("max_tokens") {
                    Self::ContextLengthExceeded(body.to_string())
                } else {
                    Self::RequestFailed(body.to_string())
                }
            }
            500..=599 => Self::ServerError(format!("Status {}: {}", status, body)),
            _ => Self::RequestFailed(format!("Status {}: {}", status, body)),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Timeout | Self::ServerError(_)
        )
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else if err.is_connect() {
            Self::RequestFailed(format!("Connection failed: {}", err))
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
