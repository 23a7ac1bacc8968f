//! Error types for the generation client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenAiError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// 401 or 403
    #[error("authentication rejected (HTTP {status}): {message}")]
    Auth { status: u16, message: String },
    /// 429
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The response body did not match the expected payload shape
    #[error("unexpected response payload: {0}")]
    Schema(String),
    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),
}

impl GenAiError {
    /// Map a non-success status code and its body to an error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => GenAiError::Auth {
                status,
                message: body,
            },
            429 => GenAiError::RateLimited(body),
            _ => GenAiError::Http {
                status,
                message: body,
            },
        }
    }
}
