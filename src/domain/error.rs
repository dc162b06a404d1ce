use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transport unavailable: {0}")]
    TransportUnavailable(String),

    #[error("Provider rejected request (HTTP {status}): {body}")]
    ProviderRejected { status: u16, body: String },

    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    /// The provider finished the job with status `error`.
    #[error("Translation job failed: {0}")]
    JobFailed(String),

    #[error("Timed out waiting for job: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DocError {
    /// Only connection-level failures are worth retrying, and only by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DocError::TransportUnavailable(_))
    }
}

impl From<reqwest::Error> for DocError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DocError::ProtocolViolation(err.to_string())
        } else if let Some(status) = err.status() {
            DocError::ProviderRejected {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            DocError::TransportUnavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DocError {
    fn from(err: serde_json::Error) -> Self {
        DocError::ProtocolViolation(format!("malformed response body: {}", err))
    }
}
