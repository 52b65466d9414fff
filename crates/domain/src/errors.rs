use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Malformed DNS message: {0}")]
    DecodeError(String),

    #[error("Failed to encode DNS message: {0}")]
    EncodeError(String),

    #[error("Upstream {upstream} failed: {reason}")]
    UpstreamError { upstream: String, reason: String },

    #[error("Timeout waiting for upstream {upstream}")]
    UpstreamTimeout { upstream: String },

    #[error("Quota ledger did not answer in time")]
    LedgerTimeout,

    #[error("Failed to charge quota: {0}")]
    ChargeFailed(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),

    #[error("Startup error: {0}")]
    StartupError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True for errors caused by the caller rather than by the gateway or its upstreams.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_)
                | Self::BadRequest(_)
                | Self::DecodeError(_)
                | Self::EncodeError(_)
        )
    }
}
