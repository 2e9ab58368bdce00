//! Error types for port operations.

/// Failure talking to an upstream source, with the source named for tracing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// No API key configured for an authenticated source.
    #[error("No API key configured for {source_name}")]
    MissingApiKey { source_name: &'static str },

    /// Transport failure, including timeouts.
    #[error("{source_name} request failed: {message}")]
    RequestFailed {
        source_name: &'static str,
        message: String,
    },

    /// Non-success HTTP status.
    #[error("{source_name} returned HTTP {status}")]
    Status {
        source_name: &'static str,
        status: u16,
    },

    /// Envelope reported `success: false`.
    #[error("{source_name} rejected request: {cause}")]
    Rejected {
        source_name: &'static str,
        cause: String,
    },

    /// Body could not be parsed into the expected shape.
    #[error("Invalid response from {source_name}: {message}")]
    InvalidResponse {
        source_name: &'static str,
        message: String,
    },
}

impl UpstreamError {
    pub fn request_failed(source_name: &'static str, message: impl ToString) -> Self {
        Self::RequestFailed {
            source_name,
            message: message.to_string(),
        }
    }

    pub fn invalid_response(source_name: &'static str, message: impl ToString) -> Self {
        Self::InvalidResponse {
            source_name,
            message: message.to_string(),
        }
    }

    /// Build a Rejected error, tolerating a missing cause string.
    pub fn rejected(source_name: &'static str, cause: Option<String>) -> Self {
        Self::Rejected {
            source_name,
            cause: cause.unwrap_or_else(|| "no cause given".to_string()),
        }
    }

    /// Which upstream produced this error.
    pub fn source_name(&self) -> &'static str {
        match self {
            Self::MissingApiKey { source_name }
            | Self::RequestFailed { source_name, .. }
            | Self::Status { source_name, .. }
            | Self::Rejected { source_name, .. }
            | Self::InvalidResponse { source_name, .. } => source_name,
        }
    }
}
