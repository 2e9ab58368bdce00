use crate::infrastructure::ports::UpstreamError;

/// Why a stats request produced no record.
///
/// Never leaves the use-case boundary: `execute` logs it and returns `None`.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Invalid player id: {0}")]
    InvalidIdentity(String),
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] UpstreamError),
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },
}

impl StatsError {
    pub fn not_found(what: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            what,
            id: id.to_string(),
        }
    }

    /// Log at a level matching the cause.
    pub(crate) fn log(&self, request: &'static str) {
        match self {
            Self::UpstreamUnavailable(e) => {
                tracing::warn!(request, source = e.source_name(), error = %e, "Stats unavailable");
            }
            Self::InvalidIdentity(_) | Self::NotFound { .. } => {
                tracing::debug!(request, error = %self, "No stats record");
            }
        }
    }
}
