use thiserror::Error;

/// Unified error type for the analysis core.
///
/// Generation-backend failures are caught at the attempt boundary and folded
/// into the cache entry's `failed` status; none of them propagate as uncaught
/// faults to the view layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The generation backend cannot be used in the current environment
    /// (missing credentials, unsupported environment, quota exhausted).
    #[error("generation provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },

    /// The backend failed mid-attempt. Chunks accumulated before the failure
    /// are retained by the coordinator.
    #[error("generation failed: {detail}")]
    Generation { detail: String },

    /// Invalid caller-supplied configuration (base URL, model, mode).
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn provider_unavailable(reason: impl Into<String>) -> Self {
        Error::ProviderUnavailable {
            reason: reason.into(),
        }
    }

    pub fn generation(detail: impl Into<String>) -> Self {
        Error::Generation {
            detail: detail.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// True when the error means the backend could not even be initialized,
    /// as opposed to failing partway through an attempt.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::ProviderUnavailable { .. })
    }
}
