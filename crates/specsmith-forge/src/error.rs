//! Error types for spec generation

use specsmith_core::SpecError;

/// Generation error type
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    /// No API key in flags or environment
    #[error("{var} not set; set it in the environment or pass --api-key")]
    MissingApiKey {
        /// Environment variable that was checked
        var: String,
    },

    /// Transport failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with an error status
    #[error("provider returned {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Provider answered without any text
    #[error("provider response contained no text")]
    EmptyResponse,

    /// Storing the result failed
    #[error(transparent)]
    Spec(#[from] SpecError),
}

/// Result type alias for generation
pub type ForgeResult<T> = Result<T, ForgeError>;
