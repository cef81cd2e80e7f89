//! Execution-layer error types.

/// Errors from execution-layer calls.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// The execution layer refused the request as invalid (400, 409, 422).
    ///
    /// `message` is the collaborator's own explanation and is surfaced to the
    /// caller unmodified.
    #[error("execution layer rejected {endpoint} ({status}): {message}")]
    Rejected {
        endpoint: &'static str,
        status: u16,
        message: String,
    },
    /// Transport failure, timeout, a 5xx, or a 4xx that is not about the
    /// submitted parameters (auth, unknown endpoint, throttling).
    #[error("execution layer unavailable at {endpoint}: {reason}")]
    Unavailable {
        endpoint: &'static str,
        reason: String,
    },
    /// The execution layer answered 2xx with a body we could not decode.
    #[error("invalid response from {endpoint}: {reason}")]
    InvalidResponse {
        endpoint: &'static str,
        reason: String,
    },
    /// Client construction failed.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
