//! # Error Types
//!
//! [`StoreError`] is what every port trait returns. [`ServiceError`] is the
//! terminal outcome of a service operation and is the only error type the
//! request layer sees.
//!
//! | Source | Becomes |
//! |--------|---------|
//! | [`ValidationError`] | `BadRequest` |
//! | `StoreError::NotFound` | `NotFound` |
//! | `StoreError::Backend` | `Internal` |
//! | `ExecutionError::Rejected` | `BadRequest`, collaborator message unmodified |
//! | any other `ExecutionError` | `Internal` |

use thiserror::Error;
use xroute_core::ValidationError;
use xroute_onchain::ExecutionError;

/// Failure reported by a store or lookup port.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with the given key.
    #[error("{entity} {key} not found")]
    NotFound {
        /// Record kind, e.g. `route policy`.
        entity: &'static str,
        /// Key that missed, as displayed.
        key: String,
    },

    /// The backing store failed for a reason unrelated to the input.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Convenience constructor for a keyed miss.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Whether this is a miss rather than a backend failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Terminal outcome of a failed service operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed or missing input, failed resolution, or a failed
    /// existence gate.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Lookup of an existing record by identifier failed.
    #[error("not found: {0}")]
    NotFound(String),

    /// Persistence or execution-layer failure unrelated to input validity.
    #[error("internal error: {0}")]
    Internal(String),

    /// The request context was cancelled before the operation completed.
    #[error("request cancelled")]
    Cancelled,

    /// The request deadline passed before the operation completed.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl ServiceError {
    /// Whether the error ends the request because of its context rather
    /// than its input.
    pub fn is_context_error(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// Re-label a resolution or existence failure as a bad request on `field`.
    ///
    /// `NotFound` and `BadRequest` become `BadRequest("{field}: ...")`.
    /// Backend and context errors pass through.
    pub fn into_input_error(self, field: &str) -> Self {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) => Self::BadRequest(format!("{field}: {msg}")),
            other => other,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Backend(msg) => Self::Internal(msg),
        }
    }
}

impl From<ExecutionError> for ServiceError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::Rejected { message, .. } => Self::BadRequest(message),
            other => Self::Internal(other.to_string()),
        }
    }
}
