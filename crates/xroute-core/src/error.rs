//! # Error Types
//!
//! Format-level validation failures for domain primitives. These never carry
//! I/O context; the service layer maps every variant to a bad-request outcome.

use thiserror::Error;

/// Validation error for domain primitive construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty or whitespace-only.
    #[error("{field} is required")]
    Required {
        /// Wire name of the missing field.
        field: &'static str,
    },

    /// Canonical chain identifier is not a UUID.
    #[error("invalid chain identifier: \"{0}\" (expected UUID)")]
    InvalidChainId(String),

    /// Native chain id is not a non-empty decimal string.
    #[error("invalid native chain id: \"{0}\" (expected decimal digits)")]
    InvalidNativeChainId(String),

    /// CAIP-2 identifier does not match `<namespace>:<reference>`.
    #[error("invalid CAIP-2 identifier: \"{0}\" (expected <namespace>:<reference>)")]
    InvalidCaip2(String),

    /// Bridge type value outside the known set.
    #[error("invalid bridge type: {0} (expected 0=native, 1=ccip, 2=layerzero)")]
    InvalidBridgeType(u8),

    /// Fallback mode string outside the known set.
    #[error("invalid fallback mode: \"{0}\" (expected \"strict\" or \"auto_fallback\")")]
    InvalidFallbackMode(String),

    /// Fallback order was empty after defaulting.
    #[error("fallback order must not be empty")]
    EmptyFallbackOrder,

    /// Fallback order lists the same bridge type twice.
    #[error("duplicate bridge type {0} in fallback order")]
    DuplicateFallbackEntry(u8),

    /// Hex body contains non-hex characters or has odd length.
    #[error("invalid hex in {field}: {reason}")]
    InvalidHex {
        /// Wire name of the offending field.
        field: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// Hex body decodes to the wrong number of bytes.
    #[error("{field} must decode to exactly {expected} bytes, got {actual} hex characters")]
    WrongHexLength {
        /// Wire name of the offending field.
        field: &'static str,
        /// Required byte length.
        expected: usize,
        /// Observed hex character count of the body.
        actual: usize,
    },

    /// Source and destination chain of a route are the same chain.
    #[error("source and destination chain must differ")]
    SameChain,
}
