//! # Chain Identity Newtypes
//!
//! The three external spellings of a chain identity. Each is a distinct type, so
//! you cannot pass a [`NativeChainId`] where a [`ChainId`] is expected.
//!
//! ## Validation
//!
//! [`ChainId`] is UUID-based and always valid by construction.
//! [`NativeChainId`] and [`Caip2Id`] validate format at construction and at
//! deserialization time.
//!
//! - Native chain id: decimal digits, e.g. `8453` (Base), `42161` (Arbitrum One)
//! - CAIP-2: `<namespace>:<reference>`, namespace `[-a-z0-9]{3,8}`,
//!   reference `[-_a-zA-Z0-9]{1,32}` (ChainAgnostic CAIP-2)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Deserialize a string newtype through its validating `new()` constructor so
/// that malformed values are rejected at the wire boundary.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Canonical identifier
// ---------------------------------------------------------------------------

/// Canonical chain identifier: the registry's UUID for a chain record.
///
/// All persisted route and adapter configuration refers to chains through
/// this type, never through a native id or CAIP-2 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(Uuid);

impl ChainId {
    /// Create a new random chain identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse a canonical-identifier literal.
    ///
    /// Returns `None` when `s` is not a UUID; callers decide whether that is
    /// an error or a cue to try another spelling.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ChainId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ChainId> for Uuid {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ChainId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::InvalidChainId(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Native chain id
// ---------------------------------------------------------------------------

/// Native chain id as assigned by the network, kept as a decimal string.
///
/// Stored as a string rather than `u64` because registries key on the exact
/// spelling and some non-EVM networks use ids that overflow 64 bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NativeChainId(String);

impl_validating_deserialize!(NativeChainId);

impl NativeChainId {
    /// Create a native chain id, validating that it is non-empty decimal digits.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidNativeChainId`] otherwise.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidNativeChainId(s));
        }
        Ok(Self(s))
    }

    /// Access the decimal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NativeChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// CAIP-2
// ---------------------------------------------------------------------------

/// CAIP-2 blockchain identifier, `<namespace>:<reference>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Caip2Id(String);

impl_validating_deserialize!(Caip2Id);

impl Caip2Id {
    /// Create a CAIP-2 identifier, validating both segments.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCaip2`] if the namespace or
    /// reference violates the CAIP-2 character classes or lengths.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let Some((namespace, reference)) = s.split_once(':') else {
            return Err(ValidationError::InvalidCaip2(s));
        };

        let namespace_ok = (3..=8).contains(&namespace.len())
            && namespace
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        let reference_ok = (1..=32).contains(&reference.len())
            && reference
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !namespace_ok || !reference_ok {
            return Err(ValidationError::InvalidCaip2(s));
        }
        Ok(Self(s))
    }

    /// Access the full identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace segment, e.g. `eip155`.
    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map(|(ns, _)| ns).unwrap_or_default()
    }

    /// The reference segment, e.g. `8453`.
    pub fn reference(&self) -> &str {
        self.0.split_once(':').map(|(_, r)| r).unwrap_or_default()
    }
}

impl std::fmt::Display for Caip2Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
