//! # Bridge Protocol Enums
//!
//! [`BridgeType`] is the protocol a route uses to move value, carried on the
//! wire as a bare integer (`0`, `1`, `2`) with no textual aliases.
//! [`FallbackMode`] decides whether a route may fall through its fallback
//! order when the preferred protocol fails.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Bridge protocol used for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BridgeType {
    /// Default/native bridge adapter.
    Native = 0,
    /// Chainlink CCIP message-passing adapter.
    Ccip = 1,
    /// LayerZero point-to-point messaging adapter.
    LayerZero = 2,
}

impl BridgeType {
    /// Every bridge type, in wire order.
    pub const ALL: [BridgeType; 3] = [Self::Native, Self::Ccip, Self::LayerZero];

    /// The wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Lowercase protocol name for logs and labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Ccip => "ccip",
            Self::LayerZero => "layerzero",
        }
    }
}

impl TryFrom<u8> for BridgeType {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Native),
            1 => Ok(Self::Ccip),
            2 => Ok(Self::LayerZero),
            other => Err(ValidationError::InvalidBridgeType(other)),
        }
    }
}

impl From<BridgeType> for u8 {
    fn from(value: BridgeType) -> Self {
        value.as_u8()
    }
}

impl std::fmt::Display for BridgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BridgeType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for BridgeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Route behaviour when the preferred bridge fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// Only the default bridge type is ever used.
    #[default]
    Strict,
    /// Walk the fallback order when the preferred bridge fails.
    AutoFallback,
}

impl FallbackMode {
    /// Parse a wire value. Blank input defaults to [`FallbackMode::Strict`];
    /// anything else must match `"strict"` or `"auto_fallback"` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFallbackMode`] on any other value.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Ok(Self::Strict);
        }
        match raw {
            "strict" => Ok(Self::Strict),
            "auto_fallback" => Ok(Self::AutoFallback),
            other => Err(ValidationError::InvalidFallbackMode(other.to_string())),
        }
    }

    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::AutoFallback => "auto_fallback",
        }
    }
}

impl std::fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a fallback order as received on the wire.
///
/// The sequence must be non-empty, every element must be a known bridge type,
/// and no element may repeat. Order is preserved exactly.
///
/// # Errors
///
/// [`ValidationError::EmptyFallbackOrder`], [`ValidationError::InvalidBridgeType`]
/// or [`ValidationError::DuplicateFallbackEntry`] for the first offending entry.
pub fn validate_fallback_order(order: &[u8]) -> Result<Vec<BridgeType>, ValidationError> {
    if order.is_empty() {
        return Err(ValidationError::EmptyFallbackOrder);
    }

    let mut seen = HashSet::with_capacity(order.len());
    let mut validated = Vec::with_capacity(order.len());
    for &raw in order {
        let bridge_type = BridgeType::try_from(raw)?;
        if !seen.insert(bridge_type) {
            return Err(ValidationError::DuplicateFallbackEntry(raw));
        }
        validated.push(bridge_type);
    }
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bridge_type_wire_values() {
        assert_eq!(BridgeType::Native.as_u8(), 0);
        assert_eq!(BridgeType::Ccip.as_u8(), 1);
        assert_eq!(BridgeType::LayerZero.as_u8(), 2);
        assert_eq!(BridgeType::try_from(2), Ok(BridgeType::LayerZero));
        assert_eq!(
            BridgeType::try_from(3),
            Err(ValidationError::InvalidBridgeType(3))
        );
    }

    #[test]
    fn bridge_type_serde_is_numeric() {
        assert_eq!(serde_json::to_string(&BridgeType::Ccip).unwrap(), "1");
        let parsed: BridgeType = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, BridgeType::LayerZero);
    }

    #[test]
    fn bridge_type_rejects_textual_alias() {
        assert!(serde_json::from_str::<BridgeType>("\"layerzero\"").is_err());
        assert!(serde_json::from_str::<BridgeType>("9").is_err());
    }

    #[test]
    fn fallback_mode_blank_defaults_to_strict() {
        assert_eq!(FallbackMode::parse(""), Ok(FallbackMode::Strict));
        assert_eq!(FallbackMode::parse("   "), Ok(FallbackMode::Strict));
    }

    #[test]
    fn fallback_mode_exact_values_only() {
        assert_eq!(FallbackMode::parse("strict"), Ok(FallbackMode::Strict));
        assert_eq!(
            FallbackMode::parse("auto_fallback"),
            Ok(FallbackMode::AutoFallback)
        );
        assert!(FallbackMode::parse("STRICT").is_err());
        assert!(FallbackMode::parse("auto-fallback").is_err());
        assert!(FallbackMode::parse(" strict").is_err());
    }

    #[test]
    fn fallback_mode_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&FallbackMode::AutoFallback).unwrap(),
            "\"auto_fallback\""
        );
    }

    #[test]
    fn fallback_order_empty_rejected() {
        assert_eq!(
            validate_fallback_order(&[]),
            Err(ValidationError::EmptyFallbackOrder)
        );
    }

    #[test]
    fn fallback_order_unknown_value_rejected() {
        assert_eq!(
            validate_fallback_order(&[0, 5]),
            Err(ValidationError::InvalidBridgeType(5))
        );
    }

    #[test]
    fn fallback_order_duplicate_rejected() {
        assert_eq!(
            validate_fallback_order(&[1, 1]),
            Err(ValidationError::DuplicateFallbackEntry(1))
        );
        assert_eq!(
            validate_fallback_order(&[2, 0, 2]),
            Err(ValidationError::DuplicateFallbackEntry(2))
        );
    }

    #[test]
    fn fallback_order_preserves_sequence() {
        let order = validate_fallback_order(&[2, 0, 1]).unwrap();
        assert_eq!(
            order,
            vec![BridgeType::LayerZero, BridgeType::Native, BridgeType::Ccip]
        );
    }

    proptest! {
        #[test]
        fn any_duplicate_free_subset_is_accepted(
            order in Just(vec![0u8, 1, 2]).prop_shuffle(),
            len in 1usize..=3,
        ) {
            let subset = &order[..len];
            let validated = validate_fallback_order(subset).unwrap();
            let wire: Vec<u8> = validated.iter().map(|b| b.as_u8()).collect();
            prop_assert_eq!(wire.as_slice(), subset);
        }

        #[test]
        fn any_out_of_range_value_is_rejected(bad in 3u8..=u8::MAX, pos in 0usize..3) {
            let mut order = vec![0u8, 1, 2];
            order.insert(pos, bad);
            prop_assert_eq!(
                validate_fallback_order(&order),
                Err(ValidationError::InvalidBridgeType(bad))
            );
        }
    }
}
