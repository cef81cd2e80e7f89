//! # Hex Field Normalization
//!
//! Adapter configuration carries several hex-encoded fields (LayerZero peers,
//! enforced options, generic call data). All of them are normalized the same
//! way before they are persisted or forwarded:
//!
//! - surrounding whitespace is trimmed
//! - empty input becomes [`EMPTY_HEX`]
//! - input without the lowercase `0x` prefix gets one prepended
//! - prefixed input is returned unchanged
//!
//! Normalization is idempotent. Only [`normalize_bytes32`] checks the body.

use crate::error::ValidationError;

/// Lowercase hex prefix.
pub const HEX_PREFIX: &str = "0x";

/// Canonical empty hex value.
pub const EMPTY_HEX: &str = "0x";

/// Normalize a hex-bearing string field. Does not validate the body.
pub fn normalize_hex(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        EMPTY_HEX.to_string()
    } else if trimmed.starts_with(HEX_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{HEX_PREFIX}{trimmed}")
    }
}

/// Normalize `input` and require that it encodes exactly 32 bytes.
///
/// # Errors
///
/// - [`ValidationError::Required`] if the input is blank.
/// - [`ValidationError::WrongHexLength`] if the body is not 64 characters.
/// - [`ValidationError::InvalidHex`] if the body is not valid hex.
pub fn normalize_bytes32(field: &'static str, input: &str) -> Result<String, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }

    let normalized = normalize_hex(input);
    let body = &normalized[HEX_PREFIX.len()..];
    if body.len() != 64 {
        return Err(ValidationError::WrongHexLength {
            field,
            expected: 32,
            actual: body.len(),
        });
    }
    hex::decode(body).map_err(|e| ValidationError::InvalidHex {
        field,
        reason: e.to_string(),
    })?;

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PEER: &str = "000000000000000000000000a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";

    #[test]
    fn empty_becomes_bare_prefix() {
        assert_eq!(normalize_hex(""), "0x");
        assert_eq!(normalize_hex("   "), "0x");
    }

    #[test]
    fn missing_prefix_is_prepended() {
        assert_eq!(normalize_hex("abcd"), "0xabcd");
        assert_eq!(normalize_hex("  0003 "), "0x0003");
    }

    #[test]
    fn existing_prefix_kept() {
        assert_eq!(normalize_hex("0xabcd"), "0xabcd");
        assert_eq!(normalize_hex("0x"), "0x");
    }

    #[test]
    fn uppercase_prefix_is_treated_as_body() {
        assert_eq!(normalize_hex("0Xab"), "0x0Xab");
    }

    #[test]
    fn bytes32_accepts_with_and_without_prefix() {
        assert_eq!(
            normalize_bytes32("peerHex", PEER).unwrap(),
            format!("0x{PEER}")
        );
        assert_eq!(
            normalize_bytes32("peerHex", &format!("0x{PEER}")).unwrap(),
            format!("0x{PEER}")
        );
    }

    #[test]
    fn bytes32_rejects_blank() {
        assert_eq!(
            normalize_bytes32("peerHex", " "),
            Err(ValidationError::Required { field: "peerHex" })
        );
    }

    #[test]
    fn bytes32_rejects_twenty_byte_address() {
        let err = normalize_bytes32("peerHex", "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongHexLength {
                field: "peerHex",
                expected: 32,
                actual: 40,
            }
        );
    }

    #[test]
    fn bytes32_rejects_non_hex_body() {
        let bad = format!("0x{}", "zz".repeat(32));
        assert!(matches!(
            normalize_bytes32("peerHex", &bad),
            Err(ValidationError::InvalidHex { field: "peerHex", .. })
        ));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "\\PC{0,80}") {
            let once = normalize_hex(&s);
            prop_assert_eq!(normalize_hex(&once), once.clone());
            prop_assert!(once.starts_with(HEX_PREFIX));
        }

        #[test]
        fn any_32_bytes_pass(bytes in proptest::collection::vec(any::<u8>(), 32)) {
            let body = hex::encode(&bytes);
            let normalized = normalize_bytes32("peerHex", &body).unwrap();
            prop_assert_eq!(normalized, format!("0x{body}"));
        }
    }
}
