#![deny(missing_docs)]

//! # xroute-core: Foundational Types for xroute
//!
//! Every other crate in the workspace depends on this one. It has no internal
//! crate dependencies and performs no I/O. It uses only `serde`, `thiserror`, `uuid`
//! and `hex` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for chain identities.** A chain has three external
//!    spellings: the canonical [`ChainId`] (a UUID), the [`NativeChainId`]
//!    (decimal string such as `"8453"`), and the [`Caip2Id`]
//!    (`"eip155:8453"`). They are distinct types so a native id can never be
//!    stored where a canonical id is expected.
//!
//! 2. **Closed enums for protocol choices.** [`BridgeType`] and
//!    [`FallbackMode`] are exhaustive enums. Wire values are parsed once at
//!    the boundary; nothing downstream handles raw integers or strings.
//!
//! 3. **One hex normalization rule.** Every hex-bearing field flows through
//!    [`normalize_hex`]: empty becomes `"0x"`, a missing prefix is prepended,
//!    an existing prefix is kept. The function is idempotent.
//!
//! 4. **[`ValidationError`] for format failures.** Structured errors with
//!    `thiserror`, no `.unwrap()` outside tests.

pub mod bridge;
pub mod error;
pub mod hex;
pub mod identity;

pub use bridge::{validate_fallback_order, BridgeType, FallbackMode};
pub use error::ValidationError;
pub use hex::{normalize_bytes32, normalize_hex, EMPTY_HEX, HEX_PREFIX};
pub use identity::{Caip2Id, ChainId, NativeChainId};
