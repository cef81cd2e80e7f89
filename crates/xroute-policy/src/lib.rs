//! # xroute-policy -- Route and Adapter Configuration Core
//!
//! Resolves chain references to canonical identifiers and enforces the
//! invariants that keep a route policy and its per-protocol configuration
//! consistent before anything is persisted or pushed onchain.
//!
//! ## Components
//!
//! - [`ChainResolver`]: canonical UUID, CAIP-2 or native chain id to [`ChainId`](xroute_core::ChainId)
//! - [`RoutePolicyService`]: default bridge, fallback mode and fallback order per chain pair
//! - [`LayerZeroConfigService`], [`BridgeConfigService`], [`FeeConfigService`]:
//!   per-protocol configuration records
//! - [`OnchainAdapterService`]: validated forwarding to the execution layer
//!
//! ## Collaborators
//!
//! Persistence and registry access go through the traits in [`ports`].
//! [`memory`] implements them in process; `xroute-api` implements them on
//! Postgres. Every operation takes a [`RequestContext`] and fails with a
//! single terminal [`ServiceError`]. Validation always completes before the
//! first write, so a failed request leaves no partial effect.

pub mod bridge_config;
pub mod context;
pub mod error;
pub mod fee_config;
mod fields;
pub mod layerzero;
pub mod memory;
pub mod model;
pub mod onchain;
pub mod ports;
pub mod resolver;
pub mod route_policy;

#[cfg(test)]
mod testing;

pub use bridge_config::BridgeConfigService;
pub use context::RequestContext;
pub use error::{ServiceError, StoreError};
pub use fee_config::FeeConfigService;
pub use layerzero::LayerZeroConfigService;
pub use memory::{MemoryRegistry, MemoryStore};
pub use onchain::OnchainAdapterService;
pub use resolver::ChainResolver;
pub use route_policy::RoutePolicyService;
