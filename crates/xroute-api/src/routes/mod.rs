//! # API Route Modules
//!
//! - `chains` — chain registry listing and reference resolution.
//! - `route_policies` — per-route default bridge and fallback policy.
//! - `layerzero_configs`, `bridge_configs`, `fee_configs` — stored
//!   per-protocol configuration.
//! - `onchain` — adapter operations forwarded to the execution layer.

pub mod bridge_configs;
pub mod chains;
pub mod fee_configs;
pub mod layerzero_configs;
pub mod onchain;
pub mod route_policies;
