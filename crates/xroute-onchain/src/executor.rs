//! # Onchain Executor Contract
//!
//! The execution layer registers adapters, pushes per-protocol configuration
//! and submits transactions. xroute only validates and forwards; every write
//! returns as soon as the execution layer accepts it, before confirmation.
//! Nonce management, confirmation tracking and retry-on-revert live behind
//! this trait.

use async_trait::async_trait;

use crate::error::ExecutionError;
use crate::types::{
    CcipConfigParams, ConfigPushResult, HyperbridgeConfigParams, InteractParams, InteractResult,
    LayerZeroConfigParams, RegisterAdapterParams, SetDefaultBridgeParams, StatusSnapshot,
    TxHandle,
};

/// Execution-layer operations consumed by the onchain adapter service.
#[async_trait]
pub trait OnchainExecutor: Send + Sync {
    /// Read the current adapter state for a route.
    async fn get_status(
        &self,
        source_chain: &str,
        dest_chain: &str,
    ) -> Result<StatusSnapshot, ExecutionError>;

    /// Register an adapter contract for a route and bridge type.
    async fn register_adapter(
        &self,
        params: &RegisterAdapterParams,
    ) -> Result<TxHandle, ExecutionError>;

    /// Set the route's default bridge type on the router.
    async fn set_default_bridge_type(
        &self,
        params: &SetDefaultBridgeParams,
    ) -> Result<TxHandle, ExecutionError>;

    /// Push Hyperbridge configuration to the route's adapter.
    async fn set_hyperbridge_config(
        &self,
        params: &HyperbridgeConfigParams,
    ) -> Result<ConfigPushResult, ExecutionError>;

    /// Push CCIP configuration to the route's adapter.
    async fn set_ccip_config(
        &self,
        params: &CcipConfigParams,
    ) -> Result<ConfigPushResult, ExecutionError>;

    /// Push LayerZero configuration to the route's adapter.
    async fn set_layerzero_config(
        &self,
        params: &LayerZeroConfigParams,
    ) -> Result<ConfigPushResult, ExecutionError>;

    /// Call an arbitrary contract method, read or write.
    async fn generic_interact(
        &self,
        params: &InteractParams,
    ) -> Result<InteractResult, ExecutionError>;
}
