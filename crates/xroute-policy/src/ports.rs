//! # Collaborator Ports
//!
//! Capability contracts the services depend on. Production implementations
//! live in `xroute-api` (Postgres); [`crate::memory`] provides in-memory ones.
//! Both satisfy the same traits and the services cannot tell them apart.
//!
//! Stores give no optimistic-concurrency guarantee. Concurrent updates to
//! the same identifier race and the last write the store observes wins.

use async_trait::async_trait;
use uuid::Uuid;
use xroute_core::ChainId;

use crate::error::StoreError;
use crate::model::{
    Bridge, BridgeConfig, Chain, ChainFilter, FeeConfig, LayerZeroConfig, RouteFilter,
    RoutePolicy, Token,
};

/// Chain registry lookups.
///
/// `get_by_chain_id` and `get_by_caip2` take the raw reference string; the
/// resolver may pass a colon-containing string to the native lookup.
#[async_trait]
pub trait ChainLookup: Send + Sync {
    async fn get_by_id(&self, id: ChainId) -> Result<Chain, StoreError>;
    async fn get_by_chain_id(&self, chain_id: &str) -> Result<Chain, StoreError>;
    async fn get_by_caip2(&self, caip2: &str) -> Result<Chain, StoreError>;
    async fn list(&self) -> Result<Vec<Chain>, StoreError>;
}

/// Token registry lookups.
#[async_trait]
pub trait TokenLookup: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Token, StoreError>;
}

/// Bridge registry lookups.
#[async_trait]
pub trait BridgeLookup: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Bridge, StoreError>;
}

/// Keyed CRUD over one record type.
///
/// `update` and `delete` on a missing identifier return
/// [`StoreError::NotFound`].
#[async_trait]
pub trait RecordStore<T, F>: Send + Sync
where
    T: Send + Sync + 'static,
    F: Send + Sync + 'static,
{
    async fn create(&self, record: &T) -> Result<(), StoreError>;
    async fn get(&self, id: Uuid) -> Result<T, StoreError>;
    async fn list(&self, filter: &F) -> Result<Vec<T>, StoreError>;
    async fn update(&self, record: &T) -> Result<(), StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Route policy persistence.
pub trait RoutePolicyStore: RecordStore<RoutePolicy, RouteFilter> {}
impl<S: RecordStore<RoutePolicy, RouteFilter>> RoutePolicyStore for S {}

/// LayerZero config persistence.
pub trait LayerZeroConfigStore: RecordStore<LayerZeroConfig, RouteFilter> {}
impl<S: RecordStore<LayerZeroConfig, RouteFilter>> LayerZeroConfigStore for S {}

/// Bridge config persistence.
pub trait BridgeConfigStore: RecordStore<BridgeConfig, RouteFilter> {}
impl<S: RecordStore<BridgeConfig, RouteFilter>> BridgeConfigStore for S {}

/// Fee config persistence.
pub trait FeeConfigStore: RecordStore<FeeConfig, ChainFilter> {}
impl<S: RecordStore<FeeConfig, ChainFilter>> FeeConfigStore for S {}
