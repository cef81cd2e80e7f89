//! # In-Memory Port Implementations
//!
//! [`MemoryStore`] backs every record store and [`MemoryRegistry`] backs the
//! chain, token and bridge lookups. Used by tests and by the binary when
//! `DATABASE_URL` is unset.
//!
//! All operations are synchronous under the hood (the lock is `parking_lot`,
//! not `tokio::sync`) because no lock is held across an `.await`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;
use xroute_core::ChainId;

use crate::error::StoreError;
use crate::model::{Bridge, Chain, Record, RecordFilter, Token};
use crate::ports::{BridgeLookup, ChainLookup, RecordStore, TokenLookup};

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory record store.
#[derive(Debug)]
pub struct MemoryStore<T: Record> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Record> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Record> MemoryStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T, F> RecordStore<T, F> for MemoryStore<T>
where
    T: Record,
    F: RecordFilter<T>,
{
    async fn create(&self, record: &T) -> Result<(), StoreError> {
        let mut guard = self.data.write();
        if guard.contains_key(&record.id()) {
            return Err(StoreError::Backend(format!(
                "duplicate {} id {}",
                T::KIND,
                record.id()
            )));
        }
        guard.insert(record.id(), record.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<T, StoreError> {
        self.data
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::KIND, id))
    }

    async fn list(&self, filter: &F) -> Result<Vec<T>, StoreError> {
        let mut records: Vec<T> = self
            .data
            .read()
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.created_at(), r.id()));
        Ok(records)
    }

    async fn update(&self, record: &T) -> Result<(), StoreError> {
        match self.data.write().get_mut(&record.id()) {
            Some(entry) => {
                *entry = record.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(T::KIND, record.id())),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.data
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(T::KIND, id))
    }
}

// -- Registry -----------------------------------------------------------------

/// In-memory chain, token and bridge registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    chains: Arc<RwLock<HashMap<ChainId, Chain>>>,
    tokens: Arc<RwLock<HashMap<Uuid, Token>>>,
    bridges: Arc<RwLock<HashMap<Uuid, Bridge>>>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a chain.
    pub fn insert_chain(&self, chain: Chain) {
        self.chains.write().insert(chain.id, chain);
    }

    /// Add or replace a token.
    pub fn insert_token(&self, token: Token) {
        self.tokens.write().insert(token.id, token);
    }

    /// Add or replace a bridge.
    pub fn insert_bridge(&self, bridge: Bridge) {
        self.bridges.write().insert(bridge.id, bridge);
    }

    fn find_chain(&self, pred: impl Fn(&Chain) -> bool) -> Option<Chain> {
        self.chains.read().values().find(|c| pred(c)).cloned()
    }
}

#[async_trait]
impl ChainLookup for MemoryRegistry {
    async fn get_by_id(&self, id: ChainId) -> Result<Chain, StoreError> {
        self.chains
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("chain", id))
    }

    async fn get_by_chain_id(&self, chain_id: &str) -> Result<Chain, StoreError> {
        self.find_chain(|c| c.chain_id.as_str() == chain_id)
            .ok_or_else(|| StoreError::not_found("chain", chain_id))
    }

    async fn get_by_caip2(&self, caip2: &str) -> Result<Chain, StoreError> {
        self.find_chain(|c| c.caip2.as_str() == caip2)
            .ok_or_else(|| StoreError::not_found("chain", caip2))
    }

    async fn list(&self) -> Result<Vec<Chain>, StoreError> {
        let mut chains: Vec<Chain> = self.chains.read().values().cloned().collect();
        chains.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(chains)
    }
}

#[async_trait]
impl TokenLookup for MemoryRegistry {
    async fn get_by_id(&self, id: Uuid) -> Result<Token, StoreError> {
        self.tokens
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("token", id))
    }
}

#[async_trait]
impl BridgeLookup for MemoryRegistry {
    async fn get_by_id(&self, id: Uuid) -> Result<Bridge, StoreError> {
        self.bridges
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("bridge", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RouteFilter, RoutePolicy};
    use chrono::{Duration, Utc};
    use xroute_core::{BridgeType, Caip2Id, FallbackMode, NativeChainId};

    fn policy(source: ChainId, dest: ChainId, age_secs: i64) -> RoutePolicy {
        let at = Utc::now() - Duration::seconds(age_secs);
        RoutePolicy {
            id: Uuid::new_v4(),
            source_chain_id: source,
            dest_chain_id: dest,
            default_bridge_type: BridgeType::Native,
            fallback_mode: FallbackMode::Strict,
            fallback_order: vec![BridgeType::Native],
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn store_crud_roundtrip() {
        let store: MemoryStore<RoutePolicy> = MemoryStore::new();
        let p = policy(ChainId::new(), ChainId::new(), 0);
        RecordStore::<RoutePolicy, RouteFilter>::create(&store, &p).await.unwrap();
        assert_eq!(RecordStore::<RoutePolicy, RouteFilter>::get(&store, p.id).await.unwrap(), p);

        let mut changed = p.clone();
        changed.fallback_mode = FallbackMode::AutoFallback;
        RecordStore::<RoutePolicy, RouteFilter>::update(&store, &changed).await.unwrap();
        assert_eq!(
            RecordStore::<RoutePolicy, RouteFilter>::get(&store, p.id).await.unwrap().fallback_mode,
            FallbackMode::AutoFallback
        );

        RecordStore::<RoutePolicy, RouteFilter>::delete(&store, p.id).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn missing_id_is_not_found_for_get_update_delete() {
        let store: MemoryStore<RoutePolicy> = MemoryStore::new();
        let p = policy(ChainId::new(), ChainId::new(), 0);
        let get = RecordStore::<RoutePolicy, RouteFilter>::get(&store, p.id).await;
        assert!(get.unwrap_err().is_not_found());
        let update = RecordStore::<RoutePolicy, RouteFilter>::update(&store, &p).await;
        assert!(update.unwrap_err().is_not_found());
        let delete = RecordStore::<RoutePolicy, RouteFilter>::delete(&store, p.id).await;
        assert!(delete.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_filters_and_orders_by_creation() {
        let store: MemoryStore<RoutePolicy> = MemoryStore::new();
        let base = ChainId::new();
        let arb = ChainId::new();
        let newer = policy(base, arb, 10);
        let older = policy(base, ChainId::new(), 100);
        let other = policy(arb, base, 50);
        for p in [&newer, &older, &other] {
            RecordStore::<RoutePolicy, RouteFilter>::create(&store, p).await.unwrap();
        }

        let from_base = store
            .list(&RouteFilter { source_chain_id: Some(base), dest_chain_id: None })
            .await
            .unwrap();
        assert_eq!(from_base, vec![older.clone(), newer.clone()]);

        let all = store.list(&RouteFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, older.id);
    }

    #[tokio::test]
    async fn registry_lookups_by_each_spelling() {
        let registry = MemoryRegistry::new();
        let base = Chain {
            id: ChainId::new(),
            name: "Base".into(),
            chain_id: NativeChainId::new("8453").unwrap(),
            caip2: Caip2Id::new("eip155:8453").unwrap(),
            is_active: true,
        };
        registry.insert_chain(base.clone());

        assert_eq!(ChainLookup::get_by_id(&registry, base.id).await.unwrap(), base);
        assert_eq!(registry.get_by_chain_id("8453").await.unwrap().id, base.id);
        assert_eq!(registry.get_by_caip2("eip155:8453").await.unwrap().id, base.id);
        assert!(registry.get_by_caip2("eip155:1").await.unwrap_err().is_not_found());
        assert!(TokenLookup::get_by_id(&registry, Uuid::new_v4())
            .await
            .unwrap_err()
            .is_not_found());
    }
}
