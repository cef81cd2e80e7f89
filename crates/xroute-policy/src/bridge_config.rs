//! # Bridge Config Service
//!
//! Router configuration for a registry bridge on a chain pair. Both chain
//! references must resolve to chains that exist in the registry, `bridgeId`
//! must name a registered bridge, and the router address must be present.
//! Fee percentage is carried as an opaque string (`"0"` when blank).

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use xroute_core::{ChainId, ValidationError};

use crate::context::RequestContext;
use crate::error::{ServiceError, StoreError};
use crate::fields::{amount_or_zero, required};
use crate::model::{BridgeConfig, BridgeConfigInput, RouteQuery};
use crate::ports::{BridgeConfigStore, BridgeLookup, RecordStore};
use crate::resolver::ChainResolver;
use crate::route_policy::route_filter;

struct ValidatedBridgeConfig {
    source_chain_id: ChainId,
    dest_chain_id: ChainId,
    router_address: String,
    fee_percentage: String,
    config: serde_json::Value,
}

/// Validates and manages generic bridge router configuration.
#[derive(Clone)]
pub struct BridgeConfigService {
    resolver: ChainResolver,
    bridges: Arc<dyn BridgeLookup>,
    store: Arc<dyn BridgeConfigStore>,
}

impl BridgeConfigService {
    pub fn new(
        resolver: ChainResolver,
        bridges: Arc<dyn BridgeLookup>,
        store: Arc<dyn BridgeConfigStore>,
    ) -> Self {
        Self {
            resolver,
            bridges,
            store,
        }
    }

    async fn validate(
        &self,
        ctx: &RequestContext,
        input: &BridgeConfigInput,
    ) -> Result<ValidatedBridgeConfig, ServiceError> {
        let source = self
            .resolver
            .resolve_existing(ctx, "sourceChainId", &input.source_chain_id)
            .await?;
        let dest = self
            .resolver
            .resolve_existing(ctx, "destChainId", &input.dest_chain_id)
            .await?;
        if source.id == dest.id {
            return Err(ValidationError::SameChain.into());
        }

        ctx.run(async {
            self.bridges.get_by_id(input.bridge_id).await.map_err(|e| match e {
                StoreError::NotFound { .. } => {
                    ServiceError::BadRequest(format!("bridgeId: bridge {} not found", input.bridge_id))
                }
                other => other.into(),
            })
        })
        .await?;

        let router_address = required("routerAddress", &input.router_address)?.to_string();

        Ok(ValidatedBridgeConfig {
            source_chain_id: source.id,
            dest_chain_id: dest.id,
            router_address,
            fee_percentage: amount_or_zero(input.fee_percentage.as_deref()),
            config: input
                .config
                .clone()
                .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
        })
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: BridgeConfigInput,
    ) -> Result<BridgeConfig, ServiceError> {
        let v = self.validate(ctx, &input).await?;
        let now = Utc::now();
        let record = BridgeConfig {
            id: Uuid::new_v4(),
            bridge_id: input.bridge_id,
            source_chain_id: v.source_chain_id,
            dest_chain_id: v.dest_chain_id,
            router_address: v.router_address,
            fee_percentage: v.fee_percentage,
            config: v.config,
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        ctx.run(self.store.create(&record)).await?;

        tracing::info!(
            bridge_config_id = %record.id,
            bridge_id = %record.bridge_id,
            source = %record.source_chain_id,
            dest = %record.dest_chain_id,
            "bridge config created"
        );
        Ok(record)
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<BridgeConfig, ServiceError> {
        ctx.run(self.store.get(id)).await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &RouteQuery,
    ) -> Result<Vec<BridgeConfig>, ServiceError> {
        let filter = route_filter(&self.resolver, ctx, query).await?;
        ctx.run(self.store.list(&filter)).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: BridgeConfigInput,
    ) -> Result<BridgeConfig, ServiceError> {
        let existing = ctx.run(self.store.get(id)).await?;
        let v = self.validate(ctx, &input).await?;
        let record = BridgeConfig {
            id: existing.id,
            bridge_id: input.bridge_id,
            source_chain_id: v.source_chain_id,
            dest_chain_id: v.dest_chain_id,
            router_address: v.router_address,
            fee_percentage: v.fee_percentage,
            config: v.config,
            is_active: input.is_active.unwrap_or(existing.is_active),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        ctx.run(self.store.update(&record)).await?;

        tracing::info!(bridge_config_id = %id, "bridge config updated");
        Ok(record)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ServiceError> {
        ctx.run(self.store.delete(id)).await?;
        tracing::info!(bridge_config_id = %id, "bridge config deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryRegistry, MemoryStore};
    use crate::testing::{ccip_bridge, registry_with_base_and_arbitrum, ARBITRUM, BASE};

    fn service(registry: MemoryRegistry) -> (BridgeConfigService, MemoryStore<BridgeConfig>) {
        let store = MemoryStore::new();
        let registry = Arc::new(registry);
        let svc = BridgeConfigService::new(
            ChainResolver::new(registry.clone()),
            registry,
            Arc::new(store.clone()),
        );
        (svc, store)
    }

    fn input(bridge_id: Uuid) -> BridgeConfigInput {
        BridgeConfigInput {
            bridge_id,
            source_chain_id: BASE.into(),
            dest_chain_id: ARBITRUM.into(),
            router_address: "0x80226fc0Ee2b096224EeAc085Bb9a8cba1146f7D".into(),
            fee_percentage: None,
            config: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let bridge = ccip_bridge(&registry);
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        let cfg = svc.create(&ctx, input(bridge.id)).await.unwrap();
        assert_eq!(cfg.fee_percentage, "0");
        assert_eq!(cfg.config, serde_json::json!({}));
        assert!(cfg.is_active);
    }

    #[tokio::test]
    async fn unknown_bridge_is_bad_request() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let (svc, store) = service(registry);
        let ctx = RequestContext::background();

        let err = svc.create(&ctx, input(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(&err, ServiceError::BadRequest(m) if m.starts_with("bridgeId")), "got {err:?}");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unregistered_chain_uuid_is_bad_request() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let bridge = ccip_bridge(&registry);
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        let mut req = input(bridge.id);
        req.source_chain_id = ChainId::new().to_string();
        assert!(matches!(
            svc.create(&ctx, req).await,
            Err(ServiceError::BadRequest(m)) if m.starts_with("sourceChainId")
        ));
    }

    #[tokio::test]
    async fn blank_router_and_same_chain_rejected() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let bridge = ccip_bridge(&registry);
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        let mut blank = input(bridge.id);
        blank.router_address = "  ".into();
        assert!(matches!(
            svc.create(&ctx, blank).await,
            Err(ServiceError::BadRequest(_))
        ));

        let mut same = input(bridge.id);
        same.dest_chain_id = "eip155:8453".into();
        assert!(matches!(
            svc.create(&ctx, same).await,
            Err(ServiceError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn update_is_full_replace_except_is_active() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let bridge = ccip_bridge(&registry);
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        let mut req = input(bridge.id);
        req.fee_percentage = Some("0.15".into());
        req.config = Some(serde_json::json!({"gasLimit": 200000}));
        req.is_active = Some(false);
        let created = svc.create(&ctx, req).await.unwrap();

        let updated = svc.update(&ctx, created.id, input(bridge.id)).await.unwrap();
        assert_eq!(updated.fee_percentage, "0");
        assert_eq!(updated.config, serde_json::json!({}));
        assert!(!updated.is_active);
        assert_eq!(updated.created_at, created.created_at);
    }
}
