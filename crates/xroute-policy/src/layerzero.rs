//! # LayerZero Config Service
//!
//! After both chains resolve and differ, `peerHex` is normalized and must
//! decode to exactly 32 bytes. `optionsHex` is normalized with no length
//! constraint; absent or blank becomes `0x`.
//!
//! Update always overwrites `dstEid`, `peerHex` and `optionsHex`. Only
//! `isActive` keeps its current value when the caller omits it.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use xroute_core::{normalize_bytes32, normalize_hex, ChainId, ValidationError};

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::model::{LayerZeroConfig, LayerZeroConfigInput, RouteQuery};
use crate::ports::{LayerZeroConfigStore, RecordStore};
use crate::resolver::ChainResolver;
use crate::route_policy::route_filter;

struct ValidatedLayerZero {
    source_chain_id: ChainId,
    dest_chain_id: ChainId,
    dst_eid: u32,
    peer_hex: String,
    options_hex: String,
}

/// Validates and manages LayerZero peer configuration.
#[derive(Clone)]
pub struct LayerZeroConfigService {
    resolver: ChainResolver,
    store: Arc<dyn LayerZeroConfigStore>,
}

impl LayerZeroConfigService {
    pub fn new(resolver: ChainResolver, store: Arc<dyn LayerZeroConfigStore>) -> Self {
        Self { resolver, store }
    }

    async fn validate(
        &self,
        ctx: &RequestContext,
        input: &LayerZeroConfigInput,
    ) -> Result<ValidatedLayerZero, ServiceError> {
        let source_chain_id = self
            .resolver
            .resolve_field(ctx, "sourceChainId", &input.source_chain_id)
            .await?;
        let dest_chain_id = self
            .resolver
            .resolve_field(ctx, "destChainId", &input.dest_chain_id)
            .await?;
        if source_chain_id == dest_chain_id {
            return Err(ValidationError::SameChain.into());
        }

        Ok(ValidatedLayerZero {
            source_chain_id,
            dest_chain_id,
            dst_eid: input.dst_eid,
            peer_hex: normalize_bytes32("peerHex", &input.peer_hex)?,
            options_hex: normalize_hex(input.options_hex.as_deref().unwrap_or_default()),
        })
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: LayerZeroConfigInput,
    ) -> Result<LayerZeroConfig, ServiceError> {
        let v = self.validate(ctx, &input).await?;
        let now = Utc::now();
        let record = LayerZeroConfig {
            id: Uuid::new_v4(),
            source_chain_id: v.source_chain_id,
            dest_chain_id: v.dest_chain_id,
            dst_eid: v.dst_eid,
            peer_hex: v.peer_hex,
            options_hex: v.options_hex,
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        ctx.run(self.store.create(&record)).await?;

        tracing::info!(
            layerzero_config_id = %record.id,
            source = %record.source_chain_id,
            dest = %record.dest_chain_id,
            dst_eid = record.dst_eid,
            "layerzero config created"
        );
        Ok(record)
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<LayerZeroConfig, ServiceError> {
        ctx.run(self.store.get(id)).await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &RouteQuery,
    ) -> Result<Vec<LayerZeroConfig>, ServiceError> {
        let filter = route_filter(&self.resolver, ctx, query).await?;
        ctx.run(self.store.list(&filter)).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: LayerZeroConfigInput,
    ) -> Result<LayerZeroConfig, ServiceError> {
        let existing = ctx.run(self.store.get(id)).await?;
        let v = self.validate(ctx, &input).await?;
        let record = LayerZeroConfig {
            id: existing.id,
            source_chain_id: v.source_chain_id,
            dest_chain_id: v.dest_chain_id,
            dst_eid: v.dst_eid,
            peer_hex: v.peer_hex,
            options_hex: v.options_hex,
            is_active: input.is_active.unwrap_or(existing.is_active),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        ctx.run(self.store.update(&record)).await?;

        tracing::info!(layerzero_config_id = %id, is_active = record.is_active, "layerzero config updated");
        Ok(record)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ServiceError> {
        ctx.run(self.store.delete(id)).await?;
        tracing::info!(layerzero_config_id = %id, "layerzero config deleted");
        Ok(())
    }
}
