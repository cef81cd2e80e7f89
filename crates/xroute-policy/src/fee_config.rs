//! # Fee Config Service
//!
//! Fee schedule for one token on one chain. The chain must resolve to a
//! registered chain and `tokenId` must name a registered token on that same
//! chain; neither is created implicitly. Amounts are opaque strings with no
//! range checks.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use xroute_core::ChainId;

use crate::context::RequestContext;
use crate::error::{ServiceError, StoreError};
use crate::fields::amount_or_zero;
use crate::model::{ChainFilter, ChainQuery, FeeConfig, FeeConfigInput};
use crate::ports::{FeeConfigStore, RecordStore, TokenLookup};
use crate::resolver::ChainResolver;

/// Validates and manages fee configuration.
#[derive(Clone)]
pub struct FeeConfigService {
    resolver: ChainResolver,
    tokens: Arc<dyn TokenLookup>,
    store: Arc<dyn FeeConfigStore>,
}

impl FeeConfigService {
    pub fn new(
        resolver: ChainResolver,
        tokens: Arc<dyn TokenLookup>,
        store: Arc<dyn FeeConfigStore>,
    ) -> Self {
        Self {
            resolver,
            tokens,
            store,
        }
    }

    async fn validate(
        &self,
        ctx: &RequestContext,
        input: &FeeConfigInput,
    ) -> Result<ChainId, ServiceError> {
        let chain = self
            .resolver
            .resolve_existing(ctx, "chainId", &input.chain_id)
            .await?;

        let token = ctx
            .run(async {
                self.tokens.get_by_id(input.token_id).await.map_err(|e| match e {
                    StoreError::NotFound { .. } => {
                        ServiceError::BadRequest(format!("tokenId: token {} not found", input.token_id))
                    }
                    other => other.into(),
                })
            })
            .await?;
        if token.chain_id != chain.id {
            return Err(ServiceError::BadRequest(format!(
                "tokenId: token {} is not on chain {}",
                token.id, chain.chain_id
            )));
        }

        Ok(chain.id)
    }

    fn build(
        id: Uuid,
        chain_id: ChainId,
        input: &FeeConfigInput,
        is_active: bool,
        created_at: chrono::DateTime<Utc>,
    ) -> FeeConfig {
        FeeConfig {
            id,
            chain_id,
            token_id: input.token_id,
            platform_fee_percent: amount_or_zero(input.platform_fee_percent.as_deref()),
            fixed_base_fee: amount_or_zero(input.fixed_base_fee.as_deref()),
            min_fee: amount_or_zero(input.min_fee.as_deref()),
            is_active,
            created_at,
            updated_at: Utc::now(),
        }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: FeeConfigInput,
    ) -> Result<FeeConfig, ServiceError> {
        let chain_id = self.validate(ctx, &input).await?;
        let mut record = Self::build(
            Uuid::new_v4(),
            chain_id,
            &input,
            input.is_active.unwrap_or(true),
            Utc::now(),
        );
        record.updated_at = record.created_at;
        ctx.run(self.store.create(&record)).await?;

        tracing::info!(
            fee_config_id = %record.id,
            chain = %record.chain_id,
            token_id = %record.token_id,
            "fee config created"
        );
        Ok(record)
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<FeeConfig, ServiceError> {
        ctx.run(self.store.get(id)).await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &ChainQuery,
    ) -> Result<Vec<FeeConfig>, ServiceError> {
        let chain_id = self
            .resolver
            .resolve_optional(ctx, query.chain_id.as_deref())
            .await
            .map_err(|e| e.into_input_error("chainId"))?;
        ctx.run(self.store.list(&ChainFilter { chain_id })).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: FeeConfigInput,
    ) -> Result<FeeConfig, ServiceError> {
        let existing = ctx.run(self.store.get(id)).await?;
        let chain_id = self.validate(ctx, &input).await?;
        let record = Self::build(
            existing.id,
            chain_id,
            &input,
            input.is_active.unwrap_or(existing.is_active),
            existing.created_at,
        );
        ctx.run(self.store.update(&record)).await?;

        tracing::info!(fee_config_id = %id, "fee config updated");
        Ok(record)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ServiceError> {
        ctx.run(self.store.delete(id)).await?;
        tracing::info!(fee_config_id = %id, "fee config deleted");
        Ok(())
    }
}
