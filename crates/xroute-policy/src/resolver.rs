//! # Chain Identity Resolver
//!
//! Turns any of the three chain spellings into a canonical [`ChainId`].
//! Evaluation order:
//!
//! 1. A UUID literal is returned directly. The registry is not consulted.
//! 2. A reference containing `:` is tried as a CAIP-2 identifier.
//! 3. Everything else, including a colon reference the CAIP-2 lookup could
//!    not place, is tried as a native chain id using the literal input.
//!    That last lookup's outcome is final.

use std::sync::Arc;

use xroute_core::ChainId;

use crate::context::RequestContext;
use crate::error::{ServiceError, StoreError};
use crate::model::Chain;
use crate::ports::ChainLookup;

/// Resolves chain references against a [`ChainLookup`].
#[derive(Clone)]
pub struct ChainResolver {
    chains: Arc<dyn ChainLookup>,
}

impl std::fmt::Debug for ChainResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainResolver").finish_non_exhaustive()
    }
}

impl ChainResolver {
    pub fn new(chains: Arc<dyn ChainLookup>) -> Self {
        Self { chains }
    }

    /// Resolve `reference` to a canonical identifier.
    ///
    /// # Errors
    ///
    /// - `BadRequest` if the reference is blank.
    /// - `NotFound` if no chain matches.
    /// - `Internal` if the registry fails.
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        reference: &str,
    ) -> Result<ChainId, ServiceError> {
        ctx.check()?;
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ServiceError::BadRequest("chain reference is required".into()));
        }

        if let Some(id) = ChainId::parse(reference) {
            return Ok(id);
        }

        if reference.contains(':') {
            match ctx.run(self.chains.get_by_caip2(reference)).await {
                Ok(chain) => {
                    tracing::debug!(reference, chain_id = %chain.id, "resolved CAIP-2 reference");
                    return Ok(chain.id);
                }
                Err(e) if e.is_context_error() => return Err(e),
                Err(e) => {
                    tracing::debug!(reference, error = %e, "CAIP-2 lookup failed, trying native chain id");
                }
            }
        }

        let chain = ctx
            .run(async {
                self.chains
                    .get_by_chain_id(reference)
                    .await
                    .map_err(|e| chain_lookup_error(e, reference))
            })
            .await?;
        tracing::debug!(reference, chain_id = %chain.id, "resolved native chain id");
        Ok(chain.id)
    }

    /// Resolve an optional filter reference. Blank or absent means no filter.
    pub async fn resolve_optional(
        &self,
        ctx: &RequestContext,
        reference: Option<&str>,
    ) -> Result<Option<ChainId>, ServiceError> {
        match reference.map(str::trim) {
            None | Some("") => Ok(None),
            Some(r) => self.resolve(ctx, r).await.map(Some),
        }
    }

    /// Resolve a request field, reporting misses as a bad request on `field`.
    pub async fn resolve_field(
        &self,
        ctx: &RequestContext,
        field: &str,
        reference: &str,
    ) -> Result<ChainId, ServiceError> {
        self.resolve(ctx, reference)
            .await
            .map_err(|e| e.into_input_error(field))
    }

    /// Resolve a request field and require the chain to exist in the registry.
    ///
    /// Unlike [`resolve`](Self::resolve), a UUID literal is checked too.
    pub async fn resolve_existing(
        &self,
        ctx: &RequestContext,
        field: &str,
        reference: &str,
    ) -> Result<Chain, ServiceError> {
        let id = self.resolve_field(ctx, field, reference).await?;
        ctx.run(async {
            self.chains
                .get_by_id(id)
                .await
                .map_err(|e| chain_lookup_error(e, &id.to_string()))
        })
        .await
        .map_err(|e| e.into_input_error(field))
    }

    /// Every registered chain.
    pub async fn list_chains(&self, ctx: &RequestContext) -> Result<Vec<Chain>, ServiceError> {
        ctx.run(self.chains.list()).await
    }
}

fn chain_lookup_error(err: StoreError, reference: &str) -> ServiceError {
    match err {
        StoreError::NotFound { .. } => ServiceError::NotFound(format!("chain not found: {reference}")),
        StoreError::Backend(msg) => {
            tracing::error!(reference, error = %msg, "chain registry lookup failed");
            ServiceError::Internal(msg)
        }
    }
}
