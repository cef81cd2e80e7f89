//! # Route Policy Service
//!
//! Create and update share one validation pass, run in this order:
//!
//! 1. both chain references resolve
//! 2. the resolved source and dest differ (compared canonically)
//! 3. `defaultBridgeType` is a known bridge type
//! 4. `fallbackMode` is blank (strict) or exactly `strict` / `auto_fallback`
//! 5. an empty `fallbackOrder` becomes `[defaultBridgeType]`
//! 6. every fallback entry is known and none repeats
//!
//! Nothing is written unless every step passes. Update replaces every field,
//! keeping only `createdAt`. Delete goes straight to the store.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use xroute_core::{validate_fallback_order, BridgeType, ChainId, FallbackMode, ValidationError};

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::model::{RouteFilter, RoutePolicy, RoutePolicyInput, RouteQuery};
use crate::ports::{RecordStore, RoutePolicyStore};
use crate::resolver::ChainResolver;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ValidatedPolicy {
    source_chain_id: ChainId,
    dest_chain_id: ChainId,
    default_bridge_type: BridgeType,
    fallback_mode: FallbackMode,
    fallback_order: Vec<BridgeType>,
}

/// Validates and manages route policies.
#[derive(Clone)]
pub struct RoutePolicyService {
    resolver: ChainResolver,
    store: Arc<dyn RoutePolicyStore>,
}

impl RoutePolicyService {
    pub fn new(resolver: ChainResolver, store: Arc<dyn RoutePolicyStore>) -> Self {
        Self { resolver, store }
    }

    async fn validate(
        &self,
        ctx: &RequestContext,
        input: &RoutePolicyInput,
    ) -> Result<ValidatedPolicy, ServiceError> {
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

        let default_bridge_type = BridgeType::try_from(input.default_bridge_type)?;
        let fallback_mode = FallbackMode::parse(input.fallback_mode.as_deref().unwrap_or_default())?;

        let fallback_order = match input.fallback_order.as_deref() {
            None | Some([]) => validate_fallback_order(&[default_bridge_type.as_u8()])?,
            Some(order) => validate_fallback_order(order)?,
        };

        Ok(ValidatedPolicy {
            source_chain_id,
            dest_chain_id,
            default_bridge_type,
            fallback_mode,
            fallback_order,
        })
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: RoutePolicyInput,
    ) -> Result<RoutePolicy, ServiceError> {
        let v = self.validate(ctx, &input).await?;
        let now = Utc::now();
        let record = RoutePolicy {
            id: Uuid::new_v4(),
            source_chain_id: v.source_chain_id,
            dest_chain_id: v.dest_chain_id,
            default_bridge_type: v.default_bridge_type,
            fallback_mode: v.fallback_mode,
            fallback_order: v.fallback_order,
            created_at: now,
            updated_at: now,
        };
        ctx.run(self.store.create(&record)).await?;

        tracing::info!(
            route_policy_id = %record.id,
            source = %record.source_chain_id,
            dest = %record.dest_chain_id,
            default_bridge_type = %record.default_bridge_type,
            "route policy created"
        );
        Ok(record)
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<RoutePolicy, ServiceError> {
        ctx.run(self.store.get(id)).await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &RouteQuery,
    ) -> Result<Vec<RoutePolicy>, ServiceError> {
        let filter = route_filter(&self.resolver, ctx, query).await?;
        ctx.run(self.store.list(&filter)).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: RoutePolicyInput,
    ) -> Result<RoutePolicy, ServiceError> {
        let existing = ctx.run(self.store.get(id)).await?;
        let v = self.validate(ctx, &input).await?;
        let record = RoutePolicy {
            id: existing.id,
            source_chain_id: v.source_chain_id,
            dest_chain_id: v.dest_chain_id,
            default_bridge_type: v.default_bridge_type,
            fallback_mode: v.fallback_mode,
            fallback_order: v.fallback_order,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        ctx.run(self.store.update(&record)).await?;

        tracing::info!(route_policy_id = %id, "route policy updated");
        Ok(record)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ServiceError> {
        ctx.run(self.store.delete(id)).await?;
        tracing::info!(route_policy_id = %id, "route policy deleted");
        Ok(())
    }
}

/// Resolve a chain-pair query into a filter. Unresolvable filters are bad requests.
pub(crate) async fn route_filter(
    resolver: &ChainResolver,
    ctx: &RequestContext,
    query: &RouteQuery,
) -> Result<RouteFilter, ServiceError> {
    let source_chain_id = resolver
        .resolve_optional(ctx, query.source_chain_id.as_deref())
        .await
        .map_err(|e| e.into_input_error("sourceChainId"))?;
    let dest_chain_id = resolver
        .resolve_optional(ctx, query.dest_chain_id.as_deref())
        .await
        .map_err(|e| e.into_input_error("destChainId"))?;
    Ok(RouteFilter {
        source_chain_id,
        dest_chain_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryRegistry, MemoryStore};
    use crate::testing::{registry_with_base_and_arbitrum, BASE, ARBITRUM};

    fn service(registry: MemoryRegistry) -> (RoutePolicyService, MemoryStore<RoutePolicy>) {
        let store = MemoryStore::new();
        let svc = RoutePolicyService::new(
            ChainResolver::new(Arc::new(registry)),
            Arc::new(store.clone()),
        );
        (svc, store)
    }

    fn input(source: &str, dest: &str, default_bridge_type: u8) -> RoutePolicyInput {
        RoutePolicyInput {
            source_chain_id: source.into(),
            dest_chain_id: dest.into(),
            default_bridge_type,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_defaults_mode_and_order() {
        let (registry, base, arb) = registry_with_base_and_arbitrum();
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        let policy = svc.create(&ctx, input(BASE, ARBITRUM, 2)).await.unwrap();
        assert_eq!(policy.source_chain_id, base.id);
        assert_eq!(policy.dest_chain_id, arb.id);
        assert_eq!(policy.fallback_mode, FallbackMode::Strict);
        assert_eq!(policy.fallback_order, vec![BridgeType::LayerZero]);
        assert_eq!(policy.created_at, policy.updated_at);
    }

    #[tokio::test]
    async fn null_or_empty_order_defaults_to_default_bridge() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        let from_null: RoutePolicyInput = serde_json::from_value(serde_json::json!({
            "sourceChainId": BASE,
            "destChainId": ARBITRUM,
            "defaultBridgeType": 2,
            "fallbackOrder": null
        }))
        .unwrap();
        let policy = svc.create(&ctx, from_null).await.unwrap();
        assert_eq!(policy.fallback_order, vec![BridgeType::LayerZero]);

        let mut empty = input(ARBITRUM, BASE, 1);
        empty.fallback_order = Some(Vec::new());
        let policy = svc.create(&ctx, empty).await.unwrap();
        assert_eq!(policy.fallback_order, vec![BridgeType::Ccip]);
    }

    #[tokio::test]
    async fn create_preserves_explicit_order() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        let mut req = input(BASE, ARBITRUM, 1);
        req.fallback_mode = Some("auto_fallback".into());
        req.fallback_order = Some(vec![1, 2, 0]);
        let policy = svc.create(&ctx, req).await.unwrap();
        assert_eq!(policy.fallback_mode, FallbackMode::AutoFallback);
        assert_eq!(
            policy.fallback_order,
            vec![BridgeType::Ccip, BridgeType::LayerZero, BridgeType::Native]
        );
    }

    #[tokio::test]
    async fn same_chain_via_different_spellings_is_rejected() {
        let (registry, base, _) = registry_with_base_and_arbitrum();
        let (svc, store) = service(registry);
        let ctx = RequestContext::background();

        let err = svc
            .create(&ctx, input("eip155:8453", &base.id.to_string(), 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)), "got {err:?}");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unresolvable_chain_is_bad_request() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let (svc, store) = service(registry);
        let ctx = RequestContext::background();

        let err = svc.create(&ctx, input("999999", ARBITRUM, 0)).await.unwrap_err();
        assert!(matches!(&err, ServiceError::BadRequest(m) if m.starts_with("sourceChainId")));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn invalid_enum_values_are_rejected() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let (svc, store) = service(registry);
        let ctx = RequestContext::background();

        let err = svc.create(&ctx, input(BASE, ARBITRUM, 3)).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));

        let mut bad_mode = input(BASE, ARBITRUM, 0);
        bad_mode.fallback_mode = Some("Strict".into());
        assert!(matches!(
            svc.create(&ctx, bad_mode).await,
            Err(ServiceError::BadRequest(_))
        ));

        let mut blank_mode = input(BASE, ARBITRUM, 0);
        blank_mode.fallback_mode = Some("  ".into());
        let created = svc.create(&ctx, blank_mode).await.unwrap();
        assert_eq!(created.fallback_mode, FallbackMode::Strict);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_all_fields_and_keeps_created_at() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        let mut first = input(BASE, ARBITRUM, 2);
        first.fallback_mode = Some("auto_fallback".into());
        first.fallback_order = Some(vec![2, 1]);
        let created = svc.create(&ctx, first).await.unwrap();

        let updated = svc
            .update(&ctx, created.id, input(ARBITRUM, BASE, 0))
            .await
            .unwrap();
        assert_eq!(updated.source_chain_id, created.dest_chain_id);
        assert_eq!(updated.fallback_mode, FallbackMode::Strict);
        assert_eq!(updated.fallback_order, vec![BridgeType::Native]);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(svc.get(&ctx, created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_with_duplicate_order_leaves_record_untouched() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        let created = svc.create(&ctx, input(BASE, ARBITRUM, 2)).await.unwrap();
        let mut dup = input(BASE, ARBITRUM, 2);
        dup.fallback_order = Some(vec![1, 1]);
        let err = svc.update(&ctx, created.id, dup).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
        assert_eq!(svc.get(&ctx, created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found_before_validation() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        // Invalid input, but the missing record is reported first.
        let err = svc
            .update(&ctx, Uuid::new_v4(), input("nope", "nope", 9))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (registry, _, _) = registry_with_base_and_arbitrum();
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        let created = svc.create(&ctx, input(BASE, ARBITRUM, 0)).await.unwrap();
        svc.delete(&ctx, created.id).await.unwrap();
        assert!(matches!(
            svc.get(&ctx, created.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete(&ctx, created.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_filters_by_resolved_reference() {
        let (registry, base, _) = registry_with_base_and_arbitrum();
        let (svc, _) = service(registry);
        let ctx = RequestContext::background();

        svc.create(&ctx, input(BASE, ARBITRUM, 0)).await.unwrap();
        svc.create(&ctx, input(ARBITRUM, BASE, 0)).await.unwrap();

        let from_base = svc
            .list(
                &ctx,
                &RouteQuery {
                    source_chain_id: Some("eip155:8453".into()),
                    dest_chain_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(from_base.len(), 1);
        assert_eq!(from_base[0].source_chain_id, base.id);

        let all = svc.list(&ctx, &RouteQuery::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let bad = svc
            .list(
                &ctx,
                &RouteQuery {
                    source_chain_id: Some("bad".into()),
                    dest_chain_id: None,
                },
            )
            .await;
        assert!(matches!(bad, Err(ServiceError::BadRequest(_))));
    }
}
