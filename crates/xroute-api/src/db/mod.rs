//! # Database Persistence Layer
//!
//! Postgres implementations of the `xroute-policy` port traits via SQLx.
//!
//! The database layer is optional. When `DATABASE_URL` is set the chain
//! registry and every record store live in PostgreSQL. When absent the API
//! runs on in-memory stores (development and testing).
//!
//! Row conversion is strict: a stored value that no longer parses into its
//! domain type (an unknown bridge type, a malformed CAIP-2) is a backend
//! error, never silently coerced.

pub mod bridge_configs;
pub mod fee_configs;
pub mod layerzero_configs;
pub mod registry;
pub mod route_policies;

use std::sync::Arc;

use sqlx::postgres::{PgPool, PgPoolOptions};
use xroute_core::{BridgeType, ValidationError};
use xroute_policy::StoreError;

use crate::state::Ports;

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set, running in-memory only mode. \
                 State will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}

/// Postgres-backed ports sharing one pool.
pub fn ports(pool: PgPool) -> Ports {
    let registry = Arc::new(registry::PgRegistry::new(pool.clone()));
    Ports {
        chains: registry.clone(),
        tokens: registry.clone(),
        bridges: registry,
        route_policies: Arc::new(route_policies::PgRoutePolicyStore::new(pool.clone())),
        layerzero_configs: Arc::new(layerzero_configs::PgLayerZeroConfigStore::new(pool.clone())),
        bridge_configs: Arc::new(bridge_configs::PgBridgeConfigStore::new(pool.clone())),
        fee_configs: Arc::new(fee_configs::PgFeeConfigStore::new(pool)),
    }
}

/// Map a driver error to a store error. Details stay in the log.
pub(crate) fn backend(operation: &'static str) -> impl Fn(sqlx::Error) -> StoreError {
    move |err| {
        tracing::error!(operation, error = %err, "database operation failed");
        StoreError::Backend(format!("{operation}: {err}"))
    }
}

/// A stored value that no longer converts into its domain type.
pub(crate) fn corrupt(entity: &'static str, detail: impl std::fmt::Display) -> StoreError {
    tracing::error!(entity, detail = %detail, "stored row failed to convert");
    StoreError::Backend(format!("stored {entity} is invalid: {detail}"))
}

/// Decode a `SMALLINT` bridge type column.
pub(crate) fn bridge_type_from_column(raw: i16) -> Result<BridgeType, ValidationError> {
    let raw = u8::try_from(raw).map_err(|_| ValidationError::InvalidBridgeType(u8::MAX))?;
    BridgeType::try_from(raw)
}

/// `rows_affected == 0` on a keyed write means the record does not exist.
pub(crate) fn require_affected(
    rows: u64,
    entity: &'static str,
    id: uuid::Uuid,
) -> Result<(), StoreError> {
    if rows == 0 {
        Err(StoreError::not_found(entity, id))
    } else {
        Ok(())
    }
}
