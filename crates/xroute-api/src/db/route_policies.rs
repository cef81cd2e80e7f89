//! Route policy persistence over the `route_policies` table.
//!
//! `fallback_order` is a `SMALLINT[]`; the bridge types keep their
//! numeric wire values.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use xroute_core::{BridgeType, ChainId, FallbackMode};
use xroute_policy::model::{Record, RouteFilter, RoutePolicy};
use xroute_policy::ports::RecordStore;
use xroute_policy::StoreError;

use super::{backend, bridge_type_from_column, corrupt, require_affected};

const SELECT: &str = "SELECT id, source_chain_id, dest_chain_id, default_bridge_type, \
     fallback_mode, fallback_order, created_at, updated_at FROM route_policies";

#[derive(Debug, Clone)]
pub struct PgRoutePolicyStore {
    pool: PgPool,
}

impl PgRoutePolicyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_column(order: &[BridgeType]) -> Vec<i16> {
    order.iter().map(|b| i16::from(b.as_u8())).collect()
}

#[async_trait]
impl RecordStore<RoutePolicy, RouteFilter> for PgRoutePolicyStore {
    async fn create(&self, record: &RoutePolicy) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO route_policies (id, source_chain_id, dest_chain_id, default_bridge_type,
                 fallback_mode, fallback_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(record.id)
        .bind(Uuid::from(record.source_chain_id))
        .bind(Uuid::from(record.dest_chain_id))
        .bind(i16::from(record.default_bridge_type.as_u8()))
        .bind(record.fallback_mode.as_str())
        .bind(order_column(&record.fallback_order))
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend("insert route policy"))?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<RoutePolicy, StoreError> {
        let sql = format!("{SELECT} WHERE id = $1");
        sqlx::query_as::<_, RoutePolicyRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend("select route policy"))?
            .ok_or_else(|| StoreError::not_found(RoutePolicy::KIND, id))?
            .into_record()
    }

    async fn list(&self, filter: &RouteFilter) -> Result<Vec<RoutePolicy>, StoreError> {
        let sql = format!(
            "{SELECT} WHERE ($1::uuid IS NULL OR source_chain_id = $1)
               AND ($2::uuid IS NULL OR dest_chain_id = $2)
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, RoutePolicyRow>(&sql)
            .bind(filter.source_chain_id.map(Uuid::from))
            .bind(filter.dest_chain_id.map(Uuid::from))
            .fetch_all(&self.pool)
            .await
            .map_err(backend("list route policies"))?
            .into_iter()
            .map(RoutePolicyRow::into_record)
            .collect()
    }

    async fn update(&self, record: &RoutePolicy) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE route_policies SET source_chain_id = $1, dest_chain_id = $2,
                 default_bridge_type = $3, fallback_mode = $4, fallback_order = $5,
                 updated_at = $6
             WHERE id = $7",
        )
        .bind(Uuid::from(record.source_chain_id))
        .bind(Uuid::from(record.dest_chain_id))
        .bind(i16::from(record.default_bridge_type.as_u8()))
        .bind(record.fallback_mode.as_str())
        .bind(order_column(&record.fallback_order))
        .bind(record.updated_at)
        .bind(record.id)
        .execute(&self.pool)
        .await
        .map_err(backend("update route policy"))?;
        require_affected(result.rows_affected(), RoutePolicy::KIND, record.id)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM route_policies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend("delete route policy"))?;
        require_affected(result.rows_affected(), RoutePolicy::KIND, id)
    }
}

#[derive(sqlx::FromRow)]
struct RoutePolicyRow {
    id: Uuid,
    source_chain_id: Uuid,
    dest_chain_id: Uuid,
    default_bridge_type: i16,
    fallback_mode: String,
    fallback_order: Vec<i16>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoutePolicyRow {
    fn into_record(self) -> Result<RoutePolicy, StoreError> {
        let fallback_order = self
            .fallback_order
            .into_iter()
            .map(bridge_type_from_column)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| corrupt(RoutePolicy::KIND, e))?;
        Ok(RoutePolicy {
            id: self.id,
            source_chain_id: ChainId::from_uuid(self.source_chain_id),
            dest_chain_id: ChainId::from_uuid(self.dest_chain_id),
            default_bridge_type: bridge_type_from_column(self.default_bridge_type)
                .map_err(|e| corrupt(RoutePolicy::KIND, e))?,
            fallback_mode: FallbackMode::parse(&self.fallback_mode)
                .map_err(|e| corrupt(RoutePolicy::KIND, e))?,
            fallback_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
