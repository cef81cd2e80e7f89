//! Bridge router configuration persistence over the `bridge_configs` table.
//! The free-form `config` object is stored as `JSONB`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use xroute_core::ChainId;
use xroute_policy::model::{BridgeConfig, Record, RouteFilter};
use xroute_policy::ports::RecordStore;
use xroute_policy::StoreError;

use super::{backend, require_affected};

const SELECT: &str = "SELECT id, bridge_id, source_chain_id, dest_chain_id, router_address, \
     fee_percentage, config, is_active, created_at, updated_at FROM bridge_configs";

#[derive(Debug, Clone)]
pub struct PgBridgeConfigStore {
    pool: PgPool,
}

impl PgBridgeConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<BridgeConfig, RouteFilter> for PgBridgeConfigStore {
    async fn create(&self, record: &BridgeConfig) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO bridge_configs (id, bridge_id, source_chain_id, dest_chain_id,
                 router_address, fee_percentage, config, is_active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(record.id)
        .bind(record.bridge_id)
        .bind(Uuid::from(record.source_chain_id))
        .bind(Uuid::from(record.dest_chain_id))
        .bind(&record.router_address)
        .bind(&record.fee_percentage)
        .bind(&record.config)
        .bind(record.is_active)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend("insert bridge config"))?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<BridgeConfig, StoreError> {
        let sql = format!("{SELECT} WHERE id = $1");
        let row = sqlx::query_as::<_, BridgeConfigRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend("select bridge config"))?
            .ok_or_else(|| StoreError::not_found(BridgeConfig::KIND, id))?;
        Ok(row.into_record())
    }

    async fn list(&self, filter: &RouteFilter) -> Result<Vec<BridgeConfig>, StoreError> {
        let sql = format!(
            "{SELECT} WHERE ($1::uuid IS NULL OR source_chain_id = $1)
               AND ($2::uuid IS NULL OR dest_chain_id = $2)
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, BridgeConfigRow>(&sql)
            .bind(filter.source_chain_id.map(Uuid::from))
            .bind(filter.dest_chain_id.map(Uuid::from))
            .fetch_all(&self.pool)
            .await
            .map_err(backend("list bridge configs"))?;
        Ok(rows.into_iter().map(BridgeConfigRow::into_record).collect())
    }

    async fn update(&self, record: &BridgeConfig) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE bridge_configs SET bridge_id = $1, source_chain_id = $2, dest_chain_id = $3,
                 router_address = $4, fee_percentage = $5, config = $6, is_active = $7,
                 updated_at = $8
             WHERE id = $9",
        )
        .bind(record.bridge_id)
        .bind(Uuid::from(record.source_chain_id))
        .bind(Uuid::from(record.dest_chain_id))
        .bind(&record.router_address)
        .bind(&record.fee_percentage)
        .bind(&record.config)
        .bind(record.is_active)
        .bind(record.updated_at)
        .bind(record.id)
        .execute(&self.pool)
        .await
        .map_err(backend("update bridge config"))?;
        require_affected(result.rows_affected(), BridgeConfig::KIND, record.id)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM bridge_configs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend("delete bridge config"))?;
        require_affected(result.rows_affected(), BridgeConfig::KIND, id)
    }
}

#[derive(sqlx::FromRow)]
struct BridgeConfigRow {
    id: Uuid,
    bridge_id: Uuid,
    source_chain_id: Uuid,
    dest_chain_id: Uuid,
    router_address: String,
    fee_percentage: String,
    config: serde_json::Value,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BridgeConfigRow {
    fn into_record(self) -> BridgeConfig {
        BridgeConfig {
            id: self.id,
            bridge_id: self.bridge_id,
            source_chain_id: ChainId::from_uuid(self.source_chain_id),
            dest_chain_id: ChainId::from_uuid(self.dest_chain_id),
            router_address: self.router_address,
            fee_percentage: self.fee_percentage,
            config: self.config,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
