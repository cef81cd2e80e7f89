//! LayerZero configuration persistence over the `layerzero_configs` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use xroute_core::ChainId;
use xroute_policy::model::{LayerZeroConfig, Record, RouteFilter};
use xroute_policy::ports::RecordStore;
use xroute_policy::StoreError;

use super::{backend, corrupt, require_affected};

const SELECT: &str = "SELECT id, source_chain_id, dest_chain_id, dst_eid, peer_hex, \
     options_hex, is_active, created_at, updated_at FROM layerzero_configs";

#[derive(Debug, Clone)]
pub struct PgLayerZeroConfigStore {
    pool: PgPool,
}

impl PgLayerZeroConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<LayerZeroConfig, RouteFilter> for PgLayerZeroConfigStore {
    async fn create(&self, record: &LayerZeroConfig) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO layerzero_configs (id, source_chain_id, dest_chain_id, dst_eid,
                 peer_hex, options_hex, is_active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(record.id)
        .bind(Uuid::from(record.source_chain_id))
        .bind(Uuid::from(record.dest_chain_id))
        .bind(i64::from(record.dst_eid))
        .bind(&record.peer_hex)
        .bind(&record.options_hex)
        .bind(record.is_active)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend("insert layerzero config"))?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<LayerZeroConfig, StoreError> {
        let sql = format!("{SELECT} WHERE id = $1");
        sqlx::query_as::<_, LayerZeroConfigRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend("select layerzero config"))?
            .ok_or_else(|| StoreError::not_found(LayerZeroConfig::KIND, id))?
            .into_record()
    }

    async fn list(&self, filter: &RouteFilter) -> Result<Vec<LayerZeroConfig>, StoreError> {
        let sql = format!(
            "{SELECT} WHERE ($1::uuid IS NULL OR source_chain_id = $1)
               AND ($2::uuid IS NULL OR dest_chain_id = $2)
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, LayerZeroConfigRow>(&sql)
            .bind(filter.source_chain_id.map(Uuid::from))
            .bind(filter.dest_chain_id.map(Uuid::from))
            .fetch_all(&self.pool)
            .await
            .map_err(backend("list layerzero configs"))?
            .into_iter()
            .map(LayerZeroConfigRow::into_record)
            .collect()
    }

    async fn update(&self, record: &LayerZeroConfig) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE layerzero_configs SET source_chain_id = $1, dest_chain_id = $2,
                 dst_eid = $3, peer_hex = $4, options_hex = $5, is_active = $6,
                 updated_at = $7
             WHERE id = $8",
        )
        .bind(Uuid::from(record.source_chain_id))
        .bind(Uuid::from(record.dest_chain_id))
        .bind(i64::from(record.dst_eid))
        .bind(&record.peer_hex)
        .bind(&record.options_hex)
        .bind(record.is_active)
        .bind(record.updated_at)
        .bind(record.id)
        .execute(&self.pool)
        .await
        .map_err(backend("update layerzero config"))?;
        require_affected(result.rows_affected(), LayerZeroConfig::KIND, record.id)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM layerzero_configs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend("delete layerzero config"))?;
        require_affected(result.rows_affected(), LayerZeroConfig::KIND, id)
    }
}

#[derive(sqlx::FromRow)]
struct LayerZeroConfigRow {
    id: Uuid,
    source_chain_id: Uuid,
    dest_chain_id: Uuid,
    dst_eid: i64,
    peer_hex: String,
    options_hex: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LayerZeroConfigRow {
    fn into_record(self) -> Result<LayerZeroConfig, StoreError> {
        Ok(LayerZeroConfig {
            id: self.id,
            source_chain_id: ChainId::from_uuid(self.source_chain_id),
            dest_chain_id: ChainId::from_uuid(self.dest_chain_id),
            dst_eid: u32::try_from(self.dst_eid)
                .map_err(|e| corrupt(LayerZeroConfig::KIND, e))?,
            peer_hex: self.peer_hex,
            options_hex: self.options_hex,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
