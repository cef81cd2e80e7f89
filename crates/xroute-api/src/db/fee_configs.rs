//! Fee configuration persistence over the `fee_configs` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use xroute_core::ChainId;
use xroute_policy::model::{ChainFilter, FeeConfig, Record};
use xroute_policy::ports::RecordStore;
use xroute_policy::StoreError;

use super::{backend, require_affected};

const SELECT: &str = "SELECT id, chain_id, token_id, platform_fee_percent, fixed_base_fee, \
     min_fee, is_active, created_at, updated_at FROM fee_configs";

#[derive(Debug, Clone)]
pub struct PgFeeConfigStore {
    pool: PgPool,
}

impl PgFeeConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<FeeConfig, ChainFilter> for PgFeeConfigStore {
    async fn create(&self, record: &FeeConfig) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO fee_configs (id, chain_id, token_id, platform_fee_percent,
                 fixed_base_fee, min_fee, is_active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(record.id)
        .bind(Uuid::from(record.chain_id))
        .bind(record.token_id)
        .bind(&record.platform_fee_percent)
        .bind(&record.fixed_base_fee)
        .bind(&record.min_fee)
        .bind(record.is_active)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend("insert fee config"))?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<FeeConfig, StoreError> {
        let sql = format!("{SELECT} WHERE id = $1");
        let row = sqlx::query_as::<_, FeeConfigRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend("select fee config"))?
            .ok_or_else(|| StoreError::not_found(FeeConfig::KIND, id))?;
        Ok(row.into_record())
    }

    async fn list(&self, filter: &ChainFilter) -> Result<Vec<FeeConfig>, StoreError> {
        let sql = format!(
            "{SELECT} WHERE ($1::uuid IS NULL OR chain_id = $1) ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, FeeConfigRow>(&sql)
            .bind(filter.chain_id.map(Uuid::from))
            .fetch_all(&self.pool)
            .await
            .map_err(backend("list fee configs"))?;
        Ok(rows.into_iter().map(FeeConfigRow::into_record).collect())
    }

    async fn update(&self, record: &FeeConfig) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE fee_configs SET chain_id = $1, token_id = $2, platform_fee_percent = $3,
                 fixed_base_fee = $4, min_fee = $5, is_active = $6, updated_at = $7
             WHERE id = $8",
        )
        .bind(Uuid::from(record.chain_id))
        .bind(record.token_id)
        .bind(&record.platform_fee_percent)
        .bind(&record.fixed_base_fee)
        .bind(&record.min_fee)
        .bind(record.is_active)
        .bind(record.updated_at)
        .bind(record.id)
        .execute(&self.pool)
        .await
        .map_err(backend("update fee config"))?;
        require_affected(result.rows_affected(), FeeConfig::KIND, record.id)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM fee_configs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend("delete fee config"))?;
        require_affected(result.rows_affected(), FeeConfig::KIND, id)
    }
}

#[derive(sqlx::FromRow)]
struct FeeConfigRow {
    id: Uuid,
    chain_id: Uuid,
    token_id: Uuid,
    platform_fee_percent: String,
    fixed_base_fee: String,
    min_fee: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FeeConfigRow {
    fn into_record(self) -> FeeConfig {
        FeeConfig {
            id: self.id,
            chain_id: ChainId::from_uuid(self.chain_id),
            token_id: self.token_id,
            platform_fee_percent: self.platform_fee_percent,
            fixed_base_fee: self.fixed_base_fee,
            min_fee: self.min_fee,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
