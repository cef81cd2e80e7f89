//! Chain, token and bridge registry lookups over the `chains`, `tokens`
//! and `bridges` tables. Read-only: the registry is maintained outside
//! this service.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use xroute_core::{Caip2Id, ChainId, NativeChainId};
use xroute_policy::model::{Bridge, Chain, Token};
use xroute_policy::ports::{BridgeLookup, ChainLookup, TokenLookup};
use xroute_policy::StoreError;

use super::{backend, bridge_type_from_column, corrupt};

const CHAIN_COLUMNS: &str = "SELECT id, name, chain_id, caip2, is_active FROM chains";

/// Postgres-backed registry.
#[derive(Debug, Clone)]
pub struct PgRegistry {
    pool: PgPool,
}

impl PgRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn chain_where(
        &self,
        clause: &str,
        key: &str,
        bind: ChainKey<'_>,
    ) -> Result<Chain, StoreError> {
        let sql = format!("{CHAIN_COLUMNS} WHERE {clause} = $1");
        let query = sqlx::query_as::<_, ChainRow>(&sql);
        let query = match bind {
            ChainKey::Id(id) => query.bind(id),
            ChainKey::Text(text) => query.bind(text),
        };
        query
            .fetch_optional(&self.pool)
            .await
            .map_err(backend("select chain"))?
            .ok_or_else(|| StoreError::not_found("chain", key))?
            .into_record()
    }
}

enum ChainKey<'a> {
    Id(Uuid),
    Text(&'a str),
}

#[async_trait]
impl ChainLookup for PgRegistry {
    async fn get_by_id(&self, id: ChainId) -> Result<Chain, StoreError> {
        self.chain_where("id", &id.to_string(), ChainKey::Id(id.into()))
            .await
    }

    async fn get_by_chain_id(&self, chain_id: &str) -> Result<Chain, StoreError> {
        self.chain_where("chain_id", chain_id, ChainKey::Text(chain_id))
            .await
    }

    async fn get_by_caip2(&self, caip2: &str) -> Result<Chain, StoreError> {
        self.chain_where("caip2", caip2, ChainKey::Text(caip2)).await
    }

    async fn list(&self) -> Result<Vec<Chain>, StoreError> {
        let sql = format!("{CHAIN_COLUMNS} ORDER BY name, id");
        sqlx::query_as::<_, ChainRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(backend("list chains"))?
            .into_iter()
            .map(ChainRow::into_record)
            .collect()
    }
}

#[async_trait]
impl TokenLookup for PgRegistry {
    async fn get_by_id(&self, id: Uuid) -> Result<Token, StoreError> {
        sqlx::query_as::<_, TokenRow>(
            "SELECT id, chain_id, symbol, address, decimals FROM tokens WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend("select token"))?
        .ok_or_else(|| StoreError::not_found("token", id))?
        .into_record()
    }
}

#[async_trait]
impl BridgeLookup for PgRegistry {
    async fn get_by_id(&self, id: Uuid) -> Result<Bridge, StoreError> {
        sqlx::query_as::<_, BridgeRow>(
            "SELECT id, name, bridge_type, is_active FROM bridges WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend("select bridge"))?
        .ok_or_else(|| StoreError::not_found("bridge", id))?
        .into_record()
    }
}

#[derive(sqlx::FromRow)]
struct ChainRow {
    id: Uuid,
    name: String,
    chain_id: String,
    caip2: String,
    is_active: bool,
}

impl ChainRow {
    fn into_record(self) -> Result<Chain, StoreError> {
        Ok(Chain {
            id: ChainId::from_uuid(self.id),
            name: self.name,
            chain_id: NativeChainId::new(self.chain_id).map_err(|e| corrupt("chain", e))?,
            caip2: Caip2Id::new(self.caip2).map_err(|e| corrupt("chain", e))?,
            is_active: self.is_active,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TokenRow {
    id: Uuid,
    chain_id: Uuid,
    symbol: String,
    address: String,
    decimals: i16,
}

impl TokenRow {
    fn into_record(self) -> Result<Token, StoreError> {
        Ok(Token {
            id: self.id,
            chain_id: ChainId::from_uuid(self.chain_id),
            symbol: self.symbol,
            address: self.address,
            decimals: u8::try_from(self.decimals).map_err(|e| corrupt("token", e))?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct BridgeRow {
    id: Uuid,
    name: String,
    bridge_type: i16,
    is_active: bool,
}

impl BridgeRow {
    fn into_record(self) -> Result<Bridge, StoreError> {
        Ok(Bridge {
            id: self.id,
            name: self.name,
            bridge_type: bridge_type_from_column(self.bridge_type)
                .map_err(|e| corrupt("bridge", e))?,
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_row_converts() {
        let id = Uuid::new_v4();
        let chain = ChainRow {
            id,
            name: "Base".into(),
            chain_id: "8453".into(),
            caip2: "eip155:8453".into(),
            is_active: true,
        }
        .into_record()
        .unwrap();
        assert_eq!(*chain.id.as_uuid(), id);
        assert_eq!(chain.caip2.reference(), "8453");
    }

    #[test]
    fn corrupt_caip2_is_backend_error() {
        let row = ChainRow {
            id: Uuid::new_v4(),
            name: "Broken".into(),
            chain_id: "1".into(),
            caip2: "nocolon".into(),
            is_active: true,
        };
        assert!(matches!(row.into_record(), Err(StoreError::Backend(_))));
    }

    #[test]
    fn out_of_range_bridge_type_is_backend_error() {
        let row = BridgeRow {
            id: Uuid::new_v4(),
            name: "Unknown".into(),
            bridge_type: 9,
            is_active: true,
        };
        assert!(matches!(row.into_record(), Err(StoreError::Backend(_))));
    }

    #[test]
    fn token_decimals_convert() {
        let row = TokenRow {
            id: Uuid::new_v4(),
            chain_id: Uuid::new_v4(),
            symbol: "USDC".into(),
            address: "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913".into(),
            decimals: 6,
        };
        assert_eq!(row.into_record().unwrap().decimals, 6);
    }
}
