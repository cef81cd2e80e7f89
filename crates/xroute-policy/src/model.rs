//! # Records, Inputs and Filters
//!
//! Records are what the stores persist; every chain reference in a record is
//! a canonical [`ChainId`]. Inputs are raw request payloads. Their chain
//! references are unresolved strings and their enum fields are raw wire
//! values, validated by the owning service before anything is written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use xroute_core::{BridgeType, Caip2Id, ChainId, FallbackMode, NativeChainId};

/// A persisted record with a UUID key.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable kind used in not-found messages.
    const KIND: &'static str;

    /// Primary key.
    fn id(&self) -> Uuid;

    /// Creation time, used for stable list ordering.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Predicate applied by list operations.
pub trait RecordFilter<T>: Send + Sync + 'static {
    /// Whether `record` passes the filter.
    fn matches(&self, record: &T) -> bool;
}

// -- Registry -----------------------------------------------------------------

/// A blockchain network known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    #[schema(value_type = String, format = Uuid)]
    pub id: ChainId,
    pub name: String,
    /// Native chain id, e.g. `"8453"`.
    #[schema(value_type = String)]
    pub chain_id: NativeChainId,
    /// CAIP-2 identifier, e.g. `"eip155:8453"`.
    #[schema(value_type = String)]
    pub caip2: Caip2Id,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A token deployed on a registry chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: Uuid,
    #[schema(value_type = String, format = Uuid)]
    pub chain_id: ChainId,
    pub symbol: String,
    pub address: String,
    pub decimals: u8,
}

/// A bridge protocol deployment known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bridge {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = u8)]
    pub bridge_type: BridgeType,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// -- Route policy -------------------------------------------------------------

/// Corridor-level routing policy for a (source, dest) chain pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutePolicy {
    pub id: Uuid,
    #[schema(value_type = String, format = Uuid)]
    pub source_chain_id: ChainId,
    #[schema(value_type = String, format = Uuid)]
    pub dest_chain_id: ChainId,
    #[schema(value_type = u8)]
    pub default_bridge_type: BridgeType,
    #[schema(value_type = String, example = "strict")]
    pub fallback_mode: FallbackMode,
    #[schema(value_type = Vec<u8>)]
    pub fallback_order: Vec<BridgeType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for RoutePolicy {
    const KIND: &'static str = "route policy";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Create/update payload for a route policy.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutePolicyInput {
    /// Canonical id, CAIP-2 or native chain id.
    pub source_chain_id: String,
    /// Canonical id, CAIP-2 or native chain id.
    pub dest_chain_id: String,
    /// 0=native, 1=ccip, 2=layerzero.
    pub default_bridge_type: u8,
    /// `"strict"` or `"auto_fallback"`; blank means strict.
    #[serde(default)]
    pub fallback_mode: Option<String>,
    /// Defaults to `[defaultBridgeType]` when absent, null or empty.
    #[serde(default)]
    pub fallback_order: Option<Vec<u8>>,
}

// -- LayerZero ----------------------------------------------------------------

/// LayerZero peer configuration for a chain pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayerZeroConfig {
    pub id: Uuid,
    #[schema(value_type = String, format = Uuid)]
    pub source_chain_id: ChainId,
    #[schema(value_type = String, format = Uuid)]
    pub dest_chain_id: ChainId,
    pub dst_eid: u32,
    /// `0x` followed by exactly 64 hex characters.
    pub peer_hex: String,
    pub options_hex: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for LayerZeroConfig {
    const KIND: &'static str = "layerzero config";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Create/update payload for a LayerZero config.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayerZeroConfigInput {
    pub source_chain_id: String,
    pub dest_chain_id: String,
    pub dst_eid: u32,
    pub peer_hex: String,
    #[serde(default)]
    pub options_hex: Option<String>,
    /// Omitted keeps the current value on update, `true` on create.
    #[serde(default)]
    pub is_active: Option<bool>,
}

// -- Generic bridge -----------------------------------------------------------

/// Router configuration for a registry bridge on a chain pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    pub id: Uuid,
    pub bridge_id: Uuid,
    #[schema(value_type = String, format = Uuid)]
    pub source_chain_id: ChainId,
    #[schema(value_type = String, format = Uuid)]
    pub dest_chain_id: ChainId,
    pub router_address: String,
    /// Opaque decimal string.
    pub fee_percentage: String,
    /// Protocol-specific payload, stored verbatim.
    #[schema(value_type = Object)]
    pub config: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for BridgeConfig {
    const KIND: &'static str = "bridge config";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Create/update payload for a bridge config.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfigInput {
    pub bridge_id: Uuid,
    pub source_chain_id: String,
    pub dest_chain_id: String,
    pub router_address: String,
    #[serde(default)]
    pub fee_percentage: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub config: Option<serde_json::Value>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

// -- Fees ---------------------------------------------------------------------

/// Fee schedule for a token on a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeConfig {
    pub id: Uuid,
    #[schema(value_type = String, format = Uuid)]
    pub chain_id: ChainId,
    pub token_id: Uuid,
    pub platform_fee_percent: String,
    pub fixed_base_fee: String,
    pub min_fee: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for FeeConfig {
    const KIND: &'static str = "fee config";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Create/update payload for a fee config.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeConfigInput {
    pub chain_id: String,
    pub token_id: Uuid,
    #[serde(default)]
    pub platform_fee_percent: Option<String>,
    #[serde(default)]
    pub fixed_base_fee: Option<String>,
    #[serde(default)]
    pub min_fee: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

// -- Filters ------------------------------------------------------------------

/// Optional chain-pair filter over resolved identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteFilter {
    pub source_chain_id: Option<ChainId>,
    pub dest_chain_id: Option<ChainId>,
}

impl RouteFilter {
    fn matches_pair(&self, source: ChainId, dest: ChainId) -> bool {
        self.source_chain_id.map_or(true, |s| s == source)
            && self.dest_chain_id.map_or(true, |d| d == dest)
    }
}

impl RecordFilter<RoutePolicy> for RouteFilter {
    fn matches(&self, record: &RoutePolicy) -> bool {
        self.matches_pair(record.source_chain_id, record.dest_chain_id)
    }
}

impl RecordFilter<LayerZeroConfig> for RouteFilter {
    fn matches(&self, record: &LayerZeroConfig) -> bool {
        self.matches_pair(record.source_chain_id, record.dest_chain_id)
    }
}

impl RecordFilter<BridgeConfig> for RouteFilter {
    fn matches(&self, record: &BridgeConfig) -> bool {
        self.matches_pair(record.source_chain_id, record.dest_chain_id)
    }
}

/// Optional single-chain filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainFilter {
    pub chain_id: Option<ChainId>,
}

impl RecordFilter<FeeConfig> for ChainFilter {
    fn matches(&self, record: &FeeConfig) -> bool {
        self.chain_id.map_or(true, |c| c == record.chain_id)
    }
}

/// Unresolved chain-pair filter as received from a query string.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RouteQuery {
    pub source_chain_id: Option<String>,
    pub dest_chain_id: Option<String>,
}

/// Unresolved single-chain filter as received from a query string.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ChainQuery {
    pub chain_id: Option<String>,
}
