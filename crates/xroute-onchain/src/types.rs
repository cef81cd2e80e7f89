//! Request and response payloads exchanged with the execution layer.
//!
//! Chain references are forwarded exactly as the caller supplied them
//! (trimmed). The execution layer resolves them against its own registry.
//! Hex-bearing fields arrive here already normalized.

use serde::{Deserialize, Serialize};
use xroute_core::BridgeType;

// -- Requests -----------------------------------------------------------------

/// Adapter registration for a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdapterParams {
    pub source_chain: String,
    pub dest_chain: String,
    pub bridge_type: BridgeType,
    pub adapter_address: String,
}

/// Default bridge selection for a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDefaultBridgeParams {
    pub source_chain: String,
    pub dest_chain: String,
    pub bridge_type: BridgeType,
}

/// Hyperbridge adapter configuration push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HyperbridgeConfigParams {
    pub source_chain: String,
    pub dest_chain: String,
    pub state_machine_id_hex: String,
    pub destination_contract_hex: String,
}

/// CCIP adapter configuration push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CcipConfigParams {
    pub source_chain: String,
    pub dest_chain: String,
    /// CCIP chain selector. Omitted lets the execution layer derive it from
    /// the destination chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_selector: Option<u64>,
    pub destination_adapter_hex: String,
}

/// LayerZero adapter configuration push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerZeroConfigParams {
    pub source_chain: String,
    pub dest_chain: String,
    /// Destination endpoint id. Omitted lets the execution layer derive it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_eid: Option<u32>,
    pub peer_hex: String,
    pub options_hex: String,
}

/// Arbitrary contract call on a source chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractParams {
    pub source_chain: String,
    pub contract_address: String,
    pub method: String,
    /// ABI fragment describing `method`, passed through verbatim.
    pub abi: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

// -- Responses ----------------------------------------------------------------

/// Handle for a submitted, not yet confirmed, transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxHandle {
    pub tx_hash: String,
}

/// Result of a per-protocol configuration push, which may take several
/// transactions against the route's adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPushResult {
    pub adapter_address: String,
    #[serde(default)]
    pub tx_hashes: Vec<String>,
}

/// Result of a generic contract interaction.
///
/// For reads, `result` is the decoded return value. For writes it is the
/// transaction hash and `is_write` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractResult {
    pub result: serde_json::Value,
    pub is_write: bool,
}

/// Adapter registered for one bridge type on a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterStatus {
    pub bridge_type: BridgeType,
    pub adapter_address: String,
    #[serde(default)]
    pub is_configured: bool,
}

/// Read-only snapshot of a route's onchain state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub source_chain: String,
    pub dest_chain: String,
    #[serde(default)]
    pub default_bridge_type: Option<BridgeType>,
    #[serde(default)]
    pub adapters: Vec<AdapterStatus>,
    /// Router contract the adapters are registered on, when deployed.
    #[serde(default)]
    pub router_address: Option<String>,
}
