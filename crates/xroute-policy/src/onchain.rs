//! # Onchain Adapter Service
//!
//! Validates the presence and shape of each request and forwards it to the
//! [`OnchainExecutor`]. Chain references are forwarded as supplied (trimmed);
//! the execution layer resolves them. Hex fields are normalized before they
//! leave. Deep protocol checks (address checksums, ABI correctness, onchain
//! state) belong to the execution layer, and its rejections reach the caller
//! with the collaborator's message unmodified.
//!
//! No call waits for confirmation. Writes return once the execution layer
//! accepts them.

use std::sync::Arc;

use serde::Deserialize;
use utoipa::ToSchema;
use xroute_core::{normalize_hex, BridgeType, ValidationError};
use xroute_onchain::types::{
    CcipConfigParams, ConfigPushResult, HyperbridgeConfigParams, InteractParams, InteractResult,
    LayerZeroConfigParams, RegisterAdapterParams, SetDefaultBridgeParams, StatusSnapshot,
    TxHandle,
};
use xroute_onchain::OnchainExecutor;

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::fields::required;

// -- Inputs -------------------------------------------------------------------

/// Adapter registration request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterAdapterInput {
    pub source_chain_id: String,
    pub dest_chain_id: String,
    pub bridge_type: Option<u8>,
    pub adapter_address: String,
}

/// Default bridge selection request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SetDefaultBridgeInput {
    pub source_chain_id: String,
    pub dest_chain_id: String,
    pub bridge_type: Option<u8>,
}

/// Hyperbridge configuration push request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct HyperbridgeConfigInput {
    pub source_chain_id: String,
    pub dest_chain_id: String,
    pub state_machine_id_hex: String,
    pub destination_contract_hex: String,
}

/// CCIP configuration push request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CcipConfigInput {
    pub source_chain_id: String,
    pub dest_chain_id: String,
    pub chain_selector: Option<u64>,
    pub destination_adapter_hex: String,
}

/// LayerZero configuration push request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerZeroPushInput {
    pub source_chain_id: String,
    pub dest_chain_id: String,
    pub dst_eid: Option<u32>,
    pub peer_hex: String,
    pub options_hex: String,
}

/// Generic contract interaction request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractInput {
    pub source_chain_id: String,
    pub contract_address: String,
    pub method: String,
    /// ABI fragment for `method`.
    pub abi: String,
    #[schema(value_type = Vec<Object>)]
    pub args: Vec<serde_json::Value>,
}

// -- Service ------------------------------------------------------------------

/// Boundary between xroute and the execution layer.
#[derive(Clone)]
pub struct OnchainAdapterService {
    executor: Arc<dyn OnchainExecutor>,
}

fn route(source: &str, dest: &str) -> Result<(String, String), ValidationError> {
    Ok((
        required("sourceChainId", source)?.to_string(),
        required("destChainId", dest)?.to_string(),
    ))
}

fn bridge_type(raw: Option<u8>) -> Result<BridgeType, ValidationError> {
    let raw = raw.ok_or(ValidationError::Required { field: "bridgeType" })?;
    BridgeType::try_from(raw)
}

fn required_hex(field: &'static str, value: &str) -> Result<String, ValidationError> {
    Ok(normalize_hex(required(field, value)?))
}

impl OnchainAdapterService {
    pub fn new(executor: Arc<dyn OnchainExecutor>) -> Self {
        Self { executor }
    }

    fn logged(operation: &'static str, err: ServiceError) -> ServiceError {
        match &err {
            ServiceError::Internal(msg) => {
                tracing::error!(operation, error = %msg, "execution layer call failed")
            }
            ServiceError::BadRequest(msg) => {
                tracing::warn!(operation, error = %msg, "execution layer rejected request")
            }
            _ => {}
        }
        err
    }

    pub async fn get_status(
        &self,
        ctx: &RequestContext,
        source_chain_id: &str,
        dest_chain_id: &str,
    ) -> Result<StatusSnapshot, ServiceError> {
        let (source, dest) = route(source_chain_id, dest_chain_id)?;
        ctx.run(self.executor.get_status(&source, &dest))
            .await
            .map_err(|e| Self::logged("get_status", e))
    }

    pub async fn register_adapter(
        &self,
        ctx: &RequestContext,
        input: RegisterAdapterInput,
    ) -> Result<TxHandle, ServiceError> {
        let (source_chain, dest_chain) = route(&input.source_chain_id, &input.dest_chain_id)?;
        let params = RegisterAdapterParams {
            source_chain,
            dest_chain,
            bridge_type: bridge_type(input.bridge_type)?,
            adapter_address: required("adapterAddress", &input.adapter_address)?.to_string(),
        };
        let handle = ctx
            .run(self.executor.register_adapter(&params))
            .await
            .map_err(|e| Self::logged("register_adapter", e))?;

        tracing::info!(
            source = %params.source_chain,
            dest = %params.dest_chain,
            bridge_type = %params.bridge_type,
            tx_hash = %handle.tx_hash,
            "adapter registration submitted"
        );
        Ok(handle)
    }

    pub async fn set_default_bridge_type(
        &self,
        ctx: &RequestContext,
        input: SetDefaultBridgeInput,
    ) -> Result<TxHandle, ServiceError> {
        let (source_chain, dest_chain) = route(&input.source_chain_id, &input.dest_chain_id)?;
        let params = SetDefaultBridgeParams {
            source_chain,
            dest_chain,
            bridge_type: bridge_type(input.bridge_type)?,
        };
        let handle = ctx
            .run(self.executor.set_default_bridge_type(&params))
            .await
            .map_err(|e| Self::logged("set_default_bridge_type", e))?;

        tracing::info!(
            source = %params.source_chain,
            dest = %params.dest_chain,
            bridge_type = %params.bridge_type,
            tx_hash = %handle.tx_hash,
            "default bridge update submitted"
        );
        Ok(handle)
    }

    pub async fn set_hyperbridge_config(
        &self,
        ctx: &RequestContext,
        input: HyperbridgeConfigInput,
    ) -> Result<ConfigPushResult, ServiceError> {
        let (source_chain, dest_chain) = route(&input.source_chain_id, &input.dest_chain_id)?;
        let params = HyperbridgeConfigParams {
            source_chain,
            dest_chain,
            state_machine_id_hex: required_hex("stateMachineIdHex", &input.state_machine_id_hex)?,
            destination_contract_hex: required_hex(
                "destinationContractHex",
                &input.destination_contract_hex,
            )?,
        };
        let result = ctx
            .run(self.executor.set_hyperbridge_config(&params))
            .await
            .map_err(|e| Self::logged("set_hyperbridge_config", e))?;

        tracing::info!(adapter = %result.adapter_address, txs = result.tx_hashes.len(), "hyperbridge config submitted");
        Ok(result)
    }

    pub async fn set_ccip_config(
        &self,
        ctx: &RequestContext,
        input: CcipConfigInput,
    ) -> Result<ConfigPushResult, ServiceError> {
        let (source_chain, dest_chain) = route(&input.source_chain_id, &input.dest_chain_id)?;
        let params = CcipConfigParams {
            source_chain,
            dest_chain,
            chain_selector: input.chain_selector,
            destination_adapter_hex: required_hex(
                "destinationAdapterHex",
                &input.destination_adapter_hex,
            )?,
        };
        let result = ctx
            .run(self.executor.set_ccip_config(&params))
            .await
            .map_err(|e| Self::logged("set_ccip_config", e))?;

        tracing::info!(adapter = %result.adapter_address, txs = result.tx_hashes.len(), "ccip config submitted");
        Ok(result)
    }

    pub async fn set_layerzero_config(
        &self,
        ctx: &RequestContext,
        input: LayerZeroPushInput,
    ) -> Result<ConfigPushResult, ServiceError> {
        let (source_chain, dest_chain) = route(&input.source_chain_id, &input.dest_chain_id)?;
        let params = LayerZeroConfigParams {
            source_chain,
            dest_chain,
            dst_eid: input.dst_eid,
            peer_hex: required_hex("peerHex", &input.peer_hex)?,
            options_hex: normalize_hex(&input.options_hex),
        };
        let result = ctx
            .run(self.executor.set_layerzero_config(&params))
            .await
            .map_err(|e| Self::logged("set_layerzero_config", e))?;

        tracing::info!(adapter = %result.adapter_address, txs = result.tx_hashes.len(), "layerzero config submitted");
        Ok(result)
    }

    pub async fn generic_interact(
        &self,
        ctx: &RequestContext,
        input: InteractInput,
    ) -> Result<InteractResult, ServiceError> {
        let params = InteractParams {
            source_chain: required("sourceChainId", &input.source_chain_id)?.to_string(),
            contract_address: required("contractAddress", &input.contract_address)?.to_string(),
            method: required("method", &input.method)?.to_string(),
            abi: required("abi", &input.abi)?.to_string(),
            args: input.args,
        };
        let result = ctx
            .run(self.executor.generic_interact(&params))
            .await
            .map_err(|e| Self::logged("generic_interact", e))?;

        tracing::info!(
            contract = %params.contract_address,
            method = %params.method,
            is_write = result.is_write,
            "contract interaction completed"
        );
        Ok(result)
    }
}
