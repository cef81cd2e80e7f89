//! # Onchain Adapter API
//!
//! Forwards validated adapter operations to the execution layer. Every
//! endpoint returns 503 when no execution layer is configured. Writes
//! return the transaction handle(s) once the execution layer accepts them;
//! confirmation is not awaited.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use xroute_onchain::types::{ConfigPushResult, InteractResult, StatusSnapshot, TxHandle};
use xroute_policy::model::RouteQuery;
use xroute_policy::onchain::{
    CcipConfigInput, HyperbridgeConfigInput, InteractInput, LayerZeroPushInput,
    RegisterAdapterInput, SetDefaultBridgeInput,
};

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_json, extract_query};
use crate::state::AppState;

/// Build the onchain router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/onchain/status", get(get_status))
        .route("/v1/onchain/adapters", post(register_adapter))
        .route("/v1/onchain/default-bridge", post(set_default_bridge))
        .route("/v1/onchain/hyperbridge-config", post(set_hyperbridge_config))
        .route("/v1/onchain/ccip-config", post(set_ccip_config))
        .route("/v1/onchain/layerzero-config", post(set_layerzero_config))
        .route("/v1/onchain/interact", post(interact))
}

/// GET /v1/onchain/status — Router and adapter status for a route.
#[utoipa::path(
    get,
    path = "/v1/onchain/status",
    params(RouteQuery),
    responses(
        (status = 200, description = "Status snapshot from the execution layer"),
        (status = 400, description = "Missing chain reference", body = ErrorBody),
        (status = 503, description = "Execution layer not configured", body = ErrorBody),
    ),
    tag = "onchain"
)]
pub(crate) async fn get_status(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<StatusSnapshot>, AppError> {
    let onchain = state.onchain()?;
    let query = extract_query(query)?;
    let snapshot = onchain
        .get_status(
            &state.ctx(),
            query.source_chain_id.as_deref().unwrap_or_default(),
            query.dest_chain_id.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(snapshot))
}

/// POST /v1/onchain/adapters — Register an adapter contract for a route.
#[utoipa::path(
    post,
    path = "/v1/onchain/adapters",
    request_body = RegisterAdapterInput,
    responses(
        (status = 200, description = "Transaction submitted"),
        (status = 400, description = "Invalid input or rejected by the execution layer", body = ErrorBody),
        (status = 503, description = "Execution layer not configured", body = ErrorBody),
    ),
    tag = "onchain"
)]
pub(crate) async fn register_adapter(
    State(state): State<AppState>,
    body: Result<Json<RegisterAdapterInput>, JsonRejection>,
) -> Result<Json<TxHandle>, AppError> {
    let onchain = state.onchain()?;
    let input = extract_json(body)?;
    Ok(Json(onchain.register_adapter(&state.ctx(), input).await?))
}

/// POST /v1/onchain/default-bridge — Set the router's default bridge type.
#[utoipa::path(
    post,
    path = "/v1/onchain/default-bridge",
    request_body = SetDefaultBridgeInput,
    responses(
        (status = 200, description = "Transaction submitted"),
        (status = 400, description = "Invalid input or rejected by the execution layer", body = ErrorBody),
        (status = 503, description = "Execution layer not configured", body = ErrorBody),
    ),
    tag = "onchain"
)]
pub(crate) async fn set_default_bridge(
    State(state): State<AppState>,
    body: Result<Json<SetDefaultBridgeInput>, JsonRejection>,
) -> Result<Json<TxHandle>, AppError> {
    let onchain = state.onchain()?;
    let input = extract_json(body)?;
    Ok(Json(onchain.set_default_bridge_type(&state.ctx(), input).await?))
}

/// POST /v1/onchain/hyperbridge-config — Push Hyperbridge adapter configuration.
#[utoipa::path(
    post,
    path = "/v1/onchain/hyperbridge-config",
    request_body = HyperbridgeConfigInput,
    responses(
        (status = 200, description = "Configuration transactions submitted"),
        (status = 400, description = "Invalid input or rejected by the execution layer", body = ErrorBody),
        (status = 503, description = "Execution layer not configured", body = ErrorBody),
    ),
    tag = "onchain"
)]
pub(crate) async fn set_hyperbridge_config(
    State(state): State<AppState>,
    body: Result<Json<HyperbridgeConfigInput>, JsonRejection>,
) -> Result<Json<ConfigPushResult>, AppError> {
    let onchain = state.onchain()?;
    let input = extract_json(body)?;
    Ok(Json(onchain.set_hyperbridge_config(&state.ctx(), input).await?))
}

/// POST /v1/onchain/ccip-config — Push CCIP adapter configuration.
#[utoipa::path(
    post,
    path = "/v1/onchain/ccip-config",
    request_body = CcipConfigInput,
    responses(
        (status = 200, description = "Configuration transactions submitted"),
        (status = 400, description = "Invalid input or rejected by the execution layer", body = ErrorBody),
        (status = 503, description = "Execution layer not configured", body = ErrorBody),
    ),
    tag = "onchain"
)]
pub(crate) async fn set_ccip_config(
    State(state): State<AppState>,
    body: Result<Json<CcipConfigInput>, JsonRejection>,
) -> Result<Json<ConfigPushResult>, AppError> {
    let onchain = state.onchain()?;
    let input = extract_json(body)?;
    Ok(Json(onchain.set_ccip_config(&state.ctx(), input).await?))
}

/// POST /v1/onchain/layerzero-config — Push LayerZero adapter configuration.
#[utoipa::path(
    post,
    path = "/v1/onchain/layerzero-config",
    request_body = LayerZeroPushInput,
    responses(
        (status = 200, description = "Configuration transactions submitted"),
        (status = 400, description = "Invalid input or rejected by the execution layer", body = ErrorBody),
        (status = 503, description = "Execution layer not configured", body = ErrorBody),
    ),
    tag = "onchain"
)]
pub(crate) async fn set_layerzero_config(
    State(state): State<AppState>,
    body: Result<Json<LayerZeroPushInput>, JsonRejection>,
) -> Result<Json<ConfigPushResult>, AppError> {
    let onchain = state.onchain()?;
    let input = extract_json(body)?;
    Ok(Json(onchain.set_layerzero_config(&state.ctx(), input).await?))
}

/// POST /v1/onchain/interact — Call an arbitrary contract method.
#[utoipa::path(
    post,
    path = "/v1/onchain/interact",
    request_body = InteractInput,
    responses(
        (status = 200, description = "Call result, with whether the method was a write"),
        (status = 400, description = "Invalid input or rejected by the execution layer", body = ErrorBody),
        (status = 503, description = "Execution layer not configured", body = ErrorBody),
    ),
    tag = "onchain"
)]
pub(crate) async fn interact(
    State(state): State<AppState>,
    body: Result<Json<InteractInput>, JsonRejection>,
) -> Result<Json<InteractResult>, AppError> {
    let onchain = state.onchain()?;
    let input = extract_json(body)?;
    Ok(Json(onchain.generic_interact(&state.ctx(), input).await?))
}
