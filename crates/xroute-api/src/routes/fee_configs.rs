//! # Fee Config API
//!
//! CRUD over per-token fee schedules.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use xroute_policy::model::{ChainQuery, FeeConfig, FeeConfigInput};

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_json, extract_query, parse_id};
use crate::state::AppState;

/// Build the fee config router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/fee-configs",
            get(list_fee_configs).post(create_fee_config),
        )
        .route(
            "/v1/fee-configs/:id",
            get(get_fee_config)
                .put(update_fee_config)
                .delete(delete_fee_config),
        )
}

/// POST /v1/fee-configs — Create a fee config.
#[utoipa::path(
    post,
    path = "/v1/fee-configs",
    request_body = FeeConfigInput,
    responses(
        (status = 201, description = "Fee config created", body = FeeConfig),
        (status = 400, description = "Invalid input", body = ErrorBody),
    ),
    tag = "fee_configs"
)]
pub(crate) async fn create_fee_config(
    State(state): State<AppState>,
    body: Result<Json<FeeConfigInput>, JsonRejection>,
) -> Result<(StatusCode, Json<FeeConfig>), AppError> {
    let input = extract_json(body)?;
    let config = state.fee_configs.create(&state.ctx(), input).await?;
    Ok((StatusCode::CREATED, Json(config)))
}

/// GET /v1/fee-configs — List fee configs, optionally by chain.
#[utoipa::path(
    get,
    path = "/v1/fee-configs",
    params(ChainQuery),
    responses(
        (status = 200, description = "Fee configs", body = Vec<FeeConfig>),
        (status = 400, description = "Filter does not resolve", body = ErrorBody),
    ),
    tag = "fee_configs"
)]
pub(crate) async fn list_fee_configs(
    State(state): State<AppState>,
    query: Result<Query<ChainQuery>, QueryRejection>,
) -> Result<Json<Vec<FeeConfig>>, AppError> {
    let query = extract_query(query)?;
    let configs = state.fee_configs.list(&state.ctx(), &query).await?;
    Ok(Json(configs))
}

/// GET /v1/fee-configs/:id — Fetch one fee config.
#[utoipa::path(
    get,
    path = "/v1/fee-configs/{id}",
    params(("id" = String, Path, description = "Fee config UUID")),
    responses(
        (status = 200, description = "Fee config", body = FeeConfig),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "fee_configs"
)]
pub(crate) async fn get_fee_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FeeConfig>, AppError> {
    let id = parse_id(&id)?;
    let config = state.fee_configs.get(&state.ctx(), id).await?;
    Ok(Json(config))
}

/// PUT /v1/fee-configs/:id — Replace a fee config.
#[utoipa::path(
    put,
    path = "/v1/fee-configs/{id}",
    params(("id" = String, Path, description = "Fee config UUID")),
    request_body = FeeConfigInput,
    responses(
        (status = 200, description = "Fee config updated", body = FeeConfig),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "fee_configs"
)]
pub(crate) async fn update_fee_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<FeeConfigInput>, JsonRejection>,
) -> Result<Json<FeeConfig>, AppError> {
    let id = parse_id(&id)?;
    let input = extract_json(body)?;
    let config = state.fee_configs.update(&state.ctx(), id, input).await?;
    Ok(Json(config))
}

/// DELETE /v1/fee-configs/:id — Delete a fee config.
#[utoipa::path(
    delete,
    path = "/v1/fee-configs/{id}",
    params(("id" = String, Path, description = "Fee config UUID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "fee_configs"
)]
pub(crate) async fn delete_fee_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.fee_configs.delete(&state.ctx(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
