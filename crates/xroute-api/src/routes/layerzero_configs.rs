//! # LayerZero Config API
//!
//! CRUD over stored LayerZero peer configuration. `peerHex` must decode to
//! 32 bytes; `optionsHex` is free-length. Omitting `isActive` on update
//! keeps the stored value.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use xroute_policy::model::{LayerZeroConfig, LayerZeroConfigInput, RouteQuery};

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_json, extract_query, parse_id};
use crate::state::AppState;

/// Build the LayerZero config router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/layerzero-configs",
            get(list_layerzero_configs).post(create_layerzero_config),
        )
        .route(
            "/v1/layerzero-configs/:id",
            get(get_layerzero_config)
                .put(update_layerzero_config)
                .delete(delete_layerzero_config),
        )
}

/// POST /v1/layerzero-configs — Create a LayerZero config.
#[utoipa::path(
    post,
    path = "/v1/layerzero-configs",
    request_body = LayerZeroConfigInput,
    responses(
        (status = 201, description = "LayerZero config created", body = LayerZeroConfig),
        (status = 400, description = "Invalid input", body = ErrorBody),
    ),
    tag = "layerzero_configs"
)]
pub(crate) async fn create_layerzero_config(
    State(state): State<AppState>,
    body: Result<Json<LayerZeroConfigInput>, JsonRejection>,
) -> Result<(StatusCode, Json<LayerZeroConfig>), AppError> {
    let input = extract_json(body)?;
    let config = state.layerzero_configs.create(&state.ctx(), input).await?;
    Ok((StatusCode::CREATED, Json(config)))
}

/// GET /v1/layerzero-configs — List LayerZero configs, optionally by route.
#[utoipa::path(
    get,
    path = "/v1/layerzero-configs",
    params(RouteQuery),
    responses(
        (status = 200, description = "LayerZero configs", body = Vec<LayerZeroConfig>),
        (status = 400, description = "Filter does not resolve", body = ErrorBody),
    ),
    tag = "layerzero_configs"
)]
pub(crate) async fn list_layerzero_configs(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<Vec<LayerZeroConfig>>, AppError> {
    let query = extract_query(query)?;
    let configs = state.layerzero_configs.list(&state.ctx(), &query).await?;
    Ok(Json(configs))
}

/// GET /v1/layerzero-configs/:id — Fetch one LayerZero config.
#[utoipa::path(
    get,
    path = "/v1/layerzero-configs/{id}",
    params(("id" = String, Path, description = "LayerZero config UUID")),
    responses(
        (status = 200, description = "LayerZero config", body = LayerZeroConfig),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "layerzero_configs"
)]
pub(crate) async fn get_layerzero_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LayerZeroConfig>, AppError> {
    let id = parse_id(&id)?;
    let config = state.layerzero_configs.get(&state.ctx(), id).await?;
    Ok(Json(config))
}

/// PUT /v1/layerzero-configs/:id — Replace a LayerZero config.
#[utoipa::path(
    put,
    path = "/v1/layerzero-configs/{id}",
    params(("id" = String, Path, description = "LayerZero config UUID")),
    request_body = LayerZeroConfigInput,
    responses(
        (status = 200, description = "LayerZero config updated", body = LayerZeroConfig),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "layerzero_configs"
)]
pub(crate) async fn update_layerzero_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<LayerZeroConfigInput>, JsonRejection>,
) -> Result<Json<LayerZeroConfig>, AppError> {
    let id = parse_id(&id)?;
    let input = extract_json(body)?;
    let config = state.layerzero_configs.update(&state.ctx(), id, input).await?;
    Ok(Json(config))
}

/// DELETE /v1/layerzero-configs/:id — Delete a LayerZero config.
#[utoipa::path(
    delete,
    path = "/v1/layerzero-configs/{id}",
    params(("id" = String, Path, description = "LayerZero config UUID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "layerzero_configs"
)]
pub(crate) async fn delete_layerzero_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.layerzero_configs.delete(&state.ctx(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
