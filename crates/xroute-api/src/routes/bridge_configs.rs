//! # Bridge Config API
//!
//! CRUD over bridge router configuration. Both chains and `bridgeId` must
//! reference registered entities, and `routerAddress` must be present.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use xroute_policy::model::{BridgeConfig, BridgeConfigInput, RouteQuery};

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_json, extract_query, parse_id};
use crate::state::AppState;

/// Build the bridge config router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/bridge-configs",
            get(list_bridge_configs).post(create_bridge_config),
        )
        .route(
            "/v1/bridge-configs/:id",
            get(get_bridge_config)
                .put(update_bridge_config)
                .delete(delete_bridge_config),
        )
}

/// POST /v1/bridge-configs — Create a bridge config.
#[utoipa::path(
    post,
    path = "/v1/bridge-configs",
    request_body = BridgeConfigInput,
    responses(
        (status = 201, description = "Bridge config created", body = BridgeConfig),
        (status = 400, description = "Invalid input", body = ErrorBody),
    ),
    tag = "bridge_configs"
)]
pub(crate) async fn create_bridge_config(
    State(state): State<AppState>,
    body: Result<Json<BridgeConfigInput>, JsonRejection>,
) -> Result<(StatusCode, Json<BridgeConfig>), AppError> {
    let input = extract_json(body)?;
    let config = state.bridge_configs.create(&state.ctx(), input).await?;
    Ok((StatusCode::CREATED, Json(config)))
}

/// GET /v1/bridge-configs — List bridge configs, optionally by route.
#[utoipa::path(
    get,
    path = "/v1/bridge-configs",
    params(RouteQuery),
    responses(
        (status = 200, description = "Bridge configs", body = Vec<BridgeConfig>),
        (status = 400, description = "Filter does not resolve", body = ErrorBody),
    ),
    tag = "bridge_configs"
)]
pub(crate) async fn list_bridge_configs(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<Vec<BridgeConfig>>, AppError> {
    let query = extract_query(query)?;
    let configs = state.bridge_configs.list(&state.ctx(), &query).await?;
    Ok(Json(configs))
}

/// GET /v1/bridge-configs/:id — Fetch one bridge config.
#[utoipa::path(
    get,
    path = "/v1/bridge-configs/{id}",
    params(("id" = String, Path, description = "Bridge config UUID")),
    responses(
        (status = 200, description = "Bridge config", body = BridgeConfig),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "bridge_configs"
)]
pub(crate) async fn get_bridge_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BridgeConfig>, AppError> {
    let id = parse_id(&id)?;
    let config = state.bridge_configs.get(&state.ctx(), id).await?;
    Ok(Json(config))
}

/// PUT /v1/bridge-configs/:id — Replace a bridge config.
#[utoipa::path(
    put,
    path = "/v1/bridge-configs/{id}",
    params(("id" = String, Path, description = "Bridge config UUID")),
    request_body = BridgeConfigInput,
    responses(
        (status = 200, description = "Bridge config updated", body = BridgeConfig),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "bridge_configs"
)]
pub(crate) async fn update_bridge_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<BridgeConfigInput>, JsonRejection>,
) -> Result<Json<BridgeConfig>, AppError> {
    let id = parse_id(&id)?;
    let input = extract_json(body)?;
    let config = state.bridge_configs.update(&state.ctx(), id, input).await?;
    Ok(Json(config))
}

/// DELETE /v1/bridge-configs/:id — Delete a bridge config.
#[utoipa::path(
    delete,
    path = "/v1/bridge-configs/{id}",
    params(("id" = String, Path, description = "Bridge config UUID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "bridge_configs"
)]
pub(crate) async fn delete_bridge_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.bridge_configs.delete(&state.ctx(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
