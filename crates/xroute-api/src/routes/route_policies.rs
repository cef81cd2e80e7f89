//! # Route Policy API
//!
//! CRUD over route policies. Chain references in bodies and filters may be
//! chain UUIDs, CAIP-2 ids or native chain ids; responses always carry the
//! canonical UUIDs.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use xroute_policy::model::{RoutePolicy, RoutePolicyInput, RouteQuery};

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_json, extract_query, parse_id};
use crate::state::AppState;

/// Build the route policy router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/route-policies",
            get(list_route_policies).post(create_route_policy),
        )
        .route(
            "/v1/route-policies/:id",
            get(get_route_policy)
                .put(update_route_policy)
                .delete(delete_route_policy),
        )
}

/// POST /v1/route-policies — Create a route policy.
#[utoipa::path(
    post,
    path = "/v1/route-policies",
    request_body = RoutePolicyInput,
    responses(
        (status = 201, description = "Route policy created", body = RoutePolicy),
        (status = 400, description = "Invalid input", body = ErrorBody),
    ),
    tag = "route_policies"
)]
pub(crate) async fn create_route_policy(
    State(state): State<AppState>,
    body: Result<Json<RoutePolicyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RoutePolicy>), AppError> {
    let input = extract_json(body)?;
    let policy = state.route_policies.create(&state.ctx(), input).await?;
    Ok((StatusCode::CREATED, Json(policy)))
}

/// GET /v1/route-policies — List route policies, optionally by route.
#[utoipa::path(
    get,
    path = "/v1/route-policies",
    params(RouteQuery),
    responses(
        (status = 200, description = "Route policies", body = Vec<RoutePolicy>),
        (status = 400, description = "Filter does not resolve", body = ErrorBody),
    ),
    tag = "route_policies"
)]
pub(crate) async fn list_route_policies(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<Vec<RoutePolicy>>, AppError> {
    let query = extract_query(query)?;
    let policies = state.route_policies.list(&state.ctx(), &query).await?;
    Ok(Json(policies))
}

/// GET /v1/route-policies/:id — Fetch one route policy.
#[utoipa::path(
    get,
    path = "/v1/route-policies/{id}",
    params(("id" = String, Path, description = "Route policy UUID")),
    responses(
        (status = 200, description = "Route policy", body = RoutePolicy),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "route_policies"
)]
pub(crate) async fn get_route_policy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoutePolicy>, AppError> {
    let id = parse_id(&id)?;
    let policy = state.route_policies.get(&state.ctx(), id).await?;
    Ok(Json(policy))
}

/// PUT /v1/route-policies/:id — Replace a route policy.
#[utoipa::path(
    put,
    path = "/v1/route-policies/{id}",
    params(("id" = String, Path, description = "Route policy UUID")),
    request_body = RoutePolicyInput,
    responses(
        (status = 200, description = "Route policy updated", body = RoutePolicy),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "route_policies"
)]
pub(crate) async fn update_route_policy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RoutePolicyInput>, JsonRejection>,
) -> Result<Json<RoutePolicy>, AppError> {
    let id = parse_id(&id)?;
    let input = extract_json(body)?;
    let policy = state.route_policies.update(&state.ctx(), id, input).await?;
    Ok(Json(policy))
}

/// DELETE /v1/route-policies/:id — Delete a route policy.
#[utoipa::path(
    delete,
    path = "/v1/route-policies/{id}",
    params(("id" = String, Path, description = "Route policy UUID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorBody),
    ),
    tag = "route_policies"
)]
pub(crate) async fn delete_route_policy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.route_policies.delete(&state.ctx(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
