//! # Chain Registry API
//!
//! Read-only view of the chain registry and the chain reference resolver.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use xroute_policy::model::Chain;

use crate::error::AppError;
use crate::state::AppState;

/// Result of resolving a chain reference.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedChain {
    /// The reference as supplied.
    pub reference: String,
    /// Canonical chain UUID.
    #[schema(format = Uuid)]
    pub chain_id: String,
}

/// Build the chains router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/chains", get(list_chains))
        .route("/v1/chains/resolve/:reference", get(resolve_chain))
}

/// GET /v1/chains — Every registered chain.
#[utoipa::path(
    get,
    path = "/v1/chains",
    responses(
        (status = 200, description = "Registered chains", body = Vec<Chain>),
    ),
    tag = "chains"
)]
pub(crate) async fn list_chains(State(state): State<AppState>) -> Result<Json<Vec<Chain>>, AppError> {
    let chains = state.resolver.list_chains(&state.ctx()).await?;
    Ok(Json(chains))
}

/// GET /v1/chains/resolve/:reference — Resolve a UUID, CAIP-2 or native chain id.
#[utoipa::path(
    get,
    path = "/v1/chains/resolve/{reference}",
    params(("reference" = String, Path, description = "Chain UUID, CAIP-2 id or native chain id")),
    responses(
        (status = 200, description = "Canonical chain id", body = ResolvedChain),
        (status = 400, description = "Blank reference", body = crate::error::ErrorBody),
        (status = 404, description = "No chain matches", body = crate::error::ErrorBody),
    ),
    tag = "chains"
)]
pub(crate) async fn resolve_chain(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<ResolvedChain>, AppError> {
    let chain_id = state.resolver.resolve(&state.ctx(), &reference).await?;
    Ok(Json(ResolvedChain {
        reference,
        chain_id: chain_id.to_string(),
    }))
}
