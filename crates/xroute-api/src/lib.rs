//! # xroute-api — Axum API Service for xroute
//!
//! HTTP surface over the `xroute-policy` services.
//!
//! ## API Surface
//!
//! | Prefix                   | Module                          | Domain                       |
//! |--------------------------|---------------------------------|------------------------------|
//! | `/v1/chains/*`           | [`routes::chains`]              | Chain registry and resolver  |
//! | `/v1/route-policies/*`   | [`routes::route_policies`]      | Route policies               |
//! | `/v1/layerzero-configs/*`| [`routes::layerzero_configs`]   | LayerZero peer configuration |
//! | `/v1/bridge-configs/*`   | [`routes::bridge_configs`]      | Bridge router configuration  |
//! | `/v1/fee-configs/*`      | [`routes::fee_configs`]         | Fee schedules                |
//! | `/v1/onchain/*`          | [`routes::onchain`]             | Execution layer operations   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Generated via utoipa derive macros and served at `/openapi.json`.

pub mod bootstrap;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes and `/metrics` are mounted outside the metrics layer so
/// scrapes do not count as traffic.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = state.config.metrics_enabled;

    let mut api = Router::new()
        .merge(routes::chains::router())
        .merge(routes::route_policies::router())
        .merge(routes::layerzero_configs::router())
        .merge(routes::bridge_configs::router())
        .merge(routes::fee_configs::router())
        .merge(routes::onchain::router())
        .merge(openapi::router());

    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(metrics.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let mut probes = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if metrics_on {
        probes = probes
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(Extension(metrics));
    }

    Router::new().merge(probes.with_state(state)).merge(api)
}

/// GET /metrics — Prometheus text exposition.
async fn prometheus_metrics(Extension(metrics): Extension<ApiMetrics>) -> impl IntoResponse {
    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe. Always 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. Reports the store backend and whether an execution
/// layer is configured. Returns 503 when the database does not answer.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.backend.as_str();
    let executor = state.onchain.is_some();

    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!(error = %e, "readiness: database check failed");
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "store": store,
                    "executor": executor,
                })),
            );
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ready",
            "store": store,
            "executor": executor,
        })),
    )
}
