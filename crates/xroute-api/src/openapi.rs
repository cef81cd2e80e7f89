//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI document
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "xroute API",
        version = "0.3.2",
        description = "Chain identity resolution, route policies, per-protocol bridge configuration and onchain adapter operations for cross-chain payment routes.",
        license(name = "BUSL-1.1")
    ),
    paths(
        // Chains
        crate::routes::chains::list_chains,
        crate::routes::chains::resolve_chain,
        // Route policies
        crate::routes::route_policies::create_route_policy,
        crate::routes::route_policies::list_route_policies,
        crate::routes::route_policies::get_route_policy,
        crate::routes::route_policies::update_route_policy,
        crate::routes::route_policies::delete_route_policy,
        // LayerZero configs
        crate::routes::layerzero_configs::create_layerzero_config,
        crate::routes::layerzero_configs::list_layerzero_configs,
        crate::routes::layerzero_configs::get_layerzero_config,
        crate::routes::layerzero_configs::update_layerzero_config,
        crate::routes::layerzero_configs::delete_layerzero_config,
        // Bridge configs
        crate::routes::bridge_configs::create_bridge_config,
        crate::routes::bridge_configs::list_bridge_configs,
        crate::routes::bridge_configs::get_bridge_config,
        crate::routes::bridge_configs::update_bridge_config,
        crate::routes::bridge_configs::delete_bridge_config,
        // Fee configs
        crate::routes::fee_configs::create_fee_config,
        crate::routes::fee_configs::list_fee_configs,
        crate::routes::fee_configs::get_fee_config,
        crate::routes::fee_configs::update_fee_config,
        crate::routes::fee_configs::delete_fee_config,
        // Onchain
        crate::routes::onchain::get_status,
        crate::routes::onchain::register_adapter,
        crate::routes::onchain::set_default_bridge,
        crate::routes::onchain::set_hyperbridge_config,
        crate::routes::onchain::set_ccip_config,
        crate::routes::onchain::set_layerzero_config,
        crate::routes::onchain::interact,
    ),
    components(schemas(
        xroute_policy::model::Chain,
        xroute_policy::model::RoutePolicy,
        xroute_policy::model::RoutePolicyInput,
        xroute_policy::model::LayerZeroConfig,
        xroute_policy::model::LayerZeroConfigInput,
        xroute_policy::model::BridgeConfig,
        xroute_policy::model::BridgeConfigInput,
        xroute_policy::model::FeeConfig,
        xroute_policy::model::FeeConfigInput,
        xroute_policy::onchain::RegisterAdapterInput,
        xroute_policy::onchain::SetDefaultBridgeInput,
        xroute_policy::onchain::HyperbridgeConfigInput,
        xroute_policy::onchain::CcipConfigInput,
        xroute_policy::onchain::LayerZeroPushInput,
        xroute_policy::onchain::InteractInput,
        crate::routes::chains::ResolvedChain,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "chains", description = "Chain registry and reference resolution"),
        (name = "route_policies", description = "Default bridge and fallback policy per route"),
        (name = "layerzero_configs", description = "Stored LayerZero peer configuration"),
        (name = "bridge_configs", description = "Stored bridge router configuration"),
        (name = "fee_configs", description = "Per-token fee schedules"),
        (name = "onchain", description = "Adapter operations forwarded to the execution layer"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
