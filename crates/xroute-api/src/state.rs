//! # Application State
//!
//! Shared state for the Axum application: the policy services wired to a
//! store backend, the optional execution layer, the per-request deadline,
//! and the shutdown token every request context derives from.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use xroute_onchain::OnchainExecutor;
use xroute_policy::model::{BridgeConfig, FeeConfig, LayerZeroConfig, RoutePolicy};
use xroute_policy::ports::{
    BridgeConfigStore, BridgeLookup, ChainLookup, FeeConfigStore, LayerZeroConfigStore,
    RoutePolicyStore, TokenLookup,
};
use xroute_policy::{
    BridgeConfigService, ChainResolver, FeeConfigService, LayerZeroConfigService,
    MemoryRegistry, MemoryStore, OnchainAdapterService, RequestContext, RoutePolicyService,
};

use crate::error::AppError;

// -- Configuration ------------------------------------------------------------

/// Invalid environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Deadline applied to every request context.
    pub request_timeout: Duration,
    /// Serve `/metrics` and record request metrics.
    pub metrics_enabled: bool,
    /// YAML registry seeded into in-memory mode.
    pub registry_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            request_timeout: Duration::from_secs(30),
            metrics_enabled: true,
            registry_path: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        _ => Ok(None),
    }
}

impl AppConfig {
    /// Read `PORT`, `XROUTE_REQUEST_TIMEOUT_SECS`, `XROUTE_METRICS_ENABLED`
    /// and `XROUTE_REGISTRY`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let timeout_secs: Option<u64> = parse_var("XROUTE_REQUEST_TIMEOUT_SECS")?;
        if timeout_secs == Some(0) {
            return Err(ConfigError::InvalidVar {
                name: "XROUTE_REQUEST_TIMEOUT_SECS",
                value: "0".into(),
            });
        }

        Ok(Self {
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            request_timeout: timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            metrics_enabled: parse_var("XROUTE_METRICS_ENABLED")?
                .unwrap_or(defaults.metrics_enabled),
            registry_path: std::env::var_os("XROUTE_REGISTRY").map(PathBuf::from),
        })
    }
}

// -- Ports --------------------------------------------------------------------

/// Which implementation backs the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

/// Registry lookups and record stores the services are built from.
#[derive(Clone)]
pub struct Ports {
    pub chains: Arc<dyn ChainLookup>,
    pub tokens: Arc<dyn TokenLookup>,
    pub bridges: Arc<dyn BridgeLookup>,
    pub route_policies: Arc<dyn RoutePolicyStore>,
    pub layerzero_configs: Arc<dyn LayerZeroConfigStore>,
    pub bridge_configs: Arc<dyn BridgeConfigStore>,
    pub fee_configs: Arc<dyn FeeConfigStore>,
}

impl Ports {
    /// In-memory stores over `registry`.
    pub fn in_memory(registry: MemoryRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            chains: registry.clone(),
            tokens: registry.clone(),
            bridges: registry,
            route_policies: Arc::new(MemoryStore::<RoutePolicy>::new()),
            layerzero_configs: Arc::new(MemoryStore::<LayerZeroConfig>::new()),
            bridge_configs: Arc::new(MemoryStore::<BridgeConfig>::new()),
            fee_configs: Arc::new(MemoryStore::<FeeConfig>::new()),
        }
    }
}

// -- AppState -----------------------------------------------------------------

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub resolver: ChainResolver,
    pub route_policies: RoutePolicyService,
    pub layerzero_configs: LayerZeroConfigService,
    pub bridge_configs: BridgeConfigService,
    pub fee_configs: FeeConfigService,
    /// `None` when no execution layer is configured; onchain routes return 503.
    pub onchain: Option<OnchainAdapterService>,
    pub backend: StoreBackend,
    pub db_pool: Option<PgPool>,
    /// Cancelled on shutdown. Every request context is a child of it.
    pub shutdown: CancellationToken,
    pub config: AppConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.backend)
            .field("onchain", &self.onchain.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl AppState {
    /// In-memory state with an empty registry and no execution layer.
    pub fn new() -> Self {
        Self::in_memory(AppConfig::default(), MemoryRegistry::new(), None)
    }

    /// In-memory state over `registry`.
    pub fn in_memory(
        config: AppConfig,
        registry: MemoryRegistry,
        executor: Option<Arc<dyn OnchainExecutor>>,
    ) -> Self {
        Self::from_ports(
            config,
            Ports::in_memory(registry),
            StoreBackend::Memory,
            None,
            executor,
        )
    }

    /// Wire the services over an arbitrary set of ports.
    pub fn from_ports(
        config: AppConfig,
        ports: Ports,
        backend: StoreBackend,
        db_pool: Option<PgPool>,
        executor: Option<Arc<dyn OnchainExecutor>>,
    ) -> Self {
        let resolver = ChainResolver::new(ports.chains);
        Self {
            route_policies: RoutePolicyService::new(resolver.clone(), ports.route_policies),
            layerzero_configs: LayerZeroConfigService::new(
                resolver.clone(),
                ports.layerzero_configs,
            ),
            bridge_configs: BridgeConfigService::new(
                resolver.clone(),
                ports.bridges,
                ports.bridge_configs,
            ),
            fee_configs: FeeConfigService::new(resolver.clone(), ports.tokens, ports.fee_configs),
            resolver,
            onchain: executor.map(OnchainAdapterService::new),
            backend,
            db_pool,
            shutdown: CancellationToken::new(),
            config,
        }
    }

    /// Context for one request: the configured deadline, cancelled on shutdown.
    pub fn ctx(&self) -> RequestContext {
        RequestContext::with_timeout(self.config.request_timeout)
            .with_cancellation(self.shutdown.child_token())
    }

    /// The onchain adapter service, or 503 when no execution layer is configured.
    pub fn onchain(&self) -> Result<&OnchainAdapterService, AppError> {
        self.onchain.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable("execution layer is not configured".into())
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
