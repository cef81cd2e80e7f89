//! # Startup Wiring
//!
//! Chooses the store backend and assembles [`AppState`].
//!
//! With a database pool the registry and every record store are Postgres.
//! Without one the server runs in-memory, optionally seeded from the YAML
//! registry named by `XROUTE_REGISTRY`:
//!
//! ```yaml
//! chains:
//!   - name: Base
//!     chainId: "8453"
//!     caip2: eip155:8453
//! tokens:
//!   - chain: eip155:8453        # native id, CAIP-2 or chain UUID
//!     symbol: USDC
//!     address: "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"
//!     decimals: 6
//! bridges:
//!   - name: Chainlink CCIP
//!     bridgeType: 1
//! ```
//!
//! Entries without an `id` get a fresh UUID.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use xroute_core::{BridgeType, Caip2Id, ChainId, NativeChainId};
use xroute_onchain::OnchainExecutor;
use xroute_policy::model::{Bridge, Chain, Token};
use xroute_policy::MemoryRegistry;

use crate::state::{AppConfig, AppState, StoreBackend};

/// Errors during startup wiring.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Registry file not found at the given path.
    #[error("registry file not found: {path}")]
    RegistryNotFound { path: String },

    /// Registry file is not valid YAML or does not match the expected shape.
    #[error("invalid registry file {path}: {source}")]
    InvalidRegistry {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A token references a chain the registry does not contain.
    #[error("token {symbol} references unknown chain {chain}")]
    UnknownTokenChain { symbol: String, chain: String },

    /// IO error while reading the registry.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegistryFile {
    chains: Vec<ChainEntry>,
    tokens: Vec<TokenEntry>,
    bridges: Vec<BridgeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainEntry {
    #[serde(default)]
    id: Option<Uuid>,
    name: String,
    chain_id: NativeChainId,
    caip2: Caip2Id,
    #[serde(default = "active")]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenEntry {
    #[serde(default)]
    id: Option<Uuid>,
    chain: String,
    symbol: String,
    address: String,
    decimals: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BridgeEntry {
    #[serde(default)]
    id: Option<Uuid>,
    name: String,
    bridge_type: BridgeType,
    #[serde(default = "active")]
    is_active: bool,
}

fn active() -> bool {
    true
}

/// Load a YAML registry into a fresh [`MemoryRegistry`].
pub fn load_registry(path: &Path) -> Result<MemoryRegistry, BootstrapError> {
    if !path.exists() {
        return Err(BootstrapError::RegistryNotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let file: RegistryFile =
        serde_yaml::from_str(&content).map_err(|source| BootstrapError::InvalidRegistry {
            path: path.display().to_string(),
            source,
        })?;

    let registry = MemoryRegistry::new();
    let chains: Vec<Chain> = file
        .chains
        .into_iter()
        .map(|c| Chain {
            id: c.id.map(ChainId::from_uuid).unwrap_or_default(),
            name: c.name,
            chain_id: c.chain_id,
            caip2: c.caip2,
            is_active: c.is_active,
        })
        .collect();

    for entry in file.tokens {
        let reference = entry.chain.trim();
        let chain = chains
            .iter()
            .find(|c| {
                c.chain_id.as_str() == reference
                    || c.caip2.as_str() == reference
                    || ChainId::parse(reference) == Some(c.id)
            })
            .ok_or_else(|| BootstrapError::UnknownTokenChain {
                symbol: entry.symbol.clone(),
                chain: entry.chain.clone(),
            })?;
        registry.insert_token(Token {
            id: entry.id.unwrap_or_else(Uuid::new_v4),
            chain_id: chain.id,
            symbol: entry.symbol,
            address: entry.address,
            decimals: entry.decimals,
        });
    }

    for entry in file.bridges {
        registry.insert_bridge(Bridge {
            id: entry.id.unwrap_or_else(Uuid::new_v4),
            name: entry.name,
            bridge_type: entry.bridge_type,
            is_active: entry.is_active,
        });
    }

    let chain_count = chains.len();
    for chain in chains {
        registry.insert_chain(chain);
    }

    tracing::info!(
        path = %path.display(),
        chains = chain_count,
        "registry loaded"
    );
    Ok(registry)
}

/// Assemble application state for the configured backend.
pub fn bootstrap(
    config: AppConfig,
    db_pool: Option<PgPool>,
    executor: Option<Arc<dyn OnchainExecutor>>,
) -> Result<AppState, BootstrapError> {
    if executor.is_none() {
        tracing::warn!("execution layer not configured; onchain endpoints will return 503");
    }

    match db_pool {
        Some(pool) => {
            if let Some(path) = &config.registry_path {
                tracing::warn!(
                    path = %path.display(),
                    "XROUTE_REGISTRY is ignored when DATABASE_URL is set"
                );
            }
            let ports = crate::db::ports(pool.clone());
            tracing::info!(backend = StoreBackend::Postgres.as_str(), "stores ready");
            Ok(AppState::from_ports(
                config,
                ports,
                StoreBackend::Postgres,
                Some(pool),
                executor,
            ))
        }
        None => {
            let registry = match config.registry_path.as_deref() {
                Some(path) => load_registry(path)?,
                None => {
                    tracing::warn!("XROUTE_REGISTRY not set; chain registry is empty");
                    MemoryRegistry::new()
                }
            };
            tracing::info!(backend = StoreBackend::Memory.as_str(), "stores ready");
            Ok(AppState::in_memory(config, registry, executor))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use xroute_policy::ports::{BridgeLookup, ChainLookup, TokenLookup};

    const REGISTRY: &str = r#"
chains:
  - name: Base
    chainId: "8453"
    caip2: eip155:8453
  - id: 6f1c8a2e-3b4d-4e5f-8a9b-0c1d2e3f4a5b
    name: Arbitrum One
    chainId: "42161"
    caip2: eip155:42161
    isActive: false
tokens:
  - id: 0b6f4a1c-2d3e-4f50-9a8b-7c6d5e4f3a2b
    chain: eip155:8453
    symbol: USDC
    address: "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"
    decimals: 6
bridges:
  - id: 1a2b3c4d-5e6f-4a1b-8c2d-3e4f5a6b7c8d
    name: Chainlink CCIP
    bridgeType: 1
"#;

    fn write_registry(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_chains_tokens_and_bridges() {
        let file = write_registry(REGISTRY);
        let registry = load_registry(file.path()).unwrap();

        let base = registry.get_by_caip2("eip155:8453").await.unwrap();
        assert_eq!(base.name, "Base");
        assert!(base.is_active);

        let arb = registry.get_by_chain_id("42161").await.unwrap();
        assert_eq!(
            arb.id.to_string(),
            "6f1c8a2e-3b4d-4e5f-8a9b-0c1d2e3f4a5b"
        );
        assert!(!arb.is_active);

        let usdc = TokenLookup::get_by_id(
            &registry,
            Uuid::parse_str("0b6f4a1c-2d3e-4f50-9a8b-7c6d5e4f3a2b").unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(usdc.chain_id, base.id);
        assert_eq!(usdc.decimals, 6);

        let ccip = BridgeLookup::get_by_id(
            &registry,
            Uuid::parse_str("1a2b3c4d-5e6f-4a1b-8c2d-3e4f5a6b7c8d").unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(ccip.bridge_type, BridgeType::Ccip);
    }

    #[test]
    fn token_on_unknown_chain_is_rejected() {
        let file = write_registry(
            r#"
tokens:
  - chain: "10"
    symbol: USDC
    address: "0x0b2c639c533813f4aa9d7837caf62653d097ff85"
    decimals: 6
"#,
        );
        assert!(matches!(
            load_registry(file.path()),
            Err(BootstrapError::UnknownTokenChain { .. })
        ));
    }

    #[test]
    fn invalid_caip2_is_rejected() {
        let file = write_registry(
            r#"
chains:
  - name: Broken
    chainId: "1"
    caip2: not-a-caip2
"#,
        );
        assert!(matches!(
            load_registry(file.path()),
            Err(BootstrapError::InvalidRegistry { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.yaml");
        assert!(matches!(
            load_registry(&path),
            Err(BootstrapError::RegistryNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn bootstrap_without_pool_is_in_memory() {
        let file = write_registry(REGISTRY);
        let config = AppConfig {
            registry_path: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        let state = bootstrap(config, None, None).unwrap();
        assert_eq!(state.backend, StoreBackend::Memory);
        assert!(state.onchain.is_none());
        let chains = state.resolver.list_chains(&state.ctx()).await.unwrap();
        assert_eq!(chains.len(), 2);
    }
}
