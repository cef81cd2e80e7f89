//! Shared registry fixtures for unit tests.

use uuid::Uuid;
use xroute_core::{BridgeType, Caip2Id, ChainId, NativeChainId};

use crate::memory::MemoryRegistry;
use crate::model::{Bridge, Chain, Token};

pub(crate) const BASE: &str = "8453";
pub(crate) const ARBITRUM: &str = "42161";

pub(crate) fn chain(name: &str, native: &str) -> Chain {
    Chain {
        id: ChainId::new(),
        name: name.into(),
        chain_id: NativeChainId::new(native).unwrap(),
        caip2: Caip2Id::new(format!("eip155:{native}")).unwrap(),
        is_active: true,
    }
}

/// Registry holding Base (8453) and Arbitrum One (42161).
pub(crate) fn registry_with_base_and_arbitrum() -> (MemoryRegistry, Chain, Chain) {
    let registry = MemoryRegistry::new();
    let base = chain("Base", BASE);
    let arb = chain("Arbitrum One", ARBITRUM);
    registry.insert_chain(base.clone());
    registry.insert_chain(arb.clone());
    (registry, base, arb)
}

/// USDC on `chain`, registered in `registry`.
pub(crate) fn usdc_on(registry: &MemoryRegistry, chain: &Chain) -> Token {
    let token = Token {
        id: Uuid::new_v4(),
        chain_id: chain.id,
        symbol: "USDC".into(),
        address: "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913".into(),
        decimals: 6,
    };
    registry.insert_token(token.clone());
    token
}

/// A CCIP bridge, registered in `registry`.
pub(crate) fn ccip_bridge(registry: &MemoryRegistry) -> Bridge {
    let bridge = Bridge {
        id: Uuid::new_v4(),
        name: "Chainlink CCIP".into(),
        bridge_type: BridgeType::Ccip,
        is_active: true,
    };
    registry.insert_bridge(bridge.clone());
    bridge
}
