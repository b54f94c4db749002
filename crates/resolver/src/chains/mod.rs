//! Chain registry: network canonicalization and contract address rules.
//!
//! Every network name entering the system is first mapped through a synonym
//! table to a canonical key (`eth` -> `ethereum`, `matic` -> `polygon`, ...).
//! Address validation then depends on the canonical network's family:
//!
//! - EVM chains: `0x` followed by exactly 40 hex digits
//! - Base58 chains (solana, sui): 32-44 base58 characters
//! - Bittensor: a bare non-negative integer (subnet ID)
//!
//! Addresses carrying the [`NATIVE_PREFIX`] refer to a chain's base asset by
//! registry ID and bypass format validation entirely; their validity is
//! established by the registry lookup succeeding.

use tracing::warn;

/// Prefix marking a native (contract-less) token reference: `native:<registry-id>`.
pub const NATIVE_PREFIX: &str = "native:";

/// A supported network, as shown in the submission UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Network {
    /// Canonical key used everywhere in the system (e.g. "ethereum").
    pub key: &'static str,
    /// Human-readable display name (e.g. "Ethereum").
    pub display: &'static str,
}

/// Networks accepted by the submission UI, in display order.
pub const SUPPORTED_NETWORKS: &[Network] = &[
    Network { key: "ethereum", display: "Ethereum" },
    Network { key: "arbitrum", display: "Arbitrum" },
    Network { key: "optimism", display: "Optimism" },
    Network { key: "base", display: "Base" },
    Network { key: "polygon", display: "Polygon" },
    Network { key: "avalanche", display: "Avalanche" },
    Network { key: "bsc", display: "BNB Chain" },
    Network { key: "fantom", display: "Fantom" },
    Network { key: "solana", display: "Solana" },
    Network { key: "sui", display: "Sui" },
    Network { key: "bittensor", display: "Bittensor" },
    Network { key: "pulsechain", display: "PulseChain" },
    Network { key: "zksync", display: "zkSync" },
    Network { key: "linea", display: "Linea" },
    Network { key: "scroll", display: "Scroll" },
];

/// EVM-family networks: 0x-prefixed hex addresses, lowercased on normalization.
const EVM_NETWORKS: &[&str] = &[
    "ethereum",
    "bsc",
    "base",
    "polygon",
    "avalanche",
    "arbitrum",
    "optimism",
    "fantom",
    "zksync",
    "linea",
    "scroll",
    "pulsechain",
];

/// Base58-family networks: case-sensitive addresses, preserved as-is.
const BASE58_NETWORKS: &[&str] = &["solana", "sui"];

/// Map a user- or upstream-supplied network name to its canonical key.
///
/// Covers common ticker-style synonyms as well as the registry source's
/// platform identifiers (e.g. `binance-smart-chain`). Unknown names are
/// lowercased and passed through.
pub fn canonical_network(network: &str) -> String {
    let lowered = network.to_lowercase();
    match lowered.as_str() {
        "eth" => "ethereum".to_string(),
        "arb" | "arbitrum-one" => "arbitrum".to_string(),
        "op" | "optimistic-ethereum" => "optimism".to_string(),
        "matic" | "polygon-pos" => "polygon".to_string(),
        "avax" => "avalanche".to_string(),
        "binance" | "bnb" | "binance-smart-chain" => "bsc".to_string(),
        "ftm" => "fantom".to_string(),
        "sol" => "solana".to_string(),
        "pulse" => "pulsechain".to_string(),
        "zksync-era" => "zksync".to_string(),
        _ => lowered,
    }
}

/// True if `address` is a `native:<registry-id>` reference.
pub fn is_native_ref(address: &str) -> bool {
    address.starts_with(NATIVE_PREFIX)
}

/// Extract the registry ID from a `native:<registry-id>` reference.
pub fn native_registry_id(address: &str) -> Option<&str> {
    address.strip_prefix(NATIVE_PREFIX).filter(|id| !id.is_empty())
}

fn is_evm_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

fn is_base58_address(address: &str) -> bool {
    (32..=44).contains(&address.len())
        && address.chars().all(|c| {
            c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
        })
}

fn is_subnet_id(address: &str) -> bool {
    !address.is_empty() && address.chars().all(|c| c.is_ascii_digit())
}

/// Validate a contract address against the (canonicalized) network's family.
///
/// Unknown networks fall back to accepting any known family, with a warning;
/// this is a deliberate escape hatch for chains not yet enumerated here.
pub fn is_valid_address(address: &str, network: &str) -> bool {
    if address.is_empty() || network.is_empty() {
        return false;
    }

    let network = canonical_network(network);

    if network == "bittensor" {
        return is_subnet_id(address);
    }

    if BASE58_NETWORKS.contains(&network.as_str()) {
        return is_base58_address(address);
    }

    if EVM_NETWORKS.contains(&network.as_str()) {
        return is_evm_address(address);
    }

    warn!("Unknown network for address validation: {}", network);
    is_evm_address(address) || is_base58_address(address) || is_subnet_id(address)
}

/// Normalize a contract address for uniqueness comparisons.
///
/// EVM addresses are lowercased; Base58 addresses are case-sensitive and
/// numeric subnet IDs have no case, so both are preserved as-is. Native
/// references pass through untouched.
pub fn normalize_address(address: &str, network: &str) -> String {
    if is_native_ref(address) {
        return address.to_string();
    }

    let network = canonical_network(network);

    if network == "bittensor" || BASE58_NETWORKS.contains(&network.as_str()) {
        return address.to_string();
    }

    address.to_lowercase()
}

/// True if the query string is shaped like a contract address on any
/// supported family. Used by the sources to decide whether to activate.
pub fn looks_like_address(query: &str) -> bool {
    is_evm_address(query) || is_base58_address(query)
}
