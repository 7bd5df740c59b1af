//! Environment-driven configuration for the smart account kit and the vault
//! client.
//!
//! Variables keep their `NEXT_PUBLIC_` names so one `.env.local` serves both
//! the browser build and anything embedding this crate.

use crate::error::ConfigError;

pub const RPC_URL_VAR: &str = "NEXT_PUBLIC_RPC_URL";
pub const NETWORK_PASSPHRASE_VAR: &str = "NEXT_PUBLIC_NETWORK_PASSPHRASE";
pub const ACCOUNT_WASM_HASH_VAR: &str = "NEXT_PUBLIC_ACCOUNT_WASM_HASH";
pub const WEBAUTHN_VERIFIER_VAR: &str = "NEXT_PUBLIC_WEBAUTHN_VERIFIER";
pub const NATIVE_TOKEN_CONTRACT_VAR: &str = "NEXT_PUBLIC_NATIVE_TOKEN_CONTRACT";

pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const TESTNET_RPC_URL: &str = "https://soroban-testnet.stellar.org";

/// Deployed vault on testnet.
pub const TESTNET_VAULT_CONTRACT_ID: &str =
    "CBT26NZLY5EZTA7YXACH6DZD43SNG3LRIB52LDUV7TIH3RWR7KT45EXZ";

/// Relying-party and wallet display name.
pub const APP_NAME: &str = "Passkey Stellar App";

pub const DEFAULT_TIMEOUT_SECS: u32 = 30;

/// Settings handed to the smart account kit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartAccountConfig {
    pub rpc_url: String,
    pub network_passphrase: String,
    pub account_wasm_hash: String,
    pub webauthn_verifier_address: String,
    pub native_token_contract: Option<String>,
    /// WebAuthn relying-party id, normally the page host name.
    pub rp_id: String,
    pub rp_name: String,
    pub timeout_secs: u32,
}

impl SmartAccountConfig {
    pub fn from_env(rp_id: impl Into<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(rp_id, |key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(rp_id: impl Into<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let rpc_url = get(RPC_URL_VAR);
        let network_passphrase = get(NETWORK_PASSPHRASE_VAR);
        let account_wasm_hash = get(ACCOUNT_WASM_HASH_VAR);
        let webauthn_verifier_address = get(WEBAUTHN_VERIFIER_VAR);

        match (rpc_url, network_passphrase, account_wasm_hash, webauthn_verifier_address) {
            (Some(rpc_url), Some(network_passphrase), Some(account_wasm_hash), Some(verifier)) => {
                Ok(Self {
                    rpc_url,
                    network_passphrase,
                    account_wasm_hash,
                    webauthn_verifier_address: verifier,
                    native_token_contract: get(NATIVE_TOKEN_CONTRACT_VAR),
                    rp_id: rp_id.into(),
                    rp_name: APP_NAME.to_string(),
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                })
            }
            (rpc, passphrase, wasm, verifier) => {
                let missing = [
                    (RPC_URL_VAR, rpc.is_none()),
                    (NETWORK_PASSPHRASE_VAR, passphrase.is_none()),
                    (ACCOUNT_WASM_HASH_VAR, wasm.is_none()),
                    (WEBAUTHN_VERIFIER_VAR, verifier.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(ConfigError::Missing(missing))
            }
        }
    }
}

/// Where the vault client sends its calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultNetwork {
    pub rpc_url: String,
    pub network_passphrase: String,
    pub contract_id: String,
}

impl VaultNetwork {
    /// Testnet vault; only the RPC URL can be overridden.
    pub fn testnet_from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            rpc_url: lookup(RPC_URL_VAR)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| TESTNET_RPC_URL.to_string()),
            network_passphrase: TESTNET_PASSPHRASE.to_string(),
            contract_id: TESTNET_VAULT_CONTRACT_ID.to_string(),
        }
    }
}

/// Configured passphrase, or the testnet one.
pub fn network_passphrase_or_default<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(NETWORK_PASSPHRASE_VAR).unwrap_or_else(|| TESTNET_PASSPHRASE.to_string())
}
