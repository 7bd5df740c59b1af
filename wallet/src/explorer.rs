use crate::config::network_passphrase_or_default;
use std::fmt;

const EXPLORER_BASE: &str = "https://stellar.expert/explorer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Testnet,
    Mainnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Testnet => f.write_str("testnet"),
            Network::Mainnet => f.write_str("mainnet"),
        }
    }
}

impl Network {
    /// Network named by `NEXT_PUBLIC_NETWORK_PASSPHRASE`, testnet when unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        network_from_passphrase(&network_passphrase_or_default(lookup))
    }
}

/// Any passphrase mentioning "Test" is treated as testnet.
pub fn network_from_passphrase(passphrase: &str) -> Network {
    if passphrase.contains("Test") {
        Network::Testnet
    } else {
        Network::Mainnet
    }
}

/// Stellar Expert page for a transaction.
pub fn tx_url(tx_hash: &str, network: Network) -> String {
    format!("{EXPLORER_BASE}/{network}/tx/{tx_hash}")
}
