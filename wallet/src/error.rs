use thiserror::Error;
use vault::VaultError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by the wallet kit and the RPC-backed collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// An operation needed a connected wallet and there was none.
    #[error("wallet not connected")]
    NotConnected,

    /// The passkey (WebAuthn) ceremony failed or was cancelled.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Transaction simulation rejected the call.
    #[error("{0}")]
    Simulation(String),

    /// RPC transport or ledger lookup failure.
    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("{0}")]
    Other(String),
}

/// Missing or invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing smart account config; set {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// StrKey address validation failures; `field` names the form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid {field}: expected a 56 character address")]
    Length { field: String },

    #[error("invalid {field}: not base32")]
    Encoding { field: String },

    #[error("invalid {field}: expected an account (G...) or contract (C...) address")]
    Version { field: String },

    #[error("invalid {field}: checksum mismatch")]
    Checksum { field: String },
}

/// Message shown on the contract page for a failed call.
pub fn contract_call_message(err: &WalletError) -> String {
    match err {
        WalletError::NotConnected => "Wallet not connected".to_string(),
        WalletError::Authentication(_) => "Authentication failed".to_string(),
        other => other.to_string(),
    }
}

/// Message shown on the send page for a failed transfer.
pub fn transfer_message(err: &WalletError) -> String {
    match err {
        WalletError::NotConnected => {
            "Wallet not connected. Please connect and try again.".to_string()
        }
        WalletError::Authentication(_) => {
            "Biometric authentication failed. Please try again.".to_string()
        }
        WalletError::Simulation(msg) => format!("Transaction simulation failed: {msg}"),
        WalletError::Other(msg) if msg.is_empty() => "Transfer failed".to_string(),
        other => other.to_string(),
    }
}

/// Find the vault error named in a simulation or RPC failure message.
pub fn vault_error_in(message: &str) -> Option<VaultError> {
    VaultError::ALL
        .iter()
        .copied()
        .find(|e| message.contains(e.name()))
}

/// Reduce a raw failure message to the vault error name when one is present.
pub fn vault_error_message(message: &str) -> String {
    match vault_error_in(message) {
        Some(err) => err.name().to_string(),
        None => message.to_string(),
    }
}
