//! Front-end glue for a passkey smart account and the vault contract.
//!
//! Passkey handling, transaction assembly, signing and RPC access belong to
//! the smart account kit and the Stellar SDK; this crate reaches them through
//! the [`session::WalletKit`], [`vault::VaultCalls`] and
//! [`balance::BalanceSource`] traits. What lives here is the logic around
//! those calls: amount conversion, form validation, error messages,
//! configuration and explorer links.

pub mod address;
pub mod amount;
pub mod balance;
pub mod config;
pub mod error;
pub mod explorer;
pub mod session;
pub mod transfer;
pub mod vault;

#[cfg(test)]
mod testutil;

pub use amount::{to_display_amount, to_unit_amount, MAX_PRECISION, TOKEN_DECIMALS};
pub use error::{ConfigError, WalletError};
pub use session::{SmartAccount, WalletKit};
pub use vault::{VaultCalls, VaultPage};
