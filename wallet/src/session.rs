//! Passkey smart-account session.
//!
//! Passkey registration, WebAuthn signing and transaction submission live in
//! the smart account kit, reached through [`WalletKit`]. [`SmartAccount`]
//! keeps the connected wallet for the pages built on top of it.

use crate::config::APP_NAME;
use crate::error::WalletError;
use tracing::{debug, info, warn};

/// A connected smart account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletHandle {
    /// Smart-account contract address (`C...`).
    pub contract_id: String,
    pub credential_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedWallet {
    pub contract_id: String,
    pub credential_id: String,
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWalletOptions {
    pub auto_submit: bool,
    /// Fund the new account from friendbot through the native token.
    pub auto_fund: bool,
    pub native_token_contract: Option<String>,
}

/// A contract call that has been built and simulated but not submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledTransaction<T> {
    pub method: &'static str,
    /// Simulated return value.
    pub result: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitResult {
    pub success: bool,
    pub hash: Option<String>,
    pub error: Option<String>,
}

impl SubmitResult {
    pub fn confirmed(hash: impl Into<String>) -> Self {
        Self {
            success: true,
            hash: Some(hash.into()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            hash: None,
            error: Some(error.into()),
        }
    }
}

/// Operations provided by the smart account kit.
pub trait WalletKit {
    fn create_wallet(
        &self,
        app_name: &str,
        user_name: &str,
        options: &CreateWalletOptions,
    ) -> Result<CreatedWallet, WalletError>;

    /// Reconnect a stored session. With `prompt` the user is asked to pick
    /// a passkey; without it `Ok(None)` means there is nothing to restore.
    fn connect_wallet(&self, prompt: bool) -> Result<Option<WalletHandle>, WalletError>;

    fn disconnect(&self) -> Result<(), WalletError>;

    /// Fee-paying source account used when building contract calls.
    fn deployer_public_key(&self) -> String;

    fn sign_and_submit<T>(&self, tx: &AssembledTransaction<T>) -> Result<SubmitResult, WalletError>;

    fn transfer(
        &self,
        token_contract: &str,
        recipient: &str,
        amount: i128,
    ) -> Result<SubmitResult, WalletError>;
}

pub struct SmartAccount<K> {
    kit: K,
    wallet: Option<WalletHandle>,
    is_loading: bool,
    native_token_contract: Option<String>,
}

impl<K: WalletKit> SmartAccount<K> {
    /// Starts in the loading state until [`SmartAccount::restore`] runs.
    pub fn new(kit: K, native_token_contract: Option<String>) -> Self {
        Self {
            kit,
            wallet: None,
            is_loading: true,
            native_token_contract: native_token_contract.filter(|c| !c.is_empty()),
        }
    }

    pub fn kit(&self) -> &K {
        &self.kit
    }

    pub fn wallet(&self) -> Option<&WalletHandle> {
        self.wallet.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Silently reconnect a previous session. A failure is logged and leaves
    /// the account disconnected.
    pub fn restore(&mut self) {
        match self.kit.connect_wallet(false) {
            Ok(wallet) => {
                if let Some(w) = &wallet {
                    info!(contract_id = %w.contract_id, "restored wallet session");
                }
                self.wallet = wallet;
            }
            Err(err) => warn!(error = %err, "failed to restore session"),
        }
        self.is_loading = false;
    }

    /// Register a new passkey wallet and connect to it.
    pub fn create_wallet(&mut self, user_name: &str) -> Result<CreatedWallet, WalletError> {
        let options = CreateWalletOptions {
            auto_submit: true,
            auto_fund: self.native_token_contract.is_some(),
            native_token_contract: self.native_token_contract.clone(),
        };
        debug!(user_name, auto_fund = options.auto_fund, "creating wallet");
        let created = self.kit.create_wallet(APP_NAME, user_name, &options)?;

        self.wallet = self.kit.connect_wallet(false)?;
        info!(contract_id = %created.contract_id, "wallet created");
        Ok(created)
    }

    /// Connect with an explicit passkey prompt.
    pub fn connect(&mut self) -> Result<Option<WalletHandle>, WalletError> {
        let wallet = self.kit.connect_wallet(true)?;
        self.wallet = wallet.clone();
        Ok(wallet)
    }

    pub fn disconnect(&mut self) -> Result<(), WalletError> {
        self.kit.disconnect()?;
        self.wallet = None;
        Ok(())
    }

    /// The kit reported that the session expired.
    pub fn session_expired(&mut self) {
        if let Some(w) = self.wallet.take() {
            info!(contract_id = %w.contract_id, "wallet session expired");
        }
    }
}
