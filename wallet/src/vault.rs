//! Vault contract page: one form per contract method.
//!
//! The typed contract client (generated from the vault's interface) is
//! reached through [`VaultCalls`]; state-changing calls are signed and sent
//! by the wallet kit.

use crate::amount::{to_display_amount, to_unit_amount, TOKEN_DECIMALS};
use crate::error::{contract_call_message, vault_error_message, WalletError};
use crate::explorer::{tx_url, Network};
use crate::session::{AssembledTransaction, SmartAccount, SubmitResult, WalletKit};
use tracing::{debug, info, warn};

/// Builds and simulates vault calls. `source` is the fee-paying account.
pub trait VaultCalls {
    fn initialize(&self, token: &str, source: &str) -> Result<AssembledTransaction<()>, WalletError>;

    fn deposit(
        &self,
        user: &str,
        amount: i128,
        source: &str,
    ) -> Result<AssembledTransaction<()>, WalletError>;

    fn withdraw(
        &self,
        user: &str,
        amount: i128,
        source: &str,
    ) -> Result<AssembledTransaction<()>, WalletError>;

    /// Read-only; the balance is the simulated result.
    fn balance_of(&self, user: &str) -> Result<AssembledTransaction<i128>, WalletError>;
}

/// What a form shows after submitting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    pub value: Option<String>,
    pub error: Option<String>,
    pub tx_hash: Option<String>,
}

impl ActionOutcome {
    fn value(value: String) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    fn submitted(hash: String) -> Self {
        Self {
            tx_hash: Some(hash),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && (self.value.is_some() || self.tx_hash.is_some())
    }

    pub fn explorer_url(&self, network: Network) -> Option<String> {
        self.tx_hash.as_deref().map(|hash| tx_url(hash, network))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Movement {
    Deposit,
    Withdraw,
}

pub struct VaultPage<'a, C, K> {
    calls: &'a C,
    account: &'a SmartAccount<K>,
}

impl<'a, C: VaultCalls, K: WalletKit> VaultPage<'a, C, K> {
    pub fn new(calls: &'a C, account: &'a SmartAccount<K>) -> Self {
        Self { calls, account }
    }

    /// One-time token setup.
    pub fn initialize(&self, token_input: &str) -> ActionOutcome {
        if self.account.wallet().is_none() {
            return ActionOutcome::failed("Connect a wallet first");
        }
        let token = token_input.trim();
        if token.is_empty() {
            return ActionOutcome::failed("Enter token contract address");
        }
        self.submit(|source| self.calls.initialize(token, source))
    }

    pub fn deposit(&self, user_input: &str, amount_input: &str) -> ActionOutcome {
        self.move_funds(Movement::Deposit, user_input, amount_input)
    }

    pub fn withdraw(&self, user_input: &str, amount_input: &str) -> ActionOutcome {
        self.move_funds(Movement::Withdraw, user_input, amount_input)
    }

    /// Query needs no wallet. Contract failures are reduced to the vault
    /// error name when it can be recognized.
    pub fn balance_of(&self, user_input: &str) -> ActionOutcome {
        let user = user_input.trim();
        if user.is_empty() {
            return ActionOutcome::failed("Enter user address (G... or C...)");
        }
        match self.calls.balance_of(user) {
            Ok(tx) => ActionOutcome::value(to_display_amount(tx.result, TOKEN_DECIMALS)),
            Err(err) => {
                debug!(user, error = %err, "balance_of simulation failed");
                ActionOutcome::failed(vault_error_message(&err.to_string()))
            }
        }
    }

    fn move_funds(&self, movement: Movement, user_input: &str, amount_input: &str) -> ActionOutcome {
        let Some(wallet) = self.account.wallet() else {
            return ActionOutcome::failed("Connect a wallet first");
        };
        let user = match user_input.trim() {
            "" => wallet.contract_id.as_str(),
            user => user,
        };
        let amount = to_unit_amount(amount_input, TOKEN_DECIMALS);
        if amount <= 0 {
            return ActionOutcome::failed("Enter a valid amount");
        }

        self.submit(|source| match movement {
            Movement::Deposit => self.calls.deposit(user, amount, source),
            Movement::Withdraw => self.calls.withdraw(user, amount, source),
        })
    }

    fn submit<T, F>(&self, build: F) -> ActionOutcome
    where
        F: FnOnce(&str) -> Result<AssembledTransaction<T>, WalletError>,
    {
        let kit = self.account.kit();
        let source = kit.deployer_public_key();

        match build(&source).and_then(|tx| {
            debug!(method = tx.method, "submitting vault call");
            kit.sign_and_submit(&tx)
        }) {
            Ok(SubmitResult {
                success: true,
                hash: Some(hash),
                ..
            }) => {
                info!(tx_hash = %hash, "vault call submitted");
                ActionOutcome::submitted(hash)
            }
            Ok(sent) => {
                let error = sent.error.unwrap_or_else(|| "Transaction failed".to_string());
                warn!(error = %error, "vault call rejected");
                ActionOutcome::failed(error)
            }
            Err(err) => {
                warn!(error = %err, "vault call failed");
                ActionOutcome::failed(contract_call_message(&err))
            }
        }
    }
}
