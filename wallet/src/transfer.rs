//! Send page: token transfer from the connected smart account.

use crate::address::validate_address;
use crate::amount::{to_unit_amount, TOKEN_DECIMALS};
use crate::error::{transfer_message, AddressError};
use crate::explorer::{tx_url, Network};
use crate::session::{SmartAccount, SubmitResult, WalletKit};
use thiserror::Error;
use tracing::{info, warn};

/// Form contents as typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest<'a> {
    pub token_contract: &'a str,
    pub recipient: &'a str,
    pub amount: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub hash: String,
    pub explorer_url: String,
}

/// Each variant displays as the message shown on the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Please connect a wallet first")]
    NotConnected,

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Please enter a recipient address")]
    MissingRecipient,

    #[error("Please enter a token contract address")]
    MissingToken,

    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Cannot transfer to yourself")]
    SelfTransfer,

    #[error("{0}")]
    Failed(String),
}

pub struct TransferForm<'a, K> {
    account: &'a SmartAccount<K>,
    network: Network,
}

impl<'a, K: WalletKit> TransferForm<'a, K> {
    pub fn new(account: &'a SmartAccount<K>, network: Network) -> Self {
        Self { account, network }
    }

    /// Explorer links follow the configured network passphrase.
    pub fn from_env(account: &'a SmartAccount<K>) -> Self {
        Self::new(account, Network::from_env())
    }

    /// Validate the form and send the transfer.
    ///
    /// `available` is the sender's balance in token units when known; the
    /// balance check is skipped without it.
    pub fn submit(
        &self,
        request: &TransferRequest<'_>,
        available: Option<i128>,
    ) -> Result<TransferReceipt, TransferError> {
        let wallet = self.account.wallet().ok_or(TransferError::NotConnected)?;

        let amount = to_unit_amount(request.amount, TOKEN_DECIMALS);
        if amount <= 0 {
            return Err(TransferError::InvalidAmount);
        }

        let recipient = request.recipient.trim();
        if recipient.is_empty() {
            return Err(TransferError::MissingRecipient);
        }
        let token_contract = request.token_contract.trim();
        if token_contract.is_empty() {
            return Err(TransferError::MissingToken);
        }

        validate_address(recipient, "recipient")?;
        validate_address(token_contract, "tokenContract")?;

        if available.is_some_and(|balance| amount > balance) {
            return Err(TransferError::InsufficientBalance);
        }
        if recipient == wallet.contract_id {
            return Err(TransferError::SelfTransfer);
        }

        let sent = self
            .account
            .kit()
            .transfer(token_contract, recipient, amount)
            .map_err(|err| {
                warn!(error = %err, "transfer failed");
                TransferError::Failed(transfer_message(&err))
            })?;

        match sent {
            SubmitResult {
                success: true,
                hash: Some(hash),
                ..
            } => {
                info!(tx_hash = %hash, recipient, amount = %amount, "transfer submitted");
                Ok(TransferReceipt {
                    explorer_url: tx_url(&hash, self.network),
                    hash,
                })
            }
            SubmitResult { error, .. } => Err(TransferError::Failed(
                error.unwrap_or_else(|| "Transfer failed".to_string()),
            )),
        }
    }
}
