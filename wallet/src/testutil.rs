//! In-memory doubles for the wallet kit, the vault client and the balance
//! lookups.

use crate::balance::BalanceSource;
use crate::error::WalletError;
use crate::session::{
    AssembledTransaction, CreateWalletOptions, CreatedWallet, SubmitResult, WalletHandle,
    WalletKit,
};
use crate::vault::VaultCalls;
use std::cell::RefCell;
use std::collections::HashMap;

pub const DEPLOYER: &str = "GDEPLOYER";

pub fn handle(contract_id: &str) -> WalletHandle {
    WalletHandle {
        contract_id: contract_id.to_string(),
        credential_id: format!("cred-{contract_id}"),
    }
}

#[derive(Default)]
pub struct MockKit {
    pub session: RefCell<Option<WalletHandle>>,
    pub prompt_wallet: Option<WalletHandle>,
    pub connect_error: Option<WalletError>,
    /// Outcome of the next `sign_and_submit` or `transfer`; success by default.
    pub submit_outcome: Option<Result<SubmitResult, WalletError>>,
    pub created_with: RefCell<Option<CreateWalletOptions>>,
    pub submitted: RefCell<Vec<&'static str>>,
    pub transfers: RefCell<Vec<(String, String, i128)>>,
    pub log: RefCell<Vec<String>>,
}

impl MockKit {
    pub fn with_session(wallet: WalletHandle) -> Self {
        Self {
            session: RefCell::new(Some(wallet)),
            ..Self::default()
        }
    }

    pub fn failing_with(err: WalletError) -> Self {
        Self {
            submit_outcome: Some(Err(err)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn outcome(&self, hash: &str) -> Result<SubmitResult, WalletError> {
        self.submit_outcome
            .clone()
            .unwrap_or_else(|| Ok(SubmitResult::confirmed(hash)))
    }
}

impl WalletKit for MockKit {
    fn create_wallet(
        &self,
        app_name: &str,
        user_name: &str,
        options: &CreateWalletOptions,
    ) -> Result<CreatedWallet, WalletError> {
        self.log
            .borrow_mut()
            .push(format!("create({app_name}, {user_name})"));
        *self.created_with.borrow_mut() = Some(options.clone());
        *self.session.borrow_mut() = Some(handle("CNEW"));
        Ok(CreatedWallet {
            contract_id: "CNEW".to_string(),
            credential_id: "cred-CNEW".to_string(),
            tx_hash: Some("deployhash".to_string()),
        })
    }

    fn connect_wallet(&self, prompt: bool) -> Result<Option<WalletHandle>, WalletError> {
        self.log
            .borrow_mut()
            .push(format!("connect(prompt={prompt})"));
        if let Some(err) = &self.connect_error {
            return Err(err.clone());
        }
        if prompt {
            Ok(self.prompt_wallet.clone())
        } else {
            Ok(self.session.borrow().clone())
        }
    }

    fn disconnect(&self) -> Result<(), WalletError> {
        self.log.borrow_mut().push("disconnect".to_string());
        *self.session.borrow_mut() = None;
        Ok(())
    }

    fn deployer_public_key(&self) -> String {
        DEPLOYER.to_string()
    }

    fn sign_and_submit<T>(&self, tx: &AssembledTransaction<T>) -> Result<SubmitResult, WalletError> {
        self.submitted.borrow_mut().push(tx.method);
        self.outcome(&format!("hash-{}", tx.method))
    }

    fn transfer(
        &self,
        token_contract: &str,
        recipient: &str,
        amount: i128,
    ) -> Result<SubmitResult, WalletError> {
        self.transfers.borrow_mut().push((
            token_contract.to_string(),
            recipient.to_string(),
            amount,
        ));
        self.outcome("hash-transfer")
    }
}

/// Vault client double: records built calls and simulates `balance_of`
/// from a fixed table.
#[derive(Default)]
pub struct MockVault {
    pub balances: HashMap<String, i128>,
    pub simulation_error: Option<WalletError>,
    pub built: RefCell<Vec<String>>,
}

impl MockVault {
    fn build<T>(&self, method: &'static str, detail: String, result: T) -> Result<AssembledTransaction<T>, WalletError> {
        if let Some(err) = &self.simulation_error {
            return Err(err.clone());
        }
        self.built.borrow_mut().push(detail);
        Ok(AssembledTransaction {
            method,
            result,
        })
    }
}

impl VaultCalls for MockVault {
    fn initialize(&self, token: &str, source: &str) -> Result<AssembledTransaction<()>, WalletError> {
        self.build("initialize", format!("initialize({token}) from {source}"), ())
    }

    fn deposit(
        &self,
        user: &str,
        amount: i128,
        source: &str,
    ) -> Result<AssembledTransaction<()>, WalletError> {
        self.build("deposit", format!("deposit({user}, {amount}) from {source}"), ())
    }

    fn withdraw(
        &self,
        user: &str,
        amount: i128,
        source: &str,
    ) -> Result<AssembledTransaction<()>, WalletError> {
        self.build("withdraw", format!("withdraw({user}, {amount}) from {source}"), ())
    }

    fn balance_of(&self, user: &str) -> Result<AssembledTransaction<i128>, WalletError> {
        let balance = self.balances.get(user).copied().unwrap_or(0);
        self.build("balance_of", format!("balance_of({user})"), balance)
    }
}

#[derive(Default)]
pub struct MockBalances {
    pub native: HashMap<String, i128>,
    pub contract: HashMap<(String, String), i128>,
    pub error: Option<WalletError>,
    pub lookups: RefCell<Vec<String>>,
}

impl BalanceSource for MockBalances {
    fn native_balance(
        &self,
        address: &str,
        _network_passphrase: &str,
    ) -> Result<Option<i128>, WalletError> {
        self.lookups.borrow_mut().push(format!("native({address})"));
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.native.get(address).copied()),
        }
    }

    fn contract_balance(
        &self,
        token_contract: &str,
        address: &str,
    ) -> Result<Option<i128>, WalletError> {
        self.lookups
            .borrow_mut()
            .push(format!("contract({token_contract}, {address})"));
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self
                .contract
                .get(&(token_contract.to_string(), address.to_string()))
                .copied()),
        }
    }
}
