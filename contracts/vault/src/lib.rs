#![no_std]
//! Token vault: users deposit a single configured token and withdraw it
//! back against a per-user balance.
//!
//! The token is set once through `initialize`. Amounts are `i128` in the
//! token's smallest unit (7 decimals for Stellar asset contracts).

mod events;
pub mod math;
pub mod types;


use events::{
    emit_deposited, emit_vault_initialized, emit_withdrawn, Deposited, VaultInitialized,
    Withdrawn, EVENT_VERSION,
};
use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env};
use types::{Balance, DataKey};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    InsufficientBalance = 1,
    InvalidAmount = 2,
    Overflow = 3,
    TokenNotConfigured = 4,
    AlreadyInitialized = 5,
}

impl VaultError {
    pub const ALL: [VaultError; 5] = [
        VaultError::InsufficientBalance,
        VaultError::InvalidAmount,
        VaultError::Overflow,
        VaultError::TokenNotConfigured,
        VaultError::AlreadyInitialized,
    ];

    /// Variant name as it appears in generated client bindings and in
    /// simulation failure messages.
    pub const fn name(&self) -> &'static str {
        match self {
            VaultError::InsufficientBalance => "InsufficientBalance",
            VaultError::InvalidAmount => "InvalidAmount",
            VaultError::Overflow => "Overflow",
            VaultError::TokenNotConfigured => "TokenNotConfigured",
            VaultError::AlreadyInitialized => "AlreadyInitialized",
        }
    }

    pub fn from_code(code: u32) -> Option<VaultError> {
        Self::ALL.iter().copied().find(|e| *e as u32 == code)
    }
}

#[contract]
pub struct VaultContract;

#[contractimpl]
impl VaultContract {
    /// Set the vault's token contract. Call once.
    ///
    /// There is no admin: whoever calls first picks the token, so deploy and
    /// initialize in the same transaction.
    pub fn initialize(env: Env, token: Address) -> Result<(), VaultError> {
        if env.storage().instance().has(&DataKey::Token) {
            return Err(VaultError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Token, &token);

        emit_vault_initialized(
            &env,
            VaultInitialized {
                version: EVENT_VERSION,
                token,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    /// Move `amount` of the vault token from `user` into the vault.
    ///
    /// The balance is written before the inbound transfer.
    pub fn deposit(env: Env, user: Address, amount: i128) -> Result<(), VaultError> {
        with_lock(&env, || {
            user.require_auth();
            if amount <= 0 {
                return Err(VaultError::InvalidAmount);
            }
            let token = Self::configured_token(&env)?;

            let current = Self::balance_of(env.clone(), user.clone());
            let new_balance = math::checked_add_balance(current, amount)?;
            Self::write_balance(&env, &user, new_balance);

            let token_client = token::Client::new(&env, &token);
            token_client.transfer(&user, &env.current_contract_address(), &amount);

            emit_deposited(
                &env,
                Deposited {
                    version: EVENT_VERSION,
                    user: user.clone(),
                    amount,
                    new_balance,
                },
            );
            Ok(())
        })
    }

    /// Return `amount` of the vault token from the vault to `user`.
    ///
    /// The balance is written before the outbound transfer.
    pub fn withdraw(env: Env, user: Address, amount: i128) -> Result<(), VaultError> {
        with_lock(&env, || {
            user.require_auth();
            if amount <= 0 {
                return Err(VaultError::InvalidAmount);
            }
            let token = Self::configured_token(&env)?;

            let current = Self::balance_of(env.clone(), user.clone());
            if current < amount {
                return Err(VaultError::InsufficientBalance);
            }
            let new_balance = math::checked_sub_balance(current, amount)?;
            Self::write_balance(&env, &user, new_balance);

            let token_client = token::Client::new(&env, &token);
            token_client.transfer(&env.current_contract_address(), &user, &amount);

            emit_withdrawn(
                &env,
                Withdrawn {
                    version: EVENT_VERSION,
                    user: user.clone(),
                    amount,
                    new_balance,
                },
            );
            Ok(())
        })
    }

    /// Vault balance of `user`; zero when the user never deposited.
    pub fn balance_of(env: Env, user: Address) -> i128 {
        env.storage()
            .persistent()
            .get::<_, Balance>(&DataKey::Balance(user))
            .unwrap_or(0)
    }

    pub fn token(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Token)
    }

    fn configured_token(env: &Env) -> Result<Address, VaultError> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(VaultError::TokenNotConfigured)
    }

    fn write_balance(env: &Env, user: &Address, balance: Balance) {
        let key = DataKey::Balance(user.clone());
        if balance == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &balance);
        }
    }
}

/// Run a balance-moving call with the vault locked against reentry.
///
/// The flag is cleared on both `Ok` and `Err`; a panic rolls it back with the
/// rest of the call's state.
fn with_lock<T>(env: &Env, body: impl FnOnce() -> Result<T, VaultError>) -> Result<T, VaultError> {
    if env.storage().instance().has(&DataKey::Locked) {
        panic!("vault call re-entered");
    }
    env.storage().instance().set(&DataKey::Locked, &true);
    let result = body();
    env.storage().instance().remove(&DataKey::Locked);
    result
}
