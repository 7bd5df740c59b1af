use soroban_sdk::{contracttype, Address};

/// Vault balance in the token's smallest unit.
pub type Balance = i128;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Balance(Address),
    Token,
    /// Set while a deposit or withdraw is running.
    Locked,
}
