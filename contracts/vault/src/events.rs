use soroban_sdk::{contracttype, symbol_short, Address, Env};

pub const EVENT_VERSION: u32 = 1;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultInitialized {
    pub version: u32,
    pub token: Address,
    pub timestamp: u64,
}

pub fn emit_vault_initialized(env: &Env, event: VaultInitialized) {
    let topics = (symbol_short!("init"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposited {
    pub version: u32,
    pub user: Address,
    pub amount: i128,
    pub new_balance: i128,
}

pub fn emit_deposited(env: &Env, event: Deposited) {
    let topics = (symbol_short!("deposited"), event.user.clone());
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub version: u32,
    pub user: Address,
    pub amount: i128,
    pub new_balance: i128,
}

pub fn emit_withdrawn(env: &Env, event: Withdrawn) {
    let topics = (symbol_short!("withdrawn"), event.user.clone());
    env.events().publish(topics, event);
}
