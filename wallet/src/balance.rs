//! Token balance lookups for the connected smart account.
//!
//! Native XLM goes through the asset-balance RPC; any other token is read
//! from the token contract's `Balance(address)` data entry. Both come back
//! as raw `i128` units and are only turned into display strings at the edge.

use crate::amount::{to_display_amount, TOKEN_DECIMALS};
use crate::config::{NATIVE_TOKEN_CONTRACT_VAR, NETWORK_PASSPHRASE_VAR, RPC_URL_VAR};
use crate::error::WalletError;
use tracing::{debug, warn};

/// Ledger lookups behind the balance display. `Ok(None)` means the account
/// has no entry for the token.
pub trait BalanceSource {
    fn native_balance(
        &self,
        address: &str,
        network_passphrase: &str,
    ) -> Result<Option<i128>, WalletError>;

    fn contract_balance(
        &self,
        token_contract: &str,
        address: &str,
    ) -> Result<Option<i128>, WalletError>;
}

/// Reassemble an XDR `i128` from its high and low words.
pub fn units_from_i128_parts(hi: i64, lo: u64) -> i128 {
    ((hi as i128) << 64) | lo as i128
}

/// Balance of `address` in `token_contract`, in token units.
///
/// Lookup failures and missing entries read as zero.
pub fn get_token_balance<S: BalanceSource>(
    source: &S,
    native_token_contract: Option<&str>,
    token_contract: &str,
    address: &str,
    network_passphrase: Option<&str>,
) -> i128 {
    let is_native = !token_contract.is_empty()
        && native_token_contract.is_some_and(|native| !native.is_empty() && native == token_contract);

    let lookup = match network_passphrase.filter(|p| !p.is_empty()) {
        Some(passphrase) if is_native => source.native_balance(address, passphrase),
        _ if !token_contract.is_empty() => source.contract_balance(token_contract, address),
        _ => return 0,
    };

    match lookup {
        Ok(balance) => balance.unwrap_or(0),
        Err(err) => {
            warn!(token_contract, address, error = %err, "balance lookup failed");
            0
        }
    }
}

/// Inputs the balance display reads from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BalanceSettings {
    pub rpc_url: Option<String>,
    pub network_passphrase: String,
    pub native_token_contract: Option<String>,
}

impl BalanceSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            rpc_url: lookup(RPC_URL_VAR).filter(|v| !v.is_empty()),
            network_passphrase: lookup(NETWORK_PASSPHRASE_VAR).unwrap_or_default(),
            native_token_contract: lookup(NATIVE_TOKEN_CONTRACT_VAR),
        }
    }
}

/// Balance state for one address and token, refreshed on demand.
#[derive(Debug, Clone)]
pub struct BalanceTracker {
    address: Option<String>,
    token_contract: String,
    balance: Option<i128>,
    is_loading: bool,
    error: Option<String>,
}

impl BalanceTracker {
    pub fn new(address: Option<String>, token_contract: impl Into<String>) -> Self {
        Self {
            address,
            token_contract: token_contract.into(),
            balance: None,
            is_loading: true,
            error: None,
        }
    }

    pub fn balance(&self) -> Option<i128> {
        self.balance
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Balance usable for checks: `None` while loading or unknown.
    pub fn available(&self) -> Option<i128> {
        if self.is_loading {
            None
        } else {
            self.balance
        }
    }

    pub fn display(&self) -> Option<String> {
        self.balance.map(|b| to_display_amount(b, TOKEN_DECIMALS))
    }

    /// Track a different account (e.g. after connect or disconnect).
    pub fn set_address(&mut self, address: Option<String>) {
        self.address = address;
    }

    pub fn refresh<S: BalanceSource>(&mut self, source: &S, settings: &BalanceSettings) {
        let address = match self.address.as_deref() {
            Some(a) if !self.token_contract.is_empty() => a.to_string(),
            _ => {
                self.balance = None;
                self.is_loading = false;
                return;
            }
        };

        if settings.rpc_url.is_none() {
            self.error = Some("RPC URL not configured".to_string());
            self.is_loading = false;
            return;
        }

        self.is_loading = true;
        self.error = None;

        let balance = get_token_balance(
            source,
            settings.native_token_contract.as_deref(),
            &self.token_contract,
            &address,
            Some(settings.network_passphrase.as_str()),
        );
        debug!(address = %address, token = %self.token_contract, balance = %balance, "balance refreshed");

        self.balance = Some(balance);
        self.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TESTNET_PASSPHRASE;
    use crate::testutil::MockBalances;

    const NATIVE: &str = "CNATIVE";
    const USDC: &str = "CUSDC";

    fn settings() -> BalanceSettings {
        BalanceSettings {
            rpc_url: Some("https://rpc.example".into()),
            network_passphrase: TESTNET_PASSPHRASE.into(),
            native_token_contract: Some(NATIVE.into()),
        }
    }

    #[test]
    fn i128_parts() {
        assert_eq!(units_from_i128_parts(0, 125_000_000), 125_000_000);
        assert_eq!(units_from_i128_parts(1, 0), 1_i128 << 64);
        assert_eq!(units_from_i128_parts(-1, u64::MAX), -1);
        assert_eq!(units_from_i128_parts(0, u64::MAX), u64::MAX as i128);
    }

    #[test]
    fn native_token_uses_asset_balance() {
        let mut source = MockBalances::default();
        source.native.insert("CME".into(), 50_0000000);

        let balance = get_token_balance(&source, Some(NATIVE), NATIVE, "CME", Some(TESTNET_PASSPHRASE));
        assert_eq!(balance, 50_0000000);
        assert_eq!(*source.lookups.borrow(), vec!["native(CME)"]);
    }

    #[test]
    fn native_token_without_passphrase_reads_contract_data() {
        let mut source = MockBalances::default();
        source.contract.insert((NATIVE.into(), "CME".into()), 7);

        let balance = get_token_balance(&source, Some(NATIVE), NATIVE, "CME", None);
        assert_eq!(balance, 7);
        assert_eq!(*source.lookups.borrow(), vec!["contract(CNATIVE, CME)"]);
    }

    #[test]
    fn custom_token_reads_contract_data() {
        let mut source = MockBalances::default();
        source.contract.insert((USDC.into(), "CME".into()), 1_000);

        let balance = get_token_balance(&source, Some(NATIVE), USDC, "CME", Some(TESTNET_PASSPHRASE));
        assert_eq!(balance, 1_000);
    }

    #[test]
    fn missing_entry_and_errors_read_as_zero() {
        let source = MockBalances::default();
        assert_eq!(get_token_balance(&source, None, USDC, "CME", None), 0);

        let failing = MockBalances {
            error: Some(WalletError::Rpc("timeout".into())),
            ..MockBalances::default()
        };
        assert_eq!(get_token_balance(&failing, Some(NATIVE), NATIVE, "CME", Some(TESTNET_PASSPHRASE)), 0);
    }

    #[test]
    fn empty_token_is_zero_without_lookup() {
        let source = MockBalances::default();
        assert_eq!(get_token_balance(&source, Some(NATIVE), "", "CME", Some(TESTNET_PASSPHRASE)), 0);
        assert!(source.lookups.borrow().is_empty());
    }

    #[test]
    fn tracker_refresh_loads_balance() {
        let mut source = MockBalances::default();
        source.native.insert("CME".into(), 12_3450000);
        let mut tracker = BalanceTracker::new(Some("CME".into()), NATIVE);
        assert!(tracker.is_loading());
        assert_eq!(tracker.available(), None);

        tracker.refresh(&source, &settings());
        assert!(!tracker.is_loading());
        assert_eq!(tracker.available(), Some(12_3450000));
        assert_eq!(tracker.display().as_deref(), Some("12.345"));
        assert_eq!(tracker.error(), None);
    }

    #[test]
    fn tracker_without_address_has_no_balance() {
        let source = MockBalances::default();
        let mut tracker = BalanceTracker::new(None, NATIVE);
        tracker.refresh(&source, &settings());

        assert!(!tracker.is_loading());
        assert_eq!(tracker.balance(), None);
        assert!(source.lookups.borrow().is_empty());
    }

    #[test]
    fn tracker_reports_missing_rpc_url() {
        let source = MockBalances::default();
        let mut tracker = BalanceTracker::new(Some("CME".into()), NATIVE);
        let settings = BalanceSettings {
            rpc_url: None,
            ..settings()
        };
        tracker.refresh(&source, &settings);

        assert_eq!(tracker.error(), Some("RPC URL not configured"));
        assert!(!tracker.is_loading());
    }

    #[test]
    fn tracker_follows_address_changes() {
        let mut source = MockBalances::default();
        source.native.insert("CA".into(), 1);
        source.native.insert("CB".into(), 2);
        let mut tracker = BalanceTracker::new(Some("CA".into()), NATIVE);
        tracker.refresh(&source, &settings());
        assert_eq!(tracker.balance(), Some(1));

        tracker.set_address(Some("CB".into()));
        tracker.refresh(&source, &settings());
        assert_eq!(tracker.balance(), Some(2));

        tracker.set_address(None);
        tracker.refresh(&source, &settings());
        assert_eq!(tracker.balance(), None);
    }

    #[test]
    fn settings_from_lookup() {
        let settings = BalanceSettings::from_lookup(|key| match key {
            RPC_URL_VAR => Some("https://rpc.example".into()),
            _ => None,
        });
        assert_eq!(settings.rpc_url.as_deref(), Some("https://rpc.example"));
        assert_eq!(settings.network_passphrase, "");
        assert_eq!(settings.native_token_contract, None);
    }
}
