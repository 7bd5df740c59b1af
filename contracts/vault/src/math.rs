use crate::{types::Balance, VaultError};

/// Adds `amount` to a stored balance, failing with `Overflow` past `i128::MAX`.
pub fn checked_add_balance(current_balance: Balance, amount: Balance) -> Result<Balance, VaultError> {
    current_balance.checked_add(amount).ok_or(VaultError::Overflow)
}

/// Subtracts `amount` from a stored balance, failing with `Overflow` on wrap.
pub fn checked_sub_balance(current_balance: Balance, amount: Balance) -> Result<Balance, VaultError> {
    current_balance.checked_sub(amount).ok_or(VaultError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_within_range() {
        assert_eq!(checked_add_balance(5_0000000, 2_5000000), Ok(7_5000000));
    }

    #[test]
    fn add_overflow_is_reported() {
        assert_eq!(checked_add_balance(i128::MAX, 1), Err(VaultError::Overflow));
    }

    #[test]
    fn sub_within_range() {
        assert_eq!(checked_sub_balance(10, 10), Ok(0));
    }

    #[test]
    fn sub_underflow_is_reported() {
        assert_eq!(checked_sub_balance(i128::MIN, 1), Err(VaultError::Overflow));
    }
}
