
use rebate_types::{AccountId, Amount};
use std::collections::BTreeMap;

use crate::error::TokenError;
use crate::port::AssetTransferPort;

/// In-memory single-asset token with a custody account
/// Pulls debit an approved allowance, pushes pay out of custody.
/// Suitable for testing and for the demo service
#[derive(Debug, Clone)]
pub struct MemoryToken {
    custody: AccountId,
    balances: BTreeMap<AccountId, Amount>,
    allowances: BTreeMap<AccountId, Amount>,
    pull_enabled: bool,
    push_enabled: bool,
}

impl MemoryToken {
    /// Create an empty token whose custody account is `custody`
    pub fn new(custody: impl Into<AccountId>) -> Self {
        MemoryToken {
            custody: custody.into(),
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            pull_enabled: true,
            push_enabled: true,
        }
    }

    /// Initialize with pre-funded accounts
    pub fn with_balances(custody: impl Into<AccountId>, balances: BTreeMap<AccountId, Amount>) -> Self {
        MemoryToken {
            balances,
            ..Self::new(custody)
        }
    }

    pub fn custody(&self) -> &AccountId {
        &self.custody
    }

    /// Credit new units to an account
    pub fn mint(&mut self, account: &AccountId, amount: Amount) -> Result<(), TokenError> {
        let balance = self.balance(account);
        let updated = balance.checked_add(amount).map_err(|_| TokenError::Overflow)?;
        self.balances.insert(account.clone(), updated);
        Ok(())
    }

    /// Let custody pull up to `amount` from `owner` (replaces any previous approval)
    pub fn approve(&mut self, owner: &AccountId, amount: Amount) {
        self.allowances.insert(owner.clone(), amount);
    }

    pub fn allowance(&self, owner: &AccountId) -> Amount {
        self.allowances.get(owner).copied().unwrap_or(Amount::ZERO)
    }

    pub fn balance(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    /// Units currently held in custody
    pub fn custody_balance(&self) -> Amount {
        self.balance(&self.custody)
    }

    /// Sum of every account balance
    pub fn total_supply(&self) -> Result<Amount, TokenError> {
        Amount::checked_sum(self.balances.values().copied()).map_err(|_| TokenError::Overflow)
    }

    /// Make every subsequent pull fail (mirrors a token whose transferFrom returns false)
    pub fn set_pull_enabled(&mut self, enabled: bool) {
        self.pull_enabled = enabled;
    }

    /// Make every subsequent push fail
    pub fn set_push_enabled(&mut self, enabled: bool) {
        self.push_enabled = enabled;
    }

    pub fn list_accounts(&self) -> Vec<AccountId> {
        self.balances.keys().cloned().collect()
    }

    fn move_units(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), TokenError> {
        let available = self.balance(from);
        let remaining = available
            .checked_sub(amount)
            .map_err(|_| TokenError::InsufficientBalance {
                account: from.clone(),
                required: amount,
                available,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .map_err(|_| TokenError::Overflow)?;

        self.balances.insert(from.clone(), remaining);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}

impl AssetTransferPort for MemoryToken {
    fn pull_funds(&mut self, from: &AccountId, amount: Amount) -> Result<(), TokenError> {
        if !self.pull_enabled {
            return Err(TokenError::TransferDisabled("pull".to_string()));
        }
        if amount.is_zero() {
            return Ok(()); // No-op for zero transfers
        }

        let approved = self.allowance(from);
        let left = approved
            .checked_sub(amount)
            .map_err(|_| TokenError::InsufficientAllowance {
                owner: from.clone(),
                required: amount,
                approved,
            })?;

        let custody = self.custody.clone();
        self.move_units(from, &custody, amount)?;
        self.allowances.insert(from.clone(), left);
        Ok(())
    }

    fn push_funds(&mut self, to: &AccountId, amount: Amount) -> Result<(), TokenError> {
        if !self.push_enabled {
            return Err(TokenError::TransferDisabled("push".to_string()));
        }
        if amount.is_zero() {
            return Ok(());
        }

        let custody = self.custody.clone();
        self.move_units(&custody, to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_requires_allowance() {
        let mut token = MemoryToken::new("custody");
        let payer = AccountId::new("payer");

        token.mint(&payer, Amount::from_units(10)).unwrap();

        let err = token.pull_funds(&payer, Amount::from_units(1)).unwrap_err();
        assert!(matches!(err, TokenError::InsufficientAllowance { .. }));

        token.approve(&payer, Amount::from_units(4));
        token.pull_funds(&payer, Amount::from_units(3)).unwrap();

        assert_eq!(token.balance(&payer), Amount::from_units(7));
        assert_eq!(token.custody_balance(), Amount::from_units(3));
        assert_eq!(token.allowance(&payer), Amount::from_units(1));
    }

    #[test]
    fn test_insufficient_balance() {
        let mut token = MemoryToken::new("custody");
        let payer = AccountId::new("payer");

        token.mint(&payer, Amount::from_units(1)).unwrap();
        token.approve(&payer, Amount::from_units(5));

        let result = token.pull_funds(&payer, Amount::from_units(2));
        assert!(matches!(result, Err(TokenError::InsufficientBalance { .. })));

        // Nothing moved, allowance untouched
        assert_eq!(token.balance(&payer), Amount::from_units(1));
        assert_eq!(token.allowance(&payer), Amount::from_units(5));
    }

    #[test]
    fn test_push_from_custody() {
        let mut token = MemoryToken::new("custody");
        let custody = AccountId::new("custody");
        let trader = AccountId::new("trader");

        token.mint(&custody, Amount::from_units(5)).unwrap();
        token.push_funds(&trader, Amount::from_units(2)).unwrap();

        assert_eq!(token.balance(&trader), Amount::from_units(2));
        assert_eq!(token.custody_balance(), Amount::from_units(3));
        assert!(token.push_funds(&trader, Amount::from_units(4)).is_err());
    }

    #[test]
    fn test_disabled_transfers() {
        let mut token = MemoryToken::new("custody");
        let payer = AccountId::new("payer");

        token.set_pull_enabled(false);
        // Disabled even for zero amounts
        assert_eq!(
            token.pull_funds(&payer, Amount::ZERO),
            Err(TokenError::TransferDisabled("pull".to_string()))
        );

        token.set_push_enabled(false);
        assert!(token.push_funds(&payer, Amount::ZERO).is_err());
    }
}
