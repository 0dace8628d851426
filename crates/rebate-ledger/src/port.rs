
use rebate_types::{AccountId, Amount};

use crate::error::TokenError;

/// Custody boundary for the settlement asset
///
/// Both calls are all-or-nothing: on `Err` no funds have moved. Callers
/// treat implementations as untrusted and settle their own bookkeeping
/// before invoking them.
pub trait AssetTransferPort {
    /// Move `amount` from `from` into custody
    fn pull_funds(&mut self, from: &AccountId, amount: Amount) -> Result<(), TokenError>;

    /// Move `amount` out of custody to `to`
    fn push_funds(&mut self, to: &AccountId, amount: Amount) -> Result<(), TokenError>;
}

impl<P: AssetTransferPort + ?Sized> AssetTransferPort for Box<P> {
    fn pull_funds(&mut self, from: &AccountId, amount: Amount) -> Result<(), TokenError> {
        (**self).pull_funds(from, amount)
    }

    fn push_funds(&mut self, to: &AccountId, amount: Amount) -> Result<(), TokenError> {
        (**self).push_funds(to, amount)
    }
}
