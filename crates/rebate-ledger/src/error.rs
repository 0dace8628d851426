use rebate_types::{AccountId, Amount};
use thiserror::Error;

/// Failure reported by the settlement asset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Insufficient balance: account={account}, required={required}, available={available}")]
    InsufficientBalance {
        account: AccountId,
        required: Amount,
        available: Amount,
    },

    #[error("Insufficient allowance: owner={owner}, required={required}, approved={approved}")]
    InsufficientAllowance {
        owner: AccountId,
        required: Amount,
        approved: Amount,
    },

    #[error("Transfer disabled: {0}")]
    TransferDisabled(String),

    #[error("Amount overflow")]
    Overflow,
}
