
use thiserror::Error;

use crate::account::AccountId;
use crate::epoch::{EpochId, EpochStatus};
use crate::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RebateError {
    #[error("Unauthorized: {caller} does not hold the {role} role")]
    Unauthorized { caller: AccountId, role: Role },

    #[error("Invalid epoch ID: submitted {submitted}, current epoch is {current}")]
    InvalidEpochId { submitted: EpochId, current: EpochId },

    #[error("Wrong rebate data: {recipients} recipients but {amounts} amounts")]
    MalformedAllocationData { recipients: usize, amounts: usize },

    #[error("Epoch {epoch_id} has not ended (status: {status:?})")]
    EpochNotEnded {
        epoch_id: EpochId,
        status: Option<EpochStatus>,
    },

    #[error("Asset transfer failed: {0}")]
    TransferFailed(String),

    #[error("No reward to claim for {0}")]
    NothingToClaim(AccountId),

    #[error("Epoch {epoch_id} is not claimable for {recipient}")]
    ClaimRejected {
        recipient: AccountId,
        epoch_id: EpochId,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount overflow")]
    AmountOverflow,
}

impl RebateError {
    /// Stable kind name, used by the HTTP surface and in logs
    pub fn kind(&self) -> &'static str {
        match self {
            RebateError::Unauthorized { .. } => "Unauthorized",
            RebateError::InvalidEpochId { .. } => "InvalidEpochId",
            RebateError::MalformedAllocationData { .. } => "MalformedAllocationData",
            RebateError::EpochNotEnded { .. } => "EpochNotEnded",
            RebateError::TransferFailed(_) => "TransferFailed",
            RebateError::NothingToClaim(_) => "NothingToClaim",
            RebateError::ClaimRejected { .. } => "ClaimRejected",
            RebateError::InvalidAmount(_) => "InvalidAmount",
            RebateError::AmountOverflow => "AmountOverflow",
        }
    }
}

pub type Result<T> = std::result::Result<T, RebateError>;
