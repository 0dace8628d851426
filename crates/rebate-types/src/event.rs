use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::amount::Amount;
use crate::checksum::Checksum;
use crate::epoch::EpochId;

/// Audit record emitted once per successful mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum AuditEvent {
    RebateUpdated {
        epoch_id: EpochId,
        checksum: Checksum,
    },
    FundsDeposited {
        epoch_id: EpochId,
        amount: Amount,
    },
    TotalRewardClaimed {
        recipient: AccountId,
        amount: Amount,
    },
    OperatorAssigned {
        operator: AccountId,
    },
    PayerAssigned {
        payer: AccountId,
    },
}

impl AuditEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AuditEvent::RebateUpdated { .. } => "RebateUpdated",
            AuditEvent::FundsDeposited { .. } => "FundsDeposited",
            AuditEvent::TotalRewardClaimed { .. } => "TotalRewardClaimed",
            AuditEvent::OperatorAssigned { .. } => "OperatorAssigned",
            AuditEvent::PayerAssigned { .. } => "PayerAssigned",
        }
    }
}
