use rebate_types::{AccountId, Amount, ClaimStatus, EpochId, EpochStatus, Result};
use serde::{Deserialize, Serialize};

use crate::claims::ClaimAccount;
use crate::epoch::EpochLedger;

/// Awarded, not-yet-claimed epochs of one recipient and their sum
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingClaim {
    pub epochs: Vec<EpochId>,
    pub amount: Amount,
}

/// A recipient's fee position across all epochs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub ongoing: Amount,
    pub claimable: Amount,
    pub claimed: Amount,
}

/// Read-only queries over the epoch ledger and claim accounts
pub struct FeeAggregator<'a> {
    ledger: &'a EpochLedger,
    claims: &'a ClaimAccount,
}

impl<'a> FeeAggregator<'a> {
    pub fn new(ledger: &'a EpochLedger, claims: &'a ClaimAccount) -> Self {
        FeeAggregator { ledger, claims }
    }

    /// Owed in epochs that are not funded yet (`Ongoing` or `Ended`)
    pub fn ongoing_fees(&self, recipient: &AccountId) -> Result<Amount> {
        Amount::checked_sum(
            self.ledger
                .epochs()
                .filter(|epoch| epoch.status.is_unfunded())
                .map(|epoch| self.ledger.allocations().owed(epoch.id, recipient)),
        )
    }

    /// Owed in awarded epochs the recipient has not claimed
    pub fn claimable_fees(&self, recipient: &AccountId) -> Result<Amount> {
        self.pending_claim(recipient).map(|pending| pending.amount)
    }

    pub fn claimed_fees(&self, recipient: &AccountId) -> Amount {
        self.claims.total_claimed(recipient)
    }

    pub fn summary(&self, recipient: &AccountId) -> Result<FeeSummary> {
        Ok(FeeSummary {
            ongoing: self.ongoing_fees(recipient)?,
            claimable: self.claimable_fees(recipient)?,
            claimed: self.claimed_fees(recipient),
        })
    }

    /// Status reflects fundability, not whether an allocation exists
    pub fn claim_status(&self, recipient: &AccountId, epoch_id: EpochId) -> ClaimStatus {
        if self.claims.has_claimed(recipient, epoch_id) {
            ClaimStatus::Claimed
        } else if self.ledger.status(epoch_id) == Some(EpochStatus::Awarded) {
            ClaimStatus::Claimable
        } else {
            ClaimStatus::Pending
        }
    }

    /// Every awarded epoch not yet claimed by `recipient`, with the sum owed
    pub fn pending_claim(&self, recipient: &AccountId) -> Result<PendingClaim> {
        let mut pending = PendingClaim::default();
        for epoch in self.ledger.epochs() {
            if epoch.status != EpochStatus::Awarded || self.claims.has_claimed(recipient, epoch.id) {
                continue;
            }
            let owed = self.ledger.allocations().owed(epoch.id, recipient);
            pending.amount = pending.amount.checked_add(owed)?;
            pending.epochs.push(epoch.id);
        }
        Ok(pending)
    }
}
