use rebate_types::{AccountId, Amount, EpochId, EpochStatus, RebateError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::epoch::EpochLedger;

/// A recipient's claim history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub total_claimed: Amount,
    pub claimed_epochs: BTreeSet<EpochId>,
}

/// Sole writer of claim flags and cumulative totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAccount {
    records: BTreeMap<AccountId, ClaimRecord>,
}

impl ClaimAccount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, recipient: &AccountId) -> Option<&ClaimRecord> {
        self.records.get(recipient)
    }

    pub fn total_claimed(&self, recipient: &AccountId) -> Amount {
        self.record(recipient)
            .map(|record| record.total_claimed)
            .unwrap_or(Amount::ZERO)
    }

    pub fn has_claimed(&self, recipient: &AccountId, epoch_id: EpochId) -> bool {
        self.record(recipient)
            .map(|record| record.claimed_epochs.contains(&epoch_id))
            .unwrap_or(false)
    }

    /// Flag `epochs` as claimed by `recipient` and add `amount` to its total
    ///
    /// Every epoch must be awarded in `ledger` and not yet claimed by the
    /// recipient; otherwise nothing is written. Returns the prior record so
    /// the caller can undo the settlement.
    pub(crate) fn settle(
        &mut self,
        ledger: &EpochLedger,
        recipient: &AccountId,
        epochs: &[EpochId],
        amount: Amount,
    ) -> Result<Option<ClaimRecord>> {
        for &epoch_id in epochs {
            if ledger.status(epoch_id) != Some(EpochStatus::Awarded)
                || self.has_claimed(recipient, epoch_id)
            {
                return Err(RebateError::ClaimRejected {
                    recipient: recipient.clone(),
                    epoch_id,
                });
            }
        }

        let prior = self.records.get(recipient).cloned();
        let mut record = prior.clone().unwrap_or_default();
        record.total_claimed = record.total_claimed.checked_add(amount)?;
        record.claimed_epochs.extend(epochs.iter().copied());
        self.records.insert(recipient.clone(), record);

        Ok(prior)
    }

    /// Undo `settle` after a failed payout
    pub(crate) fn restore(&mut self, recipient: &AccountId, prior: Option<ClaimRecord>) {
        match prior {
            Some(record) => {
                self.records.insert(recipient.clone(), record);
            }
            None => {
                self.records.remove(recipient);
            }
        }
    }
}
