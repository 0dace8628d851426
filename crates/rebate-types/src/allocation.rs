use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::amount::Amount;
use crate::error::{RebateError, Result};

/// One (recipient, amount) entry of an epoch's allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientAllocation {
    pub recipient: AccountId,
    pub amount: Amount,
}

impl RecipientAllocation {
    pub fn new(recipient: impl Into<AccountId>, amount: Amount) -> Self {
        RecipientAllocation {
            recipient: recipient.into(),
            amount,
        }
    }
}

/// Allocation as submitted by the operator: parallel recipient/amount lists
///
/// Recipients may repeat; every entry is kept in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationBatch {
    pub recipients: Vec<AccountId>,
    pub amounts: Vec<Amount>,
}

impl AllocationBatch {
    pub fn new(recipients: Vec<AccountId>, amounts: Vec<Amount>) -> Self {
        AllocationBatch { recipients, amounts }
    }

    /// Build a well-formed batch from pairs
    pub fn from_pairs<I, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, Amount)>,
        A: Into<AccountId>,
    {
        let (recipients, amounts) = pairs
            .into_iter()
            .map(|(recipient, amount)| (recipient.into(), amount))
            .unzip();
        AllocationBatch { recipients, amounts }
    }

    /// Check the two lists describe a bijection and zip them
    pub fn into_entries(self) -> Result<Vec<RecipientAllocation>> {
        if self.recipients.len() != self.amounts.len() {
            return Err(RebateError::MalformedAllocationData {
                recipients: self.recipients.len(),
                amounts: self.amounts.len(),
            });
        }

        Ok(self
            .recipients
            .into_iter()
            .zip(self.amounts)
            .map(|(recipient, amount)| RecipientAllocation { recipient, amount })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty() && self.amounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_lengths() {
        let batch = AllocationBatch::new(
            vec![AccountId::new("trader1")],
            vec![Amount::from_units(100), Amount::from_units(200)],
        );

        let err = batch.into_entries().unwrap_err();
        assert_eq!(
            err,
            RebateError::MalformedAllocationData {
                recipients: 1,
                amounts: 2
            }
        );
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let batch = AllocationBatch::from_pairs(vec![
            ("a", Amount::from_units(1)),
            ("b", Amount::from_units(2)),
            ("a", Amount::from_units(3)),
        ]);

        let entries = batch.into_entries().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], RecipientAllocation::new("a", Amount::from_units(1)));
        assert_eq!(entries[2], RecipientAllocation::new("a", Amount::from_units(3)));
    }
}
