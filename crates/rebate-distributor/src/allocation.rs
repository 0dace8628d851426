use rebate_types::{AccountId, Amount, EpochId, RebateError, RecipientAllocation, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One epoch's allocation set
///
/// Keeps the submitted entries in order and a per-recipient index. The
/// index and the total are derived from the entries and rebuilt on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RecipientAllocation>", into = "Vec<RecipientAllocation>")]
pub struct EpochAllocations {
    entries: Vec<RecipientAllocation>,
    owed: BTreeMap<AccountId, Amount>,
    total: Amount,
}

impl EpochAllocations {
    /// Index the entries and sum the pool, failing on overflow
    pub fn build(entries: Vec<RecipientAllocation>) -> Result<Self> {
        let mut owed: BTreeMap<AccountId, Amount> = BTreeMap::new();
        let mut total = Amount::ZERO;

        for entry in &entries {
            let slot = owed.entry(entry.recipient.clone()).or_default();
            *slot = slot.checked_add(entry.amount)?;
            total = total.checked_add(entry.amount)?;
        }

        Ok(EpochAllocations { entries, owed, total })
    }

    /// Entries in submission order
    pub fn entries(&self) -> &[RecipientAllocation] {
        &self.entries
    }

    /// Sum of every entry for `recipient`
    pub fn owed_to(&self, recipient: &AccountId) -> Amount {
        self.owed.get(recipient).copied().unwrap_or(Amount::ZERO)
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    /// Distinct recipients
    pub fn recipient_count(&self) -> usize {
        self.owed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<RecipientAllocation>> for EpochAllocations {
    type Error = RebateError;

    fn try_from(entries: Vec<RecipientAllocation>) -> Result<Self> {
        EpochAllocations::build(entries)
    }
}

impl From<EpochAllocations> for Vec<RecipientAllocation> {
    fn from(allocations: EpochAllocations) -> Self {
        allocations.entries
    }
}

/// Per-epoch recipient -> owed amount
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateAllocationStore {
    by_epoch: BTreeMap<EpochId, EpochAllocations>,
}

impl RebateAllocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace an epoch's allocation wholesale (never merged)
    pub fn replace(&mut self, epoch_id: EpochId, allocations: EpochAllocations) {
        self.by_epoch.insert(epoch_id, allocations);
    }

    pub fn get(&self, epoch_id: EpochId) -> Option<&EpochAllocations> {
        self.by_epoch.get(&epoch_id)
    }

    /// Amount owed to `recipient` in `epoch_id` (zero when absent)
    pub fn owed(&self, epoch_id: EpochId, recipient: &AccountId) -> Amount {
        self.get(epoch_id)
            .map(|allocations| allocations.owed_to(recipient))
            .unwrap_or(Amount::ZERO)
    }

    /// Sum of all amounts in `epoch_id`
    pub fn total(&self, epoch_id: EpochId) -> Amount {
        self.get(epoch_id)
            .map(EpochAllocations::total)
            .unwrap_or(Amount::ZERO)
    }
}
