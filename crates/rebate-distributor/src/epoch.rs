use rebate_types::{
    AllocationBatch, Amount, Checksum, EpochId, EpochStatus, RebateError, RecipientAllocation,
    Result, Timestamp, EPOCH_DURATION_SECS, FIRST_EPOCH_ID,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::allocation::{EpochAllocations, RebateAllocationStore};

/// Lifecycle record of a single epoch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochRecord {
    pub id: EpochId,
    pub status: EpochStatus,
    pub opened_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    /// Last checksum submitted with an allocation
    pub checksum: Option<Checksum>,
}

impl EpochRecord {
    fn open(id: EpochId, now: Timestamp) -> Self {
        EpochRecord {
            id,
            status: EpochStatus::Ongoing,
            opened_at: now,
            ended_at: None,
            checksum: None,
        }
    }

    /// Whether the fixed duration has elapsed at `now`
    pub fn has_elapsed(&self, now: Timestamp) -> bool {
        now >= self.opened_at.saturating_add(EPOCH_DURATION_SECS)
    }
}

/// Read-only view of an epoch and its allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochSnapshot {
    pub id: EpochId,
    pub status: EpochStatus,
    pub opened_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    /// Frozen sum of all allocations
    pub total_pool: Amount,
    /// Amount still to be funded; zero once awarded
    pub pending_pool: Amount,
    pub checksum: Option<Checksum>,
    pub allocations: Vec<RecipientAllocation>,
}

/// Effect of an allocation write on the epoch sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum EpochTransition {
    /// Epoch still open
    Unchanged { epoch_id: EpochId },
    /// Duration elapsed: `ended` froze and `opened` became current
    Rolled { ended: EpochId, opened: EpochId },
}

/// Ordered epoch sequence and lifecycle
///
/// Sole writer of epoch status and pool totals. Exactly one epoch is
/// `Ongoing` at any time and it is always the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochLedger {
    epochs: BTreeMap<EpochId, EpochRecord>,
    allocations: RebateAllocationStore,
    current: EpochId,
}

impl EpochLedger {
    /// Start a ledger with epoch 1 open at `now`
    pub fn open(now: Timestamp) -> Self {
        let mut epochs = BTreeMap::new();
        epochs.insert(FIRST_EPOCH_ID, EpochRecord::open(FIRST_EPOCH_ID, now));

        EpochLedger {
            epochs,
            allocations: RebateAllocationStore::new(),
            current: FIRST_EPOCH_ID,
        }
    }

    pub fn current_epoch_id(&self) -> EpochId {
        self.current
    }

    pub fn epoch(&self, epoch_id: EpochId) -> Option<&EpochRecord> {
        self.epochs.get(&epoch_id)
    }

    pub fn status(&self, epoch_id: EpochId) -> Option<EpochStatus> {
        self.epoch(epoch_id).map(|epoch| epoch.status)
    }

    /// All epochs in id order
    pub fn epochs(&self) -> impl Iterator<Item = &EpochRecord> {
        self.epochs.values()
    }

    pub fn allocations(&self) -> &RebateAllocationStore {
        &self.allocations
    }

    pub fn snapshot(&self, epoch_id: EpochId) -> Option<EpochSnapshot> {
        let epoch = self.epoch(epoch_id)?;
        let allocations = self.allocations.get(epoch_id);
        let total_pool = allocations.map(EpochAllocations::total).unwrap_or(Amount::ZERO);

        Some(EpochSnapshot {
            id: epoch.id,
            status: epoch.status,
            opened_at: epoch.opened_at,
            ended_at: epoch.ended_at,
            total_pool,
            pending_pool: if epoch.status.is_unfunded() {
                total_pool
            } else {
                Amount::ZERO
            },
            checksum: epoch.checksum.clone(),
            allocations: allocations
                .map(|a| a.entries().to_vec())
                .unwrap_or_default(),
        })
    }

    /// Replace the current epoch's allocation, then roll the epoch if its
    /// duration has elapsed at `now`
    ///
    /// Validation happens before any write, so a failed call leaves the
    /// ledger untouched.
    pub(crate) fn record_allocation(
        &mut self,
        epoch_id: EpochId,
        batch: AllocationBatch,
        checksum: Checksum,
        now: Timestamp,
    ) -> Result<EpochTransition> {
        if epoch_id != self.current {
            return Err(RebateError::InvalidEpochId {
                submitted: epoch_id,
                current: self.current,
            });
        }

        let allocations = EpochAllocations::build(batch.into_entries()?)?;
        let next_id = epoch_id.checked_add(1).ok_or(RebateError::InvalidEpochId {
            submitted: epoch_id,
            current: self.current,
        })?;

        let epoch = self
            .epochs
            .get_mut(&epoch_id)
            .ok_or(RebateError::InvalidEpochId {
                submitted: epoch_id,
                current: self.current,
            })?;

        debug!(
            epoch_id,
            entries = allocations.entries().len(),
            total = %allocations.total(),
            "allocation replaced"
        );
        epoch.checksum = Some(checksum);
        let elapsed = epoch.has_elapsed(now);
        if elapsed {
            epoch.status = EpochStatus::Ended;
            epoch.ended_at = Some(now);
        }
        self.allocations.replace(epoch_id, allocations);

        if !elapsed {
            return Ok(EpochTransition::Unchanged { epoch_id });
        }

        self.epochs.insert(next_id, EpochRecord::open(next_id, now));
        self.current = next_id;
        info!(
            ended = epoch_id,
            opened = next_id,
            total_pool = %self.allocations.total(epoch_id),
            "epoch ended"
        );

        Ok(EpochTransition::Rolled {
            ended: epoch_id,
            opened: next_id,
        })
    }

    /// Mark an ended epoch awarded and return the prior record with the
    /// amount to pull
    pub(crate) fn begin_funding(&mut self, epoch_id: EpochId) -> Result<(EpochRecord, Amount)> {
        let total = self.allocations.total(epoch_id);
        let epoch = self
            .epochs
            .get_mut(&epoch_id)
            .ok_or(RebateError::EpochNotEnded {
                epoch_id,
                status: None,
            })?;

        if !epoch.status.can_advance_to(EpochStatus::Awarded) {
            return Err(RebateError::EpochNotEnded {
                epoch_id,
                status: Some(epoch.status),
            });
        }

        let prior = epoch.clone();
        epoch.status = EpochStatus::Awarded;
        Ok((prior, total))
    }

    /// Undo `begin_funding` after a failed pull
    pub(crate) fn abort_funding(&mut self, prior: EpochRecord) {
        self.epochs.insert(prior.id, prior);
    }
}
