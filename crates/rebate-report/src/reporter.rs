use std::collections::BTreeSet;

use rebate_distributor::EpochSnapshot;
use rebate_types::{Amount, Checksum, EpochId, EpochStatus, Timestamp};
use serde::{Deserialize, Serialize};

use crate::hashing::allocation_checksum;

/// Audit view of one epoch, with the allocation digest recomputed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochReport {
    pub epoch_id: EpochId,
    pub status: EpochStatus,
    pub opened_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub entry_count: usize,
    pub recipient_count: usize,
    pub total_pool: Amount,
    pub stored_checksum: Option<Checksum>,
    pub computed_checksum: Checksum,
    pub checksum_matches: bool,
}

impl EpochReport {
    pub fn from_snapshot(snapshot: &EpochSnapshot) -> Result<Self, serde_json::Error> {
        let computed = allocation_checksum(&snapshot.allocations)?;
        let recipients: BTreeSet<_> = snapshot.allocations.iter().map(|a| &a.recipient).collect();

        Ok(EpochReport {
            epoch_id: snapshot.id,
            status: snapshot.status,
            opened_at: snapshot.opened_at,
            ended_at: snapshot.ended_at,
            entry_count: snapshot.allocations.len(),
            recipient_count: recipients.len(),
            total_pool: snapshot.total_pool,
            checksum_matches: snapshot.checksum.as_ref() == Some(&computed),
            stored_checksum: snapshot.checksum.clone(),
            computed_checksum: computed,
        })
    }
}

/// Reporter trait
pub trait Reporter {
    fn publish(&self, snapshot: &EpochSnapshot) -> Result<EpochReport, String>;
}

/// Simple in-memory reporter
pub struct MemoryReporter;

impl MemoryReporter {
    pub fn new() -> Self {
        MemoryReporter
    }
}

impl Default for MemoryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for MemoryReporter {
    fn publish(&self, snapshot: &EpochSnapshot) -> Result<EpochReport, String> {
        EpochReport::from_snapshot(snapshot).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebate_types::RecipientAllocation;

    fn snapshot(allocations: Vec<RecipientAllocation>, checksum: Option<Checksum>) -> EpochSnapshot {
        let total_pool = Amount::checked_sum(allocations.iter().map(|a| a.amount)).unwrap();
        EpochSnapshot {
            id: 1,
            status: EpochStatus::Ongoing,
            opened_at: 1_700_000_000,
            ended_at: None,
            total_pool,
            pending_pool: total_pool,
            checksum,
            allocations,
        }
    }

    #[test]
    fn test_memory_reporter() {
        let reporter = MemoryReporter::new();
        let allocations = vec![
            RecipientAllocation::new("alice", Amount::from_units(1)),
            RecipientAllocation::new("alice", Amount::from_units(2)),
            RecipientAllocation::new("bob", Amount::from_units(3)),
        ];

        let report = reporter.publish(&snapshot(allocations, None)).unwrap();

        assert_eq!(report.epoch_id, 1);
        assert_eq!(report.entry_count, 3);
        assert_eq!(report.recipient_count, 2);
        assert_eq!(report.total_pool, Amount::from_units(6));
        assert!(!report.checksum_matches);
    }
}
