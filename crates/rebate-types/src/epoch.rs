
use serde::{Deserialize, Serialize};

/// Epoch identifier (dense, starts at 1)
pub type EpochId = u64;

/// Wall-clock reading in seconds
pub type Timestamp = u64;

/// The first epoch opened by a fresh ledger
pub const FIRST_EPOCH_ID: EpochId = 1;

/// Fixed epoch length: 7 days
pub const EPOCH_DURATION_SECS: u64 = 7 * 24 * 60 * 60;

/// Epoch lifecycle state
///
/// Advances strictly forward: `Ongoing -> Ended -> Awarded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EpochStatus {
    /// Accepting allocation writes
    Ongoing,
    /// Payable total frozen, waiting for funds
    Ended,
    /// Funded; allocations are claimable (terminal)
    Awarded,
}

impl EpochStatus {
    /// Whether `next` is the single legal successor of this state
    pub fn can_advance_to(self, next: EpochStatus) -> bool {
        matches!(
            (self, next),
            (EpochStatus::Ongoing, EpochStatus::Ended) | (EpochStatus::Ended, EpochStatus::Awarded)
        )
    }

    /// Not yet funded
    pub fn is_unfunded(self) -> bool {
        !matches!(self, EpochStatus::Awarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_only() {
        assert!(EpochStatus::Ongoing.can_advance_to(EpochStatus::Ended));
        assert!(EpochStatus::Ended.can_advance_to(EpochStatus::Awarded));

        assert!(!EpochStatus::Ongoing.can_advance_to(EpochStatus::Awarded));
        assert!(!EpochStatus::Ended.can_advance_to(EpochStatus::Ongoing));
        assert!(!EpochStatus::Awarded.can_advance_to(EpochStatus::Ended));
        assert!(!EpochStatus::Awarded.can_advance_to(EpochStatus::Awarded));
    }

    #[test]
    fn test_duration() {
        assert_eq!(EPOCH_DURATION_SECS, 604_800);
    }
}
