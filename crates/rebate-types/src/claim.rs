use serde::{Deserialize, Serialize};

/// Per-(recipient, epoch) claim status
///
/// Reflects whether the epoch has been funded, not whether the recipient
/// holds an allocation in it. The discriminants are the wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ClaimStatus {
    /// Already paid out to the recipient
    Claimed = 0,
    /// Epoch funded, not yet paid out
    Claimable = 1,
    /// Epoch not funded yet (or never opened)
    Pending = 2,
}

impl ClaimStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}
