mod amount;
mod account;
mod allocation;
mod checksum;
mod claim;
mod epoch;
mod event;
mod role;
mod error;

pub use amount::{Amount, DECIMALS};
pub use account::AccountId;
pub use allocation::{AllocationBatch, RecipientAllocation};
pub use checksum::Checksum;
pub use claim::ClaimStatus;
pub use epoch::{EpochId, EpochStatus, Timestamp, EPOCH_DURATION_SECS, FIRST_EPOCH_ID};
pub use event::AuditEvent;
pub use role::Role;
pub use error::{RebateError, Result};
