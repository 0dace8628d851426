//! Epoch-based fee rebate distribution.
//!
//! The operator records each epoch's allocation, the payer funds ended
//! epochs, and recipients claim what awarded epochs owe them.

mod aggregator;
mod allocation;
mod claims;
mod clock;
mod distributor;
mod epoch;
mod events;
mod roles;

pub use aggregator::{FeeAggregator, FeeSummary, PendingClaim};
pub use allocation::{EpochAllocations, RebateAllocationStore};
pub use claims::{ClaimAccount, ClaimRecord};
pub use clock::{Clock, ManualClock, SystemClock};
pub use distributor::{DistributorSnapshot, RebateDistributor};
pub use epoch::{EpochLedger, EpochRecord, EpochSnapshot, EpochTransition};
pub use events::{EventSink, FanoutSink, MemoryEventLog, TracingSink};
pub use roles::{RoleRegistry, Roles};
