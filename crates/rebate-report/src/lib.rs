//! Off-chain audit reports for recorded epochs.

mod reporter;
mod hashing;

pub use reporter::{Reporter, EpochReport, MemoryReporter};
pub use hashing::{allocation_checksum, compute_hash, compute_json_hash, HashRef};
