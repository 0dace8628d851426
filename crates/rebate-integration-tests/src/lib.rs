//! Shared fixtures for the cross-crate scenarios under `tests/`.

use rebate_distributor::{ManualClock, MemoryEventLog, RebateDistributor, Roles};
use rebate_ledger::MemoryToken;
use rebate_types::{AccountId, Amount};

pub type TestDistributor = RebateDistributor<MemoryToken, ManualClock>;

pub const T0: u64 = 1_700_000_000;
pub const CUSTODY: &str = "distributor";

pub fn ether(s: &str) -> Amount {
    Amount::from_decimal_str(s).unwrap()
}

pub fn account(id: &str) -> AccountId {
    AccountId::new(id)
}

/// Fresh distributor with `owner`, `operator` and `payer` roles; the payer
/// holds `payer_balance` and nothing is approved yet
pub fn deploy(payer_balance: Amount) -> (TestDistributor, ManualClock, MemoryEventLog) {
    let clock = ManualClock::new(T0);
    let events = MemoryEventLog::new();
    let mut token = MemoryToken::new(CUSTODY);
    token.mint(&account("payer"), payer_balance).unwrap();

    let distributor = RebateDistributor::new(token, clock.clone(), Roles::new("owner", "operator", "payer"))
        .with_sink(events.clone());
    (distributor, clock, events)
}
