use proptest::prelude::*;
use rebate_distributor::ManualClock;
use rebate_integration_tests::{deploy, TestDistributor};
use rebate_types::{
    AccountId, AllocationBatch, Amount, Checksum, EpochStatus, RebateError, EPOCH_DURATION_SECS,
};

const RECIPIENTS: [&str; 4] = ["alice", "bob", "carol", "dave"];

#[derive(Debug, Clone)]
enum Op {
    Allocate(Vec<(usize, u64)>),
    Advance(u64),
    Fund(u64),
    Claim(usize),
    TogglePull(bool),
    TogglePush(bool),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => proptest::collection::vec((0..RECIPIENTS.len(), 0..1_000_000u64), 0..6).prop_map(Op::Allocate),
        2 => (0..2 * EPOCH_DURATION_SECS).prop_map(Op::Advance),
        2 => (0..8u64).prop_map(Op::Fund),
        3 => (0..RECIPIENTS.len()).prop_map(Op::Claim),
        1 => any::<bool>().prop_map(Op::TogglePull),
        1 => any::<bool>().prop_map(Op::TogglePush),
    ]
}

fn deploy_funded() -> (TestDistributor, ManualClock) {
    let (mut d, clock, _) = deploy(Amount::from_units(u64::MAX));
    d.port_mut().approve(&AccountId::new("payer"), Amount::from_units(u64::MAX));
    (d, clock)
}

/// Custody holds exactly what was funded and not yet claimed, and each
/// recipient's claimable plus claimed fees equal its awarded allocations
fn assert_accounting(d: &TestDistributor) -> Result<(), TestCaseError> {
    let ledger = d.ledger();
    let funded: u128 = ledger
        .epochs()
        .filter(|e| e.status == EpochStatus::Awarded)
        .map(|e| ledger.allocations().total(e.id).raw())
        .sum();
    let claimed: u128 = RECIPIENTS
        .iter()
        .map(|r| d.claimed_fees(&AccountId::new(*r)).raw())
        .sum();

    prop_assert_eq!(d.port().custody_balance().raw(), funded - claimed);

    for r in RECIPIENTS {
        let recipient = AccountId::new(r);

        let awarded: u128 = ledger
            .epochs()
            .filter(|e| e.status == EpochStatus::Awarded)
            .map(|e| ledger.allocations().owed(e.id, &recipient).raw())
            .sum();
        let claimable = d.claimable_fees(&recipient).unwrap().raw();
        prop_assert_eq!(claimable + d.claimed_fees(&recipient).raw(), awarded);

        if let Some(record) = d.claim_record(&recipient) {
            let owed: u128 = record
                .claimed_epochs
                .iter()
                .map(|&epoch_id| ledger.allocations().owed(epoch_id, &recipient).raw())
                .sum();
            prop_assert_eq!(record.total_claimed.raw(), owed);
            for epoch_id in &record.claimed_epochs {
                prop_assert_eq!(ledger.status(*epoch_id), Some(EpochStatus::Awarded));
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn custody_matches_funded_minus_claimed(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let (mut d, clock) = deploy_funded();
        let operator = AccountId::new("operator");
        let payer = AccountId::new("payer");

        for op in ops {
            let before = d.snapshot();
            let result = match op {
                Op::Allocate(entries) => {
                    let batch = AllocationBatch::from_pairs(
                        entries.into_iter().map(|(i, raw)| (RECIPIENTS[i], Amount::from_raw(raw as u128))),
                    );
                    let epoch_id = d.current_epoch_id();
                    d.record_allocation(&operator, epoch_id, batch, Checksum::from("0x00")).map(|_| ())
                }
                Op::Advance(secs) => {
                    clock.advance(secs);
                    Ok(())
                }
                Op::Fund(epoch_id) => d.fund_epoch(&payer, epoch_id).map(|_| ()),
                Op::Claim(i) => d.claim(&AccountId::new(RECIPIENTS[i])).map(|_| ()),
                Op::TogglePull(enabled) => {
                    d.port_mut().set_pull_enabled(enabled);
                    Ok(())
                }
                Op::TogglePush(enabled) => {
                    d.port_mut().set_push_enabled(enabled);
                    Ok(())
                }
            };

            if result.is_err() {
                prop_assert_eq!(&d.snapshot(), &before);
            }
            assert_accounting(&d)?;
        }
    }

    #[test]
    fn claims_pay_each_epoch_at_most_once(amounts in proptest::collection::vec(1..1_000_000u64, 1..6), retries in 1..4usize) {
        let (mut d, clock) = deploy_funded();
        let operator = AccountId::new("operator");
        let payer = AccountId::new("payer");
        let alice = AccountId::new("alice");

        for raw in &amounts {
            let epoch_id = d.current_epoch_id();
            let batch = AllocationBatch::from_pairs(vec![("alice", Amount::from_raw(*raw as u128))]);
            clock.advance(EPOCH_DURATION_SECS);
            d.record_allocation(&operator, epoch_id, batch, Checksum::from("0x00")).unwrap();
            d.fund_epoch(&payer, epoch_id).unwrap();
        }

        let expected: u128 = amounts.iter().map(|a| *a as u128).sum();
        prop_assert_eq!(d.claim(&alice).unwrap().raw(), expected);

        for _ in 0..retries {
            prop_assert_eq!(d.claim(&alice), Err(RebateError::NothingToClaim(alice.clone())));
        }
        prop_assert_eq!(d.claimed_fees(&alice).raw(), expected);
        prop_assert_eq!(d.port().balance(&alice).raw(), expected);
    }

    #[test]
    fn mismatched_batches_are_rejected(recipients in 0..20usize, amounts in 0..20usize) {
        prop_assume!(recipients != amounts);
        let (mut d, _) = deploy_funded();
        let operator = AccountId::new("operator");
        let before = d.snapshot();

        let batch = AllocationBatch::new(
            (0..recipients).map(|i| AccountId::new(format!("r{}", i))).collect(),
            vec![Amount::from_units(1); amounts],
        );
        let err = d.record_allocation(&operator, 1, batch, Checksum::from("0x00")).unwrap_err();

        prop_assert_eq!(err, RebateError::MalformedAllocationData { recipients, amounts });
        prop_assert_eq!(d.snapshot(), before);
    }
}
