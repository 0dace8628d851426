use rebate_distributor::ManualClock;
use rebate_integration_tests::{account, deploy, ether, TestDistributor};
use rebate_report::{allocation_checksum, EpochReport};
use rebate_types::{
    AllocationBatch, Amount, AuditEvent, ClaimStatus, EpochStatus, RebateError,
    EPOCH_DURATION_SECS,
};

/// Record `batch` for the current epoch with its digest as checksum,
/// then cross the boundary and resubmit to end it
fn close_epoch(
    distributor: &mut TestDistributor,
    clock: &ManualClock,
    batch: AllocationBatch,
) -> u64 {
    let operator = account("operator");
    let epoch_id = distributor.current_epoch_id();
    let checksum = allocation_checksum(&batch.clone().into_entries().unwrap()).unwrap();

    distributor
        .record_allocation(&operator, epoch_id, batch.clone(), checksum.clone())
        .unwrap();
    clock.advance(EPOCH_DURATION_SECS);
    distributor
        .record_allocation(&operator, epoch_id, batch, checksum)
        .unwrap();
    epoch_id
}

fn fund(distributor: &mut TestDistributor, epoch_id: u64) -> Amount {
    let payer = distributor.payer().clone();
    let pool = distributor.epoch_snapshot(epoch_id).unwrap().total_pool;
    distributor.port_mut().approve(&payer, pool);
    distributor.fund_epoch(&payer, epoch_id).unwrap()
}

#[test]
fn test_three_epochs_with_partial_claims() {
    let (mut d, clock, events) = deploy(Amount::from_units(10_000));

    let e1 = close_epoch(&mut d, &clock, AllocationBatch::from_pairs(vec![
        ("alice", ether("1")),
        ("bob", ether("2")),
        ("alice", ether("0.25")),
    ]));
    let e2 = close_epoch(&mut d, &clock, AllocationBatch::from_pairs(vec![("bob", ether("4"))]));
    let e3 = close_epoch(&mut d, &clock, AllocationBatch::from_pairs(vec![("alice", ether("8"))]));
    assert_eq!((e1, e2, e3), (1, 2, 3));
    assert_eq!(d.current_epoch_id(), 4);

    assert_eq!(fund(&mut d, e1), ether("3.25"));
    assert_eq!(fund(&mut d, e2), ether("4"));

    // Alice: 1.25 claimable in epoch 1, 8 pending in epoch 3
    let alice = account("alice");
    let summary = d.fee_summary(&alice).unwrap();
    assert_eq!(summary.claimable, ether("1.25"));
    assert_eq!(summary.ongoing, ether("8"));
    assert_eq!(d.claim(&alice).unwrap(), ether("1.25"));

    // Bob claims both funded epochs at once
    let bob = account("bob");
    assert_eq!(d.claim(&bob).unwrap(), ether("6"));
    assert_eq!(d.claim_status(&bob, e1), ClaimStatus::Claimed);
    assert_eq!(d.claim_status(&bob, e2), ClaimStatus::Claimed);

    // Funding epoch 3 later makes Alice's remainder claimable
    fund(&mut d, e3);
    assert_eq!(d.claim_status(&alice, e3), ClaimStatus::Claimable);
    assert_eq!(d.claim(&alice).unwrap(), ether("8"));
    assert_eq!(d.claimed_fees(&alice), ether("9.25"));

    // Everything funded has been paid out
    assert_eq!(d.port().custody_balance(), Amount::ZERO);
    assert_eq!(d.port().balance(&account("payer")), ether("9984.75"));

    let claims: Vec<_> = events
        .events()
        .into_iter()
        .filter(|e| matches!(e, AuditEvent::TotalRewardClaimed { .. }))
        .collect();
    assert_eq!(claims.len(), 3);
}

#[test]
fn test_reports_verify_recorded_checksums() {
    let (mut d, clock, _) = deploy(Amount::from_units(10_000));
    let epoch_id = close_epoch(&mut d, &clock, AllocationBatch::from_pairs(vec![
        ("alice", ether("1.5")),
        ("bob", ether("0.5")),
    ]));
    fund(&mut d, epoch_id);

    let report = EpochReport::from_snapshot(&d.epoch_snapshot(epoch_id).unwrap()).unwrap();
    assert!(report.checksum_matches);
    assert_eq!(report.status, EpochStatus::Awarded);
    assert_eq!(report.recipient_count, 2);
    assert_eq!(report.total_pool, ether("2"));
}

#[test]
fn test_role_rotation_mid_lifecycle() {
    let (mut d, clock, events) = deploy(Amount::from_units(10_000));
    let owner = account("owner");
    let treasury = account("treasury");

    let epoch_id = close_epoch(&mut d, &clock, AllocationBatch::from_pairs(vec![("alice", ether("1"))]));

    d.assign_payer(&owner, treasury.clone()).unwrap();
    assert_eq!(events.last(), Some(AuditEvent::PayerAssigned { payer: treasury.clone() }));

    // The old payer is no longer allowed to fund
    let err = d.fund_epoch(&account("payer"), epoch_id).unwrap_err();
    assert_eq!(err.kind(), "Unauthorized");

    d.port_mut().mint(&treasury, ether("1")).unwrap();
    assert_eq!(fund(&mut d, epoch_id), ether("1"));
    assert_eq!(d.port().balance(&treasury), Amount::ZERO);
}

#[test]
fn test_checkpoint_and_resume() {
    let (mut d, clock, _) = deploy(Amount::from_units(10_000));
    let epoch_id = close_epoch(&mut d, &clock, AllocationBatch::from_pairs(vec![("alice", ether("3"))]));
    fund(&mut d, epoch_id);

    let json = serde_json::to_string(&d.snapshot()).unwrap();

    // A fresh process holding the same custody funds picks up where we left off
    let (mut resumed, _, _) = deploy(Amount::from_units(10_000));
    resumed.restore(serde_json::from_str(&json).unwrap());
    resumed.port_mut().mint(&account(rebate_integration_tests::CUSTODY), ether("3")).unwrap();

    assert_eq!(resumed.current_epoch_id(), 2);
    assert_eq!(resumed.claim(&account("alice")).unwrap(), ether("3"));
    assert!(matches!(
        resumed.claim(&account("alice")),
        Err(RebateError::NothingToClaim(_))
    ));
}

#[test]
fn test_unfunded_epoch_is_never_claimable() {
    let (mut d, clock, _) = deploy(Amount::from_units(10_000));
    close_epoch(&mut d, &clock, AllocationBatch::from_pairs(vec![("alice", ether("5"))]));
    clock.advance(10 * EPOCH_DURATION_SECS);

    let alice = account("alice");
    assert_eq!(d.claim_status(&alice, 1), ClaimStatus::Pending);
    assert_eq!(d.ongoing_fees(&alice).unwrap(), ether("5"));
    assert!(matches!(d.claim(&alice), Err(RebateError::NothingToClaim(_))));
    assert_eq!(d.epoch_snapshot(1).unwrap().pending_pool, ether("5"));
}
