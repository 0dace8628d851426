use rebate_ledger::AssetTransferPort;
use rebate_types::{
    AccountId, AllocationBatch, Amount, AuditEvent, Checksum, ClaimStatus, EpochId, RebateError,
    Result, Role,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aggregator::{FeeAggregator, FeeSummary};
use crate::claims::{ClaimAccount, ClaimRecord};
use crate::clock::Clock;
use crate::epoch::{EpochLedger, EpochSnapshot, EpochTransition};
use crate::events::{EventSink, TracingSink};
use crate::roles::{RoleRegistry, Roles};

/// Complete ledger state, for checkpoint/restore and comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributorSnapshot {
    pub roles: RoleRegistry,
    pub ledger: EpochLedger,
    pub claims: ClaimAccount,
}

/// Epoch-based rebate distributor
///
/// Owns all role, epoch and claim state. Every mutating call runs to
/// completion or leaves the state exactly as it found it. Bookkeeping is
/// written before the asset port is invoked and restored if the port
/// fails; the port never sees ledger state.
pub struct RebateDistributor<P, C> {
    roles: RoleRegistry,
    ledger: EpochLedger,
    claims: ClaimAccount,
    port: P,
    clock: C,
    sink: Box<dyn EventSink + Send>,
}

impl<P: AssetTransferPort, C: Clock> RebateDistributor<P, C> {
    /// Deploy a distributor; epoch 1 opens at the clock's current reading
    pub fn new(port: P, clock: C, roles: Roles) -> Self {
        let ledger = EpochLedger::open(clock.now());
        info!(
            owner = %roles.owner,
            operator = %roles.operator,
            payer = %roles.payer,
            "rebate distributor initialized"
        );

        RebateDistributor {
            roles: RoleRegistry::new(roles),
            ledger,
            claims: ClaimAccount::new(),
            port,
            clock,
            sink: Box::new(TracingSink),
        }
    }

    /// Replace the event sink
    pub fn with_sink(mut self, sink: impl EventSink + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    // ---- role management ----

    pub fn assign_operator(&mut self, caller: &AccountId, operator: AccountId) -> Result<()> {
        let event = self.roles.assign_operator(caller, operator).map_err(|e| {
            warn!(%caller, error = %e, "operator assignment rejected");
            e
        })?;
        self.sink.emit(&event);
        Ok(())
    }

    pub fn assign_payer(&mut self, caller: &AccountId, payer: AccountId) -> Result<()> {
        let event = self.roles.assign_payer(caller, payer).map_err(|e| {
            warn!(%caller, error = %e, "payer assignment rejected");
            e
        })?;
        self.sink.emit(&event);
        Ok(())
    }

    /// Fails `Unauthorized` unless `caller` holds `role`
    pub fn ensure_role(&self, caller: &AccountId, role: Role) -> Result<()> {
        self.roles.ensure(caller, role).map_err(|e| {
            warn!(%caller, %role, "caller rejected");
            e
        })
    }

    // ---- operations ----

    /// Operator-only: replace the current epoch's allocation
    ///
    /// Rolls the epoch when its duration has elapsed; this is the only
    /// place an epoch ends.
    pub fn record_allocation(
        &mut self,
        caller: &AccountId,
        epoch_id: EpochId,
        batch: AllocationBatch,
        checksum: Checksum,
    ) -> Result<EpochTransition> {
        let now = self.clock.now();
        let result = self
            .roles
            .ensure(caller, Role::Operator)
            .and_then(|_| {
                self.ledger
                    .record_allocation(epoch_id, batch, checksum.clone(), now)
            });

        let transition = result.map_err(|e| {
            warn!(%caller, epoch_id, error = %e, "allocation rejected");
            e
        })?;

        self.sink.emit(&AuditEvent::RebateUpdated { epoch_id, checksum });
        Ok(transition)
    }

    /// Payer-only: pull an ended epoch's pool into custody and award it
    pub fn fund_epoch(&mut self, caller: &AccountId, epoch_id: EpochId) -> Result<Amount> {
        let result = self
            .roles
            .ensure(caller, Role::Payer)
            .and_then(|_| self.ledger.begin_funding(epoch_id));
        let (prior, amount) = result.map_err(|e| {
            warn!(%caller, epoch_id, error = %e, "funding rejected");
            e
        })?;

        if let Err(e) = self.port.pull_funds(caller, amount) {
            self.ledger.abort_funding(prior);
            warn!(%caller, epoch_id, %amount, error = %e, "funding transfer failed, rolled back");
            return Err(RebateError::TransferFailed(e.to_string()));
        }

        info!(epoch_id, %amount, "epoch awarded");
        self.sink.emit(&AuditEvent::FundsDeposited { epoch_id, amount });
        Ok(amount)
    }

    /// Pay `caller` everything owed across awarded, unclaimed epochs
    pub fn claim(&mut self, caller: &AccountId) -> Result<Amount> {
        let pending = self.aggregator().pending_claim(caller)?;
        if pending.amount.is_zero() {
            warn!(recipient = %caller, "nothing to claim");
            return Err(RebateError::NothingToClaim(caller.clone()));
        }

        let prior = self
            .claims
            .settle(&self.ledger, caller, &pending.epochs, pending.amount)?;

        if let Err(e) = self.port.push_funds(caller, pending.amount) {
            self.claims.restore(caller, prior);
            warn!(recipient = %caller, amount = %pending.amount, error = %e, "claim transfer failed, rolled back");
            return Err(RebateError::TransferFailed(e.to_string()));
        }

        info!(
            recipient = %caller,
            amount = %pending.amount,
            epochs = ?pending.epochs,
            "rebate claimed"
        );
        self.sink.emit(&AuditEvent::TotalRewardClaimed {
            recipient: caller.clone(),
            amount: pending.amount,
        });
        Ok(pending.amount)
    }

    // ---- queries ----

    pub fn current_epoch_id(&self) -> EpochId {
        self.ledger.current_epoch_id()
    }

    pub fn epoch_snapshot(&self, epoch_id: EpochId) -> Option<EpochSnapshot> {
        self.ledger.snapshot(epoch_id)
    }

    pub fn aggregator(&self) -> FeeAggregator<'_> {
        FeeAggregator::new(&self.ledger, &self.claims)
    }

    pub fn ongoing_fees(&self, recipient: &AccountId) -> Result<Amount> {
        self.aggregator().ongoing_fees(recipient)
    }

    pub fn claimable_fees(&self, recipient: &AccountId) -> Result<Amount> {
        self.aggregator().claimable_fees(recipient)
    }

    pub fn claimed_fees(&self, recipient: &AccountId) -> Amount {
        self.aggregator().claimed_fees(recipient)
    }

    pub fn fee_summary(&self, recipient: &AccountId) -> Result<FeeSummary> {
        self.aggregator().summary(recipient)
    }

    pub fn claim_status(&self, recipient: &AccountId, epoch_id: EpochId) -> ClaimStatus {
        self.aggregator().claim_status(recipient, epoch_id)
    }

    pub fn claim_record(&self, recipient: &AccountId) -> Option<&ClaimRecord> {
        self.claims.record(recipient)
    }

    pub fn roles(&self) -> &Roles {
        self.roles.roles()
    }

    pub fn owner(&self) -> &AccountId {
        self.roles.holder(Role::Owner)
    }

    pub fn operator(&self) -> &AccountId {
        self.roles.holder(Role::Operator)
    }

    pub fn payer(&self) -> &AccountId {
        self.roles.holder(Role::Payer)
    }

    pub fn ledger(&self) -> &EpochLedger {
        &self.ledger
    }

    pub fn claims(&self) -> &ClaimAccount {
        &self.claims
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Direct access to the asset, e.g. to approve or mint in a demo
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ---- checkpoint ----

    pub fn snapshot(&self) -> DistributorSnapshot {
        DistributorSnapshot {
            roles: self.roles.clone(),
            ledger: self.ledger.clone(),
            claims: self.claims.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: DistributorSnapshot) {
        self.roles = snapshot.roles;
        self.ledger = snapshot.ledger;
        self.claims = snapshot.claims;
        info!(current_epoch = self.ledger.current_epoch_id(), "state restored from snapshot");
    }
}
