use rebate_types::AuditEvent;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Append-only output channel for audit events
///
/// Emission cannot fail; ledger correctness never depends on a sink.
pub trait EventSink {
    fn emit(&mut self, event: &AuditEvent);
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &AuditEvent) {
        (**self).emit(event)
    }
}

/// Writes each event as a structured log record
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &AuditEvent) {
        match event {
            AuditEvent::RebateUpdated { epoch_id, checksum } => {
                info!(target: "rebate::audit", event = event.name(), epoch_id, %checksum)
            }
            AuditEvent::FundsDeposited { epoch_id, amount } => {
                info!(target: "rebate::audit", event = event.name(), epoch_id, %amount)
            }
            AuditEvent::TotalRewardClaimed { recipient, amount } => {
                info!(target: "rebate::audit", event = event.name(), %recipient, %amount)
            }
            AuditEvent::OperatorAssigned { operator } => {
                info!(target: "rebate::audit", event = event.name(), %operator)
            }
            AuditEvent::PayerAssigned { payer } => {
                info!(target: "rebate::audit", event = event.name(), %payer)
            }
        }
    }
}

/// In-memory event journal; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct MemoryEventLog {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event so far, oldest first
    pub fn events(&self) -> Vec<AuditEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<AuditEvent> {
        self.events().pop()
    }
}

impl EventSink for MemoryEventLog {
    fn emit(&mut self, event: &AuditEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}

/// Forwards every event to each inner sink in order
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink + Send>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl EventSink + Send + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl EventSink for FanoutSink {
    fn emit(&mut self, event: &AuditEvent) {
        for sink in &mut self.sinks {
            sink.emit(event);
        }
    }
}
