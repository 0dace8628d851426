use rebate_distributor::{
    Clock, FanoutSink, MemoryEventLog, RebateDistributor, Roles, SystemClock, TracingSink,
};
use rebate_ledger::MemoryToken;
use rebate_report::MemoryReporter;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::{ConfigError, ServiceConfig};
use crate::error::ApiError;

pub type ServiceDistributor = RebateDistributor<MemoryToken, Box<dyn Clock + Send>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub distributor: Arc<Mutex<ServiceDistributor>>,
    pub events: MemoryEventLog,
    pub reporter: Arc<MemoryReporter>,
}

impl AppState {
    /// Every event goes to the log and to the in-memory journal
    pub fn new(token: MemoryToken, clock: impl Clock + Send + 'static, roles: Roles) -> Self {
        let events = MemoryEventLog::new();
        let sink = FanoutSink::new().with(TracingSink).with(events.clone());
        let clock: Box<dyn Clock + Send> = Box::new(clock);
        let distributor = RebateDistributor::new(token, clock, roles).with_sink(sink);

        AppState {
            distributor: Arc::new(Mutex::new(distributor)),
            events,
            reporter: Arc::new(MemoryReporter::new()),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let token = config.build_token()?;
        let roles = Roles::new(
            config.owner.clone(),
            config.operator.clone(),
            config.payer.clone(),
        );
        Ok(Self::new(token, SystemClock, roles))
    }

    pub fn distributor(&self) -> Result<MutexGuard<'_, ServiceDistributor>, ApiError> {
        self.distributor
            .lock()
            .map_err(|_| ApiError::Internal("distributor lock poisoned".to_string()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        let config = ServiceConfig::default();
        let roles = Roles::new(config.owner, config.operator, config.payer);
        Self::new(MemoryToken::new(config.custody), SystemClock, roles)
    }
}
