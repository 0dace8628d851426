use rebate_ledger::{MemoryToken, TokenError};
use rebate_types::{AccountId, Amount, RebateError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Path of a JSON config file
pub const CONFIG_ENV: &str = "REBATE_CONFIG";
/// Overrides `bind_addr`
pub const BIND_ADDR_ENV: &str = "REBATE_BIND_ADDR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid balance for {account}: {source}")]
    Balance {
        account: AccountId,
        source: RebateError,
    },

    #[error("cannot mint initial balances: {0}")]
    Mint(#[from] TokenError),
}

/// Configuration for the distributor service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the HTTP server listens on
    pub bind_addr: String,

    pub owner: AccountId,
    pub operator: AccountId,
    pub payer: AccountId,

    /// Account holding deposited rebate funds
    pub custody: AccountId,

    /// Balances minted into the in-memory asset at startup
    pub initial_balances: Vec<InitialBalance>,

    /// Used when `RUST_LOG` is unset
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialBalance {
    pub account: AccountId,
    /// Decimal string, e.g. "1000.5"
    pub amount: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            owner: AccountId::new("owner"),
            operator: AccountId::new("operator"),
            payer: AccountId::new("payer"),
            custody: AccountId::new("rebate-distributor"),
            initial_balances: vec![InitialBalance {
                account: AccountId::new("payer"),
                amount: "1000000".to_string(),
            }],
            log_filter: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Read `REBATE_CONFIG` if set, otherwise defaults, then apply
    /// `REBATE_BIND_ADDR`
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                let raw = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Self::from_json_str(&raw)?
            }
            None => Self::default(),
        };

        if let Ok(addr) = std::env::var(BIND_ADDR_ENV) {
            config.bind_addr = addr;
        }
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Build the in-memory asset with every initial balance minted
    pub fn build_token(&self) -> Result<MemoryToken, ConfigError> {
        let mut token = MemoryToken::new(self.custody.clone());
        for balance in &self.initial_balances {
            let amount = Amount::from_decimal_str(&balance.amount).map_err(|source| {
                ConfigError::Balance {
                    account: balance.account.clone(),
                    source,
                }
            })?;
            token.mint(&balance.account, amount)?;
        }
        Ok(token)
    }
}
