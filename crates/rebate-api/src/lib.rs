//! HTTP surface over a single in-process rebate distributor.

mod config;
mod error;
mod handlers;
mod server;
mod state;

pub use config::{ConfigError, InitialBalance, ServiceConfig, CONFIG_ENV, BIND_ADDR_ENV};
pub use error::ApiError;
pub use server::create_app;
pub use state::{AppState, ServiceDistributor};
