pub mod api;
pub mod config;
pub mod consul;
pub mod error;
pub mod health;
pub mod nomad;
pub mod poller;

pub use config::Configuration;
pub use error::{ApiError, CheckFailure, ConfigError};
pub use health::{HealthChecker, HealthState};
pub use poller::Poller;
