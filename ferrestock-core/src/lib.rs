pub mod bootstrap;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod models;
pub mod repository;
pub mod service;

pub use bootstrap::Database;
pub use config::Config;
pub use error::{Error, Result};
pub use health::{test_connection, HealthReport, HealthStatus};
