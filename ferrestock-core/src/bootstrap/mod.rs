//! Start-up of the data layer
//!
//! - Configuration loading
//! - Building the shared connection handle
//! - Admin account bootstrap (first administrator)
//! - Default category seeding

pub mod catalog;
pub mod config;
pub mod database;
pub mod user;

pub use catalog::{ensure_default_categories, DEFAULT_CATEGORIES};
pub use config::load_config;
pub use database::Database;
pub use user::{ensure_default_admin, AdminSeed};
