pub mod auth;

pub use auth::{hash_password, verify_password};
