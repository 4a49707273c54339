pub mod account;

pub use account::{AccountRepository, AccountStore};

#[cfg(test)]
pub use account::MockAccountStore;
