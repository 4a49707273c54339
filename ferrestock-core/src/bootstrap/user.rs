//! Bootstrap of the first administrator account

use tracing::{info, warn};

use crate::{
    config::BootstrapConfig,
    models::{AccountRole, NewAccount},
    repository::AccountStore,
    service::auth::hash_password,
    Result,
};

/// Outcome of [`ensure_default_admin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSeed {
    /// The accounts table was empty and the administrator was inserted
    Created { id: u64 },
    /// The accounts table already had rows; nothing was written
    Skipped { existing: i64 },
    /// `bootstrap.create_admin` is off
    Disabled,
}

/// Create the administrator account if the accounts table is empty
///
/// Only an empty table triggers the insert, so this is a no-op on every
/// start after the first. Failures from the count or the insert are
/// returned as-is.
pub async fn ensure_default_admin<S>(store: &S, config: &BootstrapConfig) -> Result<AdminSeed>
where
    S: AccountStore + ?Sized,
{
    if !config.create_admin {
        info!("Admin account bootstrap disabled in config");
        return Ok(AdminSeed::Disabled);
    }

    let existing = store.count().await?;
    if existing != 0 {
        info!(existing, "Accounts already present, skipping admin bootstrap");
        return Ok(AdminSeed::Skipped { existing });
    }

    info!("Creating admin account '{}'...", config.admin_login);

    let account = NewAccount {
        display_name: config.admin_display_name.clone(),
        login: config.admin_login.clone(),
        password_hash: hash_password(&config.admin_password).await?,
        role: AccountRole::Admin,
    };
    let id = store.insert(&account).await?;

    info!(id, login = %account.login, "Admin account created");

    if config.uses_default_password() {
        warn!("Admin password is the built-in default; change it after the first login");
        warn!("Set FERRESTOCK__BOOTSTRAP__ADMIN_PASSWORD to seed a different password");
    }

    Ok(AdminSeed::Created { id })
}
