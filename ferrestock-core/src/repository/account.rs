use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::{
    models::{Account, NewAccount},
    Result,
};

/// What account seeding needs from storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Total number of rows in `usuarios`
    async fn count(&self) -> Result<i64>;

    /// Insert one account and return its id
    async fn insert(&self, account: &NewAccount) -> Result<u64>;
}

/// Account repository backed by the shared MySQL handle
#[derive(Clone)]
pub struct AccountRepository {
    pool: MySqlPool,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Get account by login name
    pub async fn get_by_login(&self, login: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r"
            SELECT id, nombre, usuario, clave, rol
            FROM usuarios
            WHERE usuario = ?
            ",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) AS total FROM usuarios")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn insert(&self, account: &NewAccount) -> Result<u64> {
        let result = sqlx::query(
            r"
            INSERT INTO usuarios (nombre, usuario, clave, rol)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(&account.display_name)
        .bind(&account.login)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id())
    }
}
