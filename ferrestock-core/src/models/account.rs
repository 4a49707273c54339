use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role tag stored in `usuarios.rol`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Admin,
    /// Regular staff account, stored as the column default `usuario`
    User,
}

impl AccountRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "usuario",
        }
    }
}

impl FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "usuario" | "user" => Ok(Self::User),
            _ => Err(format!("Unknown account role: {s}")),
        }
    }
}

impl TryFrom<String> for AccountRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of `usuarios`, decoded by column name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    #[sqlx(rename = "nombre")]
    pub display_name: String,
    #[sqlx(rename = "usuario")]
    pub login: String,
    #[sqlx(rename = "clave")]
    pub password_hash: String,
    #[sqlx(rename = "rol", try_from = "String")]
    pub role: AccountRole,
}

/// Column values for a row about to be inserted into `usuarios`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub display_name: String,
    pub login: String,
    pub password_hash: String,
    pub role: AccountRole,
}
