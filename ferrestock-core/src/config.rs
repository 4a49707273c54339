use config::{Config as ConfigBuilder, ConfigError, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Password seeded into the first administrator account unless overridden
pub const DEFAULT_ADMIN_PASSWORD: &str = "123456";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub bootstrap: BootstrapConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// MySQL connection parameters
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub charset: String,
    pub max_connections: u32,
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            name: "ferrestock".to_string(),
            user: "root".to_string(),
            password: String::new(),
            charset: "utf8mb4".to_string(),
            max_connections: 5,
            connect_timeout_seconds: 10,
        }
    }
}

impl DatabaseConfig {
    /// Connection descriptor in `mysql:host=H;port=P;dbname=D;charset=C` form.
    ///
    /// Credentials are never part of the descriptor, so it is safe to log.
    #[must_use]
    pub fn dsn(&self) -> String {
        format!(
            "mysql:host={};port={};dbname={};charset={}",
            self.host, self.port, self.name, self.charset
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("charset", &self.charset)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish()
    }
}

/// First-start seeding of the accounts and category tables
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub create_admin: bool,
    pub admin_display_name: String,
    pub admin_login: String,
    pub admin_password: String,
    pub seed_categories: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            create_admin: true,
            admin_display_name: "Administrador".to_string(),
            admin_login: "admin".to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            seed_categories: true,
        }
    }
}

impl BootstrapConfig {
    #[must_use]
    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

impl fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("create_admin", &self.create_admin)
            .field("admin_display_name", &self.admin_display_name)
            .field("admin_login", &self.admin_login)
            .field("admin_password", &"<redacted>")
            .field("seed_categories", &self.seed_categories)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        Self::build(config_file, None)
    }

    /// Load from environment variables only (for Docker/K8s)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// `env` replaces the process environment when given.
    fn build(
        config_file: Option<&str>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // FERRESTOCK__DATABASE__HOST, FERRESTOCK__BOOTSTRAP__ADMIN_PASSWORD, ...
        builder = builder.add_source(
            Environment::with_prefix("FERRESTOCK")
                .separator("__")
                .source(env),
        );

        builder.build()?.try_deserialize()
    }

    /// Collect every misconfiguration instead of stopping at the first one
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        }
        if self.server.port == 0 {
            errors.push("server.port must be greater than 0".to_string());
        }
        if self.database.host.trim().is_empty() {
            errors.push("database.host must not be empty".to_string());
        }
        if self.database.port == 0 {
            errors.push("database.port must be greater than 0".to_string());
        }
        if self.database.name.trim().is_empty() {
            errors.push("database.name must not be empty".to_string());
        }
        if self.database.charset.trim().is_empty() {
            errors.push("database.charset must not be empty".to_string());
        }
        if self.database.max_connections == 0 {
            errors.push("database.max_connections must be greater than 0".to_string());
        }
        if self.bootstrap.create_admin && self.bootstrap.admin_login.trim().is_empty() {
            errors.push("bootstrap.admin_login must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    #[must_use]
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_match_bundled_constants() {
        let config = Config::default();

        assert_eq!(config.database.host, "127.0.0.1");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.name, "ferrestock");
        assert_eq!(config.database.user, "root");
        assert!(config.database.password.is_empty());
        assert_eq!(config.database.charset, "utf8mb4");
        assert_eq!(config.bootstrap.admin_login, "admin");
        assert_eq!(config.bootstrap.admin_display_name, "Administrador");
        assert!(config.bootstrap.uses_default_password());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dsn_field_order() {
        let database = DatabaseConfig {
            host: "db.internal".to_string(),
            port: 3307,
            name: "inventario".to_string(),
            charset: "latin1".to_string(),
            password: "s3cret".to_string(),
            ..DatabaseConfig::default()
        };

        let dsn = database.dsn();
        assert_eq!(
            dsn,
            "mysql:host=db.internal;port=3307;dbname=inventario;charset=latin1"
        );
        assert!(!dsn.contains("s3cret"));
    }

    #[test]
    fn test_default_dsn() {
        assert_eq!(
            DatabaseConfig::default().dsn(),
            "mysql:host=127.0.0.1;port=3306;dbname=ferrestock;charset=utf8mb4"
        );
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let config = Config::default();
        let rendered = format!("{config:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains(DEFAULT_ADMIN_PASSWORD));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::build(
            None,
            Some(env(&[
                ("FERRESTOCK__DATABASE__HOST", "db.internal"),
                ("FERRESTOCK__DATABASE__PORT", "3307"),
                ("FERRESTOCK__DATABASE__MAX_CONNECTIONS", "2"),
                ("FERRESTOCK__BOOTSTRAP__SEED_CATEGORIES", "false"),
            ])),
        )
        .unwrap();

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 3307);
        assert_eq!(config.database.max_connections, 2);
        assert!(!config.bootstrap.seed_categories);
        // untouched keys keep their defaults
        assert_eq!(config.database.name, "ferrestock");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_env_strings_are_kept_verbatim() {
        let config = Config::build(
            None,
            Some(env(&[
                ("FERRESTOCK__DATABASE__PASSWORD", "0123"),
                ("FERRESTOCK__DATABASE__USER", "007"),
                ("FERRESTOCK__BOOTSTRAP__ADMIN_PASSWORD", "1.50"),
                ("FERRESTOCK__BOOTSTRAP__ADMIN_LOGIN", "true"),
            ])),
        )
        .unwrap();

        assert_eq!(config.database.password, "0123");
        assert_eq!(config.database.user, "007");
        assert_eq!(config.bootstrap.admin_password, "1.50");
        assert_eq!(config.bootstrap.admin_login, "true");
        assert!(!config.bootstrap.uses_default_password());
    }

    #[test]
    fn test_file_then_env_priority() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "database:\n  name: from_file\n  host: file-host\nserver:\n  port: 9090"
        )
        .unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let config = Config::build(
            Some(path.as_str()),
            Some(env(&[("FERRESTOCK__DATABASE__HOST", "env-host")])),
        )
        .unwrap();

        assert_eq!(config.database.name, "from_file");
        assert_eq!(config.database.host, "env-host");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let config = Config::build(Some("/nonexistent/ferrestock.yaml"), Some(Map::new())).unwrap();
        assert_eq!(config.database.port, 3306);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = Config::default();
        config.database.host = String::new();
        config.database.port = 0;
        config.database.max_connections = 0;
        config.bootstrap.admin_login = " ".to_string();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("database.host")));
        assert!(errors.iter().any(|e| e.contains("bootstrap.admin_login")));
    }

    #[test]
    fn test_admin_login_not_required_when_seeding_disabled() {
        let mut config = Config::default();
        config.bootstrap.create_admin = false;
        config.bootstrap.admin_login = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_address() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8081,
            },
            ..Config::default()
        };
        assert_eq!(config.http_address(), "127.0.0.1:8081");
    }
}
