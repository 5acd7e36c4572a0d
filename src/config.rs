//! Environment-derived configuration.
//!
//! Every key is read from the process environment (after `.env` is loaded by
//! the binary). Keys are matched case-insensitively; unset keys fall back to
//! the defaults in [`Config::default`].

use figment::{Figment, providers::Env};
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;

use crate::middleware::auth::AdminCredentials;

/// Keys picked out of the environment; anything else is ignored.
const ENV_KEYS: &[&str] = &[
    "ADMIN_USERNAME",
    "ADMIN_PASSWORD",
    "DB_ENDPOINT",
    "DB_USERNAME",
    "DB_PASSWORD",
    "DB_NAME",
    "DATABASE_URL",
    "BACKUP_CONTAINER",
    "STORAGE_ACCOUNT_NAME",
    "LAST_BACKUP_UTC",
    "PENDING_UPLOADS",
    "LISTEN_ADDR",
    "LOGLEVEL",
];

/// The board API's names for the database login. Read as `DB_USERNAME` /
/// `DB_PASSWORD`, which take precedence when both spellings are set.
const BOARD_ENV_KEYS: &[&str] = &["DB_APP_USERNAME", "DB_APP_PASSWORD"];

const DEFAULT_MYSQL_PORT: u16 = 3306;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub admin_username: String,
    pub admin_password: String,
    pub db_endpoint: String,
    pub db_username: String,
    pub db_password: String,
    pub db_name: String,
    /// Full sqlx URL; takes precedence over the `db_*` parts when set.
    pub database_url: Option<String>,
    pub backup_container: String,
    pub storage_account_name: Option<String>,
    pub last_backup_utc: String,
    pub pending_uploads: i64,
    pub listen_addr: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "changeme".to_string(),
            db_endpoint: "mysql.internal:3306".to_string(),
            db_username: String::new(),
            db_password: String::new(),
            db_name: "boardapp".to_string(),
            database_url: None,
            backup_container: "mysql-backup".to_string(),
            storage_account_name: None,
            last_backup_utc: "unknown".to_string(),
            pending_uploads: 0,
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

/// Where the message table lives.
#[derive(Debug, Clone)]
pub enum DatabaseTarget {
    MySql(MySqlConnectOptions),
    Sqlite(String),
}

impl Config {
    pub fn from_env() -> Result<Self, figment::Error> {
        let board = Env::raw()
            .only(BOARD_ENV_KEYS)
            .map(|key| key.as_str().to_ascii_lowercase().replacen("db_app_", "db_", 1).into());
        Self::from_figment(Figment::new().merge(board).merge(Env::raw().only(ENV_KEYS)))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        let mut cfg: Config = figment.extract()?;
        // Treat blank optional values as unset.
        cfg.database_url = cfg.database_url.filter(|s| !s.trim().is_empty());
        cfg.storage_account_name = cfg.storage_account_name.filter(|s| !s.trim().is_empty());
        Ok(cfg)
    }

    pub fn admin_credentials(&self) -> AdminCredentials {
        AdminCredentials::new(&self.admin_username, &self.admin_password)
    }

    /// Split `db_endpoint` into host and port; the port defaults to 3306.
    pub fn db_host_port(&self) -> (String, u16) {
        let endpoint = self.db_endpoint.trim();
        match endpoint.rsplit_once(':') {
            Some((host, port)) => match port.parse::<u16>() {
                Ok(port) => (host.to_string(), port),
                Err(_) => (endpoint.to_string(), DEFAULT_MYSQL_PORT),
            },
            None => (endpoint.to_string(), DEFAULT_MYSQL_PORT),
        }
    }

    pub fn database_target(&self) -> Result<DatabaseTarget, sqlx::Error> {
        if let Some(url) = self.database_url.as_deref() {
            if url.starts_with("sqlite:") {
                return Ok(DatabaseTarget::Sqlite(url.to_string()));
            }
            return Ok(DatabaseTarget::MySql(url.parse()?));
        }

        let (host, port) = self.db_host_port();
        let opts = MySqlConnectOptions::new()
            .host(&host)
            .port(port)
            .username(&self.db_username)
            .password(&self.db_password)
            .database(&self.db_name);
        Ok(DatabaseTarget::MySql(opts))
    }
}
