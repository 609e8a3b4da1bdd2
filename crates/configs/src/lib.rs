use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Where uploaded files go and how access URLs are signed.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// `local` writes objects under `local_root`; `memory` keeps them in process.
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default)]
    pub account_name: String,
    /// Base64 shared key used to sign access URLs.
    #[serde(default)]
    pub account_key: String,
    #[serde(default = "default_container")]
    pub container: String,
    /// Public endpoint objects are served from, e.g. `https://acct.blob.core.windows.net`.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_local_root")]
    pub local_root: String,
    #[serde(default = "default_sas_expiry")]
    pub sas_expiry_minutes: i64,
}

fn default_backend() -> String { "local".into() }
fn default_container() -> String { "care-files".into() }
fn default_local_root() -> String { "data/blobs".into() }
fn default_sas_expiry() -> i64 { 10 }

/// Longest signed-URL lifetime the blob service accepts (7 days).
pub const MAX_SAS_EXPIRY_MINUTES: i64 = 7 * 24 * 60;

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            account_name: String::new(),
            account_key: String::new(),
            container: default_container(),
            endpoint: String::new(),
            local_root: default_local_root(),
            sas_expiry_minutes: default_sas_expiry(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String { "compact".into() }

impl Default for LoggingConfig {
    fn default() -> Self { Self { format: default_log_format() } }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to an all-default
    /// config filled from the environment when the file is missing.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.database.normalize_from_env();
        self.database.validate()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgres:// or postgresql://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if self.account_key.trim().is_empty() {
            if let Ok(key) = std::env::var("STORAGE_ACCOUNT_KEY") {
                self.account_key = key;
            }
        }
        if self.endpoint.trim().is_empty() && !self.account_name.trim().is_empty() {
            self.endpoint = format!("https://{}.blob.core.windows.net", self.account_name.trim());
        }
        self.endpoint = self.endpoint.trim_end_matches('/').to_string();
        self.backend = self.backend.trim().to_ascii_lowercase();
    }

    pub fn validate(&self) -> Result<()> {
        if !matches!(self.backend.as_str(), "local" | "memory") {
            return Err(anyhow!("storage.backend must be `local` or `memory`, got `{}`", self.backend));
        }
        if self.container.trim().is_empty() {
            return Err(anyhow!("storage.container is empty"));
        }
        if self.sas_expiry_minutes <= 0 || self.sas_expiry_minutes > MAX_SAS_EXPIRY_MINUTES {
            return Err(anyhow!("storage.sas_expiry_minutes must be between 1 and {MAX_SAS_EXPIRY_MINUTES}"));
        }
        if !self.endpoint.trim().is_empty() && self.account_name.trim().is_empty() {
            return Err(anyhow!("storage.account_name is required when storage.endpoint is set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg = parse("[database]\nurl = \"postgres://u:p@localhost/care\"\n").unwrap();
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.storage.sas_expiry_minutes, 10);
        assert_eq!(cfg.storage.backend, "local");
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn endpoint_is_derived_from_account_name() {
        let mut cfg = parse(
            "[database]\nurl = \"postgres://localhost/care\"\n[storage]\naccount_name = \"carestore\"\naccount_key = \"a2V5\"\n",
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.storage.endpoint, "https://carestore.blob.core.windows.net");
    }

    #[test]
    fn rejects_unknown_backend_and_bad_expiry() {
        let mut s = StorageConfig { backend: "s3".into(), ..StorageConfig::default() };
        s.normalize_from_env();
        assert!(s.validate().is_err());

        let s = StorageConfig { sas_expiry_minutes: 0, ..StorageConfig::default() };
        assert!(s.validate().is_err());

        let s = StorageConfig { sas_expiry_minutes: 1_000_000_000_000, ..StorageConfig::default() };
        assert!(s.validate().is_err());
        let s = StorageConfig { sas_expiry_minutes: MAX_SAS_EXPIRY_MINUTES, ..StorageConfig::default() };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn endpoint_without_account_name_is_rejected() {
        let mut s = StorageConfig { endpoint: "https://carestore.blob.core.windows.net/".into(), ..StorageConfig::default() };
        s.normalize_from_env();
        assert!(s.validate().is_err());

        s.account_name = "carestore".into();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn only_postgres_urls_are_accepted() {
        let db = DatabaseConfig { url: "mysql://localhost".into(), min_connections: 1, max_connections: 2, connect_timeout_secs: 1, acquire_timeout_secs: 1, ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
        let db = DatabaseConfig { url: "sqlite::memory:".into(), ..db };
        assert!(db.validate().is_err());
        let db = DatabaseConfig { url: "postgres://u:p@localhost/care".into(), ..db };
        assert!(db.validate().is_ok());
    }
}
