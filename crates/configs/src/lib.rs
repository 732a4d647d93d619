use std::{net::IpAddr, path::PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::warn;

pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    /// Unset falls back to `SERVER_PORT`, then 8000; an explicit 0 is rejected.
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: String::new(), port: None, worker_threads: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON document holding site content, products and messages.
    #[serde(default)]
    pub data_path: PathBuf,
    /// Directory product images are written to and served from under `/uploads`.
    #[serde(default)]
    pub upload_dir: PathBuf,
    /// Optional frontend directory served for unmatched routes.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::new(),
            upload_dir: PathBuf::new(),
            static_dir: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default)]
    pub admin_username: String,
    #[serde(default)]
    pub admin_password: Option<String>,
    /// Argon2 PHC string; takes precedence over `admin_password`.
    #[serde(default)]
    pub admin_password_hash: Option<String>,
}

fn default_max_upload_bytes() -> usize { 10 * 1024 * 1024 }

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (or `config.toml`), falling back to an all-default config
    /// when the file is absent, then fill blanks from the environment.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize()?;
        self.auth.normalize()?;
        Ok(())
    }

    /// `host:port`, with IPv6 literals bracketed (`[::1]:8000`).
    pub fn bind_addr(&self) -> String {
        let port = self.server.port.unwrap_or_default();
        match self.server.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{ip}]:{port}"),
            _ => format!("{}:{}", self.server.host, port),
        }
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = env_nonempty("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        }
        if self.port.is_none() {
            self.port = Some(match env_nonempty("SERVER_PORT") {
                Some(p) => p.parse::<u16>().map_err(|_| anyhow!("SERVER_PORT must be in 1..=65535"))?,
                None => 8000,
            });
        }
        if self.port == Some(0) {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads.is_none() {
            self.worker_threads = env_nonempty("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok());
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            self.data_path = env_nonempty("DATA_PATH").unwrap_or_else(|| "data/data.json".into()).into();
        }
        if self.upload_dir.as_os_str().is_empty() {
            self.upload_dir = env_nonempty("UPLOAD_DIR").unwrap_or_else(|| "uploads".into()).into();
        }
        if self.static_dir.is_none() {
            self.static_dir = env_nonempty("STATIC_DIR").map(PathBuf::from);
        }
        if self.max_upload_bytes == 0 {
            return Err(anyhow!("storage.max_upload_bytes must be > 0"));
        }
        Ok(())
    }
}

impl AuthConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            self.jwt_secret = match env_nonempty("JWT_SECRET") {
                Some(s) => s,
                None => {
                    warn!("JWT_SECRET not set; using development secret");
                    DEV_JWT_SECRET.to_string()
                }
            };
        }
        if self.admin_username.trim().is_empty() {
            self.admin_username = env_nonempty("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string());
        }
        if self.admin_password_hash.as_deref().map_or(true, |h| h.trim().is_empty()) {
            self.admin_password_hash = env_nonempty("ADMIN_PASSWORD_HASH");
        }
        if self.admin_password.as_deref().map_or(true, str::is_empty) {
            self.admin_password = std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());
        }
        if self.admin_password_hash.is_none() && self.admin_password.is_none() {
            return Err(anyhow!("auth.admin_password or auth.admin_password_hash is required (env ADMIN_PASSWORD / ADMIN_PASSWORD_HASH)"));
        }
        Ok(())
    }
}
