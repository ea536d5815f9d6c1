//! Runtime configuration
//!
//! Everything comes from the environment. The database connection string may
//! also be provided as a secret file, and is never defaulted.

use std::{env, fmt::Display, fs::read_to_string, path::{Path, PathBuf}, str::FromStr};

use log::{info, warn};
use thiserror::Error;

const SECRETS_DIR: &str = "/run/secrets";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(String),

    #[error("Invalid {key} value: {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    /// Load from process environment and `/run/secrets`
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok(), Path::new(SECRETS_DIR))
    }

    /// Load from an arbitrary variable lookup and secrets directory
    pub fn from_source<F>(lookup: F, secrets_dir: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: try_load(&lookup, "HOST", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", "8000")?,
            database_url: require_secret(&lookup, secrets_dir, "DATABASE_URL")?,
            log_dir: try_load(&lookup, "TODO_LOG_DIR", "logs")?,
            static_dir: try_load(&lookup, "TODO_STATIC_DIR", "public")?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key: key.to_string(),
                message: e.to_string(),
            }
        })
}

/// Environment first, then `<secrets_dir>/<key>`
fn require_secret<F>(lookup: &F, secrets_dir: &Path, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
        return Ok(value.trim().to_string());
    }

    let path = secrets_dir.join(key);
    match read_to_string(&path) {
        Ok(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Ok(_) => Err(ConfigError::Missing(key.to_string())),
        Err(e) => {
            warn!("Failed to read {key} from {}: {e}", path.display());
            Err(ConfigError::Missing(key.to_string()))
        }
    }
}
