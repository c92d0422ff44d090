// ============================
// auth-backend/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Environment variable prefix; nested keys use `__`, e.g. `AUTH_SERVICE_JWT__SECRET`.
pub const ENV_PREFIX: &str = "AUTH_SERVICE_";

/// Shortest HMAC secret accepted for signing tokens.
pub const MIN_JWT_SECRET_LEN: usize = 32;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub jwt: JwtSettings,
    pub hashing: HashingSettings,
    /// Default tracing level when `RUST_LOG` is not set
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Which credential store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// SQLite database file, ignored by the memory backend
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    /// HMAC secret; has no default and must be supplied
    pub secret: String,
    /// Token lifetime in seconds
    pub ttl_secs: u64,
    /// Optional `iss` claim
    pub issuer: Option<String>,
}

/// scrypt cost parameters used for new password hashes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HashingSettings {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            jwt: JwtSettings::default(),
            hashing: HashingSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            path: PathBuf::from("data/users.db"),
        }
    }
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_secs: 60 * 60 * 24, // 24 hours
            issuer: None,
        }
    }
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            log_n: scrypt::Params::RECOMMENDED_LOG_N,
            r: scrypt::Params::RECOMMENDED_R,
            p: scrypt::Params::RECOMMENDED_P,
        }
    }
}

impl HashingSettings {
    /// Convert to scrypt parameters, rejecting impossible combinations.
    pub fn params(&self) -> Result<scrypt::Params, AppError> {
        scrypt::Params::new(self.log_n, self.r, self.p, scrypt::Params::RECOMMENDED_LEN)
            .map_err(|e| AppError::Config(format!("invalid scrypt parameters: {e}")))
    }
}

impl Settings {
    /// Load settings from `config.{toml,yaml,json}` in the working directory
    /// and the environment.
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"))
            .merge(Yaml::file("config.yaml"))
            .merge(Json::file("config.json"));

        Self::extract(figment)
    }

    /// Load settings from an explicit file, still honouring the environment.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        let figment = Figment::from(Serialized::defaults(Settings::default()));
        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => figment.merge(Toml::file(path)),
        };

        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self> {
        let settings: Settings = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(settings)
    }

    /// Socket address the HTTP server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid bind address: {e}")))
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "unknown log level `{}`",
                self.log_level
            )));
        }

        if self.server.port == 0 {
            return Err(AppError::Config("server port must not be 0".to_string()));
        }
        self.bind_addr()?;

        if self.jwt.secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::Config(format!(
                "jwt secret must be at least {MIN_JWT_SECRET_LEN} bytes"
            )));
        }

        if self.jwt.ttl_secs == 0 {
            return Err(AppError::Config("jwt ttl must be positive".to_string()));
        }

        self.hashing.params()?;

        Ok(())
    }
}
