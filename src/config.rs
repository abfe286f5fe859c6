//! Service configuration.
//!
//! Every field has a default, so the service runs with no configuration at
//! all. A TOML file named by `TRELLIS_CONFIG` overrides the defaults, and the
//! `TRELLIS_BIND` / `TRELLIS_DATA_DIR` environment variables override the file.
//!
//! ```toml
//! bind = "127.0.0.1:8080"
//!
//! [session]
//! cookie_name = "session"
//! ttl_secs = 86400
//! sweep_interval_secs = 300
//!
//! [guard]
//! protected_prefix = "/dashboard"
//! login_path = "/login"
//!
//! [storage]
//! data_dir = "./data"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const CONFIG_ENV: &str = "TRELLIS_CONFIG";
pub const BIND_ENV: &str = "TRELLIS_BIND";
pub const DATA_DIR_ENV: &str = "TRELLIS_DATA_DIR";

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bind: String,
    pub session: SessionConfig,
    pub guard: GuardConfig,
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    pub protected_prefix: String,
    pub login_path: String,
}

/// Where repositories keep their data. Without a `data_dir` everything lives
/// in memory and is lost on restart.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".into(),
            session: SessionConfig::default(),
            guard: GuardConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".into(),
            ttl_secs: 60 * 60 * 24,
            sweep_interval_secs: 300,
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            protected_prefix: "/dashboard".into(),
            login_path: "/login".into(),
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Config {
    /// Loads the file named by `TRELLIS_CONFIG` (if set), then applies
    /// environment overrides.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = Self::load(path.as_deref())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` as TOML, or returns the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `TRELLIS_BIND` and `TRELLIS_DATA_DIR` as returned by `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = lookup(BIND_ENV) {
            self.bind = bind;
        }
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|_| Error::InvalidAddress(self.bind.clone()))
    }

    /// Rejects settings that would leave the service unusable.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if self.session.cookie_name.is_empty() {
            return Err(Error::Config("session.cookie_name must not be empty".into()));
        }
        if self.session.ttl_secs == 0 {
            return Err(Error::Config("session.ttl_secs must be positive".into()));
        }
        if self.session.sweep_interval_secs == 0 {
            return Err(Error::Config("session.sweep_interval_secs must be positive".into()));
        }
        let guard = &self.guard;
        if !guard.protected_prefix.starts_with('/') || !guard.login_path.starts_with('/') {
            return Err(Error::Config("guard paths must start with `/`".into()));
        }
        // A login page behind the guard would redirect to itself forever.
        if guard.login_path.starts_with(&guard.protected_prefix) {
            return Err(Error::Config(format!(
                "guard.login_path `{}` is inside protected prefix `{}`",
                guard.login_path, guard.protected_prefix,
            )));
        }
        Ok(())
    }
}
