use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENDPOINT_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}; set it in your shell or .env")]
    MissingVar(&'static str),

    #[error("SUPABASE_URL must be an http(s) URL, got {0:?}")]
    InvalidEndpoint(String),
}

/// Project endpoint and anonymous access key. Both are required.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub endpoint: String,
    pub anon_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let endpoint = require(ENDPOINT_VAR)?;
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }
        let anon_key = require(ANON_KEY_VAR)?;

        log::info!("Store endpoint: {endpoint}");
        log::info!("Anon key: present");
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}

/// Feed settings, read from ~/.config/update-feed/config.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Table holding the update rows
    pub table: String,
    /// Exact `name` value of the updates to show
    pub label: String,
    /// Public storage bucket for relative audio keys
    pub audio_bucket: String,
    pub page_size: usize,
    pub refresh_minutes: u64,
    /// Sent as `x-application-name`
    pub application_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: "completed_clips".into(),
            label: "Pope Updates".into(),
            audio_bucket: "audio-clips".into(),
            page_size: 5,
            refresh_minutes: 15,
            application_name: "pope-updates".into(),
        }
    }
}

impl Config {
    /// Directory: ~/.config/update-feed/
    pub fn dir() -> PathBuf {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("update-feed");
        p
    }

    fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from disk, returning defaults if file doesn't exist or is invalid.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        let mut config: Self = match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid config {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        if config.page_size == 0 {
            log::warn!("page_size must be positive, using default");
            config.page_size = Self::default().page_size;
        }
        if config.label.trim().is_empty() {
            log::warn!("label must not be blank, using default");
            config.label = Self::default().label;
        }
        config
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_minutes.max(1).saturating_mul(60))
    }
}
