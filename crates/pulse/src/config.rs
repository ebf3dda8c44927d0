//! Configuration management for pulse.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (PULSE_*, ANTHROPIC_API_KEY)
//! 2. Config file (PULSE_CONFIG or <data dir>/config.toml)
//! 3. Default values

use directories::ProjectDirs;
use pulse_core::client::{
    ClientConfig, DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use pulse_core::orchestrator::OrchestratorConfig;
use pulse_core::RegionCatalog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PulseError, PulseResult};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Insight service settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Refresh sequencing settings
    #[serde(default)]
    pub refresh: RefreshConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Messages endpoint URL
    #[serde(default = "default_api_url")]
    pub url: String,

    /// API key for authentication
    pub api_key: Option<String>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Completion budget per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Pause between region fetches in milliseconds
    #[serde(default = "default_region_delay")]
    pub region_delay_ms: u64,

    /// Interval between full refreshes in watch mode
    #[serde(default = "default_watch_interval")]
    pub watch_interval_secs: u64,

    /// Restrict the dashboard to these region codes
    pub regions: Option<Vec<String>>,
}

// Default value functions
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_region_delay() -> u64 {
    1500
}

fn default_watch_interval() -> u64 {
    900 // 15 minutes
}

fn default_data_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "market-pulse", "pulse") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".market-pulse")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            region_delay_ms: default_region_delay(),
            watch_interval_secs: default_watch_interval(),
            regions: None,
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> PulseResult<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if it is absent.
    pub fn load_from(path: &Path) -> PulseResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Apply environment overrides using the given lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PULSE_API_URL") {
            self.api.url = url;
        }
        if let Some(key) = lookup("PULSE_API_KEY").or_else(|| lookup("ANTHROPIC_API_KEY")) {
            self.api.api_key = Some(key);
        }
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("PULSE_CONFIG") {
            PathBuf::from(path)
        } else {
            default_data_dir().join("config.toml")
        }
    }

    /// Settings for the insight client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            url: self.api.url.clone(),
            api_key: self.api.api_key.clone(),
            model: self.api.model.clone(),
            max_tokens: self.api.max_tokens,
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }

    /// Settings for the fetch orchestrator.
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            region_delay: Duration::from_millis(self.refresh.region_delay_ms),
        }
    }

    /// Region catalog, restricted to the configured subset if any.
    pub fn catalog(&self) -> PulseResult<RegionCatalog> {
        match &self.refresh.regions {
            Some(codes) => Ok(RegionCatalog::only(codes.as_slice())?),
            None => Ok(RegionCatalog::default()),
        }
    }

    /// Watch mode interval, with an override from the command line.
    pub fn watch_interval(&self, override_secs: Option<u64>) -> PulseResult<Duration> {
        let secs = override_secs.unwrap_or(self.refresh.watch_interval_secs);
        if secs == 0 {
            return Err(PulseError::Config(
                "watch interval must be at least one second".to_string(),
            ));
        }
        Ok(Duration::from_secs(secs))
    }
}
