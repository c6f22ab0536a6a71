// Application configuration
//
// Loaded from ~/.propertyscope/config.toml when present; every field has a
// default so the server runs with no config file at all. The repair-cost
// bands and risk thresholds are data here rather than constants in the
// classifier, so deployments can tune them without a rebuild.

mod secrets;

pub use secrets::SecretsConfig;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::CostRange;

/// Default Anthropic messages API endpoint
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.anthropic.com";

/// Default model used for chat and analysis requests
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Environment variable consulted for the provider credential
pub const API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

/// Provider id the credential is stored under in the secrets file
pub const PROVIDER_ID: &str = "anthropic";

/// Connection settings for the hosted text-generation provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL for the messages API
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Maximum tokens requested per completion
    pub max_tokens: u32,
    /// API key; resolved from env or secrets file when absent here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
            api_key: None,
        }
    }
}

impl ProviderConfig {
    /// Whether a credential is available for live provider calls
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().map_or(false, |k| !k.is_empty())
    }
}

/// Repair-cost bands used by the status classifier.
///
/// The numbers are illustrative presentation constants carried over from the
/// product copy, not actuarial estimates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CostSchedule {
    pub critical_roof: CostRange,
    pub critical_foundation: CostRange,
    pub critical_electrical_panel: CostRange,
    pub critical_hvac: CostRange,
    pub critical_water_heater: CostRange,
    pub critical_default: CostRange,
    pub warning_roof: CostRange,
    pub warning_default: CostRange,
}

impl Default for CostSchedule {
    fn default() -> Self {
        Self {
            critical_roof: CostRange::new(8000, 15000),
            critical_foundation: CostRange::new(15000, 30000),
            critical_electrical_panel: CostRange::new(2500, 4000),
            critical_hvac: CostRange::new(5000, 8000),
            critical_water_heater: CostRange::new(1200, 2500),
            critical_default: CostRange::new(1000, 3000),
            warning_roof: CostRange::new(500, 2000),
            warning_default: CostRange::new(200, 1000),
        }
    }
}

/// Thresholds for rolling item statuses up into an overall risk level
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RiskThresholds {
    /// Critical-item count at which the report becomes high risk
    pub high_critical_count: usize,
    /// Warning-item count at which the report becomes medium risk
    pub medium_warning_count: usize,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_critical_count: 2,
            medium_warning_count: 4,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub costs: CostSchedule,
    pub risk: RiskThresholds,
}

impl AppConfig {
    /// Default config file path (~/.propertyscope/config.toml)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".propertyscope").join("config.toml"))
    }

    /// Load configuration, resolving the provider credential.
    ///
    /// Precedence for the API key: config file, then the ANTHROPIC_API_KEY
    /// environment variable, then the secrets file. A missing credential is
    /// not an error; the chat boundary serves fallback responses without one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => match Self::default_config_path() {
                Some(p) if p.exists() => Self::load_from_file(&p)?,
                _ => Self::default(),
            },
        };

        if !config.provider.has_credential() {
            config.provider.api_key = resolve_api_key();
        }

        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        Ok(config)
    }
}

/// Resolve the provider API key from the environment or the secrets file
fn resolve_api_key() -> Option<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
        if !key.is_empty() {
            return Some(key);
        }
    }

    match SecretsConfig::load() {
        Ok(secrets) => secrets.get_token(PROVIDER_ID).cloned(),
        Err(e) => {
            log::warn!("[config] Failed to load secrets file: {}", e);
            None
        }
    }
}

/// Store the provider API key in the secrets file; returns the path written.
///
/// This is the write side of `resolve_api_key`, reached from the
/// `--set-api-key` CLI path. The running server only ever reads the file.
pub fn store_api_key(token: &str) -> Result<PathBuf> {
    let mut secrets = SecretsConfig::load()?;
    secrets.set_token(PROVIDER_ID, token);
    secrets.save()?;
    SecretsConfig::secrets_path().ok_or_else(|| anyhow!("Could not determine home directory"))
}
