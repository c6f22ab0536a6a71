// Storage for the provider API token
//
// Tokens live in ~/.propertyscope/secrets.toml (global only, not
// project-level). The file should be gitignored by operators.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Secrets stored in ~/.propertyscope/secrets.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecretsConfig {
    /// API tokens indexed by provider ID (e.g., "anthropic" -> "sk-...")
    #[serde(default)]
    pub api_tokens: HashMap<String, String>,
}

impl SecretsConfig {
    /// Get the secrets file path (~/.propertyscope/secrets.toml)
    pub fn secrets_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".propertyscope").join("secrets.toml"))
    }

    /// Load secrets from disk; a missing file is an empty config
    pub fn load() -> Result<Self> {
        let path =
            Self::secrets_path().ok_or_else(|| anyhow!("Could not determine home directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| anyhow!("Failed to read secrets file '{}': {}", path.display(), e))?;

        let config: SecretsConfig = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse secrets file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Save secrets to ~/.propertyscope/secrets.toml
    pub fn save(&self) -> Result<()> {
        let path =
            Self::secrets_path().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        self.write_to(&path)?;
        log::info!("[config] Saved secrets to: {}", path.display());
        Ok(())
    }

    /// Write the secrets file at an explicit path, restricting it to the
    /// owner. Token files must not be group or world readable.
    fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Could not create '{}': {}", parent.display(), e))?;
        }

        let rendered = toml::to_string_pretty(self)
            .map_err(|e| anyhow!("Could not serialize secrets: {}", e))?;
        fs::write(path, rendered)
            .map_err(|e| anyhow!("Could not write '{}': {}", path.display(), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                anyhow!("Could not restrict permissions on '{}': {}", path.display(), e)
            })?;
        }

        Ok(())
    }

    /// Get a provider's API token
    pub fn get_token(&self, provider_id: &str) -> Option<&String> {
        self.api_tokens.get(provider_id)
    }

    /// Set a provider's API token
    pub fn set_token(&mut self, provider_id: &str, token: &str) {
        self.api_tokens
            .insert(provider_id.to_string(), token.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_config_default() {
        let config = SecretsConfig::default();
        assert!(config.api_tokens.is_empty());
    }

    #[test]
    fn test_set_and_get_token() {
        let mut config = SecretsConfig::default();
        config.set_token("anthropic", "sk-test");
        assert_eq!(config.get_token("anthropic"), Some(&"sk-test".to_string()));
        assert_eq!(config.get_token("other"), None);
    }

    #[test]
    fn test_write_to_creates_owner_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("secrets.toml");

        let mut config = SecretsConfig::default();
        config.set_token("anthropic", "sk-on-disk");
        config.write_to(&path).unwrap();

        let reread: SecretsConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reread.get_token("anthropic"), Some(&"sk-on-disk".to_string()));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_round_trip_serialization() {
        let mut config = SecretsConfig::default();
        config.set_token("anthropic", "sk-12345");

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: SecretsConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.get_token("anthropic"), Some(&"sk-12345".to_string()));
    }
}
