//! Configuration management for the subgate CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use subgate::prelude::*;
use subgate::runtime::gate::DEFAULT_UNAUTHENTICATED_MESSAGE;

/// File name searched for in the working directory and its parents.
pub const CONFIG_FILE: &str = "subgate.toml";

/// Overrides `backend.base_url` when set.
pub const BASE_URL_ENV: &str = "SUBGATE_BASE_URL";

/// Subgate client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means requests wait for as long as the backend takes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_join_base")]
    pub join_base: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub default_view: ViewKey,
    #[serde(default = "default_unauthenticated_message")]
    pub unauthenticated_message: String,
}

// Default value functions
fn default_base_url() -> String { "http://127.0.0.1:8000".to_string() }
fn default_join_base() -> String { DEFAULT_JOIN_BASE.to_string() }
fn default_unauthenticated_message() -> String { DEFAULT_UNAUTHENTICATED_MESSAGE.to_string() }

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            join_base: default_join_base(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_view: ViewKey::default(),
            unauthenticated_message: default_unauthenticated_message(),
        }
    }
}

impl Config {
    /// Load config from the nearest subgate.toml, then apply env overrides.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::load_with(&cwd, std::env::var(BASE_URL_ENV).ok())
    }

    /// Load config found from `start_dir` upward, with an optional base URL
    /// override.
    pub fn load_with(start_dir: &Path, env_url: Option<String>) -> Result<Self> {
        let mut config = match find_config_file(start_dir) {
            Some(path) => Self::load_from(&path)?,
            None => Config::default(),
        };
        if let Some(url) = env_url {
            config.backend.base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), SubgateError> {
        for (field, url) in [
            ("backend.base_url", &self.backend.base_url),
            ("links.join_base", &self.links.join_base),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SubgateError::Config(format!(
                    "{} must be an http(s) URL, got {:?}",
                    field, url
                )));
            }
        }
        if self.backend.timeout_secs == Some(0) {
            return Err(SubgateError::Config(
                "backend.timeout_secs must be at least 1; leave it unset for no timeout".into(),
            ));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.backend.base_url.clone());
        match self.backend.timeout_secs {
            Some(secs) => config.with_timeout(secs),
            None => config,
        }
    }

    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            gate: GateSettings {
                join_base: self.links.join_base.clone(),
                unauthenticated_message: self.app.unauthenticated_message.clone(),
            },
            default_view: self.app.default_view,
        }
    }
}

/// Find subgate.toml in `start_dir`, its parents, or the user config
/// directory.
fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    let user_path = dirs::config_dir()?.join("subgate").join(CONFIG_FILE);
    user_path.exists().then_some(user_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.backend.timeout_secs = Some(10);
        config.app.default_view = ViewKey::News;
        config.save(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[backend]\nbase_url = \"https://api.example.test\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.backend.base_url, "https://api.example.test");
        assert_eq!(config.backend.timeout_secs, None);
        assert_eq!(config.links.join_base, "https://t.me");
        assert_eq!(config.app.default_view, ViewKey::Tasks);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_urls() {
        let mut config = Config::default();
        config.backend.base_url = "localhost:8000".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.backend.timeout_secs = Some(0);
        assert!(matches!(config.validate(), Err(SubgateError::Config(_))));
        config.backend.timeout_secs = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_finds_config_in_parent_dir() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE),
            "[app]\ndefault_view = \"news\"\n",
        )
        .unwrap();

        let config = Config::load_with(&nested, None).unwrap();
        assert_eq!(config.app.default_view, ViewKey::News);
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_env_url_overrides_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE),
            "[backend]\nbase_url = \"https://file.example.test\"\n",
        )
        .unwrap();

        let config =
            Config::load_with(root.path(), Some("https://env.example.test".into())).unwrap();
        assert_eq!(config.backend.base_url, "https://env.example.test");
    }

    #[test]
    fn test_invalid_env_url_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let err = Config::load_with(root.path(), Some("ftp://nope".into())).unwrap_err();
        assert!(err.to_string().contains("backend.base_url"));
    }

    #[test]
    fn test_settings_mapping() {
        let mut config = Config::default();
        config.backend.timeout_secs = Some(4);
        config.app.default_view = ViewKey::Profile;

        assert_eq!(config.client_config().timeout_secs, Some(4));
        let settings = config.app_settings();
        assert_eq!(settings.default_view, ViewKey::Profile);
        assert_eq!(settings.gate.join_base, "https://t.me");
    }
}
