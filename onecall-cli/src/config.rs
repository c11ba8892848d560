use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Settings stored on disk by `onecall configure`.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// unit = "metric"
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
    /// Passed through as `units`, e.g. "metric", "imperial" or "standard".
    pub unit: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "onecall", "onecall-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Values given on the command line win over stored ones.
    pub fn with_overrides(
        mut self,
        api_key: Option<String>,
        unit: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if api_key.is_some() {
            self.api_key = api_key;
        }
        if unit.is_some() {
            self.unit = unit;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("onecall-cli-test-{}-{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn missing_file_loads_default() {
        let cfg = Config::load_from(&scratch_path("missing")).unwrap();

        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let path = scratch_path("roundtrip");
        let cfg = Config {
            api_key: Some("OPEN_KEY".into()),
            unit: Some("metric".into()),
            timeout_secs: Some(10),
        };

        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        let _ = fs::remove_dir_all(path.parent().unwrap());

        assert_eq!(loaded, cfg);
        assert_eq!(loaded.timeout_secs(), 10);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let path = scratch_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        let _ = fs::remove_dir_all(path.parent().unwrap());

        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let cfg = Config {
            api_key: Some("STORED".into()),
            unit: Some("metric".into()),
            timeout_secs: None,
        }
        .with_overrides(None, Some("imperial".into()), Some(30));

        assert_eq!(cfg.api_key.as_deref(), Some("STORED"));
        assert_eq!(cfg.unit.as_deref(), Some("imperial"));
        assert_eq!(cfg.timeout_secs(), 30);
    }
}
