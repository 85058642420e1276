//! User configuration, read from `~/.config/stratus/config.toml`.
//!
//! ```toml
//! page_size = 10
//! profile = "staging"
//! region = "eu-west-1"
//! log_level = "debug"
//! ```
//!
//! `STRATUS_PAGE_SIZE`, `AWS_PROFILE` and `AWS_REGION` override the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub page_size: usize,
    /// Highlighted in the profile picker.
    pub profile: Option<String>,
    /// Highlighted in the region picker.
    pub region: Option<String>,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            profile: None,
            region: None,
            log_level: None,
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("stratus"))
}

impl Config {
    pub fn load() -> Result<Self> {
        let config = match config_dir() {
            Some(dir) => Self::from_file(&dir.join("config.toml"))?,
            None => Self::default(),
        };

        config.with_env_overrides(|name| std::env::var(name).ok())
    }

    /// A missing file is not an error; it just means defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()
    }

    pub fn with_env_overrides(self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let page_size = match var("STRATUS_PAGE_SIZE") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("STRATUS_PAGE_SIZE is not a number: {}", value))?,
            None => self.page_size,
        };

        Self {
            page_size,
            profile: var("AWS_PROFILE").filter(|p| !p.is_empty()).or(self.profile),
            region: var("AWS_REGION").filter(|r| !r.is_empty()).or(self.region),
            ..self
        }
        .validate()
    }

    fn validate(self) -> Result<Self> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::from_file(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn reads_every_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "page_size = 5\nprofile = \"staging\"\nregion = \"eu-west-1\"\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(
            config,
            Config {
                page_size: 5,
                profile: Some("staging".into()),
                region: Some("eu-west-1".into()),
                log_level: Some("debug".into()),
            }
        );
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Config::parse("page_size = 0").is_err());
        assert!(Config::default()
            .with_env_overrides(env(&[("STRATUS_PAGE_SIZE", "0")]))
            .is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("page_sise = 5").is_err());
    }

    #[test]
    fn environment_wins_over_file() {
        let config = Config::parse("page_size = 5\nprofile = \"staging\"")
            .unwrap()
            .with_env_overrides(env(&[
                ("STRATUS_PAGE_SIZE", "20"),
                ("AWS_PROFILE", "prod"),
            ]))
            .unwrap();

        assert_eq!(config.page_size, 20);
        assert_eq!(config.profile.as_deref(), Some("prod"));
        assert_eq!(config.region, None);
    }

    #[test]
    fn bad_page_size_in_environment_is_an_error() {
        let result = Config::default().with_env_overrides(env(&[("STRATUS_PAGE_SIZE", "ten")]));

        assert!(result.is_err());
    }
}
