use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    province::{Province, resolve_province},
    provider::eltiempo::DEFAULT_BASE_URL,
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "https://www.el-tiempo.net"
/// default_province = "Sevilla"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Weather service root; the province path is appended to it.
    pub base_url: Option<String>,

    /// Province used by `clima show` when none is given.
    pub default_province: Option<String>,

    /// Caller-side limit on a single request. No limit when absent.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Configured base URL, or the public service when unset.
    pub fn base_url(&self) -> Result<String> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        validate_base_url(raw)?;
        Ok(raw.to_string())
    }

    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        validate_base_url(url)?;
        self.base_url = Some(url.to_string());
        Ok(())
    }

    /// Return the default province, if one is configured.
    pub fn default_province(&self) -> Result<Option<Province>> {
        self.default_province
            .as_deref()
            .map(|name| {
                resolve_province(name).with_context(|| {
                    "Configured default province is not valid.\n\
                     Hint: run `clima configure` and pick one of the listed provinces."
                })
            })
            .transpose()
    }

    pub fn set_default_province(&mut self, province: Province) {
        self.default_province = Some(province.name().to_string());
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
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
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clima-andalucia", "clima")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn validate_base_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw).with_context(|| format!("Invalid base URL '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Invalid base URL '{raw}': only http and https are supported");
    }
    Ok(())
}
