//! Configuration file handling for vyos-cli

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vyos_client::ClientConfig;

use crate::output::OutputFormat;

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default device URL
    pub url: Option<String>,
    /// Default API key
    pub key: Option<String>,
    /// Validate the device certificate
    pub verify_tls: Option<bool>,
    /// Default output format
    pub output: Option<String>,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load() -> Result<Self> {
        Self::load_or_default(&Self::config_path()?)
    }

    /// Load configuration from `path` if it exists
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("vyos-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments and environment over config file values
    pub fn merge_with_args(
        &self,
        url: Option<&str>,
        key: Option<&str>,
        verify_tls: bool,
        output: Option<OutputFormat>,
    ) -> MergedConfig {
        MergedConfig {
            url: url.map(String::from).or_else(|| self.url.clone()),
            key: key.map(String::from).or_else(|| self.key.clone()),
            verify_tls: verify_tls || self.verify_tls.unwrap_or(false),
            output: output
                .or_else(|| {
                    self.output
                        .as_deref()
                        .and_then(|s| OutputFormat::from_str(s, true).ok())
                })
                .unwrap_or_default(),
        }
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub url: Option<String>,
    pub key: Option<String>,
    pub verify_tls: bool,
    pub output: OutputFormat,
}

impl MergedConfig {
    /// Client settings, failing if the URL or key is missing
    pub fn client_config(&self) -> Result<ClientConfig> {
        let Some(url) = &self.url else {
            bail!("VYOS_URL is not set (use --url, the VYOS_URL environment variable, or `url` in the config file)");
        };
        let Some(key) = &self.key else {
            bail!("VYOS_API_KEY is not set (use --key, the VYOS_API_KEY environment variable, or `key` in the config file)");
        };

        Ok(ClientConfig::builder(url.as_str(), key.as_str())
            .tls_verification(self.verify_tls)
            .build())
    }
}
