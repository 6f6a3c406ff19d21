//! Client configuration with YAML support

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Connection settings for a single VyOS device
///
/// Can be loaded from YAML, JSON, or constructed programmatically.
///
/// ```yaml
/// base_url: "https://192.168.0.1"
/// key: "secret"
/// tls_verification: false   # optional, default false
/// request_timeout_ms: 30000 # optional, transport default when absent
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme and host of the device (e.g., "https://192.168.0.1")
    pub base_url: String,

    /// Shared secret sent with every request
    pub key: String,

    /// Validate the device certificate
    ///
    /// Off by default since devices commonly use self-signed certificates.
    #[serde(default)]
    pub tls_verification: bool,

    /// Total request timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,

    /// Connect timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("key", &"<redacted>")
            .field("tls_verification", &self.tls_verification)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but URL and key
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self::builder(base_url, key).build()
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize configuration to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Create a builder for programmatic configuration
    pub fn builder(base_url: impl Into<String>, key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(base_url, key)
    }
}

/// Builder for ClientConfig
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder with the given base URL and key
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            config: ClientConfig {
                base_url: base_url.into(),
                key: key.into(),
                tls_verification: false,
                request_timeout_ms: None,
                connect_timeout_ms: None,
            },
        }
    }

    /// Enable or disable certificate validation
    pub fn tls_verification(mut self, enabled: bool) -> Self {
        self.config.tls_verification = enabled;
        self
    }

    /// Set request timeout in milliseconds
    pub fn request_timeout_ms(mut self, ms: u64) -> Self {
        self.config.request_timeout_ms = Some(ms);
        self
    }

    /// Set connect timeout in milliseconds
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = Some(ms);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
base_url: "https://192.168.0.1"
key: "secret123"
request_timeout_ms: 60000
"#;

        let config = ClientConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.base_url, "https://192.168.0.1");
        assert_eq!(config.key, "secret123");
        assert!(!config.tls_verification);
        assert_eq!(config.request_timeout_ms, Some(60000));
        assert_eq!(config.connect_timeout_ms, None);
    }

    #[test]
    fn test_yaml_missing_key() {
        let err = ClientConfig::from_yaml("base_url: \"https://router\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_json_parsing() {
        let config =
            ClientConfig::from_json(r#"{"base_url":"https://r1","key":"k","tls_verification":true}"#)
                .unwrap();
        assert!(config.tls_verification);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder("https://router.lan", "my-secret")
            .tls_verification(true)
            .connect_timeout_ms(2_000)
            .build();

        assert_eq!(config.base_url, "https://router.lan");
        assert_eq!(config.key, "my-secret");
        assert!(config.tls_verification);
        assert_eq!(config.connect_timeout_ms, Some(2_000));
        assert_eq!(config.request_timeout_ms, None);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("https://router.lan", "hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let config = ClientConfig::builder("https://router.lan", "test")
            .request_timeout_ms(5_000)
            .build();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("base_url"));
        assert!(!yaml.contains("connect_timeout_ms"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vyos.yaml");
        std::fs::write(&path, yaml).unwrap();

        let loaded = ClientConfig::from_yaml_file(&path).unwrap();
        assert_eq!(loaded.base_url, "https://router.lan");
        assert_eq!(loaded.request_timeout_ms, Some(5_000));
    }

    #[test]
    fn test_missing_file() {
        let err = ClientConfig::from_yaml_file("/nonexistent/vyos.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
