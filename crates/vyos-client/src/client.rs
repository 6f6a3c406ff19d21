//! VyOS HTTP client implementation

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::configure::Configuration;
use crate::error::{Result, VyosClientError};
use crate::image::Images;
use crate::operational::Operational;
use crate::types::{Endpoint, OperationDescriptor, ResultEnvelope};

/// Longest body excerpt carried by an invalid-response error
const BODY_EXCERPT_LEN: usize = 200;

/// VyOS HTTP API client
///
/// Every call is one multipart POST to `<base_url>/<endpoint>` carrying the
/// key and a JSON operation descriptor. The client holds no state besides its
/// configuration, so clones and concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct VyosClient {
    client: Client,
    base_url: Url,
    config: ClientConfig,
}

impl VyosClient {
    /// Create a new client with default settings
    ///
    /// # Arguments
    /// * `base_url` - Scheme and host of the device (e.g., "https://192.168.0.1")
    /// * `key` - API key configured on the device
    pub fn new(base_url: &str, key: &str) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url, key))
    }

    /// Create a new client from a full configuration
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(config.base_url.clone()).into());
        }

        let mut builder =
            Client::builder().danger_accept_invalid_certs(!config.tls_verification);
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;

        debug!("VyOS client created for {}", base_url);

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Create a client from a YAML config file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(ClientConfig::from_yaml_file(path)?)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Operation groups
    // =========================================================================

    /// Configuration get/set/delete/comment and config file save/load
    pub fn configure(&self) -> Configuration<'_> {
        Configuration::new(self)
    }

    /// System image add/remove
    pub fn image(&self) -> Images<'_> {
        Images::new(self)
    }

    /// Operational mode show/generate/reset
    pub fn operational(&self) -> Operational<'_> {
        Operational::new(self)
    }

    // =========================================================================
    // Request gateway
    // =========================================================================

    /// Send one operation descriptor and return the envelope's `data`
    ///
    /// A `success: false` envelope becomes [`VyosClientError::RemoteOperation`]
    /// whatever the HTTP status. A body that is not an envelope becomes
    /// [`VyosClientError::InvalidResponse`].
    #[instrument(skip(self, descriptor), fields(op = ?descriptor.op))]
    pub async fn send(
        &self,
        endpoint: Endpoint,
        descriptor: &OperationDescriptor,
    ) -> Result<serde_json::Value> {
        let url = self.endpoint_url(endpoint)?;
        let data = serde_json::to_string(descriptor)?;
        debug!("POST {} op={:?} path={:?}", url, descriptor.op, descriptor.path);

        let form = Form::new()
            .text("key", self.config.key.clone())
            .text("data", data);

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let envelope: ResultEnvelope = serde_json::from_slice(&body).map_err(|e| {
            debug!("Unparseable response body ({}): {}", status, e);
            VyosClientError::invalid_response(status.as_u16(), body_excerpt(&body))
        })?;

        if !status.is_success() {
            debug!("Envelope received with HTTP {}", status);
        }

        envelope.into_result()
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(endpoint.as_str());
        Ok(url)
    }
}

fn body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "empty body".to_string();
    }
    trimmed.chars().take(BODY_EXCERPT_LEN).collect()
}
