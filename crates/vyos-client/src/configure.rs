//! Configuration mode operations

use serde_json::Value;
use tracing::instrument;

use crate::client::VyosClient;
use crate::error::{Result, VyosClientError};
use crate::path::{split_path, unwrap_show_path};
use crate::types::{Endpoint, Op, OperationDescriptor, DEFAULT_CONFIG_FILE};

/// Configuration tree and config file operations
///
/// Obtained from [`VyosClient::configure`]. All paths are space-delimited,
/// e.g. `"interfaces ethernet eth0 address"`.
#[derive(Debug, Clone, Copy)]
pub struct Configuration<'a> {
    client: &'a VyosClient,
}

impl<'a> Configuration<'a> {
    pub(crate) fn new(client: &'a VyosClient) -> Self {
        Self { client }
    }

    /// Retrieve the configuration at `path`
    ///
    /// When the result is a mapping holding the path's last segment as a key,
    /// only that value is returned, so a leaf query yields the bare value.
    #[instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Value> {
        let segments = split_path(path);
        let descriptor = OperationDescriptor::new(Op::ShowConfig).with_path(segments.clone());
        let data = self.client.send(Endpoint::Retrieve, &descriptor).await?;
        Ok(unwrap_show_path(data, &segments))
    }

    /// Check whether `path` exists in the running configuration
    #[instrument(skip(self))]
    pub async fn exists(&self, path: &str) -> Result<bool> {
        let descriptor = OperationDescriptor::new(Op::Exists).with_path(split_path(path));
        let data = self.client.send(Endpoint::Retrieve, &descriptor).await?;
        data.as_bool().ok_or_else(|| {
            VyosClientError::UnexpectedData(format!("expected boolean, got {}", data))
        })
    }

    /// Return the values of a multi-value node, e.g. `"system name-server"`
    #[instrument(skip(self))]
    pub async fn return_values(&self, path: &str) -> Result<Vec<String>> {
        let descriptor = OperationDescriptor::new(Op::ReturnValues).with_path(split_path(path));
        let data = self.client.send(Endpoint::Retrieve, &descriptor).await?;
        serde_json::from_value(data.clone()).map_err(|_| {
            VyosClientError::UnexpectedData(format!("expected list of strings, got {}", data))
        })
    }

    /// Set `path` to `value` and commit
    #[instrument(skip(self, value))]
    pub async fn set(&self, path: &str, value: &str) -> Result<Value> {
        let descriptor = OperationDescriptor::new(Op::Set)
            .with_path(split_path(path))
            .with_value(value);
        self.client.send(Endpoint::Configure, &descriptor).await
    }

    /// Delete `path` and commit
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Value> {
        let descriptor = OperationDescriptor::new(Op::Delete).with_path(split_path(path));
        self.client.send(Endpoint::Configure, &descriptor).await
    }

    /// Attach a comment to the node at `path`
    #[instrument(skip(self, value))]
    pub async fn comment(&self, path: &str, value: &str) -> Result<Value> {
        let descriptor = OperationDescriptor::new(Op::Comment)
            .with_path(split_path(path))
            .with_value(value);
        self.client.send(Endpoint::Configure, &descriptor).await
    }

    /// Save the running configuration, to `/config/config.boot` by default
    #[instrument(skip(self))]
    pub async fn save(&self, file: Option<&str>) -> Result<Value> {
        let descriptor =
            OperationDescriptor::new(Op::Save).with_file(file.unwrap_or(DEFAULT_CONFIG_FILE));
        self.client.send(Endpoint::ConfigFile, &descriptor).await
    }

    /// Load a configuration file, `/config/config.boot` by default
    #[instrument(skip(self))]
    pub async fn load(&self, file: Option<&str>) -> Result<Value> {
        let descriptor =
            OperationDescriptor::new(Op::Load).with_file(file.unwrap_or(DEFAULT_CONFIG_FILE));
        self.client.send(Endpoint::ConfigFile, &descriptor).await
    }
}
