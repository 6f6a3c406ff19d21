//! Operational mode commands

use serde_json::Value;
use tracing::instrument;

use crate::client::VyosClient;
use crate::error::Result;
use crate::path::split_path;
use crate::types::{Endpoint, Op, OperationDescriptor};

/// Operational mode commands, obtained from [`VyosClient::operational`]
///
/// `show("system image")` runs `show system image` on the device. The
/// command output is returned as the device sends it, usually a string.
#[derive(Debug, Clone, Copy)]
pub struct Operational<'a> {
    client: &'a VyosClient,
}

impl<'a> Operational<'a> {
    pub(crate) fn new(client: &'a VyosClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn show(&self, path: &str) -> Result<Value> {
        self.run(Endpoint::Show, Op::Show, path).await
    }

    #[instrument(skip(self))]
    pub async fn generate(&self, path: &str) -> Result<Value> {
        self.run(Endpoint::Generate, Op::Generate, path).await
    }

    #[instrument(skip(self))]
    pub async fn reset(&self, path: &str) -> Result<Value> {
        self.run(Endpoint::Reset, Op::Reset, path).await
    }

    async fn run(&self, endpoint: Endpoint, op: Op, path: &str) -> Result<Value> {
        let descriptor = OperationDescriptor::new(op).with_path(split_path(path));
        self.client.send(endpoint, &descriptor).await
    }
}
