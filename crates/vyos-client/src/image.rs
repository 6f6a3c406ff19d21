//! System image operations

use serde_json::Value;
use tracing::instrument;

use crate::client::VyosClient;
use crate::error::Result;
use crate::types::{Endpoint, Op, OperationDescriptor};

/// System image management, obtained from [`VyosClient::image`]
#[derive(Debug, Clone, Copy)]
pub struct Images<'a> {
    client: &'a VyosClient,
}

impl<'a> Images<'a> {
    pub(crate) fn new(client: &'a VyosClient) -> Self {
        Self { client }
    }

    /// Download and install the image at `url`
    #[instrument(skip(self))]
    pub async fn add(&self, url: &str) -> Result<Value> {
        let descriptor = OperationDescriptor::new(Op::Add).with_url(url);
        self.client.send(Endpoint::Image, &descriptor).await
    }

    /// Remove the installed image called `name`
    #[instrument(skip(self))]
    pub async fn remove(&self, name: &str) -> Result<Value> {
        let descriptor = OperationDescriptor::new(Op::Delete).with_name(name);
        self.client.send(Endpoint::Image, &descriptor).await
    }
}
