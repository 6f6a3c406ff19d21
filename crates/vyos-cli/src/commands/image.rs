//! Image commands - add and remove system images

use anyhow::{Context, Result};
use vyos_client::VyosClient;

use crate::output::OutputContext;

pub async fn add(client: &VyosClient, url: &str, ctx: &OutputContext) -> Result<()> {
    let result = client
        .image()
        .add(url)
        .await
        .with_context(|| format!("Failed to add image from {}", url))?;
    ctx.print_value(&result);
    Ok(())
}

pub async fn remove(client: &VyosClient, name: &str, ctx: &OutputContext) -> Result<()> {
    let result = client
        .image()
        .remove(name)
        .await
        .with_context(|| format!("Failed to remove image {}", name))?;
    ctx.print_value(&result);
    Ok(())
}
