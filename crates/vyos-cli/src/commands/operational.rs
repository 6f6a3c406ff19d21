//! Operational mode commands - show, generate, reset

use anyhow::Result;
use vyos_client::VyosClient;

use crate::output::OutputContext;

pub async fn show(client: &VyosClient, path: &str, ctx: &OutputContext) -> Result<()> {
    let output = client.operational().show(path).await?;
    ctx.print_value(&output);
    Ok(())
}

pub async fn generate(client: &VyosClient, path: &str, ctx: &OutputContext) -> Result<()> {
    let output = client.operational().generate(path).await?;
    ctx.print_value(&output);
    Ok(())
}

pub async fn reset(client: &VyosClient, path: &str, ctx: &OutputContext) -> Result<()> {
    let output = client.operational().reset(path).await?;
    ctx.print_value(&output);
    Ok(())
}
