//! Configuration commands - get, set, delete, comment, save, load

use anyhow::{Context, Result};
use vyos_client::VyosClient;

use crate::output::OutputContext;

/// Show configuration at a path
pub async fn get(client: &VyosClient, path: &str, ctx: &OutputContext) -> Result<()> {
    let value = client
        .configure()
        .get(path)
        .await
        .with_context(|| format!("Failed to read configuration at '{}'", path))?;
    ctx.print_value(&value);
    Ok(())
}

pub async fn set(client: &VyosClient, path: &str, value: &str, ctx: &OutputContext) -> Result<()> {
    client
        .configure()
        .set(path, value)
        .await
        .context("Failed to set configuration")?;
    ctx.success(&format!("Set {} = {}", path, value));
    Ok(())
}

pub async fn delete(client: &VyosClient, path: &str, ctx: &OutputContext) -> Result<()> {
    client
        .configure()
        .delete(path)
        .await
        .context("Failed to delete configuration")?;
    ctx.success(&format!("Deleted {}", path));
    Ok(())
}

pub async fn comment(
    client: &VyosClient,
    path: &str,
    value: &str,
    ctx: &OutputContext,
) -> Result<()> {
    client
        .configure()
        .comment(path, value)
        .await
        .context("Failed to comment configuration")?;
    ctx.success(&format!("Commented {}", path));
    Ok(())
}

pub async fn exists(client: &VyosClient, path: &str, ctx: &OutputContext) -> Result<()> {
    let exists = client.configure().exists(path).await?;
    ctx.print_value(&serde_json::Value::Bool(exists));
    Ok(())
}

/// List values of a multi-value node
pub async fn values(client: &VyosClient, path: &str, ctx: &OutputContext) -> Result<()> {
    let values = client.configure().return_values(path).await?;
    ctx.print_value(&serde_json::json!(values));
    Ok(())
}

pub async fn save(client: &VyosClient, file: Option<&str>, ctx: &OutputContext) -> Result<()> {
    let result = client
        .configure()
        .save(file)
        .await
        .context("Failed to save configuration")?;
    ctx.print_value(&result);
    ctx.success("Configuration saved");
    Ok(())
}

pub async fn load(client: &VyosClient, file: Option<&str>, ctx: &OutputContext) -> Result<()> {
    let result = client
        .configure()
        .load(file)
        .await
        .context("Failed to load configuration")?;
    ctx.print_value(&result);
    ctx.success("Configuration loaded");
    Ok(())
}
