//! VyOS Client Library
//!
//! Provides a typed client for the VyOS HTTP management API.
//!
//! # Example
//!
//! ```rust,no_run
//! use vyos_client::VyosClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = VyosClient::new("https://192.168.0.1", "my-api-key")?;
//!
//!     // Leaf queries return the bare value
//!     let host_name = client.configure().get("system host-name").await?;
//!
//!     client.configure().set("system host-name", "edge-01").await?;
//!     client.configure().save(None).await?;
//!
//!     // Operational mode
//!     let version = client.operational().show("version").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every operation is a single POST. Failures come in two runtime kinds,
//! see [`ErrorKind`]: the exchange itself failed, or the device answered
//! with `success: false`. The second is reported the same way whatever the
//! HTTP status of the response.
//!
//! # Testing
//!
//! The `testing` module provides a simulated device for integration tests:
//!
//! ```rust,ignore
//! use vyos_client::testing::{MockDevice, MockResponse, TestServer};
//! use vyos_client::Endpoint;
//!
//! let device = MockDevice::new();
//! device.respond(Endpoint::Show, MockResponse::ok("1.4.0".into())).await;
//! let server = TestServer::start(device.router(), "key").await?;
//! let version = server.client.operational().show("version").await?;
//! ```

mod client;
mod config;
mod configure;
mod error;
mod image;
mod operational;
pub mod path;
pub mod testing;
mod types;

pub use client::VyosClient;
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};
pub use configure::Configuration;
pub use error::{ErrorKind, Result, VyosClientError};
pub use image::Images;
pub use operational::Operational;
pub use types::*;
