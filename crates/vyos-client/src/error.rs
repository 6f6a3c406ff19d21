//! Error types for VyOS client operations

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for VyOS client operations
pub type Result<T> = std::result::Result<T, VyosClientError>;

/// Errors that can occur during VyOS client operations
#[derive(Error, Debug)]
pub enum VyosClientError {
    /// The HTTP exchange could not be completed
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Local socket I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A response arrived but it was not a result envelope
    #[error("Invalid response (HTTP {status}): {message}")]
    InvalidResponse { status: u16, message: String },

    /// The envelope succeeded but `data` had the wrong shape
    #[error("Unexpected response data: {0}")]
    UnexpectedData(String),

    /// The device executed the request and reported failure
    #[error("Remote operation failed: {0}")]
    RemoteOperation(String),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Operation descriptor could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Coarse classification of a [`VyosClientError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No interpretable response was received
    Transport,
    /// The device reported failure in its result envelope
    RemoteOperation,
    /// The client could not be constructed or the request could not be built
    Configuration,
}

impl VyosClientError {
    /// Create an invalid-response error from a status code and body excerpt
    pub fn invalid_response(status: u16, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_)
            | Self::Io(_)
            | Self::InvalidResponse { .. }
            | Self::UnexpectedData(_) => ErrorKind::Transport,
            Self::RemoteOperation(_) => ErrorKind::RemoteOperation,
            Self::InvalidUrl(_) | Self::Config(_) | Self::Encode(_) => ErrorKind::Configuration,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    pub fn is_remote(&self) -> bool {
        self.kind() == ErrorKind::RemoteOperation
    }

    /// The device-supplied message, if this is a remote failure
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::RemoteOperation(message) => Some(message),
            _ => None,
        }
    }
}
