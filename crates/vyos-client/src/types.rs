//! Request and response types for the VyOS HTTP API

use serde::{Deserialize, Serialize};

use crate::error::{Result, VyosClientError};

/// File used by save/load when no file is given
pub const DEFAULT_CONFIG_FILE: &str = "/config/config.boot";

/// Message used when a failing envelope carries no error text
const MISSING_ERROR_MESSAGE: &str = "remote operation failed without an error message";

// =============================================================================
// Endpoints
// =============================================================================

/// Remote operation family, one URL path segment each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `set`, `delete`, `comment`
    Configure,
    /// `showConfig`, `exists`, `returnValues`
    Retrieve,
    /// `save`, `load`
    ConfigFile,
    /// `add`, `delete`
    Image,
    /// operational `show`
    Show,
    /// operational `generate`
    Generate,
    /// operational `reset`
    Reset,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Configure,
        Endpoint::Retrieve,
        Endpoint::ConfigFile,
        Endpoint::Image,
        Endpoint::Show,
        Endpoint::Generate,
        Endpoint::Reset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Configure => "configure",
            Endpoint::Retrieve => "retrieve",
            Endpoint::ConfigFile => "config-file",
            Endpoint::Image => "image",
            Endpoint::Show => "show",
            Endpoint::Generate => "generate",
            Endpoint::Reset => "reset",
        }
    }

    /// Parse an endpoint from its URL path segment
    pub fn from_path(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == segment)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Operation Descriptor
// =============================================================================

/// Sub-operation discriminator, sent as the `op` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Op {
    Set,
    Delete,
    Comment,
    ShowConfig,
    Exists,
    ReturnValues,
    Save,
    Load,
    Add,
    Show,
    Generate,
    Reset,
}

/// JSON body of a request, sent in the multipart `data` field
///
/// Fields other than `op` are omitted from the encoding when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub op: Op,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl OperationDescriptor {
    pub fn new(op: Op) -> Self {
        Self {
            op,
            path: None,
            value: None,
            url: None,
            file: None,
            name: None,
        }
    }

    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

// =============================================================================
// Result Envelope
// =============================================================================

/// Uniform response body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub error: Option<String>,
}

impl ResultEnvelope {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: serde_json::Value::Null,
            error: Some(error.into()),
        }
    }

    /// Resolve to `data` on success, or to the device's error message
    ///
    /// `data` is ignored when `success` is false.
    pub fn into_result(self) -> Result<serde_json::Value> {
        if self.success {
            Ok(self.data)
        } else {
            Err(VyosClientError::RemoteOperation(
                self.error
                    .unwrap_or_else(|| MISSING_ERROR_MESSAGE.to_string()),
            ))
        }
    }
}
