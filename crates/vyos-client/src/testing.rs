//! Test utilities for vyos-client
//!
//! Provides a simulated VyOS device and a server harness for integration
//! tests that exercise the real multipart wire format.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::types::{Endpoint, ResultEnvelope};
use crate::{ClientConfig, Result, VyosClient};

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: VyosClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Create a new test server from an axum Router
    ///
    /// # Example
    ///
    /// ```ignore
    /// use vyos_client::testing::{MockDevice, TestServer};
    ///
    /// let device = MockDevice::new();
    /// let server = TestServer::start(device.router(), "secret").await?;
    ///
    /// let host_name = server.client.configure().get("system host-name").await?;
    /// ```
    pub async fn start<S>(router: Router<S>, key: &str) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        Router<S>: Into<Router>,
    {
        Self::start_with_timeout(router, key, Duration::from_secs(5), Duration::from_secs(2)).await
    }

    /// Create a new test server with custom timeouts
    pub async fn start_with_timeout<S>(
        router: Router<S>,
        key: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        Router<S>: Into<Router>,
    {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let router: Router = router.into();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let config = ClientConfig::builder(format!("http://{}", addr), key)
            .request_timeout_ms(timeout.as_millis() as u64)
            .connect_timeout_ms(connect_timeout.as_millis() as u64)
            .build();
        let client = VyosClient::from_config(config)?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

// =============================================================================
// Simulated device
// =============================================================================

/// One request as seen by the simulated device
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Endpoint path segment, e.g. `"retrieve"`
    pub endpoint: String,
    /// Multipart field names, in the order received
    pub fields: Vec<String>,
    pub key: Option<String>,
    /// Raw `data` field
    pub raw_data: Option<String>,
}

impl RecordedRequest {
    /// The `data` field decoded as JSON
    pub fn data(&self) -> Option<serde_json::Value> {
        self.raw_data
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

/// Canned HTTP response
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    /// Respond with an envelope under the given HTTP status
    pub fn envelope(status: u16, envelope: &ResultEnvelope) -> Self {
        Self {
            status,
            body: serde_json::to_string(envelope).unwrap_or_default(),
        }
    }

    /// `200` with `{"success": true, "data": data, "error": null}`
    pub fn ok(data: serde_json::Value) -> Self {
        Self::envelope(200, &ResultEnvelope::ok(data))
    }

    /// Failing envelope under the given HTTP status
    pub fn failure(status: u16, error: &str) -> Self {
        Self::envelope(status, &ResultEnvelope::failure(error))
    }

    /// Arbitrary body, not necessarily an envelope
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Default)]
struct DeviceState {
    requests: Vec<RecordedRequest>,
    responses: HashMap<Endpoint, MockResponse>,
    required_key: Option<String>,
}

/// Simulated VyOS device that records requests and replays canned responses
///
/// Endpoints without a scripted response answer with a successful envelope
/// whose `data` is null.
#[derive(Debug, Clone, Default)]
pub struct MockDevice {
    state: Arc<Mutex<DeviceState>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject requests whose key differs, with `401` and a failing envelope
    pub async fn require_key(&self, key: &str) {
        self.state.lock().await.required_key = Some(key.to_string());
    }

    /// Script the response for an endpoint
    pub async fn respond(&self, endpoint: Endpoint, response: MockResponse) {
        self.state.lock().await.responses.insert(endpoint, response);
    }

    /// All requests received so far
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Router serving `POST /{endpoint}`
    pub fn router(&self) -> Router {
        Router::new()
            .route("/{endpoint}", post(handle_request))
            .with_state(self.clone())
    }
}

async fn handle_request(
    State(device): State<MockDevice>,
    Path(endpoint): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut recorded = RecordedRequest {
        endpoint: endpoint.clone(),
        fields: Vec::new(),
        key: None,
        raw_data: None,
    };

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                let text = match field.text().await {
                    Ok(text) => text,
                    Err(e) => return (StatusCode::BAD_REQUEST, e.body_text()).into_response(),
                };
                match name.as_str() {
                    "key" => recorded.key = Some(text),
                    "data" => recorded.raw_data = Some(text),
                    _ => {}
                }
                recorded.fields.push(name);
            }
            Ok(None) => break,
            Err(e) => return (StatusCode::BAD_REQUEST, e.body_text()).into_response(),
        }
    }

    let mut state = device.state.lock().await;
    let key_rejected = match &state.required_key {
        Some(required) => recorded.key.as_deref() != Some(required.as_str()),
        None => false,
    };
    state.requests.push(recorded);

    let response = if key_rejected {
        MockResponse::failure(401, "Valid API key is required")
    } else {
        match Endpoint::from_path(&endpoint) {
            Some(endpoint) => state
                .responses
                .get(&endpoint)
                .cloned()
                .unwrap_or_else(|| MockResponse::ok(serde_json::Value::Null)),
            None => MockResponse::raw(404, "Not Found"),
        }
    };

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_response_bodies() {
        let ok = MockResponse::ok(serde_json::json!("r1"));
        assert_eq!(ok.status, 200);
        let envelope: ResultEnvelope = serde_json::from_str(&ok.body).unwrap();
        assert!(envelope.success);

        let failure = MockResponse::failure(500, "commit failed");
        let envelope: ResultEnvelope = serde_json::from_str(&failure.body).unwrap();
        assert_eq!(envelope.error.as_deref(), Some("commit failed"));
    }

    #[test]
    fn test_recorded_request_data() {
        let recorded = RecordedRequest {
            endpoint: "show".into(),
            fields: vec!["key".into(), "data".into()],
            key: Some("k".into()),
            raw_data: Some(r#"{"op":"show","path":["version"]}"#.into()),
        };
        assert_eq!(recorded.data().unwrap()["op"], "show");
    }
}
