//! Integration tests for vyos-client
//!
//! These tests start a simulated device on a local port and drive it through
//! the client, so the multipart wire format is exercised end to end.

use std::io::Write;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;
use vyos_client::testing::{MockDevice, MockResponse, TestServer};
use vyos_client::{Endpoint, ErrorKind, Op, OperationDescriptor, VyosClient, VyosClientError};

const KEY: &str = "test-key";

/// Log sink shared between the subscriber and the test
struct LogWriter(Arc<Mutex<Vec<u8>>>);

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

async fn setup() -> (MockDevice, TestServer) {
    let device = MockDevice::new();
    let server = TestServer::start(device.router(), KEY)
        .await
        .expect("Failed to start test server");
    (device, server)
}

// =============================================================================
// Request gateway
// =============================================================================

#[tokio::test]
async fn test_send_posts_key_and_descriptor() {
    let (device, server) = setup().await;

    let descriptor = OperationDescriptor::new(Op::Set)
        .with_path(vec!["system".into(), "host-name".into()])
        .with_value("edge-01");
    server
        .client
        .send(Endpoint::Configure, &descriptor)
        .await
        .unwrap();

    let requests = device.requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.endpoint, "configure");
    assert_eq!(request.fields, vec!["key".to_string(), "data".to_string()]);
    assert_eq!(request.key.as_deref(), Some(KEY));
    assert_eq!(
        request.data().unwrap(),
        serde_json::to_value(&descriptor).unwrap()
    );
}

#[tokio::test]
async fn test_send_returns_data_unchanged() {
    let (device, server) = setup().await;
    let data = json!({"interfaces": {"ethernet": {"eth0": {"address": ["dhcp"]}}}});
    device
        .respond(Endpoint::Retrieve, MockResponse::ok(data.clone()))
        .await;

    let descriptor = OperationDescriptor::new(Op::ShowConfig).with_path(vec![]);
    let result = server
        .client
        .send(Endpoint::Retrieve, &descriptor)
        .await
        .unwrap();
    assert_eq!(result, data);
}

#[tokio::test]
async fn test_failing_envelope_is_remote_error_regardless_of_status() {
    let mut messages = Vec::new();

    for status in [200, 500] {
        let (device, server) = setup().await;
        device
            .respond(
                Endpoint::Configure,
                MockResponse::failure(status, "Configuration path: [foo] is not valid"),
            )
            .await;

        let err = server
            .client
            .configure()
            .set("foo", "bar")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteOperation);
        messages.push(err.to_string());
    }

    assert_eq!(messages[0], messages[1]);
    assert_eq!(
        messages[0],
        "Remote operation failed: Configuration path: [foo] is not valid"
    );
}

#[tokio::test]
async fn test_wrong_key_is_remote_error() {
    let device = MockDevice::new();
    device.require_key("right-key").await;
    let server = TestServer::start(device.router(), "wrong-key").await.unwrap();

    let err = server.client.operational().show("version").await.unwrap_err();
    assert!(err.is_remote());
    assert_eq!(err.remote_message(), Some("Valid API key is required"));
}

#[tokio::test]
async fn test_non_envelope_body_is_transport_error() {
    let (device, server) = setup().await;
    device
        .respond(Endpoint::Show, MockResponse::raw(502, "<html>Bad Gateway</html>"))
        .await;

    let err = server.client.operational().show("version").await.unwrap_err();
    assert!(err.is_transport());
    match err {
        VyosClientError::InvalidResponse { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "<html>Bad Gateway</html>");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Reserve a port and release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = VyosClient::new(&format!("http://{}", addr), KEY).unwrap();
    let err = client.configure().get("system host-name").await.unwrap_err();
    assert!(matches!(err, VyosClientError::Transport(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.remote_message().is_none());
}

#[tokio::test]
async fn test_requests_after_shutdown_fail_with_transport_error() {
    let (device, server) = setup().await;
    let client = server.client.clone();

    client.operational().show("version").await.unwrap();
    server.shutdown().await;

    let err = client.operational().show("version").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(device.requests().await.len(), 1);
}

#[tokio::test]
async fn test_debug_logs_omit_key_and_values() {
    let (_device, server) = setup().await;

    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || LogWriter(writer.clone()))
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    server
        .client
        .configure()
        .set(
            "system login user admin authentication plaintext-password",
            "hunter2",
        )
        .await
        .unwrap();
    server
        .client
        .configure()
        .comment("interfaces ethernet eth0", "vault-token-abc")
        .await
        .unwrap();

    let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("plaintext-password"));
    assert!(!logs.contains("hunter2"));
    assert!(!logs.contains("vault-token-abc"));
    assert!(!logs.contains(KEY));
}

#[tokio::test]
async fn test_concurrent_calls() {
    let (device, server) = setup().await;
    device
        .respond(Endpoint::Show, MockResponse::ok(json!("output")))
        .await;

    let client = &server.client;
    let calls = (0..8).map(|i| async move {
        client
            .operational()
            .show(&format!("interfaces ethernet eth{}", i))
            .await
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| r.as_ref().unwrap() == &json!("output")));
    assert_eq!(device.requests().await.len(), 8);
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_get_unwraps_leaf() {
    let (device, server) = setup().await;
    device
        .respond(Endpoint::Retrieve, MockResponse::ok(json!({"host-name": "my-vyos"})))
        .await;

    let value = server.client.configure().get("system host-name").await.unwrap();
    assert_eq!(value, json!("my-vyos"));

    let requests = device.requests().await;
    assert_eq!(
        requests[0].data().unwrap(),
        json!({"op": "showConfig", "path": ["system", "host-name"]})
    );
}

#[tokio::test]
async fn test_get_returns_full_mapping() {
    let (device, server) = setup().await;
    device
        .respond(Endpoint::Retrieve, MockResponse::ok(json!({"a": 1, "b": 2})))
        .await;

    let value = server.client.configure().get("system").await.unwrap();
    assert_eq!(value, json!({"a": 1, "b": 2}));
}

#[tokio::test]
async fn test_set_delete_comment_descriptors() {
    let (device, server) = setup().await;
    let configure = server.client.configure();

    configure.set("system host-name", "edge-01").await.unwrap();
    configure.delete("service ssh").await.unwrap();
    configure
        .comment("interfaces ethernet eth0", "uplink")
        .await
        .unwrap();

    let requests = device.requests().await;
    assert!(requests.iter().all(|r| r.endpoint == "configure"));
    assert_eq!(
        requests[0].data().unwrap(),
        json!({"op": "set", "path": ["system", "host-name"], "value": "edge-01"})
    );
    assert_eq!(
        requests[1].data().unwrap(),
        json!({"op": "delete", "path": ["service", "ssh"]})
    );
    assert_eq!(
        requests[2].data().unwrap(),
        json!({"op": "comment", "path": ["interfaces", "ethernet", "eth0"], "value": "uplink"})
    );
}

#[tokio::test]
async fn test_save_and_load_default_file() {
    let (device, server) = setup().await;
    let configure = server.client.configure();

    configure.save(None).await.unwrap();
    configure.load(None).await.unwrap();
    configure.save(Some("/config/backup.boot")).await.unwrap();

    let requests = device.requests().await;
    assert!(requests.iter().all(|r| r.endpoint == "config-file"));
    assert_eq!(
        requests[0].data().unwrap(),
        json!({"op": "save", "file": "/config/config.boot"})
    );
    assert_eq!(
        requests[1].data().unwrap(),
        json!({"op": "load", "file": "/config/config.boot"})
    );
    assert_eq!(
        requests[2].data().unwrap(),
        json!({"op": "save", "file": "/config/backup.boot"})
    );
}

#[tokio::test]
async fn test_exists_and_return_values() {
    let (device, server) = setup().await;
    device
        .respond(Endpoint::Retrieve, MockResponse::ok(json!(true)))
        .await;
    assert!(server.client.configure().exists("service ssh").await.unwrap());

    device
        .respond(
            Endpoint::Retrieve,
            MockResponse::ok(json!(["1.1.1.1", "9.9.9.9"])),
        )
        .await;
    let values = server
        .client
        .configure()
        .return_values("system name-server")
        .await
        .unwrap();
    assert_eq!(values, vec!["1.1.1.1".to_string(), "9.9.9.9".to_string()]);

    let requests = device.requests().await;
    assert_eq!(requests[0].data().unwrap()["op"], "exists");
    assert_eq!(requests[1].data().unwrap()["op"], "returnValues");
}

#[tokio::test]
async fn test_exists_with_unexpected_data() {
    let (device, server) = setup().await;
    device
        .respond(Endpoint::Retrieve, MockResponse::ok(json!("yes")))
        .await;

    let err = server.client.configure().exists("service ssh").await.unwrap_err();
    assert!(matches!(err, VyosClientError::UnexpectedData(_)));
}

// =============================================================================
// Images and operational mode
// =============================================================================

#[tokio::test]
async fn test_image_add_and_remove() {
    let (device, server) = setup().await;
    let url = "https://downloads.example.com/vyos-1.4.0-amd64.iso";

    server.client.image().add(url).await.unwrap();
    server.client.image().remove("1.3.8").await.unwrap();

    let requests = device.requests().await;
    assert!(requests.iter().all(|r| r.endpoint == "image"));
    assert_eq!(requests[0].data().unwrap(), json!({"op": "add", "url": url}));
    assert_eq!(
        requests[1].data().unwrap(),
        json!({"op": "delete", "name": "1.3.8"})
    );
}

#[tokio::test]
async fn test_operational_commands() {
    let (device, server) = setup().await;
    device
        .respond(Endpoint::Show, MockResponse::ok(json!("Version: VyOS 1.4.0")))
        .await;

    let output = server.client.operational().show("version").await.unwrap();
    assert_eq!(output, json!("Version: VyOS 1.4.0"));

    server
        .client
        .operational()
        .generate("pki wireguard key-pair")
        .await
        .unwrap();
    server
        .client
        .operational()
        .reset("ip bgp 192.0.2.11")
        .await
        .unwrap();

    let requests = device.requests().await;
    assert_eq!(requests[0].endpoint, "show");
    assert_eq!(requests[0].data().unwrap(), json!({"op": "show", "path": ["version"]}));
    assert_eq!(requests[1].endpoint, "generate");
    assert_eq!(
        requests[1].data().unwrap(),
        json!({"op": "generate", "path": ["pki", "wireguard", "key-pair"]})
    );
    assert_eq!(requests[2].endpoint, "reset");
    assert_eq!(
        requests[2].data().unwrap(),
        json!({"op": "reset", "path": ["ip", "bgp", "192.0.2.11"]})
    );
}
