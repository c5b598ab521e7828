//! Integration tests for the probe client against a local HTTP stub.

use graphql_recon_introspect::{Method, ProbeClient, RequestBody, TransportError};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Requests received by the stub, in arrival order.
type Received = Arc<Mutex<Vec<String>>>;

/// Serves one canned reply per connection; the last reply repeats.
async fn serve(replies: Vec<(u16, String)>) -> (String, Received) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received: Received = Arc::default();
    let log = Arc::clone(&received);

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let request = read_request(&mut stream).await;
            let index = {
                let mut log = log.lock().unwrap();
                log.push(request);
                log.len() - 1
            };
            let (status, body) = &replies[index.min(replies.len() - 1)];
            let response = format!(
                "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        }
    });

    (format!("http://{addr}/graphql"), received)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let content_length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn fast_client() -> ProbeClient {
    ProbeClient::new()
        .with_backoff(Duration::ZERO)
        .with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_retries_server_errors_until_success() {
    let (url, received) = serve(vec![
        (503, "{}".to_string()),
        (502, "{}".to_string()),
        (200, r#"{"data": {}}"#.to_string()),
    ])
    .await;

    let response = fast_client().probe(&url, "query { FUZZ }").await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.json().unwrap(), json!({"data": {}}));
    assert_eq!(received.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_gives_up_after_configured_retries() {
    let (url, received) = serve(vec![(500, "boom".to_string())]).await;

    let result = fast_client().with_retries(2).probe(&url, "query { FUZZ }").await;

    match result {
        Err(TransportError::Http(status, body)) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
    assert_eq!(received.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_client_errors_are_returned_without_retry() {
    let errors = json!({"errors": [{"message": "Cannot query field \"FUZZ\" on type \"Query\"."}]});
    let (url, received) = serve(vec![(400, errors.to_string())]).await;

    let response = fast_client().probe(&url, "query { FUZZ }").await.unwrap();

    assert_eq!(response.status, 400);
    assert_eq!(response.json().unwrap(), errors);
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_probe_sends_headers_and_query_body() {
    let (url, received) = serve(vec![(200, "{}".to_string())]).await;

    fast_client()
        .with_header("X-Api-Key", "secret")
        .probe(&url, "query { a { FUZZ } }")
        .await
        .unwrap();

    let request = received.lock().unwrap()[0].clone();
    assert!(request.starts_with("POST /graphql"));
    assert!(request.to_ascii_lowercase().contains("x-api-key: secret"));
    assert!(request.contains(r#"{"query":"query { a { FUZZ } }"}"#));
}

#[tokio::test]
async fn test_send_with_other_method_and_raw_body() {
    let (url, received) = serve(vec![(200, "{}".to_string())]).await;

    fast_client()
        .send(Method::PUT, &url, &RequestBody::Raw("plain text".to_string()))
        .await
        .unwrap();

    let request = received.lock().unwrap()[0].clone();
    assert!(request.starts_with("PUT /graphql"));
    assert!(request.ends_with("plain text"));
}

#[tokio::test]
async fn test_fetch_schema_decodes_introspection() {
    let payload = json!({
        "data": {"__schema": {
            "queryType": {"name": "Query"},
            "mutationType": null,
            "subscriptionType": null,
            "directives": [],
            "types": [
                {"kind": "OBJECT", "name": "Query", "fields": [
                    {"name": "me", "args": [], "type": {"kind": "OBJECT", "name": "User", "ofType": null}}
                ]},
                {"kind": "OBJECT", "name": "User", "fields": [
                    {"name": "id", "args": [], "type": {"kind": "NON_NULL", "name": null,
                        "ofType": {"kind": "SCALAR", "name": "ID", "ofType": null}}}
                ]},
                {"kind": "SCALAR", "name": "ID"}
            ]
        }}
    });
    let (url, _) = serve(vec![(200, payload.to_string())]).await;

    let schema = fast_client().fetch_schema(&url).await.unwrap();

    assert_eq!(schema.len(), 3);
    assert_eq!(schema.path_from_root("User").unwrap(), vec!["Query", "me"]);
}

#[tokio::test]
async fn test_fetch_schema_rejects_malformed_payload() {
    let (url, _) = serve(vec![(200, json!({"data": {"__schema": {}}}).to_string())]).await;

    let result = fast_client().fetch_schema(&url).await;

    assert!(matches!(result, Err(TransportError::Schema(_))));
}

#[tokio::test]
async fn test_fetch_schema_reports_disabled_introspection() {
    let (url, received) = serve(vec![(
        400,
        json!({"errors": [{"message": "introspection is disabled"}]}).to_string(),
    )])
    .await;

    let result = fast_client().fetch_schema(&url).await;

    assert!(matches!(result, Err(TransportError::Http(400, _))));
    assert_eq!(received.lock().unwrap().len(), 1);
}
