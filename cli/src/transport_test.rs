use super::*;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use triage::TriageLevel;

/// Serve `handler` at the analysis path on a loopback port.
async fn spawn_proxy<H, T>(handler: H) -> String
where
    H: axum::handler::Handler<T, ()>,
    T: 'static,
{
    let app = axum::Router::new().route(ANALYZE_PATH, post(handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn transport(base: &str) -> HttpTransport {
    HttpTransport::new(base, Duration::from_secs(5)).unwrap()
}

fn request() -> TriageRequest {
    TriageRequest { symptoms: "sore throat".into(), user_id: Some("u-7".into()) }
}

// =========================================================================
// success
// =========================================================================

#[tokio::test]
async fn success_body_is_parsed() {
    let base = spawn_proxy(|Json(body): Json<serde_json::Value>| async move {
        Json(serde_json::json!({
            "analysis": format!("echo {} for {}", body["symptoms"], body["userId"]),
            "triageLevel": "green",
            "timestamp": "2026-10-15T08:30:00Z",
        }))
    })
    .await;

    let resp = transport(&base).classify(&request()).await.unwrap();
    assert_eq!(resp.analysis, "echo \"sore throat\" for \"u-7\"");
    assert_eq!(resp.triage_level, TriageLevel::Low);
    assert_eq!(resp.timestamp.year(), 2026);
}

#[tokio::test]
async fn unreadable_success_body_is_upstream_unavailable() {
    let base = spawn_proxy(|| async { "not json" }).await;
    let err = transport(&base).classify(&request()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::UpstreamUnavailable);
    assert!(err.message.contains("invalid analysis response"));
}

// =========================================================================
// error statuses
// =========================================================================

#[tokio::test]
async fn body_code_wins_over_status() {
    let base = spawn_proxy(|| async {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "not configured", "code": "E_MISCONFIGURED", "retryable": false })),
        )
            .into_response()
    })
    .await;

    let err = transport(&base).classify(&request()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Misconfigured);
    assert_eq!(err.message, "not configured");
}

#[tokio::test]
async fn bare_429_is_rate_limited() {
    let base = spawn_proxy(|| async {
        (StatusCode::TOO_MANY_REQUESTS, Json(serde_json::json!({ "error": "Rate limit exceeded." }))).into_response()
    })
    .await;

    let err = transport(&base).classify(&request()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::RateLimited);
    assert_eq!(err.message, "Rate limit exceeded.");
}

#[tokio::test]
async fn bare_402_is_quota_exceeded() {
    let base = spawn_proxy(|| async { StatusCode::PAYMENT_REQUIRED }).await;
    let err = transport(&base).classify(&request()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::QuotaExceeded);
    assert_eq!(err.message, "HTTP 402");
}

#[tokio::test]
async fn other_status_is_upstream_unavailable() {
    let base = spawn_proxy(|| async { (StatusCode::SERVICE_UNAVAILABLE, "gateway down") }).await;
    let err = transport(&base).classify(&request()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::UpstreamUnavailable);
    assert_eq!(err.message, "gateway down");
}

// =========================================================================
// network
// =========================================================================

#[tokio::test]
async fn unreachable_proxy_is_upstream_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = transport(&format!("http://{addr}")).classify(&request()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::UpstreamUnavailable);
}

#[tokio::test]
async fn truncated_error_body_is_reported() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        // Read until the JSON body has fully arrived.
        let mut seen = Vec::new();
        let mut buf = [0u8; 1024];
        while !seen.contains(&b'}') {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            seen.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 429 Too Many Requests\r\ncontent-length: 100\r\n\r\nshort")
            .await
            .unwrap();
    });

    let err = transport(&format!("http://{addr}")).classify(&request()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::RateLimited);
    assert!(err.message.starts_with("HTTP 429: unreadable error body"), "{}", err.message);
}

#[test]
fn endpoint_ignores_trailing_slash() {
    let t = transport("http://localhost:3000/");
    assert_eq!(t.endpoint, "http://localhost:3000/api/analyze-symptoms");
}
