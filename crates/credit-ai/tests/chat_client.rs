use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use credit_ai::chat::{ChatClient, ChatError, ChatMessage, ChatRole};
use credit_ai::config::ChatConfig;

const STREAM_BODY: &str = concat!(
    ": keep-alive\n",
    "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"content\":\"Pay \"}}]}\r\n\r\n",
    "data: {\"choices\":[{\"delta\":{\"content\":\"on time.\"}}]}\n\n",
    "data: [DONE]\n\n",
    "data: {\"choices\":[{\"delta\":{\"content\":\"ignored\"}}]}\n\n",
);

async fn stream_reply() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/event-stream")],
        STREAM_BODY,
    )
}

async fn rate_limited() -> impl IntoResponse {
    StatusCode::TOO_MANY_REQUESTS
}

async fn quota_exhausted() -> impl IntoResponse {
    StatusCode::PAYMENT_REQUIRED
}

async fn spawn_chat_server() -> String {
    let app = Router::new()
        .route("/stream", post(stream_reply))
        .route("/limited", post(rate_limited))
        .route("/quota", post(quota_exhausted));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server runs");
    });

    format!("http://{addr}")
}

fn client_for(endpoint: String) -> ChatClient {
    let config = ChatConfig {
        endpoint: Some(endpoint),
        api_key: Some("test-key".to_string()),
        timeout: Duration::from_secs(5),
    };
    ChatClient::from_config(&config)
        .expect("client builds")
        .expect("endpoint configured")
}

#[tokio::test]
async fn streams_deltas_until_done() {
    let base = spawn_chat_server().await;
    let client = client_for(format!("{base}/stream"));
    let conversation = [ChatMessage::greeting(), ChatMessage::user("How do I improve?")];

    let mut deltas = Vec::new();
    let reply = client
        .stream_reply(&conversation, |delta| deltas.push(delta.to_string()))
        .await
        .expect("stream succeeds");

    assert_eq!(reply, "Pay on time.");
    assert_eq!(deltas, vec!["Pay ".to_string(), "on time.".to_string()]);
}

#[tokio::test]
async fn rate_limit_becomes_assistant_message() {
    let base = spawn_chat_server().await;
    let client = client_for(format!("{base}/limited"));
    let conversation = [ChatMessage::user("Hello")];

    let err = client
        .stream_reply(&conversation, |_| {})
        .await
        .expect_err("429 surfaces as an error");
    assert!(matches!(err, ChatError::RateLimited));

    let message = client.reply(&conversation).await;
    assert_eq!(message.role, ChatRole::Assistant);
    assert_eq!(message.content, "Rate limited. Please try again later.");
}

#[tokio::test]
async fn exhausted_quota_becomes_assistant_message() {
    let base = spawn_chat_server().await;
    let client = client_for(format!("{base}/quota"));

    let message = client.reply(&[ChatMessage::user("Hello")]).await;
    assert_eq!(message.content, "Usage limit reached.");
}

#[tokio::test]
async fn unreachable_endpoint_reports_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);

    let client = client_for(format!("http://{addr}/stream"));
    let message = client.reply(&[ChatMessage::user("Hello")]).await;
    assert_eq!(message.content, "Connection error. Please try again.");
}

/// Serves one request, streams a single delta, then drops the connection short of the declared
/// content length.
async fn spawn_truncating_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind truncating listener");
    let addr = listener.local_addr().expect("truncating address");

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept chat request");
        read_request(&mut socket).await;

        let delta = "data: {\"choices\":[{\"delta\":{\"content\":\"Keep EMIs low.\"}}]}\n\n";
        let head = "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ncontent-length: 4096\r\n\r\n";
        socket
            .write_all(format!("{head}{delta}").as_bytes())
            .await
            .expect("write partial reply");
        socket.flush().await.expect("flush partial reply");
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}/stream")
}

async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let read = socket.read(&mut chunk).await.expect("read chat request");
        if read == 0 {
            return;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&buffer);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let body_len = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        if buffer.len() >= header_end + 4 + body_len {
            return;
        }
    }
}

#[tokio::test]
async fn dropped_stream_keeps_streamed_text() {
    let client = client_for(spawn_truncating_server().await);

    let message = client.reply(&[ChatMessage::user("How do I improve?")]).await;
    assert_eq!(
        message.content,
        "Keep EMIs low.\n\nConnection error. Please try again."
    );
}
