use super::*;
use crate::generate::{FallbackPolicy, GenerationClient, Prompt};
use crate::llm::test_helpers::RecordingServer;
use crate::llm::{LlmError, UpstreamReply};
use axum::http::{Method, StatusCode};
use serde_json::json;
use std::sync::Mutex;

struct MockUpstream {
    reply: Mutex<Option<Result<UpstreamReply, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockUpstream {
    fn new(reply: Result<UpstreamReply, LlmError>) -> Self {
        Self { reply: Mutex::new(Some(reply)), prompts: Mutex::new(Vec::new()) }
    }
}

#[async_trait::async_trait]
impl Upstream for MockUpstream {
    async fn generate_content(&self, prompt: &str) -> Result<UpstreamReply, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(LlmError::ApiRequest("exhausted".into())))
    }
}

#[tokio::test]
async fn direct_passes_prompt_and_returns_body() {
    let body = json!({ "candidates": [] });
    let upstream = Arc::new(MockUpstream::new(Ok(UpstreamReply { status: 200, body: body.clone() })));
    let transport = DirectTransport::new(upstream.clone());

    let out = transport.send("ctx\n\nask").await.unwrap();
    assert_eq!(out, body);
    assert_eq!(upstream.prompts.lock().unwrap().as_slice(), ["ctx\n\nask"]);
    assert_eq!(transport.kind(), TransportKind::Direct);
}

#[tokio::test]
async fn direct_rejects_non_success_status() {
    let upstream = Arc::new(MockUpstream::new(Ok(UpstreamReply {
        status: 403,
        body: json!({ "error": { "message": "API key not valid" } }),
    })));
    let transport = DirectTransport::new(upstream);

    let err = transport.send("x").await.unwrap_err();
    assert!(matches!(err, GenerateError::Status(403)));
}

#[tokio::test]
async fn direct_propagates_upstream_error() {
    let upstream = Arc::new(MockUpstream::new(Err(LlmError::ApiRequest("connection refused".into()))));
    let transport = DirectTransport::new(upstream);

    let err = transport.send("x").await.unwrap_err();
    assert!(matches!(err, GenerateError::Llm(LlmError::ApiRequest(_))));
}

#[test]
fn proxy_url_joins_base() {
    assert_eq!(proxy_url("http://127.0.0.1:3000"), "http://127.0.0.1:3000/api/generate");
    assert_eq!(proxy_url("https://example.dev/"), "https://example.dev/api/generate");
}

#[test]
fn proxy_transport_reports_kind_and_url() {
    let transport = ProxyTransport::new("http://localhost:3000/", LlmTimeouts::default()).unwrap();
    assert_eq!(transport.kind(), TransportKind::Proxied);
    assert_eq!(transport.url(), "http://localhost:3000/api/generate");
}

#[tokio::test]
async fn proxy_transport_unreachable_host_is_error() {
    // Port 9 (discard) on loopback is closed on test hosts; connection is refused.
    let transport =
        ProxyTransport::new("http://127.0.0.1:9", LlmTimeouts { request_secs: 2, connect_secs: 1 }).unwrap();
    let err = transport.send("hello").await.unwrap_err();
    assert!(matches!(err, GenerateError::ProxyRequest(_)));
}

#[tokio::test]
async fn proxy_transport_posts_prompt_json() {
    let reply = json!({ "candidates": [{ "content": { "parts": [{ "text": "  \"Polished.\"  " }] } }] });
    let server = RecordingServer::start(StatusCode::OK, reply.clone()).await;
    let transport = ProxyTransport::new(&server.base_url, LlmTimeouts::default()).unwrap();

    let out = transport.send("ctx\n\nrewrite this").await.unwrap();
    assert_eq!(out, reply);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, "/api/generate");
    assert_eq!(requests[0].body, json!({ "prompt": "ctx\n\nrewrite this" }));
}

#[tokio::test]
async fn proxied_client_normalizes_reply_text() {
    let reply = json!({ "candidates": [{ "content": { "parts": [{ "text": "  \"Polished.\"  " }] } }] });
    let server = RecordingServer::start(StatusCode::OK, reply).await;
    let transport = ProxyTransport::new(&server.base_url, LlmTimeouts::default()).unwrap();
    let client = GenerationClient::new(Arc::new(transport), FallbackPolicy::None);

    let text = client.try_generate(&Prompt::with_context("ctx", "rewrite this")).await.unwrap();
    assert_eq!(text, "Polished.");
    assert_eq!(server.requests()[0].body, json!({ "prompt": "ctx\n\nrewrite this" }));
}

#[tokio::test]
async fn proxy_transport_rejects_server_error_status() {
    let server =
        RecordingServer::start(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal Server Error" })).await;
    let transport = ProxyTransport::new(&server.base_url, LlmTimeouts::default()).unwrap();

    let err = transport.send("x").await.unwrap_err();
    assert!(matches!(err, GenerateError::Status(500)));
}
