use super::*;
use serde_json::{Value, json};
use std::sync::Mutex;

// =========================================================================
// MockTransport
// =========================================================================

struct MockTransport {
    replies: Mutex<Vec<Result<Value, GenerateError>>>,
    sent: Mutex<Vec<String>>,
}

impl MockTransport {
    fn new(replies: Vec<Result<Value, GenerateError>>) -> Arc<Self> {
        Arc::new(Self { replies: Mutex::new(replies), sent: Mutex::new(Vec::new()) })
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, prompt: &str) -> Result<Value, GenerateError> {
        self.sent.lock().unwrap().push(prompt.to_owned());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() { Err(GenerateError::Status(503)) } else { replies.remove(0) }
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Proxied
    }
}

fn reply(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
}

// =========================================================================
// Prompt
// =========================================================================

#[test]
fn full_text_joins_context_with_blank_line() {
    let prompt = Prompt::with_context("You are helpful.", "Say hi");
    assert_eq!(prompt.full_text(), "You are helpful.\n\nSay hi");
}

#[test]
fn full_text_without_context_is_text() {
    assert_eq!(Prompt::new("Say hi").full_text(), "Say hi");
    assert_eq!(Prompt::with_context("  ", "Say hi").full_text(), "Say hi");
}

// =========================================================================
// generate
// =========================================================================

#[tokio::test]
async fn generate_sends_combined_prompt_once() {
    let transport = MockTransport::new(vec![Ok(reply("Great stack."))]);
    let client = GenerationClient::new(transport.clone(), FallbackPolicy::None);

    let out = client.generate(&Prompt::with_context("ctx", "ask")).await;
    assert_eq!(out.as_deref(), Some("Great stack."));
    assert_eq!(transport.sent(), vec!["ctx\n\nask".to_owned()]);
}

#[tokio::test]
async fn generate_normalizes_quotes_and_whitespace() {
    let transport = MockTransport::new(vec![Ok(reply("  \"Polished message.\"\n"))]);
    let client = GenerationClient::new(transport, FallbackPolicy::None);

    let out = client.generate(&Prompt::new("Rewrite this")).await;
    assert_eq!(out.as_deref(), Some("Polished message."));
}

#[tokio::test]
async fn generate_failure_without_fallback_is_none() {
    let transport = MockTransport::new(vec![Err(GenerateError::ProxyRequest("refused".into()))]);
    let client = GenerationClient::new(transport.clone(), FallbackPolicy::None);

    assert_eq!(client.generate(&Prompt::new("anything")).await, None);
    assert_eq!(transport.sent().len(), 1, "no retry");
}

#[tokio::test]
async fn generate_missing_text_is_failure() {
    let transport = MockTransport::new(vec![Ok(json!({ "candidates": [] })), Ok(reply("   "))]);
    let client = GenerationClient::new(transport, FallbackPolicy::None);

    assert_eq!(client.generate(&Prompt::new("a")).await, None);
    assert_eq!(client.generate(&Prompt::new("b")).await, None);
}

#[tokio::test]
async fn generate_canned_fallback_follows_prompt_markers() {
    let transport = MockTransport::new(vec![]);
    let client = GenerationClient::new(transport.clone(), FallbackPolicy::Canned);

    let insight = client
        .generate(&Prompt::new("Write a \"Technical Deep Dive\" for X"))
        .await;
    let rewrite = client.generate(&Prompt::new("Rewrite the following message")).await;
    let other = client.generate(&Prompt::new("hello")).await;

    assert_eq!(insight.as_deref(), Some(fallback::INSIGHT_FALLBACK));
    assert_eq!(rewrite.as_deref(), Some(fallback::REWRITE_FALLBACK));
    assert_eq!(other.as_deref(), Some(fallback::UNAVAILABLE_FALLBACK));
    assert_eq!(transport.sent().len(), 3);
}

#[tokio::test]
async fn try_generate_surfaces_error() {
    let transport = MockTransport::new(vec![Err(GenerateError::Status(500))]);
    let client = GenerationClient::new(transport, FallbackPolicy::Canned);

    let err = client.try_generate(&Prompt::new("x")).await.unwrap_err();
    assert!(matches!(err, GenerateError::Status(500)));
}

#[test]
fn client_reports_configuration() {
    let client = GenerationClient::new(MockTransport::new(vec![]), FallbackPolicy::Canned);
    assert_eq!(client.transport_kind(), TransportKind::Proxied);
    assert_eq!(client.fallback_policy(), FallbackPolicy::Canned);
}

fn site_config(pairs: &[(&str, &str)]) -> SiteConfig {
    let map: std::collections::HashMap<&str, &str> = pairs.iter().copied().collect();
    SiteConfig::from_lookup(|key| map.get(key).map(|v| (*v).to_owned())).unwrap()
}

#[test]
fn from_config_defaults_to_proxy() {
    let client = GenerationClient::from_config(&site_config(&[])).unwrap();
    assert_eq!(client.transport_kind(), TransportKind::Proxied);
    assert_eq!(client.fallback_policy(), FallbackPolicy::None);
}

#[test]
fn from_config_local_key_goes_direct() {
    let client =
        GenerationClient::from_config(&site_config(&[(LOCAL_KEY_VAR, "dev-key"), ("GENERATE_FALLBACK", "canned")]))
            .unwrap();
    assert_eq!(client.transport_kind(), TransportKind::Direct);
    assert_eq!(client.fallback_policy(), FallbackPolicy::Canned);
}

#[test]
fn from_config_direct_without_key_errors() {
    let mut config = site_config(&[]);
    config.transport = TransportKind::Direct;
    let err = GenerationClient::from_config(&config).err().unwrap();
    assert!(matches!(err, GenerateError::Llm(LlmError::MissingApiKey { .. })));
}
