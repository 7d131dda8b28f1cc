use super::*;

#[test]
fn request_serializes_to_single_text_part() {
    let body = serde_json::to_value(GenerateContentRequest::from_prompt("hi there")).unwrap();
    assert_eq!(body, serde_json::json!({ "contents": [{ "parts": [{ "text": "hi there" }] }] }));
}

#[test]
fn reply_success_range() {
    let ok = UpstreamReply { status: 200, body: Value::Null };
    let bad = UpstreamReply { status: 403, body: Value::Null };
    assert!(ok.is_success());
    assert!(!bad.is_success());
}

#[test]
fn missing_key_message_names_var() {
    let err = LlmError::MissingApiKey { var: "GEMINI_API_KEY".into() };
    assert!(err.to_string().contains("GEMINI_API_KEY"));
}
