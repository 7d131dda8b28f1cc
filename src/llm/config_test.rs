use super::*;
use std::collections::HashMap;

fn from_pairs(pairs: &[(&str, &str)]) -> LlmConfig {
    let map: HashMap<&str, &str> = pairs.iter().copied().collect();
    LlmConfig::from_lookup(|key| map.get(key).map(|v| (*v).to_owned()))
}

#[test]
fn from_lookup_defaults() {
    let cfg = from_pairs(&[]);
    assert_eq!(cfg, LlmConfig::default());
    assert_eq!(
        cfg.endpoint(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = from_pairs(&[
        ("GEMINI_BASE_URL", "http://localhost:9999/v1beta/"),
        ("GEMINI_MODEL", "gemini-2.0-flash"),
        ("LLM_REQUEST_TIMEOUT_SECS", "42"),
        ("LLM_CONNECT_TIMEOUT_SECS", "7"),
    ]);
    assert_eq!(cfg.base_url, "http://localhost:9999/v1beta");
    assert_eq!(cfg.model, "gemini-2.0-flash");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });
    assert_eq!(cfg.endpoint(), "http://localhost:9999/v1beta/models/gemini-2.0-flash:generateContent");
}

#[test]
fn from_lookup_bad_numbers_fall_back() {
    let cfg = from_pairs(&[("LLM_REQUEST_TIMEOUT_SECS", "soon"), ("LLM_CONNECT_TIMEOUT_SECS", "-1")]);
    assert_eq!(cfg.timeouts, LlmTimeouts::default());
}

#[test]
fn from_lookup_blank_model_uses_default() {
    let cfg = from_pairs(&[("GEMINI_MODEL", "  ")]);
    assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
}
