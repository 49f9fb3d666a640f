use food_classifier::{
    classify::Classifier,
    config::UpstreamConfig,
    llm::{ChatCompletionResponse, LlmClient},
};
use serde_json::json;
use std::sync::Arc;

pub const APPLE_REPLY: &str = r#"{"label":"Apple","label_ar":"تفاح","calories_100g":52.3,"protein_100g":0.3,"carbs_100g":14,"fat_100g":0.2,"fiber_100g":2.4,"confidence":0.91}"#;

/// A tiny raw base64 payload; content is irrelevant to the relay.
pub const RAW_IMAGE: &str = "/9j/4AAQSkZJRgABAQ==";

/// Upstream config pointed at `base_url` with a test credential
pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "openai/gpt-4o-mini".to_string(),
        site_url: "http://localhost:5001".to_string(),
        app_name: "Food Classifier Test".to_string(),
        timeout_secs: 5,
        max_tokens: 350,
    }
}

pub fn completion_with_text(text: &str) -> ChatCompletionResponse {
    serde_json::from_value(completion_body(text)).unwrap()
}

pub fn completion_with_finish(text: &str, finish_reason: &str) -> ChatCompletionResponse {
    let mut body = completion_body(text);
    body["choices"][0]["finish_reason"] = json!(finish_reason);
    serde_json::from_value(body).unwrap()
}

/// Provider success body wrapping `text` as the assistant message
pub fn completion_body(text: &str) -> serde_json::Value {
    json!({
        "id": "gen-test",
        "model": "openai/gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 900, "completion_tokens": 60, "total_tokens": 960}
    })
}

pub fn classifier_with(llm: Arc<dyn LlmClient>) -> Classifier {
    Classifier::new(Some(llm), "openai/gpt-4o-mini".to_string(), 350)
}

pub fn classifier_without_credential() -> Classifier {
    Classifier::new(None, "openai/gpt-4o-mini".to_string(), 350)
}
