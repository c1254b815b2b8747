//! Shared helpers for integration tests.

#![allow(dead_code)]

use ai_megarepo::config::{HuggingFaceSettings, OpenAISettings, Settings};

/// Settings with the given credentials and every other field at its default.
pub fn settings_with_keys(openai_key: &str, huggingface_key: &str) -> Settings {
    Settings {
        openai: OpenAISettings {
            api_key: openai_key.to_string(),
            ..Default::default()
        },
        huggingface: HuggingFaceSettings {
            api_key: huggingface_key.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// OpenAI-style chat completion body with a single choice.
pub fn chat_completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}

/// OpenAI-style embeddings body with a single vector.
pub fn embedding_body(values: &[f32]) -> serde_json::Value {
    serde_json::json!({
        "object": "list",
        "data": [{ "object": "embedding", "index": 0, "embedding": values }],
        "model": "text-embedding-ada-002",
        "usage": { "prompt_tokens": 8, "total_tokens": 8 }
    })
}

/// Loose float comparison for values that went through JSON and `f32`.
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}
