//! Tests for request metrics emitted around facade calls.

#![cfg(all(feature = "provider-candle", feature = "provider-openai"))]

mod common;
use ai_megarepo::provider::{CandleHelper, OpenAIClient};
use ai_megarepo::traits::GenerationOptions;
use common::settings_with_keys;
use metrics::{SharedString, Unit};
use metrics_util::CompositeKey;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

type Entry = (CompositeKey, Option<Unit>, Option<SharedString>, DebugValue);

fn counter_value(entries: &[Entry], facade: &str, operation: &str, status: &str) -> u64 {
    entries
        .iter()
        .find_map(|(ckey, _, _, value)| {
            let key = ckey.key();
            let has = |name: &str, expected: &str| {
                key.labels()
                    .any(|l| l.key() == name && l.value() == expected)
            };
            let matches = key.name() == "provider_request.total"
                && has("facade", facade)
                && has("operation", operation)
                && has("status", status);
            match (matches, value) {
                (true, DebugValue::Counter(n)) => Some(*n),
                _ => None,
            }
        })
        .unwrap_or(0)
}

// One global recorder per test binary, so everything lives in one test.
#[tokio::test]
async fn test_facade_calls_record_request_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let _ = metrics::set_global_recorder(recorder);

    // Local success and validation failure.
    let helper = CandleHelper::default();
    let model = helper
        .train_simple_model(&[1.0, 2.0], &[2.0, 4.0])
        .await
        .unwrap();
    helper.predict(&model, 3.0).unwrap();
    assert!(helper.train_simple_model(&[], &[]).await.is_err());

    // Remote failure.
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let client = OpenAIClient::new(&settings_with_keys("sk-test", ""))
        .unwrap()
        .with_base_url(server.uri());
    assert!(
        client
            .generate_text("hi", GenerationOptions::default())
            .await
            .is_err()
    );

    let entries = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_value(&entries, "candle", "train_simple_model", "success"),
        1
    );
    assert_eq!(
        counter_value(&entries, "candle", "train_simple_model", "failure"),
        1
    );
    assert_eq!(
        counter_value(&entries, "candle", "predict", "success"),
        1
    );
    assert_eq!(
        counter_value(&entries, "openai", "generate_text", "failure"),
        1
    );
}
