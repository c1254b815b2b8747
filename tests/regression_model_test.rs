//! Tests for the local Candle regression helper: training, prediction, and
//! save/load round-trips.

#![cfg(feature = "provider-candle")]

use ai_megarepo::config::Settings;
use ai_megarepo::error::FacadeError;
use ai_megarepo::provider::CandleHelper;
use std::sync::Arc;

#[tokio::test]
async fn test_initialize_succeeds_with_default_settings() {
    let helper = CandleHelper::new(&Settings::default());
    helper.initialize().await.unwrap();
    assert!(helper.is_initialized().await);
}

#[tokio::test]
async fn test_initialize_from_spawned_tasks() {
    let helper = Arc::new(CandleHelper::default());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let helper = helper.clone();
            tokio::spawn(async move { helper.initialize().await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert!(helper.is_initialized().await);
}

#[tokio::test]
async fn test_train_and_predict_linear_relation() {
    let helper = CandleHelper::default();
    helper.initialize().await.unwrap();

    // y = 2x
    let model = helper
        .train_simple_model(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0])
        .await
        .unwrap();
    let prediction = helper.predict(&model, 5.0).unwrap();

    assert!(
        (prediction - 10.0).abs() < 0.5,
        "expected ~10, got {prediction}"
    );
}

#[tokio::test]
async fn test_training_is_reproducible() {
    let helper = CandleHelper::default();
    let xs = [1.0, 2.0, 3.0, 4.0];
    let ys = [3.0, 5.0, 7.0, 9.0];

    let a = helper.train_simple_model(&xs, &ys).await.unwrap();
    let b = helper.train_simple_model(&xs, &ys).await.unwrap();

    assert_eq!(a.parameters().unwrap(), b.parameters().unwrap());
}

#[tokio::test]
async fn test_each_training_run_builds_a_fresh_model() {
    let helper = CandleHelper::default();
    let first = helper
        .train_simple_model(&[1.0, 2.0], &[2.0, 4.0])
        .await
        .unwrap();
    let before = first.parameters().unwrap();

    let _second = helper
        .train_simple_model(&[1.0, 2.0], &[-2.0, -4.0])
        .await
        .unwrap();

    assert_eq!(first.parameters().unwrap(), before);
}

#[tokio::test]
async fn test_mismatched_lengths_are_validation_errors() {
    let helper = CandleHelper::default();
    let err = helper
        .train_simple_model(&[1.0, 2.0], &[1.0])
        .await
        .unwrap_err();
    match err {
        FacadeError::Validation(msg) => assert!(msg.contains("2 != 1")),
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_save_then_load_reproduces_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("linear");
    let path = path.to_str().unwrap();

    let helper = CandleHelper::default();
    let model = helper
        .train_simple_model(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0])
        .await
        .unwrap();
    helper.save_model(&model, path).await.unwrap();

    assert!(dir.path().join("linear/model.json").exists());
    assert!(dir.path().join("linear/weights.safetensors").exists());

    let restored = helper.load_model(path).await.unwrap();
    for x in [-3.0, 0.0, 5.0, 12.5] {
        let original = helper.predict(&model, x).unwrap();
        let loaded = helper.predict(&restored, x).unwrap();
        assert!(
            (original - loaded).abs() < 1e-5,
            "x={x}: {original} vs {loaded}"
        );
    }
}

#[tokio::test]
async fn test_file_prefixed_paths_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("file://{}", dir.path().join("model").display());

    let helper = CandleHelper::default();
    let model = helper
        .train_simple_model(&[0.0, 1.0], &[1.0, 3.0])
        .await
        .unwrap();
    helper.save_model(&model, &url).await.unwrap();

    let restored = helper.load_model(&url).await.unwrap();
    assert_eq!(
        model.parameters().unwrap(),
        restored.parameters().unwrap()
    );
}

#[tokio::test]
async fn test_load_missing_directory_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let helper = CandleHelper::default();
    let err = helper
        .load_model(missing.to_str().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, FacadeError::Load(_)));
}

#[tokio::test]
async fn test_load_rejects_foreign_manifest() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("model.json"),
        r#"{"format":"other","input_units":1,"units":1,"optimizer":"sgd","learning_rate":0.01,"loss":"mse"}"#,
    )
    .unwrap();

    let helper = CandleHelper::default();
    let err = helper
        .load_model(dir.path().to_str().unwrap())
        .await
        .unwrap_err();
    match err {
        FacadeError::Load(msg) => assert!(msg.contains("Unsupported model format")),
        other => panic!("Expected Load error, got {other:?}"),
    }
}
