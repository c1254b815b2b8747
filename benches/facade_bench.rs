use ai_megarepo::provider::CandleHelper;
use ai_megarepo::provider::huggingface::{
    FeatureExtraction, ZeroShotResponse, classification_from_response, normalize_embedding,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tokio::runtime::Runtime;

// --- Response decoding ---

fn bench_decode(c: &mut Criterion) {
    let flat = serde_json::to_vec(&vec![0.1f32; 384]).unwrap();
    let nested = serde_json::to_vec(&vec![vec![0.1f32; 384]; 16]).unwrap();
    let zero_shot = serde_json::to_vec(&serde_json::json!({
        "sequence": "I love using AI tools for development!",
        "labels": ["positive", "neutral", "negative"],
        "scores": [0.92, 0.06, 0.02]
    }))
    .unwrap();

    c.bench_function("embedding_decode_flat", |b| {
        b.iter(|| {
            let parsed: FeatureExtraction = serde_json::from_slice(black_box(&flat)).unwrap();
            normalize_embedding(parsed)
        })
    });

    c.bench_function("embedding_decode_nested", |b| {
        b.iter(|| {
            let parsed: FeatureExtraction = serde_json::from_slice(black_box(&nested)).unwrap();
            normalize_embedding(parsed)
        })
    });

    c.bench_function("zero_shot_decode", |b| {
        b.iter(|| {
            let parsed: ZeroShotResponse = serde_json::from_slice(black_box(&zero_shot)).unwrap();
            classification_from_response(parsed)
        })
    });
}

// --- Local training ---

fn bench_training(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let helper = CandleHelper::default();
    rt.block_on(helper.initialize()).unwrap();

    let xs: Vec<f32> = (1..=10).map(|x| x as f32).collect();
    let ys: Vec<f32> = xs.iter().map(|x| 2.0 * x + 1.0).collect();

    c.bench_function("train_simple_model_10_points", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = helper.train_simple_model(&xs, &ys).await.unwrap();
        })
    });

    let model = rt.block_on(helper.train_simple_model(&xs, &ys)).unwrap();
    c.bench_function("predict_single", |b| {
        b.iter(|| helper.predict(&model, black_box(11.0)).unwrap())
    });
}

criterion_group!(benches, bench_decode, bench_training);
criterion_main!(benches);
