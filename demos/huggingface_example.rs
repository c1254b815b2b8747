//! Hugging Face example: zero-shot classification followed by a sentence
//! embedding.
//!
//! Run with:
//! ```sh
//! HUGGINGFACE_API_KEY=hf_... cargo run --example huggingface_example
//! ```

use ai_megarepo::config::Settings;
use ai_megarepo::provider::HuggingFaceClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("Running Hugging Face example");

    let settings = Settings::from_env()?;
    let hf = HuggingFaceClient::new(&settings);

    // 1. Zero-shot classification
    let text = "I love using AI tools for development!";
    let labels: Vec<String> = ["positive", "negative", "neutral"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    println!("Text to classify: {text}");
    println!("Available labels: {labels:?}");

    let classification = hf.classify_text(text, &labels).await?;
    for entry in &classification {
        println!("  {:<10} {:.4}", entry.label, entry.score);
    }

    // 2. Embedding
    let embedding_text = "Natural language processing with transformers";
    let embedding = hf.get_embedding(embedding_text).await?;
    println!("Embedding text: {embedding_text}");
    println!("Embedding vector length: {}", embedding.len());
    println!(
        "First 5 embedding values: {:?}",
        &embedding[..embedding.len().min(5)]
    );

    Ok(())
}
