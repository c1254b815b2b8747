//! OpenAI example: generate a short explanation, then embed a sentence.
//!
//! Run with:
//! ```sh
//! OPENAI_API_KEY=sk-... cargo run --example openai_example
//! ```

use ai_megarepo::config::Settings;
use ai_megarepo::provider::OpenAIClient;
use ai_megarepo::traits::GenerationOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("Running OpenAI example");

    // 1. Build the client from the environment
    let settings = Settings::from_env()?;
    let openai = OpenAIClient::new(&settings)?;

    // 2. Text generation with a larger token budget than the default
    let prompt = "Explain artificial intelligence in simple terms:";
    println!("Prompt: {prompt}");
    let response = openai
        .generate_text(
            prompt,
            GenerationOptions::default()
                .with_max_tokens(150)
                .with_temperature(0.7),
        )
        .await?;
    println!("Response: {response}");

    // 3. Embedding
    let text = "Machine learning is a subset of artificial intelligence.";
    let embedding = openai.generate_embedding(text).await?;
    println!("Embedding vector length: {}", embedding.len());
    println!(
        "First 5 embedding values: {:?}",
        &embedding[..embedding.len().min(5)]
    );

    Ok(())
}
