//! `ai-megarepo`: report which AI facades can be built from the current
//! environment and bring up the local numeric backend.
//!
//! Usage:
//!
//! ```text
//! OPENAI_API_KEY=... HUGGINGFACE_API_KEY=... ai-megarepo
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use ai_megarepo::config::Settings;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    println!("AI Megarepo initialized");
    println!("Available AI services:");

    // --- Hosted LLM ---------------------------------------------------------
    #[cfg(feature = "provider-openai")]
    match ai_megarepo::provider::OpenAIClient::new(&settings) {
        Ok(_) => println!("  [ok]   OpenAI client ready (model: {})", settings.openai.model),
        Err(e) => println!("  [skip] OpenAI client not configured: {e}"),
    }

    // --- Inference hub ------------------------------------------------------
    #[cfg(feature = "provider-huggingface")]
    if settings.huggingface.api_key.is_empty() {
        println!("  [skip] Hugging Face API key not configured");
    } else {
        let _client = ai_megarepo::provider::HuggingFaceClient::new(&settings);
        println!(
            "  [ok]   Hugging Face client ready (model: {})",
            settings.huggingface.model
        );
    }

    // --- Local numeric backend ---------------------------------------------
    #[cfg(feature = "provider-candle")]
    {
        let helper = ai_megarepo::provider::CandleHelper::new(&settings);
        helper.initialize().await?;
        println!(
            "  [ok]   Candle ready (backend: {})",
            settings.numeric.backend
        );
    }

    println!();
    println!(
        "All AI systems operational (configured port {}, no server started).",
        settings.server.port
    );
    Ok(())
}
