//! Shared request/response types and the task traits the remote facades
//! implement.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default generation length when [`GenerationOptions::max_tokens`] is unset.
pub const DEFAULT_MAX_TOKENS: u32 = 100;

/// Default sampling temperature when [`GenerationOptions::temperature`] is unset.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A dense embedding vector. Length is decided by the remote model.
pub type Embedding = Vec<f32>;

/// One candidate label and its score from zero-shot classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Labels and scores in the order the provider returned them.
pub type ClassificationResult = Vec<LabelScore>;

/// Per-call overrides for text generation.
///
/// Absent fields fall back to the configured model, [`DEFAULT_MAX_TOKENS`],
/// and [`DEFAULT_TEMPERATURE`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    /// Model identifier overriding the one in [`Settings`](crate::config::Settings).
    pub model: Option<String>,
    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 = greedy, higher = more random).
    pub temperature: Option<f32>,
}

impl GenerationOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Fill in defaults, returning `(model, max_tokens, temperature)`.
    pub(crate) fn resolve<'a>(&'a self, default_model: &'a str) -> (&'a str, u32, f32) {
        (
            self.model.as_deref().unwrap_or(default_model),
            self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        )
    }
}

/// A facade that turns a single prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short provider name used in logs and metrics (e.g. `"openai"`).
    fn provider_id(&self) -> &'static str;

    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String>;
}

/// A facade that embeds one text into a dense vector.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    fn provider_id(&self) -> &'static str;

    async fn embed(&self, text: &str) -> Result<Embedding>;
}

/// A facade that scores a text against caller-supplied candidate labels.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    fn provider_id(&self) -> &'static str;

    async fn classify(&self, text: &str, labels: &[String]) -> Result<ClassificationResult>;
}
