//! Facade over the [Hugging Face Inference API](https://huggingface.co/docs/inference-providers).
//!
//! The hub answers with loosely-typed JSON whose shape depends on the model.
//! Responses are decoded into explicit untagged enums and then normalized:
//!
//! - feature extraction: [`FeatureExtraction`] → [`normalize_embedding`]
//! - zero-shot classification: [`ZeroShotResponse`] → [`classification_from_response`]
//! - text generation: [`TextGenerationResponse`]

use crate::config::Settings;
use crate::error::{FacadeError, ProviderError, Result};
use crate::instrument::{Boundary, observe};
use crate::provider::remote_common::{endpoint, send_json, with_bearer};
use crate::traits::{
    ClassificationResult, Embedding, GenerationOptions, LabelScore, TextEmbedder, TextGenerator,
    ZeroShotClassifier,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Default API root for the serverless inference router.
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Sentence-embedding model used by [`HuggingFaceClient::get_embedding`].
pub const EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// NLI model used by [`HuggingFaceClient::classify_text`].
pub const CLASSIFICATION_MODEL: &str = "facebook/bart-large-mnli";

const PROVIDER: &str = "Hugging Face";
const GENERATE: Boundary = Boundary::new("huggingface", "generate_text", "Hugging Face API error");
const EMBED: Boundary = Boundary::new("huggingface", "get_embedding", "Hugging Face Embedding error");
const CLASSIFY: Boundary = Boundary::new(
    "huggingface",
    "classify_text",
    "Hugging Face Classification error",
);

/// Raw feature-extraction payload, tried in declaration order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FeatureExtraction {
    /// `[0.1, 0.2, ...]`: one pooled vector.
    Flat(Vec<f32>),
    /// `[[0.1, 0.2], [0.3, 0.4], ...]`: one row per token or per input.
    Nested(Vec<Vec<f32>>),
    /// Anything else (deeper nesting, objects, mixed arrays).
    Unrecognized(serde_json::Value),
}

/// Reduce a feature-extraction payload to a single vector.
///
/// A nested payload yields only its first row; other rows are dropped.
pub fn normalize_embedding(response: FeatureExtraction) -> Embedding {
    match response {
        FeatureExtraction::Flat(values) => values,
        FeatureExtraction::Nested(rows) => rows.into_iter().next().unwrap_or_default(),
        FeatureExtraction::Unrecognized(_) => Vec::new(),
    }
}

/// Raw zero-shot classification payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ZeroShotResponse {
    /// `{"sequence": ..., "labels": [...], "scores": [...]}`
    Parallel { labels: Vec<String>, scores: Vec<f32> },
    /// Any payload missing either field.
    Other(serde_json::Value),
}

/// Zip parallel `labels`/`scores` into pairs, keeping the response's label
/// order. Returns an empty result when either field is missing.
///
/// If the two sequences differ in length the extra entries are dropped.
pub fn classification_from_response(response: ZeroShotResponse) -> ClassificationResult {
    match response {
        ZeroShotResponse::Parallel { labels, scores } => labels
            .into_iter()
            .zip(scores)
            .map(|(label, score)| LabelScore { label, score })
            .collect(),
        ZeroShotResponse::Other(_) => Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// Raw text-generation payload: either `[{"generated_text": ...}]` or a bare
/// object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextGenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl TextGenerationResponse {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Batch(items) => items.into_iter().next().map(|g| g.generated_text),
            Self::Single(item) => Some(item.generated_text),
        }
    }
}

/// Facade over hub text generation, feature extraction, and zero-shot
/// classification.
///
/// The API key may be empty; no local validation is done and requests are
/// then sent without an `Authorization` header.
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    base_url: String,
    api_key: String,
    default_model: String,
}

impl HuggingFaceClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: settings.huggingface.api_key.clone(),
            default_model: settings.huggingface.model.clone(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run text generation and return `generated_text` verbatim.
    ///
    /// `options.max_tokens` is sent as `max_new_tokens`.
    pub async fn generate_text(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        observe(GENERATE, async {
            let (model, max_new_tokens, temperature) = options.resolve(&self.default_model);
            tracing::debug!(model, max_new_tokens, "Hugging Face text generation request");

            let request = self
                .client
                .post(endpoint(&self.base_url, &format!("models/{}", model)))
                .json(&json!({
                    "inputs": prompt,
                    "parameters": {
                        "max_new_tokens": max_new_tokens,
                        "temperature": temperature,
                    },
                }));
            let response: TextGenerationResponse =
                send_json(PROVIDER, with_bearer(request, &self.api_key)).await?;

            response.into_text().ok_or_else(|| {
                FacadeError::from(ProviderError::Decode {
                    provider: PROVIDER,
                    message: "text generation returned no results".to_string(),
                })
            })
        })
        .await
    }

    /// Embed `text` with [`EMBEDDING_MODEL`], normalized by
    /// [`normalize_embedding`].
    pub async fn get_embedding(&self, text: &str) -> Result<Embedding> {
        observe(EMBED, async {
            tracing::debug!(model = EMBEDDING_MODEL, "Hugging Face feature extraction request");

            let request = self
                .client
                .post(endpoint(
                    &self.base_url,
                    &format!("models/{}/pipeline/feature-extraction", EMBEDDING_MODEL),
                ))
                .json(&json!({ "inputs": text }));
            let response: FeatureExtraction =
                send_json(PROVIDER, with_bearer(request, &self.api_key)).await?;

            Ok(normalize_embedding(response))
        })
        .await
    }

    /// Score `text` against `labels` with [`CLASSIFICATION_MODEL`].
    ///
    /// Results follow the provider's order, which is usually by descending
    /// score rather than the input order.
    pub async fn classify_text(&self, text: &str, labels: &[String]) -> Result<ClassificationResult> {
        observe(CLASSIFY, async {
            tracing::debug!(
                model = CLASSIFICATION_MODEL,
                candidates = labels.len(),
                "Hugging Face zero-shot classification request"
            );

            let request = self
                .client
                .post(endpoint(
                    &self.base_url,
                    &format!("models/{}", CLASSIFICATION_MODEL),
                ))
                .json(&json!({
                    "inputs": text,
                    "parameters": { "candidate_labels": labels },
                }));
            let response: ZeroShotResponse =
                send_json(PROVIDER, with_bearer(request, &self.api_key)).await?;

            Ok(classification_from_response(response))
        })
        .await
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    fn provider_id(&self) -> &'static str {
        "huggingface"
    }

    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        self.generate_text(prompt, options).await
    }
}

#[async_trait]
impl TextEmbedder for HuggingFaceClient {
    fn provider_id(&self) -> &'static str {
        "huggingface"
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        self.get_embedding(text).await
    }
}

#[async_trait]
impl ZeroShotClassifier for HuggingFaceClient {
    fn provider_id(&self) -> &'static str {
        "huggingface"
    }

    async fn classify(&self, text: &str, labels: &[String]) -> Result<ClassificationResult> {
        self.classify_text(text, labels).await
    }
}
