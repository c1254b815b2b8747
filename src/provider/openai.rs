use crate::config::Settings;
use crate::error::{FacadeError, Result};
use crate::instrument::{Boundary, observe};
use crate::provider::remote_common::{endpoint, send_json, with_bearer};
use crate::traits::{Embedding, GenerationOptions, TextEmbedder, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Default API root for the [OpenAI API](https://platform.openai.com/docs/api-reference).
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Embedding model used by [`OpenAIClient::generate_embedding`].
pub const EMBEDDING_MODEL: &str = "text-embedding-ada-002";

const PROVIDER: &str = "OpenAI";
const GENERATE: Boundary = Boundary::new("openai", "generate_text", "OpenAI API error");
const EMBED: Boundary = Boundary::new("openai", "generate_embedding", "OpenAI Embedding error");

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

/// Facade over OpenAI chat completions (`/chat/completions`) and embeddings
/// (`/embeddings`).
///
/// Requires a non-empty `OPENAI_API_KEY` in [`Settings`].
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    base_url: String,
    api_key: String,
    default_model: String,
}

impl OpenAIClient {
    /// Build a client from settings.
    ///
    /// Fails with [`FacadeError::Config`] when the API key is empty.
    pub fn new(settings: &Settings) -> Result<Self> {
        if settings.openai.api_key.is_empty() {
            return Err(FacadeError::Config(
                "OpenAI API key is required".to_string(),
            ));
        }
        Ok(Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: settings.openai.api_key.clone(),
            default_model: settings.openai.model.clone(),
        })
    }

    /// Point the client at a different API root (proxies, compatible
    /// servers, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `prompt` as the only user message and return the first choice's
    /// content, or an empty string when the response carries none.
    pub async fn generate_text(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        observe(GENERATE, async {
            let (model, max_tokens, temperature) = options.resolve(&self.default_model);
            tracing::debug!(model, max_tokens, "OpenAI chat completion request");

            let request = self
                .client
                .post(endpoint(&self.base_url, "chat/completions"))
                .json(&json!({
                    "model": model,
                    "messages": [{ "role": "user", "content": prompt }],
                    "max_tokens": max_tokens,
                    "temperature": temperature,
                }));
            let body: serde_json::Value =
                send_json(PROVIDER, with_bearer(request, &self.api_key)).await?;

            Ok(body["choices"][0]["message"]["content"]
                .as_str()
                .unwrap_or("")
                .to_string())
        })
        .await
    }

    /// Embed `text` with [`EMBEDDING_MODEL`] and return the first vector, or an
    /// empty vector when the response carries none.
    pub async fn generate_embedding(&self, text: &str) -> Result<Embedding> {
        observe(EMBED, async {
            tracing::debug!(model = EMBEDDING_MODEL, "OpenAI embedding request");

            let request = self
                .client
                .post(endpoint(&self.base_url, "embeddings"))
                .json(&json!({
                    "model": EMBEDDING_MODEL,
                    "input": text,
                }));
            let body: EmbeddingResponse =
                send_json(PROVIDER, with_bearer(request, &self.api_key)).await?;

            // Non-numeric elements fail decoding above instead of being skipped.
            Ok(body
                .data
                .into_iter()
                .next()
                .and_then(|entry| entry.embedding)
                .unwrap_or_default())
        })
        .await
    }
}

#[async_trait]
impl TextGenerator for OpenAIClient {
    fn provider_id(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        self.generate_text(prompt, options).await
    }
}

#[async_trait]
impl TextEmbedder for OpenAIClient {
    fn provider_id(&self) -> &'static str {
        "openai"
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        self.generate_embedding(text).await
    }
}
