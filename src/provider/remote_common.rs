//! Shared utilities for the remote (HTTP API) facades: request dispatch,
//! HTTP status mapping, and error-body extraction.

use crate::error::{ProviderError, Result};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Send `request` and decode a successful JSON body into `T`.
///
/// Transport failures, non-2xx statuses, and undecodable bodies all surface as
/// [`ProviderError`] with the original cause attached.
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    let bytes = check_http_status(provider, response)
        .await?
        .bytes()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        ProviderError::Decode {
            provider,
            message: e.to_string(),
        }
        .into()
    })
}

/// Map a non-success HTTP response to [`ProviderError::Status`], keeping the
/// provider's own error message when the body carries one.
/// Returns `Ok(response)` when the status is 2xx.
pub(crate) async fn check_http_status(
    provider: &'static str,
    response: Response,
) -> std::result::Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        provider,
        status: status.as_u16(),
        message: extract_error_message(&body).unwrap_or_else(|| status.to_string()),
    })
}

/// Pull a human-readable message out of a provider error body.
///
/// Understands `{"error": {"message": "..."}}` (OpenAI) and
/// `{"error": "..."}` (Hugging Face); otherwise returns the trimmed body.
fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let error = &value["error"];
        if let Some(message) = error["message"].as_str().or_else(|| error.as_str()) {
            return Some(message.to_string());
        }
    }
    Some(trimmed.to_string())
}

/// Attach a bearer token unless `api_key` is empty.
pub(crate) fn with_bearer(request: RequestBuilder, api_key: &str) -> RequestBuilder {
    if api_key.is_empty() {
        request
    } else {
        request.bearer_auth(api_key)
    }
}

/// Join a base URL and a path without doubling the `/`.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_style_error_message() {
        let body = r#"{"error": {"message": "Invalid API key", "type": "invalid_request_error"}}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("Invalid API key"));
    }

    #[test]
    fn huggingface_style_error_message() {
        let body = r#"{"error": "Model is currently loading", "estimated_time": 20.0}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Model is currently loading")
        );
    }

    #[test]
    fn plain_text_error_body() {
        assert_eq!(
            extract_error_message("  Bad Gateway \n").as_deref(),
            Some("Bad Gateway")
        );
        assert_eq!(extract_error_message("   "), None);
    }

    #[test]
    fn endpoint_joins_cleanly() {
        assert_eq!(
            endpoint("https://api.openai.com/v1/", "/embeddings"),
            "https://api.openai.com/v1/embeddings"
        );
        assert_eq!(
            endpoint("http://127.0.0.1:9000", "models/gpt2"),
            "http://127.0.0.1:9000/models/gpt2"
        );
    }
}
