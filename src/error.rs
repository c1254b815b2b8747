//! Error types for the AI facades.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FacadeError>;

/// Unified error type returned by every facade method.
///
/// Variants are coarse-grained: one per failure *category*. Remote failures
/// of any kind collapse into [`Provider`](Self::Provider), which keeps the
/// original cause attached.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// Missing or invalid configuration (empty credential, bad env value,
    /// unknown numeric backend).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any failure from a remote provider call.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Caller-supplied input was rejected before reaching the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persisting or restoring a local model failed.
    #[error("Load error: {0}")]
    Load(String),

    /// A local tensor operation failed.
    #[error("Inference error: {0}")]
    InferenceError(String),
}

/// A failed call to a remote provider, carrying the original cause.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, connect, TLS, timeout).
    #[cfg(any(feature = "provider-openai", feature = "provider-huggingface"))]
    #[error("{provider} transport error: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("{provider} API error ({status}): {message}")]
    Status {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("{provider} returned a malformed response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// Name of the provider that produced this error.
    pub fn provider(&self) -> &'static str {
        match self {
            #[cfg(any(feature = "provider-openai", feature = "provider-huggingface"))]
            Self::Transport { provider, .. } => *provider,
            Self::Status { provider, .. } | Self::Decode { provider, .. } => *provider,
        }
    }

    /// HTTP status code, when the provider returned one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for failures a caller could reasonably retry: HTTP 429,
    /// HTTP 5xx, and transport timeouts or connection failures.
    ///
    /// The facades never retry on their own.
    pub fn is_retryable(&self) -> bool {
        match self {
            #[cfg(any(feature = "provider-openai", feature = "provider-huggingface"))]
            Self::Transport { source, .. } => source.is_timeout() || source.is_connect(),
            Self::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Decode { .. } => false,
        }
    }
}

impl FacadeError {
    /// Returns `true` when this is a retryable [`ProviderError`].
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(e) if e.is_retryable())
    }
}
