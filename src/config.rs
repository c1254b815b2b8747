//! Process settings loaded once from environment variables.
//!
//! [`Settings`] is an immutable value built at startup and passed by
//! reference into each facade constructor. Facades never read the
//! environment themselves.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `OPENAI_API_KEY` | `openai.api_key` | empty |
//! | `OPENAI_MODEL` | `openai.model` | `gpt-3.5-turbo` |
//! | `HUGGINGFACE_API_KEY` | `huggingface.api_key` | empty |
//! | `HUGGINGFACE_MODEL` | `huggingface.model` | `microsoft/DialoGPT-medium` |
//! | `TF_BACKEND` | `numeric.backend` | `cpu` |
//! | `PORT` | `server.port` | `3000` |

use crate::error::{FacadeError, Result};
use std::fmt;

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL_ENV: &str = "OPENAI_MODEL";
pub const HUGGINGFACE_API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";
pub const HUGGINGFACE_MODEL_ENV: &str = "HUGGINGFACE_MODEL";
pub const BACKEND_ENV: &str = "TF_BACKEND";
pub const PORT_ENV: &str = "PORT";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "microsoft/DialoGPT-medium";
pub const DEFAULT_BACKEND: &str = "cpu";
pub const DEFAULT_PORT: u16 = 3000;

/// Top-level settings for every facade.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub openai: OpenAISettings,
    pub huggingface: HuggingFaceSettings,
    pub numeric: NumericSettings,
    /// Not used by any facade; no listener is started.
    pub server: ServerSettings,
}

/// Hosted-LLM credentials and default chat model.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenAISettings {
    /// Required by [`OpenAIClient`](crate::provider::openai::OpenAIClient).
    pub api_key: String,
    pub model: String,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

impl fmt::Debug for OpenAISettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAISettings")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

/// Inference-hub credentials and default text-generation model.
#[derive(Clone, PartialEq, Eq)]
pub struct HuggingFaceSettings {
    /// May be empty; the hub then serves anonymous (rate-limited) requests
    /// or rejects them.
    pub api_key: String,
    pub model: String,
}

impl Default for HuggingFaceSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_HUGGINGFACE_MODEL.to_string(),
        }
    }
}

impl fmt::Debug for HuggingFaceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceSettings")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

/// Backend selection for the local regression helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericSettings {
    /// `cpu` or `cuda` (alias `gpu`).
    pub backend: String,
}

impl Default for NumericSettings {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones and fall back to the
    /// default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let or_default = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let port = match get(PORT_ENV) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                FacadeError::Config(format!("{} must be a port number, got '{}': {}", PORT_ENV, raw, e))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            openai: OpenAISettings {
                api_key: get(OPENAI_API_KEY_ENV).unwrap_or_default(),
                model: or_default(OPENAI_MODEL_ENV, DEFAULT_OPENAI_MODEL),
            },
            huggingface: HuggingFaceSettings {
                api_key: get(HUGGINGFACE_API_KEY_ENV).unwrap_or_default(),
                model: or_default(HUGGINGFACE_MODEL_ENV, DEFAULT_HUGGINGFACE_MODEL),
            },
            numeric: NumericSettings {
                backend: or_default(BACKEND_ENV, DEFAULT_BACKEND),
            },
            server: ServerSettings { port },
        })
    }
}
