//! Facade implementations, one per provider.
//!
//! Each sub-module is gated behind a Cargo feature flag. All three are enabled
//! by default.
//!
//! | Module | Feature | Backend |
//! |--------|---------|---------|
//! | `openai` | `provider-openai` | OpenAI chat completions and embeddings |
//! | `huggingface` | `provider-huggingface` | Hugging Face Inference API |
//! | `candle` | `provider-candle` | [Candle](https://github.com/huggingface/candle), local |

#[cfg(any(feature = "provider-openai", feature = "provider-huggingface"))]
pub(crate) mod remote_common;

#[cfg(feature = "provider-openai")]
pub mod openai;

#[cfg(feature = "provider-huggingface")]
pub mod huggingface;

#[cfg(feature = "provider-candle")]
pub mod candle;

// Re-exports (same order as module declarations above).
#[cfg(feature = "provider-openai")]
pub use openai::OpenAIClient;

#[cfg(feature = "provider-huggingface")]
pub use huggingface::HuggingFaceClient;

#[cfg(feature = "provider-candle")]
pub use candle::{CandleHelper, RegressionModel};
