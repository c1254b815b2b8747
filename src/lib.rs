//! Thin async facades over three AI backends.
//!
//! - **[`OpenAIClient`](provider::openai::OpenAIClient)**: chat completion and
//!   embeddings from the hosted OpenAI API.
//! - **[`HuggingFaceClient`](provider::huggingface::HuggingFaceClient)**: text
//!   generation, feature extraction, and zero-shot classification from the
//!   Hugging Face Inference API, with response-shape normalization.
//! - **[`CandleHelper`](provider::candle::CandleHelper)**: a local one-input,
//!   one-output linear regression model trained with SGD on
//!   [Candle](https://github.com/huggingface/candle), with save/load.
//!
//! Every facade is built from a [`Settings`](config::Settings) value read once
//! at startup. Calls are single pass-throughs: no retries, no caching. A failure
//! is logged once at the facade boundary and returned unchanged as a
//! [`FacadeError`](error::FacadeError).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use ai_megarepo::config::Settings;
//! # #[cfg(feature = "provider-candle")]
//! use ai_megarepo::provider::candle::CandleHelper;
//!
//! # #[cfg(feature = "provider-candle")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env()?;
//! let helper = CandleHelper::new(&settings);
//! helper.initialize().await?;
//!
//! let model = helper
//!     .train_simple_model(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0])
//!     .await?;
//! let y = helper.predict(&model, 5.0)?;
//! println!("f(5) ~= {y:.2}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
mod instrument;
pub mod provider;
pub mod traits;
