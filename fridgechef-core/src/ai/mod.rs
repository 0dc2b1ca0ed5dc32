//! AI pipelines for fridge-photo analysis via OpenRouter.
//!
//! This module provides:
//! - `ModelTransport` trait over the chat-completion endpoint, with an
//!   `OpenRouterTransport` implementation and a `FakeTransport` for tests
//! - the ordered-candidate fallback loop shared by both pipelines
//! - `recognize_ingredients` (vision) and `generate_recipe` (text) pipelines
//! - configuration loaded once and injected, never looked up ambiently
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENROUTER_API_KEY` (required): Your OpenRouter API key
//! - `FRIDGECHEF_AI_BASE_URL` (optional): API base URL
//! - `FRIDGECHEF_IMAGE_MODELS` (optional): Comma-separated recognition
//!   candidates, priority order
//! - `FRIDGECHEF_TEXT_MODELS` (optional): Comma-separated generation
//!   candidates, priority order
//! - `FRIDGECHEF_RECOGNITION_TIMEOUT_SECS` (optional): Per-call timeout
//! - `FRIDGECHEF_GENERATION_TIMEOUT_SECS` (optional): Per-call timeout
//!
//! # Example
//!
//! ```ignore
//! use fridgechef_core::ai::{recognize_ingredients, AiConfig, ImageData, OpenRouterTransport};
//!
//! let config = AiConfig::from_env()?;
//! let transport = OpenRouterTransport::new(&config.base_url, &config.api_key);
//!
//! let image = ImageData::from_bytes(&photo_bytes, "image/jpeg");
//! let outcome = recognize_ingredients(&transport, &config, &image).await?;
//! println!("Detected: {:?}", outcome.ingredients);
//! ```

mod config;
mod fake;
mod fallback;
mod generate;
pub mod prompts;
mod recognize;
mod transport;
mod types;

pub use config::{AiConfig, ConfigError};
pub use fake::FakeTransport;
pub use fallback::{run_candidates, ModelWin, PipelineError};
pub use generate::generate_recipe;
pub use recognize::recognize_ingredients;
pub use transport::{ModelTransport, OpenRouterTransport};
pub use types::{
    ChatMessage, ContentPart, ImageData, ImageUrl, MessageContent, ModelError, ModelReply, Role,
};
