//! Prompt templates for the AI pipelines.

pub mod generate;
pub mod recognize;

pub use generate::render_generate_prompt;
pub use recognize::render_recognize_prompt;
