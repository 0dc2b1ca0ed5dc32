//! Ingredient recognition from fridge photos using vision models.

use super::config::AiConfig;
use super::fallback::{run_candidates, PipelineError};
use super::prompts::recognize::render_recognize_prompt;
use super::transport::ModelTransport;
use super::types::{ChatMessage, ImageData};
use crate::extract::extract_ingredients;
use crate::types::RecognitionOutcome;

/// Analyze a fridge photo and return the detected ingredients.
///
/// Drives the configured vision candidates in priority order, then
/// normalizes the winning model's free-text reply into an ingredient list.
/// An empty list is a valid outcome, not an error; the caller decides
/// whether it warrants a user-facing warning.
pub async fn recognize_ingredients(
    transport: &dyn ModelTransport,
    config: &AiConfig,
    image: &ImageData,
) -> Result<RecognitionOutcome, PipelineError> {
    let prompt = render_recognize_prompt();
    let messages = vec![ChatMessage::user_with_image(prompt, image)];

    let win = run_candidates(
        transport,
        &config.image_models,
        &messages,
        config.recognition_timeout,
    )
    .await?;

    let ingredients = extract_ingredients(&win.content);
    tracing::debug!(
        model = %win.model,
        count = ingredients.len(),
        "ingredient recognition complete"
    );

    Ok(RecognitionOutcome {
        ingredients,
        model: win.model,
        raw_response: win.content,
    })
}
