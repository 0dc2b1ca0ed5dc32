//! Recipe generation from a normalized ingredient list.

use super::config::AiConfig;
use super::fallback::{run_candidates, PipelineError};
use super::prompts::generate::render_generate_prompt;
use super::transport::ModelTransport;
use super::types::ChatMessage;
use crate::extract::extract_recipe;
use crate::types::{GenerationOutcome, RecipeConstraints};

/// Generate a recipe for the given ingredients and constraints.
///
/// Drives the configured text candidates in priority order, then normalizes
/// the winning model's reply into a [`crate::types::RecipeRecord`]. A reply
/// that is not valid JSON degrades to the heuristic text parser rather than
/// failing. The caller is expected to pass a non-empty ingredient list.
pub async fn generate_recipe(
    transport: &dyn ModelTransport,
    config: &AiConfig,
    ingredients: &[String],
    constraints: &RecipeConstraints,
) -> Result<GenerationOutcome, PipelineError> {
    let prompt = render_generate_prompt(ingredients, constraints);
    let messages = vec![ChatMessage::user(prompt)];

    let win = run_candidates(
        transport,
        &config.text_models,
        &messages,
        config.generation_timeout,
    )
    .await?;

    let recipe = extract_recipe(&win.content);
    tracing::debug!(
        model = %win.model,
        recipe = %recipe.name,
        steps = recipe.steps.len(),
        "recipe generation complete"
    );

    Ok(GenerationOutcome {
        recipe,
        model: win.model,
        raw_response: win.content,
    })
}
