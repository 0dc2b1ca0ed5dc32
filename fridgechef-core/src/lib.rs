pub mod ai;
pub mod extract;
pub mod types;

pub use ai::{
    generate_recipe, recognize_ingredients, AiConfig, ChatMessage, ConfigError, FakeTransport,
    ImageData, ModelError, ModelReply, ModelTransport, OpenRouterTransport, PipelineError,
};
pub use extract::{extract_ingredients, extract_recipe, MAX_INGREDIENTS};
pub use types::{
    GenerationOutcome, RecipeConstraints, RecipeIngredient, RecipeRecord, RecognitionOutcome,
};
