//! Domain records produced by the recognition and generation pipelines.

use serde::{Deserialize, Serialize};

/// Placeholder recipe name used when a model reply never names the dish.
pub const DEFAULT_RECIPE_NAME: &str = "추천 레시피";

/// One ingredient line in a generated recipe.
///
/// `available` distinguishes ingredients the user already has from pantry
/// staples the recipe additionally calls for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// A structured recipe as produced by the generation pipeline.
///
/// Every field is defaulted so that a partial model reply still yields a
/// complete record; `ingredients` and `steps` are always sequences, never
/// absent, so downstream persistence and display can rely on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeRecord {
    pub name: String,
    pub description: String,
    pub difficulty: String,
    pub cook_time: String,
    pub servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<String>,
    pub tips: String,
}

impl Default for RecipeRecord {
    fn default() -> Self {
        Self {
            name: DEFAULT_RECIPE_NAME.to_string(),
            description: String::new(),
            difficulty: "중급".to_string(),
            cook_time: "30분".to_string(),
            servings: 2,
            ingredients: Vec::new(),
            steps: Vec::new(),
            tips: String::new(),
        }
    }
}

/// User-chosen constraints for recipe generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeConstraints {
    pub cuisine: String,
    pub difficulty: String,
    pub cook_time: String,
    pub servings: u32,
}

impl Default for RecipeConstraints {
    fn default() -> Self {
        Self {
            cuisine: "상관없음".to_string(),
            difficulty: "중급".to_string(),
            cook_time: "30분 이내".to_string(),
            servings: 2,
        }
    }
}

/// Result of the ingredient recognition pipeline.
///
/// `raw_response` is the winning model's unprocessed reply, kept so the
/// caller can log or display what the model actually said.
#[derive(Debug, Clone, Serialize)]
pub struct RecognitionOutcome {
    pub ingredients: Vec<String>,
    pub model: String,
    pub raw_response: String,
}

/// Result of the recipe generation pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub recipe: RecipeRecord,
    pub model: String,
    pub raw_response: String,
}
