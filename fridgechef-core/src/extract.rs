//! Normalizers that coerce free-form model replies into structured values.
//!
//! Both pipelines ask the model for JSON, but free-form models occasionally
//! wrap the JSON in prose or emit plain prose instead. Each normalizer tries
//! a fast JSON path first and falls back to a line-oriented heuristic parser,
//! so a non-conforming reply degrades gracefully instead of failing outright.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{RecipeIngredient, RecipeRecord, DEFAULT_RECIPE_NAME};

/// First bracketed array in the reply, non-greedy, spanning newlines.
static ARRAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*?\]").expect("Invalid array regex"));

/// Leading list markers: digits, periods, dashes, asterisks, bullets.
static LIST_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d.\-*•]+\s*").expect("Invalid list marker regex"));

/// Quote and bracket characters stripped from fallback ingredient lines.
static QUOTE_BRACKET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["'\[\]]"#).expect("Invalid quote regex"));

/// Hard cap on the number of ingredients returned by recognition.
pub const MAX_INGREDIENTS: usize = 30;

/// Extract an ordered ingredient list from a model reply.
///
/// Fast path: the first `[...]` substring parsed as a JSON array. Fallback:
/// split on commas and newlines, strip list markers and quote characters,
/// and keep lines of 2 to 49 characters. Both paths are capped at
/// [`MAX_INGREDIENTS`] entries. Pure prose with no delimiters yields an
/// empty or near-empty list; that is not an error.
pub fn extract_ingredients(text: &str) -> Vec<String> {
    if let Some(found) = ARRAY_REGEX.find(text) {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(found.as_str()) {
            let mut ingredients = Vec::new();
            for item in items {
                let rendered = match item {
                    serde_json::Value::Null => continue,
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                let trimmed = rendered.trim();
                if !trimmed.is_empty() {
                    ingredients.push(trimmed.to_string());
                }
            }
            ingredients.truncate(MAX_INGREDIENTS);
            return ingredients;
        }
    }

    let mut ingredients = Vec::new();
    for line in text.split(['\n', ',']) {
        let stripped = LIST_MARKER_REGEX.replace(line.trim(), "");
        let cleaned = QUOTE_BRACKET_REGEX.replace_all(&stripped, "").into_owned();
        let len = cleaned.chars().count();
        if len > 1 && len < 50 {
            ingredients.push(cleaned);
        }
        if ingredients.len() == MAX_INGREDIENTS {
            break;
        }
    }
    ingredients
}

/// Extract a structured recipe from a model reply.
///
/// Fast path: the outermost `{...}` slice parsed as JSON into a
/// [`RecipeRecord`] (missing fields take their defaults, unknown fields are
/// dropped). Fallback: the section-based text parser.
pub fn extract_recipe(text: &str) -> RecipeRecord {
    if let Some(candidate) = brace_slice(text) {
        if let Ok(recipe) = serde_json::from_str::<RecipeRecord>(candidate) {
            return recipe;
        }
    }
    parse_recipe_text(text)
}

/// Slice from the first `{` through the last `}`, greedy across the text.
fn brace_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Name,
    Description,
    Ingredients,
    Steps,
    Tips,
}

/// Best-effort recovery parser for prose recipes.
///
/// Scans lines while tracking the current section, switched by Korean
/// heading keywords found anywhere in a line. Heading checks take precedence
/// over content handling, so a heading line itself never contributes
/// content. Lines in the description section are recognized but not
/// accumulated.
fn parse_recipe_text(text: &str) -> RecipeRecord {
    let mut recipe = RecipeRecord::default();
    let mut section = Section::None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains("요리") && (line.contains("이름") || line.contains("명")) {
            section = Section::Name;
        } else if line.contains("재료") {
            section = Section::Ingredients;
        } else if ["순서", "단계", "방법", "과정"].iter().any(|kw| line.contains(kw)) {
            section = Section::Steps;
        } else if line.contains("팁") || line.contains("참고") {
            section = Section::Tips;
        } else if line.contains("설명") {
            section = Section::Description;
        } else {
            match section {
                Section::Name if line.contains(':') => {
                    if let Some((_, rest)) = line.split_once(':') {
                        recipe.name = rest.trim().to_string();
                    }
                }
                Section::Ingredients => {
                    let cleaned = LIST_MARKER_REGEX.replace(line, "").into_owned();
                    if cleaned.chars().count() > 1 {
                        recipe.ingredients.push(RecipeIngredient {
                            name: cleaned,
                            amount: String::new(),
                            available: true,
                        });
                    }
                }
                Section::Steps => {
                    let cleaned = LIST_MARKER_REGEX.replace(line, "").into_owned();
                    if cleaned.chars().count() > 5 {
                        recipe.steps.push(cleaned);
                    }
                }
                Section::Tips => {
                    recipe.tips.push_str(line);
                    recipe.tips.push(' ');
                }
                _ => {}
            }
        }
    }

    // No explicit name heading: use the first meaningful line as the name.
    if recipe.name == DEFAULT_RECIPE_NAME {
        if let Some(first) = text
            .lines()
            .map(str::trim)
            .find(|line| line.chars().count() > 2)
        {
            recipe.name = first.chars().take(50).collect();
        }
    }

    recipe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredients_from_json_array() {
        let ingredients = extract_ingredients(r#"["계란", "우유", "당근"]"#);
        assert_eq!(ingredients, vec!["계란", "우유", "당근"]);
    }

    #[test]
    fn ingredients_from_json_array_wrapped_in_prose() {
        let text = "냉장고에서 찾은 재료입니다:\n[\"계란\", \"우유\"]\n맛있게 드세요!";
        assert_eq!(extract_ingredients(text), vec!["계란", "우유"]);
    }

    #[test]
    fn ingredients_json_drops_null_and_empty_elements() {
        let ingredients = extract_ingredients(r#"["계란", null, "", "  ", "우유"]"#);
        assert_eq!(ingredients, vec!["계란", "우유"]);
    }

    #[test]
    fn ingredients_json_stringifies_non_string_elements() {
        let ingredients = extract_ingredients(r#"["계란", 3]"#);
        assert_eq!(ingredients, vec!["계란", "3"]);
    }

    #[test]
    fn ingredients_from_numbered_lines() {
        let ingredients = extract_ingredients("1. 계란\n2. 우유\n3. 당근");
        assert_eq!(ingredients, vec!["계란", "우유", "당근"]);
    }

    #[test]
    fn ingredients_from_comma_separated_text() {
        let ingredients = extract_ingredients("계란, 우유, 돼지고기");
        assert_eq!(ingredients, vec!["계란", "우유", "돼지고기"]);
    }

    #[test]
    fn ingredients_fallback_strips_bullets_and_quotes() {
        let ingredients = extract_ingredients("- \"계란\"\n* '우유'\n• [당근]");
        assert_eq!(ingredients, vec!["계란", "우유", "당근"]);
    }

    #[test]
    fn ingredients_fallback_drops_short_and_long_lines() {
        let long = "아".repeat(50);
        let text = format!("계란\n아\n{long}\n우유");
        assert_eq!(extract_ingredients(&text), vec!["계란", "우유"]);
    }

    #[test]
    fn ingredients_capped_at_thirty() {
        let lines: Vec<String> = (0..40).map(|i| format!("재료{i}")).collect();
        let ingredients = extract_ingredients(&lines.join("\n"));
        assert_eq!(ingredients.len(), MAX_INGREDIENTS);
        assert_eq!(ingredients[0], "재료0");
        assert_eq!(ingredients[29], "재료29");
    }

    #[test]
    fn ingredients_json_path_capped_at_thirty() {
        let items: Vec<String> = (0..40).map(|i| format!("\"재료{i}\"")).collect();
        let text = format!("[{}]", items.join(", "));
        assert_eq!(extract_ingredients(&text).len(), MAX_INGREDIENTS);
    }

    #[test]
    fn ingredients_pure_prose_yields_near_empty_list() {
        // No commas, no newlines, one long sentence: nothing usable survives.
        let text = "죄송하지만 이 사진에서는 식재료를 명확하게 식별하기 어렵습니다. 조금 더 밝은 사진을 올려주시면 다시 분석해드릴게요.";
        assert!(extract_ingredients(text).len() <= 1);
    }

    #[test]
    fn ingredients_deterministic() {
        let text = "1. 계란\n2. 우유";
        assert_eq!(extract_ingredients(text), extract_ingredients(text));
    }

    #[test]
    fn recipe_from_json_object() {
        let text = r#"{
            "name": "김치볶음밥",
            "description": "간단한 한 끼 식사",
            "difficulty": "초급",
            "cookTime": "15분",
            "servings": 2,
            "ingredients": [
                {"name": "김치", "amount": "1컵", "available": true},
                {"name": "식용유", "amount": "1큰술", "available": false}
            ],
            "steps": ["1. 김치를 잘게 썬다", "2. 밥과 함께 볶는다"],
            "tips": "묵은지를 쓰면 더 맛있습니다"
        }"#;

        let recipe = extract_recipe(text);
        assert_eq!(recipe.name, "김치볶음밥");
        assert_eq!(recipe.description, "간단한 한 끼 식사");
        assert_eq!(recipe.difficulty, "초급");
        assert_eq!(recipe.cook_time, "15분");
        assert_eq!(recipe.servings, 2);
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].name, "김치");
        assert!(recipe.ingredients[0].available);
        assert!(!recipe.ingredients[1].available);
        assert_eq!(recipe.steps.len(), 2);
        assert_eq!(recipe.tips, "묵은지를 쓰면 더 맛있습니다");
    }

    #[test]
    fn recipe_from_json_wrapped_in_prose() {
        let text = "레시피를 추천해드릴게요!\n{\"name\": \"된장찌개\", \"servings\": 4}\n맛있게 드세요.";
        let recipe = extract_recipe(text);
        assert_eq!(recipe.name, "된장찌개");
        assert_eq!(recipe.servings, 4);
    }

    #[test]
    fn recipe_json_missing_fields_take_defaults() {
        let recipe = extract_recipe(r#"{"name": "비빔밥"}"#);
        assert_eq!(recipe.name, "비빔밥");
        assert_eq!(recipe.difficulty, "중급");
        assert_eq!(recipe.cook_time, "30분");
        assert_eq!(recipe.servings, 2);
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn recipe_text_fallback_parses_ingredient_section() {
        let text = "재료\n- 토마토\n- 양파";
        let recipe = extract_recipe(text);
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].name, "토마토");
        assert_eq!(recipe.ingredients[0].amount, "");
        assert!(recipe.ingredients[0].available);
        assert_eq!(recipe.ingredients[1].name, "양파");
    }

    #[test]
    fn recipe_text_fallback_parses_sections() {
        let text = "요리 이름\n이름: 토마토 파스타\n설명\n상큼한 토마토 소스 파스타\n재료\n- 토마토\n- 파스타면\n조리 순서\n1. 물을 끓여 면을 삶는다\n2. 토마토를 볶아 소스를 만든다\n팁\n바질을 곁들이면 좋습니다";
        let recipe = extract_recipe(text);

        assert_eq!(recipe.name, "토마토 파스타");
        // Description lines are recognized but not accumulated.
        assert_eq!(recipe.description, "");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.steps.len(), 2);
        assert_eq!(recipe.steps[0], "물을 끓여 면을 삶는다");
        assert_eq!(recipe.tips, "바질을 곁들이면 좋습니다 ");
    }

    #[test]
    fn recipe_text_fallback_skips_short_steps() {
        let text = "조리 방법\n1. 볶는다\n2. 재워둔 고기를 센 불에 굽는다";
        let recipe = extract_recipe(text);
        assert_eq!(recipe.steps, vec!["재워둔 고기를 센 불에 굽는다"]);
    }

    #[test]
    fn recipe_text_fallback_name_from_first_line() {
        let text = "매콤한 제육볶음 만들기\n재료\n- 돼지고기\n- 고추장";
        let recipe = extract_recipe(text);
        assert_eq!(recipe.name, "매콤한 제육볶음 만들기");
    }

    #[test]
    fn recipe_text_fallback_name_truncated_to_fifty_chars() {
        let long_line = "가".repeat(80);
        let recipe = extract_recipe(&long_line);
        assert_eq!(recipe.name.chars().count(), 50);
    }

    #[test]
    fn recipe_text_fallback_defaults_on_empty_input() {
        let recipe = extract_recipe("");
        assert_eq!(recipe.name, DEFAULT_RECIPE_NAME);
        assert_eq!(recipe.servings, 2);
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn recipe_extraction_deterministic() {
        let text = "재료\n- 토마토\n방법\n1. 토마토를 큼직하게 썰어둔다";
        assert_eq!(extract_recipe(text), extract_recipe(text));
    }
}
