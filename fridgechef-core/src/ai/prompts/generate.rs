//! Prompt template for generating a recipe from an ingredient list.

use crate::types::RecipeConstraints;

pub fn render_generate_prompt(ingredients: &[String], constraints: &RecipeConstraints) -> String {
    let RecipeConstraints {
        cuisine,
        difficulty,
        cook_time,
        servings,
    } = constraints;

    format!(
        r#"당신은 전문 요리사입니다. 주어진 재료로 맛있는 요리 레시피를 추천해주세요.

사용 가능한 재료: {ingredients}
요리 종류: {cuisine}
난이도: {difficulty}
조리 시간: {cook_time}
인원: {servings}인분

반드시 다음 JSON 형식으로만 응답해주세요:
{{
  "name": "요리 이름",
  "description": "요리에 대한 간단한 설명 (1-2문장)",
  "difficulty": "{difficulty}",
  "cookTime": "{cook_time}",
  "servings": {servings},
  "ingredients": [
    {{"name": "재료명", "amount": "분량", "available": true}},
    {{"name": "추가 필요한 재료", "amount": "분량", "available": false}}
  ],
  "steps": [
    "1. 첫 번째 조리 단계",
    "2. 두 번째 조리 단계",
    "3. 세 번째 조리 단계"
  ],
  "tips": "조리 팁이나 주의사항"
}}

주의사항:
- 주어진 재료를 최대한 활용하세요
- 추가로 필요한 기본 재료(소금, 설탕, 식용유 등)는 available: false로 표시
- 단계는 구체적이고 따라하기 쉽게 작성
- 반드시 유효한 JSON 형식으로 응답"#,
        ingredients = ingredients.join(", "),
    )
}
