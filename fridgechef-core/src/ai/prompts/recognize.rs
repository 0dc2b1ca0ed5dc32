//! Prompt template for recognizing ingredients in a fridge photo.

pub fn render_recognize_prompt() -> String {
    r#"이 냉장고/식재료 사진에서 보이는 모든 식재료를 분석해주세요.

다음 JSON 형식으로만 응답해주세요:
["재료1", "재료2", "재료3"]

예시: ["계란", "우유", "당근", "양파", "돼지고기"]

주의사항:
- 보이는 식재료만 나열
- 한글로 작성
- JSON 배열 형식만 출력"#
        .to_string()
}
