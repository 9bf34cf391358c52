//! Fixed prompt templates, personas and output-shape declarations sent to the model.

use serde_json::{json, Value};

use crate::models::UpgradedRecipe;

pub const NUTRITION_SYSTEM_INSTRUCTION: &str = "너는 초등학생을 위한 친절하고 상냥한 AI 영양사야. \
아이들의 눈높이에 맞춰서 아주 쉽고 재미있게 설명해줘. \
문장 끝에 이모지를 적절하게 사용해서 설명을 더 친근하게 만들어줘. \
예를 들어, '비타민 C가 많아서 감기 예방에 좋아요! 🍊' 처럼 말이야.";

pub const RECIPE_SYSTEM_INSTRUCTION: &str = "너는 어린이를 위한 요리 레시피 전문가야. \
초등학생 고학년 수준에 맞춰 안전하고 이해하기 쉬운 용어를 사용해줘. \
유치한 말투나 과도한 이모지 사용은 자제하고, 명확하고 친절한 설명을 제공해줘.";

pub const HEALTH_SCORE_SYSTEM_INSTRUCTION: &str = "너는 전문 영양사야. \
레시피를 분석하고, 그 결과를 바탕으로 100점 만점의 건강 점수와 전문적인 총평을 제공해줘. \
답변은 초등학생 고학년도 이해할 수 있도록 쉽고 명확해야 해.";

pub fn nutrition_prompt(food_name: &str) -> String {
    format!(
        "'{}'라는 음식에 대해 알려줘. 이 음식의 주요 재료, 대표적인 영양 성분\
         (열량은 kcal 단위 문자열로, 탄수화물, 단백질, 지방 함량은 1인분 기준 g(그램) 단위의 숫자로), \
         영양학적인 좋은 점, 아쉬운 점, 그리고 이 음식을 더 건강하게 즐길 수 있는 방법을 \
         각각 2~3가지씩 목록 형태로 알려줘.",
        food_name
    )
}

pub fn recipe_prompt(original_food_name: &str, ingredients: &[String]) -> String {
    format!(
        "초등학생 고학년이 '{}'에 '{}' 재료를 추가해서 만들 수 있는 요리 레시피를 제안해줘. \
         결과는 아래 JSON 형식에 맞춰서 제공해줘.\n\
         - recipeName: 창의적이고 흥미로운 요리 이름\n\
         - description: 아이들이 흥미를 느낄 만한 간단한 요리 설명\n\
         - ingredients: 기존 재료와 추가된 재료를 모두 포함한 전체 준비물 목록\n\
         - steps: 요리 과정을 단계별로 명확하고 간결하게 설명 (5단계 이내). 각 단계 설명 앞에 번호를 붙이지 마세요.\n\
         - tip: 요리를 더 재미있게 만들거나 맛있게 먹을 수 있는 꿀팁 (선택 사항)",
        original_food_name,
        ingredients.join(", ")
    )
}

pub fn health_score_prompt(recipe: &UpgradedRecipe) -> String {
    format!(
        "다음 요리 레시피를 영양학적 관점에서 분석하고 100점 만점의 '건강 점수'와 간단한 '총평'을 제공해줘. \
         점수는 재료의 균형, 조리법의 건강성 등을 종합적으로 고려해서 매겨줘.\n\n\
         - 요리 이름: {}\n\
         - 재료: {}\n\
         - 만드는 법: {}\n\n\
         결과는 아래 JSON 형식에 맞춰서 제공해줘. 총평은 전문가의 관점에서 핵심만 간결하게 작성하되, \
         초등학생 고학년이 이해할 수 있도록 쉬운 용어를 사용해줘. 유치한 말투나 과도한 이모지 사용은 자제해줘.",
        recipe.recipe_name,
        recipe.ingredients.join(", "),
        recipe.steps.join(" ")
    )
}

pub fn nutrition_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "foodName": { "type": "STRING", "description": "분석한 음식의 이름" },
            "ingredients": {
                "type": "ARRAY",
                "description": "음식의 주요 재료 목록",
                "items": { "type": "STRING" }
            },
            "nutritionFacts": {
                "type": "OBJECT",
                "description": "음식의 주요 영양 성분 정보",
                "properties": {
                    "calories": { "type": "STRING", "description": "열량 (예: '350kcal')" },
                    "carbs": { "type": "NUMBER", "description": "탄수화물 함량 (g 단위 숫자)" },
                    "protein": { "type": "NUMBER", "description": "단백질 함량 (g 단위 숫자)" },
                    "fat": { "type": "NUMBER", "description": "지방 함량 (g 단위 숫자)" },
                    "vitamins": { "type": "STRING", "description": "주요 비타민 및 무기질에 대한 설명" }
                },
                "required": ["calories", "carbs", "protein", "fat", "vitamins"]
            },
            "pros": {
                "type": "ARRAY",
                "description": "음식의 영양학적 좋은 점 목록",
                "items": { "type": "STRING" }
            },
            "cons": {
                "type": "ARRAY",
                "description": "음식의 영양학적 아쉬운 점 목록",
                "items": { "type": "STRING" }
            },
            "tips": {
                "type": "ARRAY",
                "description": "음식을 더 건강하게 먹는 방법에 대한 팁 목록",
                "items": { "type": "STRING" }
            }
        },
        "required": ["foodName", "ingredients", "nutritionFacts", "pros", "cons", "tips"],
        "propertyOrdering": ["foodName", "ingredients", "nutritionFacts", "pros", "cons", "tips"]
    })
}

pub fn recipe_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipeName": { "type": "STRING" },
            "description": { "type": "STRING" },
            "ingredients": { "type": "ARRAY", "items": { "type": "STRING" } },
            "steps": { "type": "ARRAY", "items": { "type": "STRING" } },
            "tip": { "type": "STRING" }
        },
        "required": ["recipeName", "description", "ingredients", "steps"]
    })
}

pub fn health_score_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER", "description": "100점 만점의 건강 점수" },
            "comment": { "type": "STRING", "description": "레시피에 대한 전반적인 총평" }
        },
        "required": ["score", "comment"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_inputs() {
        assert!(nutrition_prompt("떡볶이").starts_with("'떡볶이'라는 음식"));

        let recipe = recipe_prompt("떡볶이", &["당근".to_string(), "치즈".to_string()]);
        assert!(recipe.contains("'떡볶이'에 '당근, 치즈' 재료를"));
        assert!(recipe.contains("5단계 이내"));
    }

    #[test]
    fn test_health_score_prompt_lists_recipe() {
        let recipe = UpgradedRecipe {
            recipe_name: "채소 떡볶이".to_string(),
            description: "알록달록".to_string(),
            ingredients: vec!["떡".to_string(), "당근".to_string()],
            steps: vec!["썰어요.".to_string(), "볶아요.".to_string()],
            tip: None,
        };

        let prompt = health_score_prompt(&recipe);

        assert!(prompt.contains("- 요리 이름: 채소 떡볶이"));
        assert!(prompt.contains("- 재료: 떡, 당근"));
        assert!(prompt.contains("- 만드는 법: 썰어요. 볶아요."));
    }

    #[test]
    fn test_schemas_declare_required_fields() {
        assert_eq!(nutrition_schema()["required"].as_array().unwrap().len(), 6);
        assert_eq!(
            nutrition_schema()["properties"]["nutritionFacts"]["required"],
            json!(["calories", "carbs", "protein", "fat", "vitamins"])
        );
        assert!(!recipe_schema()["required"]
            .as_array()
            .unwrap()
            .contains(&json!("tip")));
        assert_eq!(health_score_schema()["required"], json!(["score", "comment"]));
    }
}
