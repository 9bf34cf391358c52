use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: String, // 표시용 문자열 (예: "350kcal")
    pub carbs: f64,       // g
    pub protein: f64,     // g
    pub fat: f64,         // g
    pub vitamins: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionAnalysis {
    pub food_name: String,
    pub ingredients: Vec<String>,
    pub nutrition_facts: NutritionFacts,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradedRecipe {
    pub recipe_name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

/// Score is nominally 0-100 but is passed through as the model returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreAnalysis {
    pub score: f64,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPayload {
    pub food_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    pub original_food_name: String,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScorePayload {
    pub recipe: UpgradedRecipe,
}

/// Body of `POST /api/gemini`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", content = "payload")]
pub enum ProxyRequest {
    #[serde(rename = "fetchNutritionInfo")]
    FetchNutritionInfo(FoodPayload),
    #[serde(rename = "generateUpgradedRecipe")]
    GenerateUpgradedRecipe(RecipePayload),
    #[serde(rename = "fetchHealthScore")]
    FetchHealthScore(HealthScorePayload),
}

impl ProxyRequest {
    pub fn action(&self) -> &'static str {
        match self {
            ProxyRequest::FetchNutritionInfo(_) => "fetchNutritionInfo",
            ProxyRequest::GenerateUpgradedRecipe(_) => "generateUpgradedRecipe",
            ProxyRequest::FetchHealthScore(_) => "fetchHealthScore",
        }
    }
}

/// Envelope as received, before the action is known to be valid.
#[derive(Debug, Deserialize)]
pub struct RawProxyRequest {
    pub action: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Every non-2xx proxy response carries this body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_uses_camel_case_fields() {
        let json = r#"{
            "foodName": "떡볶이",
            "ingredients": ["떡", "고추장"],
            "nutritionFacts": {"calories": "350kcal", "carbs": 60, "protein": 8, "fat": 5, "vitamins": "비타민 B"},
            "pros": ["맛있어요"],
            "cons": ["나트륨이 많아요"],
            "tips": ["채소를 추가해요"]
        }"#;

        let analysis: NutritionAnalysis = serde_json::from_str(json).unwrap();

        assert_eq!(analysis.food_name, "떡볶이");
        assert_eq!(analysis.nutrition_facts.carbs, 60.0);
        assert_eq!(analysis.nutrition_facts.calories, "350kcal");
    }

    #[test]
    fn test_recipe_tip_is_optional() {
        let json = r#"{"recipeName": "치즈 떡볶이", "description": "고소해요", "ingredients": ["떡"], "steps": ["끓여요"]}"#;
        let recipe: UpgradedRecipe = serde_json::from_str(json).unwrap();
        assert!(recipe.tip.is_none());

        let out = serde_json::to_value(&recipe).unwrap();
        assert!(out.get("tip").is_none());
        assert_eq!(out["recipeName"], "치즈 떡볶이");
    }

    #[test]
    fn test_proxy_request_envelope() {
        let request = ProxyRequest::GenerateUpgradedRecipe(RecipePayload {
            original_food_name: "떡볶이".to_string(),
            ingredients: vec!["당근".to_string(), "치즈".to_string()],
        });

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["action"], "generateUpgradedRecipe");
        assert_eq!(value["payload"]["originalFoodName"], "떡볶이");
        assert_eq!(value["payload"]["ingredients"], serde_json::json!(["당근", "치즈"]));
        assert_eq!(request.action(), "generateUpgradedRecipe");
    }

    #[test]
    fn test_raw_request_defaults_missing_payload() {
        let raw: RawProxyRequest = serde_json::from_str(r#"{"action": "badAction"}"#).unwrap();
        assert_eq!(raw.action, "badAction");
        assert!(raw.payload.is_null());
    }
}
