use anyhow::Result;

use crate::models::{HealthScoreAnalysis, NutritionAnalysis, UpgradedRecipe};

/// The three nutrition operations (model-backed client or proxy gateway)
#[async_trait::async_trait]
pub trait AIService: Send + Sync {
    async fn fetch_nutrition_info(&self, food_name: &str) -> Result<NutritionAnalysis>;
    async fn generate_upgraded_recipe(
        &self,
        original_food_name: &str,
        ingredients: &[String],
    ) -> Result<UpgradedRecipe>;
    async fn fetch_health_score(&self, recipe: &UpgradedRecipe) -> Result<HealthScoreAnalysis>;
}
