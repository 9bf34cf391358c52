use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use super::gemini::{GenerativeModel, ModelError};
use super::prompts;
use super::AIService;
use crate::models::{HealthScoreAnalysis, NutritionAnalysis, UpgradedRecipe};

/// Schema-constrained client: builds each prompt, sends it with its declared
/// output shape and decodes the JSON reply. No retries.
pub struct NutritionAiClient {
    model: Arc<dyn GenerativeModel>,
}

impl NutritionAiClient {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    async fn ask<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system_instruction: &str,
        schema: &Value,
    ) -> Result<T, ModelError> {
        let text = self.model.generate(prompt, system_instruction, schema).await?;
        parse_model_json(&text)
    }
}

/// Empty text, non-JSON text and JSON of the wrong shape are distinct failures.
pub(crate) fn parse_model_json<T: DeserializeOwned>(text: &str) -> Result<T, ModelError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ModelError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(trimmed).map_err(ModelError::MalformedJson)?;
    serde_json::from_value(value).map_err(ModelError::SchemaMismatch)
}

#[async_trait::async_trait]
impl AIService for NutritionAiClient {
    async fn fetch_nutrition_info(&self, food_name: &str) -> Result<NutritionAnalysis> {
        log::info!("🥗 Nutrition analysis requested for '{}'", food_name);

        let analysis = self
            .ask(
                &prompts::nutrition_prompt(food_name),
                prompts::NUTRITION_SYSTEM_INSTRUCTION,
                &prompts::nutrition_schema(),
            )
            .await
            .map_err(|e| {
                log::error!("❌ Nutrition analysis failed: {}", e);
                e
            })?;

        Ok(analysis)
    }

    async fn generate_upgraded_recipe(
        &self,
        original_food_name: &str,
        ingredients: &[String],
    ) -> Result<UpgradedRecipe> {
        log::info!("🍳 Recipe upgrade requested: '{}' + {:?}", original_food_name, ingredients);

        let recipe = self
            .ask(
                &prompts::recipe_prompt(original_food_name, ingredients),
                prompts::RECIPE_SYSTEM_INSTRUCTION,
                &prompts::recipe_schema(),
            )
            .await
            .map_err(|e| {
                log::error!("❌ Recipe generation failed: {}", e);
                e
            })?;

        Ok(recipe)
    }

    async fn fetch_health_score(&self, recipe: &UpgradedRecipe) -> Result<HealthScoreAnalysis> {
        log::info!("💯 Health score requested for '{}'", recipe.recipe_name);

        let score = self
            .ask(
                &prompts::health_score_prompt(recipe),
                prompts::HEALTH_SCORE_SYSTEM_INSTRUCTION,
                &prompts::health_score_schema(),
            )
            .await
            .map_err(|e| {
                log::error!("❌ Health score failed: {}", e);
                e
            })?;

        Ok(score)
    }
}
