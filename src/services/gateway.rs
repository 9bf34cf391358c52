use anyhow::Result;
use serde::de::DeserializeOwned;

use super::AIService;
use crate::models::{
    ErrorBody, FoodPayload, HealthScoreAnalysis, HealthScorePayload, NutritionAnalysis,
    ProxyRequest, RecipePayload, UpgradedRecipe,
};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:8080/api/gemini";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("서버와 연결할 수 없어요: {0}")]
    Transport(String),
    #[error("서버 응답을 읽을 수 없어요: {0}")]
    Decode(String),
}

/// Client-side mirror of the proxy actions. Holds no credential.
pub struct ProxyGateway {
    endpoint: String,
    client: reqwest::Client,
}

impl ProxyGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn call<T: DeserializeOwned>(&self, request: &ProxyRequest) -> Result<T, GatewayError> {
        log::debug!("📤 POST {} action={}", self.endpoint, request.action());

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Fall back to a generic message when the error body is unreadable.
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => format!("요청에 실패했어요 (HTTP {})", status.as_u16()),
            };
            log::error!("❌ Proxy returned {} for {}: {}", status, request.action(), message);
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                GatewayError::Decode(e.to_string())
            } else {
                GatewayError::Transport(e.to_string())
            }
        })
    }
}

#[async_trait::async_trait]
impl AIService for ProxyGateway {
    async fn fetch_nutrition_info(&self, food_name: &str) -> Result<NutritionAnalysis> {
        let request = ProxyRequest::FetchNutritionInfo(FoodPayload {
            food_name: food_name.to_string(),
        });
        Ok(self.call(&request).await?)
    }

    async fn generate_upgraded_recipe(
        &self,
        original_food_name: &str,
        ingredients: &[String],
    ) -> Result<UpgradedRecipe> {
        let request = ProxyRequest::GenerateUpgradedRecipe(RecipePayload {
            original_food_name: original_food_name.to_string(),
            ingredients: ingredients.to_vec(),
        });
        Ok(self.call(&request).await?)
    }

    async fn fetch_health_score(&self, recipe: &UpgradedRecipe) -> Result<HealthScoreAnalysis> {
        let request = ProxyRequest::FetchHealthScore(HealthScorePayload {
            recipe: recipe.clone(),
        });
        Ok(self.call(&request).await?)
    }
}
