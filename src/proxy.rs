use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::models::{ErrorBody, ProxyRequest, RawProxyRequest};
use crate::services::{AIService, GeminiService, NutritionAiClient};

/// Builds the model-backed service for a freshly resolved API key.
pub type ServiceFactory = Arc<dyn Fn(String) -> Arc<dyn AIService> + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("API key is not configured on the server.")]
    Configuration,
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Invalid action specified")]
    InvalidAction,
    #[error("서버에서 오류가 발생했어요: {0}")]
    Upstream(anyhow::Error),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::InvalidRequest(_) | ProxyError::InvalidAction => StatusCode::BAD_REQUEST,
            ProxyError::Configuration | ProxyError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("❌ Proxy error ({}): {:?}", status, self);
        } else {
            log::warn!("⚠️ Proxy rejected request ({}): {}", status, self);
        }

        let body = Json(ErrorBody {
            message: self.to_string(),
        });
        match self {
            ProxyError::MethodNotAllowed => (status, [(header::ALLOW, "POST")], body).into_response(),
            _ => (status, body).into_response(),
        }
    }
}

/// Where the API key comes from. Resolved on every request.
#[derive(Debug, Clone)]
pub enum Credential {
    Env(String),
    Fixed(Option<String>),
}

impl Credential {
    fn resolve(&self) -> Option<String> {
        let key = match self {
            Credential::Env(var) => std::env::var(var).ok(),
            Credential::Fixed(key) => key.clone(),
        };
        key.filter(|k| !k.trim().is_empty())
    }
}

pub struct AppState {
    pub credential: Credential,
    pub services: ServiceFactory,
}

/// Factory producing Gemini-backed clients that share one HTTP connection pool.
pub fn gemini_service_factory(model: String, api_base: String) -> ServiceFactory {
    let client = reqwest::Client::new();
    Arc::new(move |api_key: String| {
        let gemini = GeminiService::with_base_url(api_key, model.clone(), api_base.clone(), client.clone());
        Arc::new(NutritionAiClient::new(Arc::new(gemini))) as Arc<dyn AIService>
    })
}

pub fn create_proxy_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/gemini", any(gemini_proxy))
        .route("/health", get(health_check));

    let router = match static_dir {
        Some(dir) => {
            log::info!("📁 Serving static front-end from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        None => router.route("/", get(root_handler)),
    };

    router.with_state(state)
}

async fn gemini_proxy(
    method: Method,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ProxyError> {
    if method != Method::POST {
        return Err(ProxyError::MethodNotAllowed);
    }

    let api_key = state.credential.resolve().ok_or(ProxyError::Configuration)?;
    let request = parse_request(&body)?;

    log::info!("🔁 Dispatching action: {}", request.action());
    let service = (state.services)(api_key);
    let result = dispatch(service.as_ref(), request)
        .await
        .map_err(ProxyError::Upstream)?;

    log::info!("✅ Action completed");
    Ok(Json(result))
}

fn parse_request(body: &[u8]) -> Result<ProxyRequest, ProxyError> {
    let raw: RawProxyRequest = serde_json::from_slice(body)
        .map_err(|e| ProxyError::InvalidRequest(format!("Invalid request body: {}", e)))?;

    let invalid_payload = |e: serde_json::Error| {
        ProxyError::InvalidRequest(format!("Invalid payload for action '{}': {}", raw.action, e))
    };

    match raw.action.as_str() {
        "fetchNutritionInfo" => serde_json::from_value(raw.payload)
            .map(ProxyRequest::FetchNutritionInfo)
            .map_err(invalid_payload),
        "generateUpgradedRecipe" => serde_json::from_value(raw.payload)
            .map(ProxyRequest::GenerateUpgradedRecipe)
            .map_err(invalid_payload),
        "fetchHealthScore" => serde_json::from_value(raw.payload)
            .map(ProxyRequest::FetchHealthScore)
            .map_err(invalid_payload),
        _ => Err(ProxyError::InvalidAction),
    }
}

async fn dispatch(service: &dyn AIService, request: ProxyRequest) -> anyhow::Result<Value> {
    let value = match request {
        ProxyRequest::FetchNutritionInfo(p) => {
            serde_json::to_value(service.fetch_nutrition_info(&p.food_name).await?)?
        }
        ProxyRequest::GenerateUpgradedRecipe(p) => serde_json::to_value(
            service
                .generate_upgraded_recipe(&p.original_food_name, &p.ingredients)
                .await?,
        )?,
        ProxyRequest::FetchHealthScore(p) => {
            serde_json::to_value(service.fetch_health_score(&p.recipe).await?)?
        }
    };
    Ok(value)
}

async fn root_handler() -> &'static str {
    "AI 영양 선생님 proxy - POST /api/gemini with {action, payload}"
}

async fn health_check() -> &'static str {
    "OK"
}
