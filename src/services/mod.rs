pub mod ai_service;
pub mod gateway; // Browser-side client of the proxy
pub mod gemini; // Gemini REST client
pub mod nutrition_ai;
pub mod prompts;

pub use ai_service::AIService;
pub use gateway::{GatewayError, ProxyGateway};
pub use gemini::{GeminiService, GenerativeModel, ModelError};
pub use nutrition_ai::NutritionAiClient;
