use std::env;
use std::path::PathBuf;

use crate::services::gateway::DEFAULT_PROXY_URL;
use crate::services::gemini::{DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};

/// Name of the environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "API_KEY";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Does not include the API key; the proxy reads that per request.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            static_dir: env::var("STATIC_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub proxy_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            proxy_url: env::var("PROXY_URL").unwrap_or_else(|_| DEFAULT_PROXY_URL.to_string()),
        }
    }
}
