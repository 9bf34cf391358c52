use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;

use nutrition_teacher::config::{ServerConfig, API_KEY_VAR};
use nutrition_teacher::proxy::{create_proxy_router, gemini_service_factory, AppState, Credential};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting AI 영양 선생님 proxy...");

    let config = ServerConfig::from_env();

    // The key is checked again on every request; this is only an early hint.
    if std::env::var(API_KEY_VAR).map(|k| k.trim().is_empty()).unwrap_or(true) {
        log::warn!("⚠️ {} not set, every proxy call will fail until it is configured", API_KEY_VAR);
    }

    let state = Arc::new(AppState {
        credential: Credential::Env(API_KEY_VAR.to_string()),
        services: gemini_service_factory(config.gemini_model.clone(), config.gemini_api_base.clone()),
    });
    log::info!("✅ Gemini service factory initialized with model: {}", config.gemini_model);

    let app = create_proxy_router(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("🌐 Proxy listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("🛑 Shutting down...");
        })
        .await?;

    Ok(())
}
