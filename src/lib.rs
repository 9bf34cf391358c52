pub mod config;
pub mod handlers;
pub mod models;
pub mod services;

// Axum proxy (optional - requires the proxy-server feature)
#[cfg(feature = "proxy-server")]
pub mod proxy;
