use axum::Router;

use tandem_server::config::ServerConfig;
use tandem_server::routes;

pub const FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// Router with docs enabled and the local frontend as the only CORS origin.
pub fn setup_test_app() -> Router {
    let config = ServerConfig {
        cors_origins: vec![FRONTEND_ORIGIN.to_string()],
        ..ServerConfig::default()
    };
    routes::router(&config).expect("Failed to build router")
}

/// Router with the OpenAPI document route disabled.
pub fn setup_test_app_without_docs() -> Router {
    let config = ServerConfig {
        openapi_url: None,
        ..ServerConfig::default()
    };
    routes::router(&config).expect("Failed to build router")
}
