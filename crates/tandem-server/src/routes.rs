use axum::Router;
use axum::http::HeaderValue;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tandem_core::AppError;

use crate::config::ServerConfig;
use crate::dto::HealthResponse;
use crate::openapi::ApiDoc;

/// Build the full router with all routes and middleware.
pub fn router(config: &ServerConfig) -> Result<Router, AppError> {
    let mut app = Router::new().route("/health", get(health));

    if let Some(openapi_url) = &config.openapi_url {
        app = app.merge(SwaggerUi::new("/docs").url(openapi_url.clone(), ApiDoc::openapi()));
    }

    Ok(app.layer(cors_layer(&config.cors_origins)?))
}

/// CORS for the configured origins, with credentials and any method or header.
fn cors_layer(origins: &[String]) -> Result<CorsLayer, AppError> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| {
                AppError::ConfigError(format!("Invalid CORS origin '{origin}'"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
