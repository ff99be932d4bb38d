use tandem_core::AppError;

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Origins allowed to make credentialed cross-origin requests.
    pub cors_origins: Vec<String>,
    /// Route serving the OpenAPI document; `None` disables it and the docs UI.
    pub openapi_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            cors_origins: Vec::new(),
            openapi_url: Some("/openapi.json".to_string()),
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `TANDEM_SERVER_PORT` (optional, defaults to 8000)
    /// - `CORS_ORIGINS` (optional, comma-separated)
    /// - `OPENAPI_URL` (optional, defaults to `/openapi.json`; empty disables)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let port = match lookup("TANDEM_SERVER_PORT") {
            None => defaults.port,
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid TANDEM_SERVER_PORT '{raw}': must be a port number"
                ))
            })?,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let openapi_url = match lookup("OPENAPI_URL") {
            None => defaults.openapi_url,
            Some(raw) if raw.is_empty() => None,
            Some(raw) if raw.starts_with('/') => Some(raw),
            Some(raw) => {
                return Err(AppError::ConfigError(format!(
                    "Invalid OPENAPI_URL '{raw}': must start with '/'"
                )));
            }
        };

        Ok(Self {
            port,
            cors_origins,
            openapi_url,
        })
    }
}
