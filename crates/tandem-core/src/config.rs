use std::path::PathBuf;

use crate::error::AppError;

/// Where the exported OpenAPI schema goes.
#[derive(Debug, Clone, Default)]
pub struct SchemaExportConfig {
    pub output_file: Option<PathBuf>,
}

impl SchemaExportConfig {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    /// Read configuration from environment variables.
    ///
    /// - `OPENAPI_OUTPUT_FILE` (optional; unset or empty disables the export)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let output_file = lookup("OPENAPI_OUTPUT_FILE")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self { output_file }
    }
}

/// SMTP settings for outgoing mail.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub username: String,
    pub password: String,
    /// Sender address.
    pub from: String,
    pub from_name: Option<String>,
    pub port: u16,
    pub server: String,
    pub starttls: bool,
    pub ssl_tls: bool,
    pub use_credentials: bool,
    pub validate_certs: bool,
    /// Base URL of the frontend, used to build links in emails.
    pub frontend_url: String,
}

impl MailConfig {
    /// Read configuration from environment variables.
    ///
    /// - `MAIL_USERNAME`, `MAIL_PASSWORD`, `MAIL_FROM`, `MAIL_PORT`,
    ///   `MAIL_SERVER` (required)
    /// - `MAIL_FROM_NAME` (optional)
    /// - `MAIL_STARTTLS` (default true), `MAIL_SSL_TLS` (default false),
    ///   `USE_CREDENTIALS` (default true), `VALIDATE_CERTS` (default true)
    /// - `FRONTEND_URL` (default `http://localhost:3000`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let (Some(username), Some(password), Some(from), Some(port), Some(server)) = (
            lookup("MAIL_USERNAME"),
            lookup("MAIL_PASSWORD"),
            lookup("MAIL_FROM"),
            lookup("MAIL_PORT"),
            lookup("MAIL_SERVER"),
        ) else {
            return Err(AppError::ConfigError(
                "Email configuration is not fully set".into(),
            ));
        };

        let port: u16 = port.trim().parse().map_err(|_| {
            AppError::ConfigError(format!(
                "Invalid MAIL_PORT '{port}': must be a port number"
            ))
        })?;

        Ok(Self {
            username,
            password,
            from,
            from_name: lookup("MAIL_FROM_NAME").filter(|name| !name.is_empty()),
            port,
            server,
            starttls: parse_flag(&lookup, "MAIL_STARTTLS", true)?,
            ssl_tls: parse_flag(&lookup, "MAIL_SSL_TLS", false)?,
            use_credentials: parse_flag(&lookup, "USE_CREDENTIALS", true)?,
            validate_certs: parse_flag(&lookup, "VALIDATE_CERTS", true)?,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
        })
    }
}

/// Parse a boolean flag, accepting `true/false`, `1/0`, `yes/no` and `on/off`.
pub fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, AppError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AppError::ConfigError(format!(
            "Invalid {key} '{raw}': must be a boolean"
        ))),
    }
}
