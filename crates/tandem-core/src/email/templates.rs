use chrono::Datelike;
use tera::{Context, Tera};

use crate::error::AppError;

const PASSWORD_RESET: &str = "password_reset.html";

/// Embedded email templates. Names ending in `.html` are autoescaped.
fn templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        PASSWORD_RESET,
        include_str!("../../templates/password_reset.html"),
    )
    .map_err(|e| AppError::EmailError(format!("Failed to add HTML template: {e}")))?;
    Ok(tera)
}

pub fn password_reset_html(username: &str, link: &str) -> Result<String, AppError> {
    let mut context = Context::new();
    context.insert("username", username);
    context.insert("link", link);
    context.insert("year", &chrono::Utc::now().year());

    templates()?
        .render(PASSWORD_RESET, &context)
        .map_err(|e| AppError::EmailError(format!("Failed to render HTML template: {e}")))
}
