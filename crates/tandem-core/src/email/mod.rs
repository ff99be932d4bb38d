//! Outgoing email: message building, password-recovery links, and the
//! [`Mailer`] seam the SMTP transport plugs into.

mod smtp;
pub mod templates;

use futures::future::BoxFuture;

use crate::error::AppError;

pub use smtp::SmtpMailer;

/// An HTML email ready to be handed to a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub recipients: Vec<String>,
    pub html_body: String,
}

/// Delivers email messages.
pub trait Mailer: Send + Sync {
    fn send(&self, message: EmailMessage) -> BoxFuture<'_, Result<(), AppError>>;
}

/// Build the frontend link a user follows to choose a new password.
///
/// The token is form-urlencoded into the `token` query parameter.
pub fn password_reset_link(frontend_url: &str, token: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("token", token)
        .finish();
    format!(
        "{}/password-recovery/confirm?{query}",
        frontend_url.trim_end_matches('/')
    )
}

/// Build the password-recovery message for `email`.
pub fn password_reset_message(
    frontend_url: &str,
    email: &str,
    token: &str,
) -> Result<EmailMessage, AppError> {
    let link = password_reset_link(frontend_url, token);
    Ok(EmailMessage {
        subject: "Password recovery".to_string(),
        recipients: vec![email.to_string()],
        html_body: templates::password_reset_html(email, &link)?,
    })
}

/// Send the password-recovery email for `email` through `mailer`.
pub async fn send_reset_password_email(
    mailer: &dyn Mailer,
    frontend_url: &str,
    email: &str,
    token: &str,
) -> Result<(), AppError> {
    tracing::info!(%email, "Sending password recovery email");
    let message = password_reset_message(frontend_url, email, token)?;
    mailer.send(message).await
}
