use futures::future::BoxFuture;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use super::{EmailMessage, Mailer};
use crate::config::MailConfig;
use crate::error::AppError;

/// [`Mailer`] backed by an async SMTP connection.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    /// Build the transport described by `config`.
    ///
    /// `ssl_tls` selects an implicit TLS connection, otherwise `starttls`
    /// requires a STARTTLS upgrade; with neither the connection is plaintext.
    pub fn new(config: &MailConfig) -> Result<Self, AppError> {
        let address: Address = config.from.parse().map_err(|e| {
            AppError::ConfigError(format!("Invalid MAIL_FROM '{}': {e}", config.from))
        })?;
        let sender = Mailbox::new(config.from_name.clone(), address);

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server).port(config.port);

        if config.ssl_tls || config.starttls {
            let params = TlsParameters::builder(config.server.clone())
                .dangerous_accept_invalid_certs(!config.validate_certs)
                .build()
                .map_err(|e| AppError::EmailError(format!("Invalid TLS parameters: {e}")))?;
            let tls = if config.ssl_tls {
                Tls::Wrapper(params)
            } else {
                Tls::Required(params)
            };
            builder = builder.tls(tls);
        }

        if config.use_credentials {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            sender,
        })
    }

    fn build_message(&self, message: EmailMessage) -> Result<Message, AppError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(message.subject);

        for recipient in &message.recipients {
            let mailbox: Mailbox = recipient.parse().map_err(|e| {
                AppError::EmailError(format!("Invalid recipient '{recipient}': {e}"))
            })?;
            builder = builder.to(mailbox);
        }

        builder
            .header(ContentType::TEXT_HTML)
            .body(message.html_body)
            .map_err(|e| AppError::EmailError(format!("Failed to build message: {e}")))
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: EmailMessage) -> BoxFuture<'_, Result<(), AppError>> {
        Box::pin(async move {
            let email = self.build_message(message)?;
            self.transport
                .send(email)
                .await
                .map_err(|e| AppError::EmailError(format!("SMTP delivery failed: {e}")))?;
            tracing::debug!("Email handed to SMTP server");
            Ok(())
        })
    }
}
