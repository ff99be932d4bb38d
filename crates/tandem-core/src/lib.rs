pub mod config;
pub mod email;
pub mod error;
pub mod export;
pub mod formatter;
pub mod operation_id;
pub mod testutil;

pub use config::{MailConfig, SchemaExportConfig};
pub use email::{EmailMessage, Mailer, SmtpMailer, send_reset_password_email};
pub use error::AppError;
pub use export::{ExportOutcome, FormatStatus, export_schema};
pub use formatter::{CommandFormatter, SchemaFormatter};
pub use operation_id::{normalize, normalize_in_place, strip_tag_prefix};
