//! Test utilities: recording implementations of the core seams.
//!
//! Both mocks use `Arc<Mutex<_>>` so clones share the recorded calls and
//! tests can assert on them after handing a clone to the code under test.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::email::{EmailMessage, Mailer};
use crate::error::AppError;
use crate::formatter::SchemaFormatter;

// ---------------------------------------------------------------------------
// RecordingMailer
// ---------------------------------------------------------------------------

/// Mailer that stores every message instead of sending it.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    error: Option<String>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailer whose every send fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Arc::default(),
            error: Some(message.to_string()),
        }
    }

    /// Messages successfully "sent" so far.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, message: EmailMessage) -> BoxFuture<'_, Result<(), AppError>> {
        Box::pin(async move {
            if let Some(error) = &self.error {
                return Err(AppError::EmailError(error.clone()));
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// RecordingFormatter
// ---------------------------------------------------------------------------

/// Formatter that records the paths it was asked to format.
#[derive(Clone)]
pub struct RecordingFormatter {
    calls: Arc<Mutex<Vec<PathBuf>>>,
    error: Option<String>,
}

impl RecordingFormatter {
    pub fn succeeding() -> Self {
        Self {
            calls: Arc::default(),
            error: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: Arc::default(),
            error: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl SchemaFormatter for RecordingFormatter {
    fn name(&self) -> &str {
        "Recording"
    }

    fn format(&self, path: &Path) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        match &self.error {
            Some(message) => Err(AppError::FormatterError(message.clone())),
            None => Ok(()),
        }
    }
}
