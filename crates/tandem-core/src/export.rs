use std::path::PathBuf;

use serde_json::Value;

use crate::config::SchemaExportConfig;
use crate::error::AppError;
use crate::formatter::SchemaFormatter;
use crate::operation_id::normalize_in_place;

/// What happened to the formatter step of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatStatus {
    NotRequested,
    Formatted,
    /// The formatter failed; the schema file is still valid, just unformatted.
    Failed(String),
}

/// Result of [`export_schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No output file was configured; nothing was generated or written.
    Skipped,
    Written {
        path: PathBuf,
        /// Number of operation IDs that had their tag prefix removed.
        renamed: usize,
        format: FormatStatus,
    },
}

/// Generate the OpenAPI schema, strip tag prefixes from its operation IDs and
/// write it to the configured output file.
///
/// `build_schema` is only called when an output file is configured. Failures
/// of the optional `formatter` are logged and reported in the outcome but never
/// returned as errors.
pub fn export_schema(
    config: &SchemaExportConfig,
    build_schema: impl FnOnce() -> Result<Value, AppError>,
    formatter: Option<&dyn SchemaFormatter>,
) -> Result<ExportOutcome, AppError> {
    let Some(output_file) = config.output_file.as_ref() else {
        tracing::warn!("No output file specified in OPENAPI_OUTPUT_FILE env var");
        return Ok(ExportOutcome::Skipped);
    };

    let mut schema = build_schema()?;
    let renamed = normalize_in_place(&mut schema)?;

    let mut contents = serde_json::to_string_pretty(&schema)?;
    contents.push('\n');
    std::fs::write(output_file, contents)?;
    tracing::info!(renamed, "OpenAPI schema saved to {}", output_file.display());

    let format = match formatter {
        None => FormatStatus::NotRequested,
        Some(formatter) => match formatter.format(output_file) {
            Ok(()) => {
                tracing::info!("Formatted {} with {}", output_file.display(), formatter.name());
                FormatStatus::Formatted
            }
            Err(e) => {
                tracing::warn!("Could not format with {}: {e}", formatter.name());
                FormatStatus::Failed(e.to_string())
            }
        },
    };

    Ok(ExportOutcome::Written {
        path: output_file.clone(),
        renamed,
        format,
    })
}
