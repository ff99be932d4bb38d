use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::AppError;

/// Post-processing hook run on an exported schema file.
pub trait SchemaFormatter {
    /// Human-readable name used in log messages.
    fn name(&self) -> &str;

    fn format(&self, path: &Path) -> Result<(), AppError>;
}

/// Formats a file by running an external program with the file path appended
/// to its arguments.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    name: String,
    program: OsString,
    args: Vec<OsString>,
}

impl CommandFormatter {
    pub fn new<I, S>(name: impl Into<String>, program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            name: name.into(),
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `pnpm biome format --write <file>`
    pub fn biome() -> Self {
        Self::new("Biome", "pnpm", ["biome", "format", "--write"])
    }
}

impl SchemaFormatter for CommandFormatter {
    fn name(&self) -> &str {
        &self.name
    }

    fn format(&self, path: &Path) -> Result<(), AppError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| {
                AppError::FormatterError(format!(
                    "failed to run {}: {e}",
                    self.program.to_string_lossy()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::FormatterError(format!(
                "{} exited with {}: {}",
                self.program.to_string_lossy(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
