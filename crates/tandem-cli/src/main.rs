use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

use tandem_core::{
    CommandFormatter, ExportOutcome, MailConfig, SchemaExportConfig, SchemaFormatter, SmtpMailer,
    export_schema, send_reset_password_email,
};
use tandem_server::openapi::ApiDoc;

#[derive(Parser)]
#[command(name = "tandem", version, about = "Tandem backend tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the API's OpenAPI schema for the frontend client generator
    GenerateOpenapi {
        /// File to write the schema to (defaults to OPENAPI_OUTPUT_FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip running Biome on the written file
        #[arg(long, default_value_t = false)]
        no_format: bool,
    },

    /// Strip tag prefixes from the operation IDs of an existing schema file
    Normalize {
        /// Schema file to read
        #[arg(short, long)]
        input: PathBuf,

        /// File to write to (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Send a password recovery email using the MAIL_* configuration
    SendResetEmail {
        /// Recipient address
        #[arg(long)]
        to: String,

        /// Reset token to embed in the link
        #[arg(long)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so `normalize` output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tandem=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateOpenapi { output, no_format } => {
            let config = export_config(output, |key| std::env::var(key).ok());
            cmd_generate_openapi(&config, no_format)?;
        }
        Commands::Normalize { input, output } => {
            cmd_normalize(&input, output.as_deref())?;
        }
        Commands::SendResetEmail { to, token } => {
            cmd_send_reset_email(&to, &token).await?;
        }
    }

    Ok(())
}

/// `--output` wins; otherwise `OPENAPI_OUTPUT_FILE`, where an empty value
/// counts as unset.
fn export_config(
    output: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
) -> SchemaExportConfig {
    match output {
        Some(path) => SchemaExportConfig::new(Some(path)),
        None => SchemaExportConfig::from_lookup(lookup),
    }
}

/// Export the API document. Progress and diagnostics are logged by
/// [`export_schema`].
fn cmd_generate_openapi(config: &SchemaExportConfig, no_format: bool) -> Result<ExportOutcome> {
    let biome = CommandFormatter::biome();
    let formatter: Option<&dyn SchemaFormatter> = if no_format { None } else { Some(&biome) };

    export_schema(
        config,
        || Ok(serde_json::to_value(ApiDoc::openapi())?),
        formatter,
    )
    .context("Failed to export OpenAPI schema")
}

fn cmd_normalize(input: &Path, output: Option<&Path>) -> Result<()> {
    let rendered = normalize_file(input)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Normalized schema written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Read a schema file and return its normalized, pretty-printed form.
fn normalize_file(input: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read schema file: {}", input.display()))?;
    let schema: serde_json::Value =
        serde_json::from_str(&raw).context("Invalid JSON in schema file")?;

    let schema = tandem_core::normalize(schema)?;

    let mut rendered = serde_json::to_string_pretty(&schema)?;
    rendered.push('\n');
    Ok(rendered)
}

async fn cmd_send_reset_email(to: &str, token: &str) -> Result<()> {
    let config = match MailConfig::from_env() {
        Ok(config) => config,
        Err(e) if e.is_config() => {
            return Err(anyhow::Error::new(e).context(
                "Set MAIL_USERNAME, MAIL_PASSWORD, MAIL_FROM, MAIL_PORT and MAIL_SERVER",
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let mailer = SmtpMailer::new(&config)?;

    tracing::info!(server = %config.server, port = config.port, "Connecting to SMTP server");
    send_reset_password_email(&mailer, &config.frontend_url, to, token).await?;

    tracing::info!("Password recovery email sent to {to}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parses_generate_openapi() {
        let cli = Cli::try_parse_from(["tandem", "generate-openapi", "-o", "openapi.json", "--no-format"])
            .unwrap();

        match cli.command {
            Commands::GenerateOpenapi { output, no_format } => {
                assert_eq!(output, Some(PathBuf::from("openapi.json")));
                assert!(no_format);
            }
            _ => panic!("expected generate-openapi"),
        }
    }

    #[test]
    fn test_normalize_file() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("schema.json");
        std::fs::write(
            &input,
            r#"{"paths": {"/items/": {"get": {"tags": ["items"], "operationId": "items-get_items"}}}}"#,
        )
        .unwrap();

        let rendered = normalize_file(&input).unwrap();

        let schema: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(schema["paths"]["/items/"]["get"]["operationId"], "get_items");
        assert!(rendered.contains("\n  \"paths\""));
    }

    #[test]
    fn test_normalize_file_rejects_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("schema.json");
        std::fs::write(&input, "not json").unwrap();

        let err = normalize_file(&input).unwrap_err();

        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_cli_output_is_optional() {
        let cli = Cli::try_parse_from(["tandem", "generate-openapi"]).unwrap();

        match cli.command {
            Commands::GenerateOpenapi { output, .. } => assert_eq!(output, None),
            _ => panic!("expected generate-openapi"),
        }
    }

    #[test]
    fn test_export_config_prefers_flag() {
        let config = export_config(Some(PathBuf::from("flag.json")), |_| {
            Some("env.json".to_string())
        });
        assert_eq!(config.output_file, Some(PathBuf::from("flag.json")));
    }

    #[test]
    fn test_export_config_reads_env() {
        let config = export_config(None, |key| {
            (key == "OPENAPI_OUTPUT_FILE").then(|| "env.json".to_string())
        });
        assert_eq!(config.output_file, Some(PathBuf::from("env.json")));
    }

    #[test]
    fn test_generate_openapi_writes_api_doc() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("openapi.json");

        let outcome =
            cmd_generate_openapi(&SchemaExportConfig::new(Some(output.clone())), true).unwrap();

        assert!(matches!(outcome, ExportOutcome::Written { .. }));
        let schema: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(schema["paths"]["/health"]["get"]["operationId"], "health");
    }

    #[test]
    fn test_generate_openapi_with_empty_env_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = export_config(None, |key| {
            (key == "OPENAPI_OUTPUT_FILE").then(String::new)
        });

        let outcome = cmd_generate_openapi(&config, true).unwrap();

        assert_eq!(outcome, ExportOutcome::Skipped);
        assert_eq!(config.output_file, None);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_generate_openapi_without_output_writes_nothing() {
        let config = export_config(None, |_| None);

        let outcome = cmd_generate_openapi(&config, true).unwrap();

        assert_eq!(outcome, ExportOutcome::Skipped);
        assert_eq!(config.output_file, None);
    }
}
