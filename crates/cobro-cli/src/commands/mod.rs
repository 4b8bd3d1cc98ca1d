//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod generate;
pub mod words;

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use cobro_core::models::config::CobroConfig;
use cobro_core::pdf::PdfTextSource;

/// Load configuration from an explicit path, the default config file if it
/// exists, or built-in defaults.
pub(crate) fn load_config(path: Option<&str>) -> anyhow::Result<CobroConfig> {
    let config = match path {
        Some(path) => CobroConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                debug!("Using config file {}", default_path.display());
                CobroConfig::from_file(&default_path)?
            } else {
                CobroConfig::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

/// Read report text from a PDF, or from a plain text dump of one.
pub(crate) fn read_report_text(input: &Path) -> anyhow::Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Reading report: {}", input.display());

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(input)?;
            PdfTextSource::text_from_bytes(&data)?
        }
        "txt" | "text" => fs::read_to_string(input)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    debug!("Report text is {} bytes", text.len());
    Ok(text)
}
