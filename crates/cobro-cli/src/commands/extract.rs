//! Extract command - print the billing records found in a report.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use cobro_core::models::record::PersonRecord;
use cobro_core::report::rules::format_whole_amount;
use cobro_core::report::{RecordExtractor, ReportParser};

use super::generate::write_records_csv;
use super::{load_config, read_report_text};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Receivables report (PDF, or its text as .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print records that fail validation checks
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let text = read_report_text(&args.input)?;

    let result = RecordExtractor::from_config(&config)?.parse(&text)?;
    debug!(
        "Extraction took {}ms, {} warnings",
        result.processing_time_ms,
        result.warnings.len()
    );

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    if args.validate {
        for record in &result.records {
            let issues = record.validate();
            if !issues.is_empty() {
                eprintln!("{} {}:", style("Validation issues for").yellow(), record.name);
                for issue in &issues {
                    eprintln!("  - {}", issue);
                }
            }
        }
    }

    let output = format_records(&result.records, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_records(records: &[PersonRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            write_records_csv(&mut wtr, records)?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_text(records: &[PersonRecord]) -> String {
    if records.is_empty() {
        return "No billing records found.".to_string();
    }

    let mut output = String::new();
    for record in records {
        output.push_str(&format!("{} (C.C. {})\n", record.name, record.national_id));
        output.push_str(&format!("  Total:    {}\n", format_whole_amount(record.total)));
        if record.applies_withholding {
            output.push_str(&format!(
                "  ICA:      {} ({} per mille{})\n",
                format_whole_amount(record.withholding_amount),
                record.withholding_rate.normalize(),
                if record.is_exempt_profession { ", exempt profession" } else { "" }
            ));
        } else {
            output.push_str("  ICA:      not applied\n");
        }
        output.push_str(&format!("  Subtotal: {}\n", format_whole_amount(record.subtotal)));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobro_core::fees::FeeRule;
    use rust_decimal::Decimal;

    fn record() -> PersonRecord {
        let total = Decimal::new(150_000, 0);
        let withholding = FeeRule::default().compute(total, true).unwrap();
        PersonRecord::new("JUAN PEREZ", "123456789", total, true, &withholding)
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&[record()]);
        assert!(text.starts_with("JUAN PEREZ (C.C. 123456789)"));
        assert!(text.contains("ICA:      1,035 (6.9 per mille, exempt profession)"));
        assert!(text.contains("Subtotal: 151,035"));
    }

    #[test]
    fn test_format_json_is_array() {
        let json = format_records(&[record()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(|a| a.len()), Some(1));
        assert_eq!(value[0]["national_id"], "123456789");
    }
}
