//! Generate command - build cuentas de cobro from a receivables report.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use cobro_core::error::ExtractionError;
use cobro_core::layout::DocumentLayout;
use cobro_core::models::config::FeePolicy;
use cobro_core::models::record::PersonRecord;
use cobro_core::pdf::PdfWriter;
use cobro_core::report::{RecordExtractor, ReportParser};

use super::{load_config, read_report_text};

/// Default name of the document holding every page.
pub const CONSOLIDATED_NAME: &str = "Cuentas_Cobro_Consolidadas.pdf";

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Receivables report (PDF, or its text as .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "cuentas_cobro")]
    output_dir: PathBuf,

    /// Withholding policy (overrides the config file)
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Document date, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// File name of the consolidated document
    #[arg(long, default_value = CONSOLIDATED_NAME)]
    consolidated: String,

    /// Skip the per-person documents
    #[arg(long)]
    consolidated_only: bool,

    /// Also write summary.csv with every record
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PolicyArg {
    /// Withhold on every total
    Flat,
    /// Withhold only above the threshold amount
    Threshold,
}

impl From<PolicyArg> for FeePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Flat => FeePolicy::Flat,
            PolicyArg::Threshold => FeePolicy::Threshold,
        }
    }
}

pub async fn run(args: GenerateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(policy) = args.policy {
        config.fees.policy = policy.into();
    }

    let text = read_report_text(&args.input)?;

    let extractor = RecordExtractor::from_config(&config)?;
    let result = extractor.parse(&text)?;

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let result = match result.require_records() {
        Ok(result) => result,
        Err(ExtractionError::Empty) => {
            println!(
                "{} No billing records found in {}",
                style("ℹ").blue(),
                args.input.display()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let layout = DocumentLayout::new(config.document.clone());
    let writer = PdfWriter::new();

    fs::create_dir_all(&args.output_dir)?;

    let pb = ProgressBar::new(result.records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let mut pages = Vec::with_capacity(result.records.len());
    let mut used_stems = HashSet::new();

    for record in &result.records {
        pb.set_message(record.name.clone());
        let page = layout.render(record, today);

        if !args.consolidated_only {
            let stem = unique_stem(record, &mut used_stems);
            let path = args.output_dir.join(format!("{}.pdf", stem));
            let bytes = writer.write(std::slice::from_ref(&page))?;
            fs::write(&path, bytes)?;
            debug!("Wrote {}", path.display());
        }

        pages.push(page);
        pb.inc(1);
    }

    pb.finish_and_clear();

    let consolidated_path = args.output_dir.join(&args.consolidated);
    let bytes = writer
        .clone()
        .with_title("Cuentas de cobro")
        .write(&pages)?;
    fs::write(&consolidated_path, bytes)?;
    info!("Wrote consolidated document {}", consolidated_path.display());

    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&summary_path, &result.records)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!(
        "{} Generated {} cuentas de cobro in {}",
        style("✓").green(),
        result.records.len(),
        args.output_dir.display()
    );
    println!(
        "{} Consolidated document: {}",
        style("ℹ").blue(),
        consolidated_path.display()
    );
    if result.skipped > 0 {
        warn!("{} person blocks were incomplete and skipped", result.skipped);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// File stem for `record`, suffixed with the national id when another record
/// already produced the same stem.
fn unique_stem(record: &PersonRecord, used: &mut HashSet<String>) -> String {
    let stem = record.file_stem();
    if used.insert(stem.clone()) {
        return stem;
    }

    let mut candidate = format!("{}_{}", stem, record.national_id);
    let mut n = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}_{}_{}", stem, record.national_id, n);
        n += 1;
    }
    candidate
}

pub(crate) fn write_summary(path: &Path, records: &[PersonRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_records_csv(&mut wtr, records)?;
    wtr.flush()?;
    Ok(())
}

pub(crate) fn write_records_csv<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    records: &[PersonRecord],
) -> anyhow::Result<()> {
    wtr.write_record([
        "name",
        "national_id",
        "total",
        "is_exempt_profession",
        "withholding_rate",
        "withholding_amount",
        "subtotal",
        "applies_withholding",
    ])?;

    for record in records {
        wtr.write_record([
            &record.name,
            &record.national_id,
            &record.total.to_string(),
            &record.is_exempt_profession.to_string(),
            &record.withholding_rate.normalize().to_string(),
            &record.withholding_amount.to_string(),
            &record.subtotal.to_string(),
            &record.applies_withholding.to_string(),
        ])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobro_core::fees::Withholding;
    use rust_decimal::Decimal;

    fn record(name: &str, id: &str) -> PersonRecord {
        let total = Decimal::new(10_000, 0);
        let withholding = Withholding {
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
            subtotal: total,
            applies: false,
        };
        PersonRecord::new(name, id, total, false, &withholding)
    }

    #[test]
    fn test_unique_stem() {
        let mut used = HashSet::new();
        assert_eq!(unique_stem(&record("JUAN PEREZ", "1"), &mut used), "JUAN_PEREZ");
        assert_eq!(unique_stem(&record("JUAN PEREZ", "2"), &mut used), "JUAN_PEREZ_2");
        assert_eq!(unique_stem(&record("JUAN PEREZ", "2"), &mut used), "JUAN_PEREZ_2_2");
    }

    #[test]
    fn test_records_csv() {
        let mut wtr = csv::Writer::from_writer(vec![]);
        write_records_csv(&mut wtr, &[record("ANA GOMEZ", "52123456")]).unwrap();
        let data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        let mut lines = data.lines();
        assert!(lines.next().unwrap().starts_with("name,national_id,total"));
        assert_eq!(
            lines.next().unwrap(),
            "ANA GOMEZ,52123456,10000,false,0,0,10000,false"
        );
    }
}
