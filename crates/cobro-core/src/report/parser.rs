//! Record extractor combining block rules, profession detection and the
//! withholding rule.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::fees::FeeRule;
use crate::models::config::{CobroConfig, ExtractionConfig};
use crate::models::record::PersonRecord;

use super::rules::{
    amounts::parse_report_amount,
    blocks::{BlockExtractor, PersonBlock},
    profession::detect_profession,
};
use super::{ReportParser, Result};

/// Result of record extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Records in report order.
    pub records: Vec<PersonRecord>,
    /// Reasons for dropped records.
    pub warnings: Vec<String>,
    /// Person headers found in the text.
    pub blocks_found: usize,
    /// Headers without an anchor phrase or total line.
    pub skipped: usize,
    /// Complete blocks rejected by numeral parsing or the withholding rule.
    pub dropped: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// Whether no records were extracted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Turn an empty result into [`ExtractionError::Empty`].
    pub fn require_records(self) -> Result<Self> {
        if self.is_empty() {
            Err(ExtractionError::Empty)
        } else {
            Ok(self)
        }
    }
}

/// Extracts billing records from report text.
pub struct RecordExtractor {
    config: ExtractionConfig,
    fees: FeeRule,
    blocks: BlockExtractor,
}

impl RecordExtractor {
    /// Create an extractor with the given extraction settings and fee rule.
    pub fn new(config: ExtractionConfig, fees: FeeRule) -> Result<Self> {
        let blocks = BlockExtractor::new(&config.anchor_phrase)?;
        Ok(Self {
            config,
            fees,
            blocks,
        })
    }

    /// Create an extractor from the full pipeline configuration.
    pub fn from_config(config: &CobroConfig) -> Result<Self> {
        Self::new(config.extraction.clone(), FeeRule::new(config.fees.clone()))
    }

    /// Replace the fee rule.
    pub fn with_fee_rule(mut self, fees: FeeRule) -> Self {
        self.fees = fees;
        self
    }

    /// Extract the records, discarding diagnostics.
    pub fn extract(&self, text: &str) -> Result<Vec<PersonRecord>> {
        self.parse(text).map(|r| r.records)
    }

    fn build_record(&self, text: &str, block: PersonBlock) -> crate::Result<PersonRecord> {
        let total = parse_report_amount(&block.total_numeral).ok_or_else(|| {
            ExtractionError::MalformedNumeral {
                field: "total".to_string(),
                value: block.total_numeral.clone(),
            }
        })?;
        let reported_subtotal = parse_report_amount(&block.first_numeral);

        let is_exempt = detect_profession(
            text,
            &block.name,
            &block.national_id,
            &self.config.anchor_phrase,
            &self.config.profession_keyword,
        );

        let withholding = self.fees.compute(total, is_exempt)?;

        Ok(
            PersonRecord::new(block.name, block.national_id, total, is_exempt, &withholding)
                .with_reported_subtotal(reported_subtotal),
        )
    }
}

impl ReportParser for RecordExtractor {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let start = Instant::now();

        if text.len() > self.config.max_input_bytes {
            return Err(ExtractionError::InputTooLarge {
                len: text.len(),
                max: self.config.max_input_bytes,
            });
        }

        info!("Parsing report from {} characters of text", text.len());

        let scan = self.blocks.scan(text);
        let mut result = ExtractionResult {
            records: Vec::with_capacity(scan.blocks.len()),
            blocks_found: scan.headers,
            skipped: scan.incomplete(),
            ..Default::default()
        };

        for block in scan.blocks {
            let name = block.name.clone();
            match self.build_record(text, block) {
                Ok(record) => {
                    debug!(
                        "{} - CC {} - total {} - exempt {} - ICA {}",
                        record.name,
                        record.national_id,
                        record.total,
                        record.is_exempt_profession,
                        record.withholding_amount
                    );
                    result.records.push(record);
                }
                Err(e) => {
                    warn!("Dropping record for {}: {}", name, e);
                    result.warnings.push(format!("{}: {}", name, e));
                    result.dropped += 1;
                }
            }
        }

        result.processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extracted {} records ({} headers, {} incomplete, {} dropped)",
            result.records.len(),
            result.blocks_found,
            result.skipped,
            result.dropped
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::FeePolicy;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn extractor() -> RecordExtractor {
        RecordExtractor::from_config(&CobroConfig::default()).unwrap()
    }

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    const TWO_PEOPLE: &str = "\
GRUPO OPTICO ANDES
Informe de cuentas por cobrar
JUAN PEREZ
Identificación: 123456789
Profesión: OPTOMETRA
Turnos semana 1 75.000
Turnos semana 2 75.000
Total para Cuentas por Cobrar
150.000
Total: 150.000
MARÍA ÑÚÑEZ
Identificación: 52123456
Profesión: ASESORA COMERCIAL
Metas 1.234,50
Total para Cuentas por Cobrar
1.234,50
Total: 1.234,50
";

    #[test]
    fn test_end_to_end_flat_policy() {
        let text = "JUAN PEREZ\nIdentificación: 123456789\nOPTOMETRA\nTotal para Cuentas por Cobrar\n150.000\nTotal: 150.000\n";
        let records = extractor().extract(text).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "JUAN PEREZ");
        assert_eq!(record.national_id, "123456789");
        assert_eq!(record.total, dec(150_000));
        assert!(record.is_exempt_profession);
        assert_eq!(record.withholding_rate, Decimal::new(69, 1));
        assert_eq!(record.withholding_amount, dec(1035));
        assert_eq!(record.subtotal, dec(151_035));
        assert!(record.applies_withholding);
        assert_eq!(record.reported_subtotal, Some(dec(150_000)));
        assert!(record.validate().is_empty());
    }

    #[test]
    fn test_two_blocks_in_order_with_independent_flags() {
        let result = extractor().parse(TWO_PEOPLE).unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.blocks_found, 2);
        assert_eq!(result.skipped, 0);

        let juan = &result.records[0];
        let maria = &result.records[1];
        assert_eq!(juan.name, "JUAN PEREZ");
        assert!(juan.is_exempt_profession);
        assert_eq!(maria.name, "MARÍA ÑÚÑEZ");
        assert!(!maria.is_exempt_profession);
        assert_eq!(maria.total, Decimal::new(123_450, 2));
        assert_eq!(maria.withholding_rate, Decimal::new(966, 2));
    }

    #[test]
    fn test_profession_mention_does_not_leak_forward() {
        let text = TWO_PEOPLE.replace("OPTOMETRA", "AUXILIAR").replace("ASESORA COMERCIAL", "OPTOMETRA");
        let records = extractor().extract(&text).unwrap();

        assert!(!records[0].is_exempt_profession);
        assert!(records[1].is_exempt_profession);
    }

    #[test]
    fn test_no_blocks_is_empty_not_error() {
        let result = extractor().parse("Informe vacío\nSin movimientos\n").unwrap();
        assert!(result.is_empty());
        assert!(matches!(result.require_records(), Err(ExtractionError::Empty)));
    }

    #[test]
    fn test_malformed_total_drops_only_that_record() {
        let text = TWO_PEOPLE.replace("Total: 150.000", "Total: 1,50,000");
        let result = extractor().parse(&text).unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].name, "MARÍA ÑÚÑEZ");
        assert_eq!(result.dropped, 1);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("JUAN PEREZ"));
    }

    #[test]
    fn test_overflowing_total_drops_only_that_record() {
        let text = TWO_PEOPLE.replace(
            "Total: 150.000",
            "Total: 79.228.162.514.264.337.593.543.950.335",
        );
        let result = extractor().parse(&text).unwrap();

        assert_eq!(result.dropped, 1);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].name, "MARÍA ÑÚÑEZ");
        assert!(result.warnings[0].starts_with("JUAN PEREZ"));
    }

    #[test]
    fn test_threshold_policy() {
        let fees = FeeRule::default().with_policy(FeePolicy::Threshold);
        let result = extractor().with_fee_rule(fees).parse(TWO_PEOPLE).unwrap();

        let juan = &result.records[0];
        assert!(juan.applies_withholding);
        assert_eq!(juan.withholding_amount, dec(1035));

        let maria = &result.records[1];
        assert!(!maria.applies_withholding);
        assert_eq!(maria.withholding_rate, Decimal::ZERO);
        assert_eq!(maria.subtotal, maria.total);
    }

    #[test]
    fn test_duplicate_names_produce_two_records() {
        let block = "JUAN PEREZ\nIdentificación: 123456789\nTotal para Cuentas por Cobrar\n10.000\nTotal: 10.000\n";
        let text = format!("{block}{block}");
        let records = extractor().extract(&text).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_input_too_large() {
        let mut config = CobroConfig::default();
        config.extraction.max_input_bytes = 16;
        let extractor = RecordExtractor::from_config(&config).unwrap();

        let err = extractor.parse(TWO_PEOPLE).unwrap_err();
        assert!(matches!(err, ExtractionError::InputTooLarge { max: 16, .. }));
    }

    #[test]
    fn test_page_breaks_inside_block() {
        let text = "JUAN PEREZ\nIdentificación: 123456789\nTurnos 150.000\n\nPágina 2\nTotal para Cuentas por Cobrar\n150.000\nTotal: 150.000";
        let records = extractor().extract(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total, dec(150_000));
    }
}
