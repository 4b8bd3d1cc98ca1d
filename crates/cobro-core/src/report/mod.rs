//! Billing record extraction from accounts receivable reports.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, RecordExtractor};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for report parsing.
pub trait ReportParser {
    /// Parse billing records from the report text (pages joined by `\n`).
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}
