//! Error types for the cobro-core library.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the cobro library.
#[derive(Error, Debug)]
pub enum CobroError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Record extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Withholding computation error.
    #[error("fee error: {0}")]
    Fee(#[from] FeeError),

    /// Amount-in-words error.
    #[error("numeral error: {0}")]
    Numeral(#[from] NumeralError),

    /// Page rendering or serialization error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading PDF reports.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to billing record extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No person blocks were found in the report.
    #[error("no billing records found")]
    Empty,

    /// A matched amount is not a valid report numeral.
    #[error("malformed numeral for {field}: {value:?}")]
    MalformedNumeral { field: String, value: String },

    /// A configured phrase produced an invalid pattern.
    #[error("invalid extraction pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The report text exceeds the configured size cap.
    #[error("report text is {len} bytes, limit is {max}")]
    InputTooLarge { len: usize, max: usize },
}

/// Errors related to the withholding rule.
#[derive(Error, Debug)]
pub enum FeeError {
    /// The amount is negative.
    #[error("invalid amount: {0}")]
    InvalidAmount(Decimal),
}

/// Errors related to amount-in-words conversion.
#[derive(Error, Debug)]
pub enum NumeralError {
    /// The value is one million or more.
    #[error("{0} is out of range for words conversion")]
    OutOfRange(u64),
}

/// Errors related to writing rendered pages.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Content stream encoding or document serialization failed.
    #[error("failed to encode PDF: {0}")]
    Encode(String),

    /// Nothing to write.
    #[error("no pages to write")]
    NoPages,
}

/// Result type for the cobro library.
pub type Result<T> = std::result::Result<T, CobroError>;
