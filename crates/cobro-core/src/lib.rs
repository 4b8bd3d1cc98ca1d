//! Core library for cuenta de cobro generation.
//!
//! This crate provides:
//! - PDF report text extraction and PDF page writing
//! - Billing record extraction from accounts receivable reports
//! - ICA withholding rules (flat and threshold policies)
//! - Spanish amount-in-words conversion
//! - Fixed-template page layout for the cuenta de cobro document

pub mod error;
pub mod fees;
pub mod layout;
pub mod models;
pub mod pdf;
pub mod report;
pub mod words;

pub use error::{CobroError, Result};
pub use fees::{FeeRule, Withholding};
pub use layout::{DocumentLayout, Page};
pub use models::config::{CobroConfig, DocumentConfig, ExtractionConfig, FeeConfig, FeePolicy};
pub use models::record::PersonRecord;
pub use pdf::{PdfProcessor, PdfTextSource, PdfWriter};
pub use report::{ExtractionResult, RecordExtractor, ReportParser};
pub use words::to_words;
