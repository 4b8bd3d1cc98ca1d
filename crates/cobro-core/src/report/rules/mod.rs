//! Rule-based extractors for accounts receivable reports.

pub mod amounts;
pub mod blocks;
pub mod patterns;
pub mod profession;

pub use amounts::{format_report_amount, format_whole_amount, parse_report_amount};
pub use blocks::{BlockExtractor, PersonBlock};
pub use profession::detect_profession;
