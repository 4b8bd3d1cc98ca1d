//! Spanish date line for the document header.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// Uppercase Spanish month name for a 1-based month.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTHS.get(month.checked_sub(1)? as usize).copied()
}

/// Format `"CITY, D DE MONTH DE YYYY"`, day without padding.
pub fn date_line(city: &str, date: NaiveDate) -> String {
    // NaiveDate months are always 1..=12
    let month = month_name(date.month()).unwrap_or_default();
    format!("{}, {} DE {} DE {}", city, date.day(), month, date.year())
}
