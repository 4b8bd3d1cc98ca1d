//! Amount parsing and formatting.
//!
//! Reports print amounts with `.` as thousands separator and `,` as decimal
//! separator (`1.234.567,89`). The rendered document prints whole amounts
//! with `,` thousands separators (`1,234,568`).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a report numeral such as `150.000` or `1.234,5`.
pub fn parse_report_amount(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace('.', "").replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Format an amount the way reports print it (`1.234,5`).
pub fn format_report_amount(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let s = normalized.abs().to_string();
    let (integer_part, fraction) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };

    let mut out = String::new();
    if normalized.is_sign_negative() && !normalized.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(integer_part, '.'));
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

/// Round to whole units (banker's rounding) and group with `,`.
pub fn format_whole_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(0).to_i128().unwrap_or_default();
    let grouped = group_thousands(&rounded.unsigned_abs().to_string(), ',');
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut formatted = String::with_capacity(chars.len() + chars.len() / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(separator);
        }
        formatted.push(*c);
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_report_amount() {
        assert_eq!(parse_report_amount("150.000"), Some(dec("150000")));
        assert_eq!(parse_report_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_report_amount("12.345.678,9"), Some(dec("12345678.9")));
        assert_eq!(parse_report_amount("999"), Some(dec("999")));
        assert_eq!(parse_report_amount(" 80.000 "), Some(dec("80000")));
    }

    #[test]
    fn test_parse_report_amount_rejects_garbage() {
        assert_eq!(parse_report_amount("..."), None);
        assert_eq!(parse_report_amount("1,2,3"), None);
        assert_eq!(parse_report_amount(""), None);
    }

    #[test]
    fn test_format_report_amount() {
        assert_eq!(format_report_amount(dec("150000")), "150.000");
        assert_eq!(format_report_amount(dec("1234.50")), "1.234,5");
        assert_eq!(format_report_amount(dec("12")), "12");
    }

    #[test]
    fn test_report_amount_value_survives_reformatting() {
        for s in ["0", "7", "150.000", "1.234,56", "12.345.678,9", "100,01", "1.000.000"] {
            let value = parse_report_amount(s).unwrap();
            let reparsed = parse_report_amount(&format_report_amount(value)).unwrap();
            assert_eq!(value, reparsed, "{s}");
        }
    }

    #[test]
    fn test_format_whole_amount() {
        assert_eq!(format_whole_amount(dec("151035")), "151,035");
        assert_eq!(format_whole_amount(dec("1035.0")), "1,035");
        assert_eq!(format_whole_amount(dec("1932.4")), "1,932");
        assert_eq!(format_whole_amount(dec("1034.5")), "1,034");
        assert_eq!(format_whole_amount(dec("1035.5")), "1,036");
        assert_eq!(format_whole_amount(dec("999")), "999");
        assert_eq!(format_whole_amount(dec("1000000")), "1,000,000");
    }
}
