//! Spanish amount-in-words conversion for values below one million.

use crate::error::NumeralError;

/// Returned by [`to_words`] for values of one million or more.
pub const TOO_LARGE: &str = "NÚMERO DEMASIADO GRANDE";

const LIMIT: u64 = 1_000_000;

const UNITS: [&str; 10] = [
    "", "UNO", "DOS", "TRES", "CUATRO", "CINCO", "SEIS", "SIETE", "OCHO", "NUEVE",
];

const TENS: [&str; 10] = [
    "", "DIEZ", "VEINTE", "TREINTA", "CUARENTA", "CINCUENTA", "SESENTA", "SETENTA", "OCHENTA",
    "NOVENTA",
];

const TEENS: [&str; 10] = [
    "DIEZ", "ONCE", "DOCE", "TRECE", "CATORCE", "QUINCE", "DIECISÉIS", "DIECISIETE", "DIECIOCHO",
    "DIECINUEVE",
];

/// Convert `n` to uppercase Spanish words, e.g. `1035` → `MIL TREINTA Y CINCO`.
///
/// Values of one million or more yield [`TOO_LARGE`].
pub fn to_words(n: u64) -> String {
    to_words_checked(n).unwrap_or_else(|_| TOO_LARGE.to_string())
}

fn to_words_checked(n: u64) -> Result<String, NumeralError> {
    if n >= LIMIT {
        return Err(NumeralError::OutOfRange(n));
    }
    if n == 0 {
        return Ok("CERO".to_string());
    }
    Ok(below_million(n))
}

// 1..=999_999
fn below_million(n: u64) -> String {
    if n < 1000 {
        return below_thousand(n);
    }

    let thousands = n / 1000;
    let rest = n % 1000;
    let head = if thousands == 1 {
        "MIL".to_string()
    } else {
        format!("{} MIL", below_thousand(thousands))
    };

    if rest == 0 {
        head
    } else {
        format!("{} {}", head, below_thousand(rest))
    }
}

// 1..=999
fn below_thousand(n: u64) -> String {
    if n < 100 {
        return below_hundred(n);
    }
    if n == 100 {
        return "CIEN".to_string();
    }

    let hundreds = (n / 100) as usize;
    let rest = n % 100;
    let head = match hundreds {
        1 => "CIENTO".to_string(),
        5 => "QUINIENTOS".to_string(),
        7 => "SETECIENTOS".to_string(),
        9 => "NOVECIENTOS".to_string(),
        h => format!("{}CIENTOS", UNITS[h]),
    };

    if rest == 0 {
        head
    } else {
        format!("{} {}", head, below_hundred(rest))
    }
}

// 1..=99
fn below_hundred(n: u64) -> String {
    let n = n as usize;
    match n {
        0..=9 => UNITS[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        _ if n % 10 == 0 => TENS[n / 10].to_string(),
        _ => format!("{} Y {}", TENS[n / 10], UNITS[n % 10]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_small_numbers() {
        assert_eq!(to_words(0), "CERO");
        assert_eq!(to_words(1), "UNO");
        assert_eq!(to_words(9), "NUEVE");
        assert_eq!(to_words(10), "DIEZ");
        assert_eq!(to_words(16), "DIECISÉIS");
        assert_eq!(to_words(20), "VEINTE");
        assert_eq!(to_words(21), "VEINTE Y UNO");
        assert_eq!(to_words(99), "NOVENTA Y NUEVE");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(to_words(100), "CIEN");
        assert_eq!(to_words(101), "CIENTO UNO");
        assert_eq!(to_words(115), "CIENTO QUINCE");
        assert_eq!(to_words(200), "DOSCIENTOS");
        assert_eq!(to_words(345), "TRESCIENTOS CUARENTA Y CINCO");
        assert_eq!(to_words(500), "QUINIENTOS");
        assert_eq!(to_words(600), "SEISCIENTOS");
        assert_eq!(to_words(701), "SETECIENTOS UNO");
        assert_eq!(to_words(999), "NOVECIENTOS NOVENTA Y NUEVE");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(to_words(1000), "MIL");
        assert_eq!(to_words(1035), "MIL TREINTA Y CINCO");
        assert_eq!(to_words(2000), "DOS MIL");
        assert_eq!(to_words(21_000), "VEINTE Y UNO MIL");
        assert_eq!(to_words(100_000), "CIEN MIL");
        assert_eq!(to_words(150_000), "CIENTO CINCUENTA MIL");
        assert_eq!(to_words(151_035), "CIENTO CINCUENTA Y UNO MIL TREINTA Y CINCO");
        assert_eq!(
            to_words(999_999),
            "NOVECIENTOS NOVENTA Y NUEVE MIL NOVECIENTOS NOVENTA Y NUEVE"
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(to_words(1_000_000), TOO_LARGE);
        assert_eq!(to_words(u64::MAX), TOO_LARGE);
        assert!(matches!(
            to_words_checked(1_000_000),
            Err(NumeralError::OutOfRange(1_000_000))
        ));
    }

    #[test]
    fn test_no_double_spaces() {
        for n in (0..LIMIT).step_by(997) {
            let words = to_words(n);
            assert!(!words.contains("  "), "{n}: {words:?}");
            assert_eq!(words.trim(), words);
        }
    }
}
