//! Regex patterns for accounts receivable report extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Uppercase name line: first letter, then letters and horizontal spaces.
pub const NAME_LINE: &str = r"[A-ZÁÉÍÓÚÑ][A-ZÁÉÍÓÚÑ \t]+";

/// Identification label, with or without the accent.
pub const ID_LABEL: &str = r"Identificaci[oó]n:";

/// National id digits.
pub const ID_DIGITS: &str = r"\d{6,12}\b";

/// Report numeral: digits with `.` thousands and `,` decimal separators.
pub const NUMERAL: &str = r"[\d.,]+";

/// Label of the net total line.
pub const TOTAL_LABEL: &str = r"Total:";

lazy_static! {
    /// Start of a person block: name line followed by the identification line.
    pub static ref PERSON_HEADER: Regex = Regex::new(&format!(
        r"({NAME_LINE})[ \t]*\n\s*{ID_LABEL}\s*({ID_DIGITS})"
    )).unwrap();

    /// Runs of whitespace inside a name.
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Full person record pattern anchored at the start of a block.
///
/// Groups: `name`, `id`, `first` (legacy subtotal numeral), `total`.
pub fn record_pattern(anchor_phrase: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"^(?P<name>{NAME_LINE})[ \t]*\n\s*{ID_LABEL}\s*(?P<id>{ID_DIGITS})[\s\S]*?{anchor}[\s\S]*?(?P<first>{NUMERAL})\s*\n\s*{TOTAL_LABEL}\s*(?P<total>{NUMERAL})",
        anchor = regex::escape(anchor_phrase),
    ))
}

/// Pattern isolating one person's itemized section, from the name line up to
/// the anchor phrase.
pub fn person_section_pattern(
    name: &str,
    national_id: &str,
    anchor_phrase: &str,
) -> Result<Regex, regex::Error> {
    let name = name
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[ \t]+");

    Regex::new(&format!(
        r"{name}[ \t]*\n\s*{ID_LABEL}\s*{id}\b[\s\S]*?{anchor}",
        id = regex::escape(national_id),
        anchor = regex::escape(anchor_phrase),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_header() {
        let text = "Informe\nJUAN PÉREZ\nIdentificación: 123456789\n";
        let caps = PERSON_HEADER.captures(text).unwrap();
        assert_eq!(caps[1].trim(), "JUAN PÉREZ");
        assert_eq!(&caps[2], "123456789");
    }

    #[test]
    fn test_person_header_rejects_long_id() {
        let text = "JUAN PEREZ\nIdentificacion: 1234567890123\n";
        assert!(PERSON_HEADER.captures(text).is_none());
    }

    #[test]
    fn test_record_pattern() {
        let re = record_pattern("Total para Cuentas por Cobrar").unwrap();
        let text = "ANA GÓMEZ\nIdentificación: 52123456\nTurnos 3\nTotal para Cuentas por Cobrar\n80.000\nTotal: 80.000\n";
        let caps = re.captures(text).unwrap();
        assert_eq!(&caps["name"], "ANA GÓMEZ");
        assert_eq!(&caps["id"], "52123456");
        assert_eq!(&caps["first"], "80.000");
        assert_eq!(&caps["total"], "80.000");
    }

    #[test]
    fn test_person_section_pattern_escapes_input() {
        let re = person_section_pattern("JUAN (E) PEREZ", "123456", "Total (A+B)").unwrap();
        let text = "JUAN (E)  PEREZ\nIdentificación: 123456\nx\nTotal (A+B)";
        assert!(re.is_match(text));
    }
}
