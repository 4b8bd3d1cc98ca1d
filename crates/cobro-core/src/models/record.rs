//! Billing record extracted for one person.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fees::Withholding;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref SEPARATOR_RUN: Regex = Regex::new(r"[-\s]+").unwrap();
}

/// One person's billing data for the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Uppercase full name, whitespace collapsed.
    pub name: String,

    /// National identification number (cédula), digits only.
    pub national_id: String,

    /// Net payable amount.
    pub total: Decimal,

    /// Whether the profession keyword appears in the person's block.
    pub is_exempt_profession: bool,

    /// ICA rate in per mille, zero when withholding does not apply.
    pub withholding_rate: Decimal,

    /// `total * withholding_rate / 1000`, unrounded.
    pub withholding_amount: Decimal,

    /// Total plus withholding.
    pub subtotal: Decimal,

    /// Whether the withholding rule applied to this record.
    pub applies_withholding: bool,

    /// First amount printed before the `Total:` line, kept for reference only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_subtotal: Option<Decimal>,
}

impl PersonRecord {
    /// Assemble a record from extracted fields and a computed withholding.
    pub fn new(
        name: impl Into<String>,
        national_id: impl Into<String>,
        total: Decimal,
        is_exempt_profession: bool,
        withholding: &Withholding,
    ) -> Self {
        Self {
            name: name.into(),
            national_id: national_id.into(),
            total,
            is_exempt_profession,
            withholding_rate: withholding.rate,
            withholding_amount: withholding.amount,
            subtotal: withholding.subtotal,
            applies_withholding: withholding.applies,
            reported_subtotal: None,
        }
    }

    /// Attach the legacy subtotal numeral.
    pub fn with_reported_subtotal(mut self, value: Option<Decimal>) -> Self {
        self.reported_subtotal = value;
        self
    }

    /// File name stem for this person's document, e.g. `JUAN_PÉREZ`.
    pub fn file_stem(&self) -> String {
        let cleaned = NON_WORD.replace_all(&self.name, "");
        let joined = SEPARATOR_RUN.replace_all(&cleaned, "_");
        let stem = joined.trim_matches(|c| c == '-' || c == '_');
        if stem.is_empty() {
            self.national_id.clone()
        } else {
            stem.to_string()
        }
    }

    /// Check the record invariants and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push("Missing name".to_string());
        }

        let id_len = self.national_id.len();
        if !(6..=12).contains(&id_len) || !self.national_id.chars().all(|c| c.is_ascii_digit()) {
            issues.push(format!("Invalid national id: {}", self.national_id));
        }

        if self.total < Decimal::ZERO {
            issues.push(format!("Negative total: {}", self.total));
        }

        if self.applies_withholding {
            if self.subtotal < self.total {
                issues.push(format!(
                    "Subtotal ({}) is below total ({})",
                    self.subtotal, self.total
                ));
            }
        } else {
            if self.subtotal != self.total {
                issues.push(format!(
                    "Subtotal ({}) differs from total ({}) without withholding",
                    self.subtotal, self.total
                ));
            }
            if !self.withholding_rate.is_zero() {
                issues.push("Rate set although withholding does not apply".to_string());
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn withholding(total: Decimal) -> Withholding {
        let rate = Decimal::new(966, 2);
        let amount = total * rate / Decimal::ONE_THOUSAND;
        Withholding {
            rate,
            amount,
            subtotal: total + amount,
            applies: true,
        }
    }

    #[test]
    fn test_file_stem() {
        let total = Decimal::new(50_000, 0);
        let record = PersonRecord::new("MARÍA  DEL-PILAR O'NEIL", "52123456", total, false, &withholding(total));
        assert_eq!(record.file_stem(), "MARÍA_DEL_PILAR_ONEIL");
    }

    #[test]
    fn test_file_stem_falls_back_to_id() {
        let total = Decimal::new(50_000, 0);
        let record = PersonRecord::new("---", "52123456", total, false, &withholding(total));
        assert_eq!(record.file_stem(), "52123456");
    }

    #[test]
    fn test_validate_ok() {
        let total = Decimal::new(150_000, 0);
        let record = PersonRecord::new("JUAN PEREZ", "123456789", total, false, &withholding(total));
        assert!(record.validate().is_empty());
    }

    #[test]
    fn test_validate_flags_bad_id() {
        let total = Decimal::new(150_000, 0);
        let record = PersonRecord::new("JUAN PEREZ", "12AB", total, false, &withholding(total));
        assert_eq!(record.validate().len(), 1);
    }
}
