//! ICA withholding rule.
//!
//! The rate is chosen by profession: the exempt profession pays the lower
//! per-mille rate. Under [`FeePolicy::Flat`] every total is withheld; under
//! [`FeePolicy::Threshold`] only totals strictly above the threshold are.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FeeError;
use crate::models::config::{FeeConfig, FeePolicy};

/// Outcome of applying the rule to one total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withholding {
    /// Per-mille rate, zero when not applied.
    pub rate: Decimal,
    /// Withheld amount (unrounded).
    pub amount: Decimal,
    /// Total plus withheld amount.
    pub subtotal: Decimal,
    /// Whether withholding applied.
    pub applies: bool,
}

impl Withholding {
    fn none(total: Decimal) -> Self {
        Self {
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
            subtotal: total,
            applies: false,
        }
    }
}

/// Withholding calculator for a fixed configuration.
#[derive(Debug, Clone)]
pub struct FeeRule {
    config: FeeConfig,
}

impl FeeRule {
    /// Create a rule from configuration.
    pub fn new(config: FeeConfig) -> Self {
        Self { config }
    }

    /// Override the applicability policy.
    pub fn with_policy(mut self, policy: FeePolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Per-mille rate for the given profession classification.
    pub fn rate_for(&self, is_exempt_profession: bool) -> Decimal {
        if is_exempt_profession {
            self.config.exempt_rate_per_mille
        } else {
            self.config.standard_rate_per_mille
        }
    }

    /// Compute the withholding for a net total.
    pub fn compute(&self, total: Decimal, is_exempt_profession: bool) -> Result<Withholding, FeeError> {
        if total < Decimal::ZERO {
            return Err(FeeError::InvalidAmount(total));
        }

        let applies = match self.config.policy {
            FeePolicy::Flat => true,
            FeePolicy::Threshold => total > self.config.threshold_amount,
        };
        if !applies {
            return Ok(Withholding::none(total));
        }

        let rate = self.rate_for(is_exempt_profession);
        let (amount, subtotal) = total
            .checked_mul(rate)
            .and_then(|v| v.checked_div(Decimal::ONE_THOUSAND))
            .and_then(|amount| Some((amount, total.checked_add(amount)?)))
            .ok_or(FeeError::InvalidAmount(total))?;

        Ok(Withholding {
            rate,
            amount,
            subtotal,
            applies: true,
        })
    }
}

impl Default for FeeRule {
    fn default() -> Self {
        Self::new(FeeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn threshold_rule() -> FeeRule {
        FeeRule::default().with_policy(FeePolicy::Threshold)
    }

    #[test]
    fn test_flat_exempt_profession() {
        let result = FeeRule::default().compute(dec(150_000), true).unwrap();
        assert_eq!(result.rate, Decimal::new(69, 1));
        assert_eq!(result.amount, dec(1035));
        assert_eq!(result.subtotal, dec(151_035));
        assert!(result.applies);
    }

    #[test]
    fn test_flat_standard_rate() {
        let result = FeeRule::default().compute(dec(200_000), false).unwrap();
        assert_eq!(result.rate, Decimal::new(966, 2));
        assert_eq!(result.amount, dec(1932));
        assert_eq!(result.subtotal, dec(201_932));
    }

    #[test]
    fn test_flat_applies_to_small_amounts() {
        let rule = FeeRule::default();
        for total in [dec(0), dec(1), Decimal::new(12_345, 2), dec(99_999)] {
            let result = rule.compute(total, false).unwrap();
            assert!(result.applies);
            assert_eq!(
                result.subtotal,
                total + total * Decimal::new(966, 2) / Decimal::ONE_THOUSAND
            );
        }
    }

    #[test]
    fn test_threshold_boundary_not_applied() {
        let result = threshold_rule().compute(dec(100_000), true).unwrap();
        assert!(!result.applies);
        assert_eq!(result.rate, Decimal::ZERO);
        assert_eq!(result.amount, Decimal::ZERO);
        assert_eq!(result.subtotal, dec(100_000));
    }

    #[test]
    fn test_threshold_above_boundary_applied() {
        let rule = threshold_rule();

        let exempt = rule.compute(dec(100_001), true).unwrap();
        assert!(exempt.applies);
        assert_eq!(exempt.rate, Decimal::new(69, 1));
        assert_eq!(exempt.amount, dec(100_001) * Decimal::new(69, 1) / dec(1000));

        let standard = rule.compute(dec(100_001), false).unwrap();
        assert_eq!(standard.rate, Decimal::new(966, 2));
        assert_eq!(standard.subtotal, dec(100_001) + standard.amount);
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let err = FeeRule::default().compute(Decimal::MAX, true).unwrap_err();
        assert!(matches!(err, FeeError::InvalidAmount(v) if v == Decimal::MAX));

        let below_threshold = threshold_rule().compute(dec(50_000), true).unwrap();
        assert!(!below_threshold.applies);
    }

    #[test]
    fn test_negative_total_rejected() {
        let err = FeeRule::default().compute(dec(-5), false).unwrap_err();
        assert!(matches!(err, FeeError::InvalidAmount(v) if v == dec(-5)));
    }
}
