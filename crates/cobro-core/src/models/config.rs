//! Configuration structures for the cuenta de cobro pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CobroError;

/// Main configuration for the cobro pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CobroConfig {
    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// Withholding rule configuration.
    pub fees: FeeConfig,

    /// Document template configuration.
    pub document: DocumentConfig,
}

/// Record extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Keyword that marks the exempt profession inside a person block.
    pub profession_keyword: String,

    /// Literal phrase that closes the itemized section of a person block.
    pub anchor_phrase: String,

    /// Reports larger than this are rejected before matching.
    pub max_input_bytes: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            profession_keyword: "OPTOMETRA".to_string(),
            anchor_phrase: "Total para Cuentas por Cobrar".to_string(),
            max_input_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Which withholding applicability rule to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeePolicy {
    /// Withholding applies to every record.
    #[default]
    Flat,
    /// Withholding applies only above the threshold amount.
    Threshold,
}

impl std::str::FromStr for FeePolicy {
    type Err = CobroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(FeePolicy::Flat),
            "threshold" => Ok(FeePolicy::Threshold),
            other => Err(CobroError::Config(format!("unknown fee policy: {other}"))),
        }
    }
}

/// ICA withholding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Applicability rule.
    pub policy: FeePolicy,

    /// Totals must exceed this for the threshold policy to apply.
    pub threshold_amount: Decimal,

    /// Rate (per mille) for the exempt profession.
    pub exempt_rate_per_mille: Decimal,

    /// Rate (per mille) for everyone else.
    pub standard_rate_per_mille: Decimal,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            policy: FeePolicy::Flat,
            threshold_amount: Decimal::new(100_000, 0),
            exempt_rate_per_mille: Decimal::new(69, 1),
            standard_rate_per_mille: Decimal::new(966, 2),
        }
    }
}

/// Fixed text printed on every cuenta de cobro.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// City printed before the date.
    pub city: String,

    /// Company that owes the amount.
    pub issuer_name: String,

    /// Company tax number.
    pub issuer_nit: String,

    /// Billing concept.
    pub concept: String,

    /// Currency suffix after the amount in words.
    pub currency_words: String,

    /// Legal notice printed above the fact table.
    pub legal_notice: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            city: "BOGOTÁ".to_string(),
            issuer_name: "GRUPO ÓPTICO ANDES S.A.S.".to_string(),
            issuer_nit: "901.308.210".to_string(),
            concept: "TURNOS Y METAS".to_string(),
            currency_words: "PESOS M.L.".to_string(),
            legal_notice: "De acuerdo a ley 1819 de 2016 informo que no tengo trabajadores a mi cargo y solicito la aplicación del art. 383 et.".to_string(),
        }
    }
}

impl CobroConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check values that serde cannot reject on its own.
    pub fn validate(&self) -> crate::Result<()> {
        if self.extraction.profession_keyword.trim().is_empty() {
            return Err(CobroError::Config("profession_keyword is empty".to_string()));
        }
        if self.extraction.anchor_phrase.trim().is_empty() {
            return Err(CobroError::Config("anchor_phrase is empty".to_string()));
        }

        let fees = &self.fees;
        for (name, value) in [
            ("threshold_amount", fees.threshold_amount),
            ("exempt_rate_per_mille", fees.exempt_rate_per_mille),
            ("standard_rate_per_mille", fees.standard_rate_per_mille),
        ] {
            if value < Decimal::ZERO {
                return Err(CobroError::Config(format!("{name} must not be negative")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = CobroConfig::default();
        assert_eq!(config.fees.policy, FeePolicy::Flat);
        assert_eq!(config.fees.threshold_amount, Decimal::new(100_000, 0));
        assert_eq!(config.fees.exempt_rate_per_mille.to_string(), "6.9");
        assert_eq!(config.fees.standard_rate_per_mille.to_string(), "9.66");
        assert_eq!(config.extraction.profession_keyword, "OPTOMETRA");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CobroConfig =
            serde_json::from_str(r#"{"fees": {"policy": "threshold"}}"#).unwrap();
        assert_eq!(config.fees.policy, FeePolicy::Threshold);
        assert_eq!(config.fees.standard_rate_per_mille, Decimal::new(966, 2));
        assert_eq!(config.document.city, "BOGOTÁ");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("flat".parse::<FeePolicy>().unwrap(), FeePolicy::Flat);
        assert_eq!(" Threshold ".parse::<FeePolicy>().unwrap(), FeePolicy::Threshold);
        assert!("tiered".parse::<FeePolicy>().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let mut config = CobroConfig::default();
        config.fees.standard_rate_per_mille = Decimal::new(-1, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CobroConfig::default();
        config.extraction.profession_keyword = "ODONTOLOGO".to_string();
        config.save(&path).unwrap();

        let loaded = CobroConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.profession_keyword, "ODONTOLOGO");
        assert_eq!(loaded.fees.exempt_rate_per_mille, Decimal::new(69, 1));
    }
}
