//! Fixed lookup tables: compliance framework cost multipliers and
//! industry breach-risk benchmarks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RoiError;

/// Compliance framework, scaling the baseline compliance cost by its complexity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Framework {
    #[default]
    Soc2,
    Iso27001,
    Hipaa,
    Gdpr,
    PciDss,
}

impl Framework {
    /// All frameworks in display order.
    pub const ALL: [Framework; 5] = [
        Framework::Soc2,
        Framework::Iso27001,
        Framework::Hipaa,
        Framework::Gdpr,
        Framework::PciDss,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Framework::Soc2 => "SOC 2",
            Framework::Iso27001 => "ISO 27001",
            Framework::Hipaa => "HIPAA",
            Framework::Gdpr => "GDPR",
            Framework::PciDss => "PCI DSS",
        }
    }

    /// Cost multiplier applied to the 2%-of-revenue baseline.
    pub fn multiplier(&self) -> f64 {
        match self {
            Framework::Soc2 => 1.0,
            Framework::Iso27001 => 1.2,
            Framework::Hipaa => 1.3,
            Framework::Gdpr => 1.4,
            Framework::PciDss => 1.5,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Framework {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Framework::ALL
            .into_iter()
            .find(|framework| normalize(framework.label()) == key)
            .ok_or_else(|| RoiError::UnknownFramework(s.to_string()))
    }
}

impl TryFrom<String> for Framework {
    type Error = RoiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Framework> for String {
    fn from(value: Framework) -> Self {
        value.label().to_string()
    }
}

/// Industry, used to pre-populate the perceived breach risk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Industry {
    #[default]
    Healthcare,
    FinancialServices,
    Technology,
    Retail,
    Manufacturing,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Industry::Healthcare,
        Industry::FinancialServices,
        Industry::Technology,
        Industry::Retail,
        Industry::Manufacturing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Healthcare => "Healthcare",
            Industry::FinancialServices => "Financial Services",
            Industry::Technology => "Technology",
            Industry::Retail => "Retail",
            Industry::Manufacturing => "Manufacturing",
        }
    }

    /// Average breach risk for the industry, as a percentage.
    pub fn default_breach_risk(&self) -> f64 {
        match self {
            Industry::Healthcare => 28.5,
            Industry::FinancialServices => 23.7,
            Industry::Technology => 19.2,
            Industry::Retail => 25.1,
            Industry::Manufacturing => 18.6,
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Industry::ALL
            .into_iter()
            .find(|industry| normalize(industry.label()) == key)
            .ok_or_else(|| RoiError::UnknownIndustry(s.to_string()))
    }
}

impl TryFrom<String> for Industry {
    type Error = RoiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Industry> for String {
    fn from(value: Industry) -> Self {
        value.label().to_string()
    }
}

/// Lowercase and drop separators so "PCI DSS", "pci-dss" and "pcidss" compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_multipliers_match_table() {
        let table: Vec<(&str, f64)> = Framework::ALL
            .iter()
            .map(|f| (f.label(), f.multiplier()))
            .collect();
        assert_eq!(
            table,
            vec![
                ("SOC 2", 1.0),
                ("ISO 27001", 1.2),
                ("HIPAA", 1.3),
                ("GDPR", 1.4),
                ("PCI DSS", 1.5),
            ]
        );
    }

    #[test]
    fn framework_parses_labels_and_slugs() {
        assert_eq!("SOC 2".parse::<Framework>().unwrap(), Framework::Soc2);
        assert_eq!("soc2".parse::<Framework>().unwrap(), Framework::Soc2);
        assert_eq!("iso-27001".parse::<Framework>().unwrap(), Framework::Iso27001);
        assert_eq!("pci-dss".parse::<Framework>().unwrap(), Framework::PciDss);
        assert_eq!("PCIDSS".parse::<Framework>().unwrap(), Framework::PciDss);
    }

    #[test]
    fn unknown_framework_is_rejected() {
        let err = "FedRAMP".parse::<Framework>().unwrap_err();
        assert!(matches!(err, RoiError::UnknownFramework(name) if name == "FedRAMP"));
    }

    #[test]
    fn industry_presets_match_table() {
        assert_eq!(Industry::Healthcare.default_breach_risk(), 28.5);
        assert_eq!(Industry::FinancialServices.default_breach_risk(), 23.7);
        assert_eq!(Industry::Technology.default_breach_risk(), 19.2);
        assert_eq!(Industry::Retail.default_breach_risk(), 25.1);
        assert_eq!(Industry::Manufacturing.default_breach_risk(), 18.6);
    }

    #[test]
    fn industry_parses_case_insensitively() {
        assert_eq!(
            "financial services".parse::<Industry>().unwrap(),
            Industry::FinancialServices
        );
        assert_eq!(
            "financial-services".parse::<Industry>().unwrap(),
            Industry::FinancialServices
        );
        assert!("Mining".parse::<Industry>().is_err());
    }

    #[test]
    fn catalog_serializes_as_labels() {
        let json = serde_json::to_string(&Framework::Iso27001).unwrap();
        assert_eq!(json, "\"ISO 27001\"");
        let industry: Industry = serde_json::from_str("\"Retail\"").unwrap();
        assert_eq!(industry, Industry::Retail);
    }
}
