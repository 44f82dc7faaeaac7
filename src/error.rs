//! Error types for ROI calculation and profile handling.

use thiserror::Error;

/// Errors produced by the calculator, the catalog lookups and profile I/O.
#[derive(Debug, Error)]
pub enum RoiError {
    /// Annual compliance cost was zero, so ROI has no denominator.
    #[error("Annual compliance cost is zero; ROI percentage is undefined")]
    DivisionByZero,

    #[error("Invalid input '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Unknown compliance framework: {0}")]
    UnknownFramework(String),

    #[error("Unknown industry: {0}")]
    UnknownIndustry(String),

    #[error("Profile loading failed: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Profile serialization failed: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RoiError {
    /// Creates an invalid input error for the named field.
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        RoiError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RoiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_names_field() {
        let err = RoiError::invalid_input("breach_risk", "must be between 0 and 100, got 120");
        assert_eq!(
            err.to_string(),
            "Invalid input 'breach_risk': must be between 0 and 100, got 120"
        );
    }

    #[test]
    fn division_by_zero_message() {
        assert!(RoiError::DivisionByZero.to_string().contains("zero"));
    }
}
