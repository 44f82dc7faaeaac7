//! Company profile loading and saving.
//!
//! A profile is a small TOML file describing the company being assessed.
//! Values are layered: built-in defaults, then the profile file, then
//! environment variables prefixed with `COMPLIANCE_ROI_`
//! (e.g. `COMPLIANCE_ROI_ANNUAL_REVENUE=1000000`).

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::calculator::CalculationInput;
use crate::catalog::{Framework, Industry};
use crate::error::Result;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "COMPLIANCE_ROI";

/// Default profile file name used by the CLI.
pub const DEFAULT_PROFILE_PATH: &str = "compliance_profile.toml";

/// Company profile for an ROI assessment
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Profile {
    /// Company name shown on the executive report
    pub company_name: String,
    /// Annual revenue in USD
    pub annual_revenue: f64,
    /// Annual audit and compliance spend in USD
    pub audit_costs: f64,
    /// Industry, which supplies the default breach risk
    pub industry: Industry,
    /// Primary compliance framework
    pub framework: Framework,
    /// Perceived breach risk (%); the industry benchmark when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breach_risk: Option<f64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            company_name: "Acme Corporation".to_string(),
            annual_revenue: 5_000_000.0,
            audit_costs: 150_000.0,
            industry: Industry::default(),
            framework: Framework::default(),
            breach_risk: None,
        }
    }
}

impl Profile {
    /// Breach risk to use: the explicit value, or the industry benchmark.
    pub fn effective_breach_risk(&self) -> f64 {
        self.breach_risk
            .unwrap_or_else(|| self.industry.default_breach_risk())
    }

    pub fn to_input(&self) -> CalculationInput {
        CalculationInput::new(
            self.annual_revenue,
            self.audit_costs,
            self.effective_breach_risk(),
        )
        .with_framework(self.framework)
    }
}

/// Load a profile, layering the optional file and `COMPLIANCE_ROI_*` environment variables.
///
/// When `path` is given the file must exist.
pub fn load_profile(path: Option<&Path>) -> Result<Profile> {
    build_profile(path, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
}

fn build_profile(path: Option<&Path>, env: Environment) -> Result<Profile> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        crate::log_debug!("Reading profile from {}", path.display());
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    let profile: Profile = builder.add_source(env).build()?.try_deserialize()?;
    crate::log_debug!(
        "Loaded profile for {} ({}, {})",
        profile.company_name,
        profile.industry,
        profile.framework
    );
    Ok(profile)
}

/// Save a profile to a file
pub fn save_profile<P: AsRef<Path>>(profile: &Profile, path: P) -> Result<()> {
    let contents = toml::to_string_pretty(profile)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Create a default profile template
pub fn create_default_profile() -> Profile {
    Profile::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoiError;
    use config::Map;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let vars: Map<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(vars))
    }

    #[test]
    fn defaults_without_file_or_env() {
        let profile = build_profile(None, env_from(&[])).unwrap();
        assert_eq!(profile, Profile::default());
        assert_eq!(profile.effective_breach_risk(), 28.5);
    }

    #[test]
    fn saved_profile_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        let profile = Profile {
            company_name: "Globex".to_string(),
            annual_revenue: 12_000_000.0,
            audit_costs: 80_000.0,
            industry: Industry::Retail,
            framework: Framework::PciDss,
            breach_risk: Some(31.0),
        };

        save_profile(&profile, &path).unwrap();
        let loaded = build_profile(Some(&path), env_from(&[])).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn default_template_omits_breach_risk() {
        let contents = toml::to_string_pretty(&create_default_profile()).unwrap();
        assert!(contents.contains("framework = \"SOC 2\""));
        assert!(contents.contains("industry = \"Healthcare\""));
        assert!(!contents.contains("breach_risk"));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        std::fs::write(
            &path,
            "annual_revenue = 2000000.0\nindustry = \"Technology\"\n",
        )
        .unwrap();

        let profile = build_profile(
            Some(&path),
            env_from(&[
                ("COMPLIANCE_ROI_ANNUAL_REVENUE", "9000000"),
                ("COMPLIANCE_ROI_FRAMEWORK", "gdpr"),
            ]),
        )
        .unwrap();

        assert_eq!(profile.annual_revenue, 9_000_000.0);
        assert_eq!(profile.framework, Framework::Gdpr);
        assert_eq!(profile.industry, Industry::Technology);
        assert_eq!(profile.effective_breach_risk(), 19.2);
    }

    #[test]
    fn unknown_framework_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        std::fs::write(&path, "framework = \"FedRAMP\"\n").unwrap();

        let err = build_profile(Some(&path), env_from(&[])).unwrap_err();
        assert!(matches!(err, RoiError::Config(_)));
        assert!(err.to_string().contains("FedRAMP"), "{err}");
    }

    #[test]
    fn missing_named_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(build_profile(Some(&path), env_from(&[])).is_err());
    }

    #[test]
    fn profile_builds_calculation_input() {
        let profile = Profile {
            framework: Framework::Iso27001,
            breach_risk: Some(25.0),
            ..Profile::default()
        };
        let input = profile.to_input();
        assert_eq!(input.annual_revenue, 5_000_000.0);
        assert_eq!(input.audit_costs, 150_000.0);
        assert_eq!(input.breach_risk, 25.0);
        assert_eq!(input.framework_multiplier, 1.2);
    }
}
