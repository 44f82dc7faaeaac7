//! Compliance ROI Library
//!
//! This library estimates the return on investment of a compliance program from a
//! company's revenue, audit spend, perceived breach risk and chosen framework, and
//! sweeps those estimates across alternative risk and investment levels.

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod scenario;

pub use calculator::{
    BreakdownItem, BreakdownKind, CalculationInput, CalculationResult, CostBenefitBreakdown,
    calculate,
};
pub use catalog::{Framework, Industry};
pub use config::Profile;
pub use error::RoiError;
pub use scenario::{
    InvestmentScenario, RiskScenario, ScenarioAnalysis, investment_sweep, risk_sweep,
};
