//! Scenario sweeps: rerun the calculator while varying one input.

use serde::Serialize;

use crate::calculator::CalculationInput;
use crate::error::Result;

/// Multipliers applied to audit spend in the investment sweep.
pub const INVESTMENT_MULTIPLIERS: [f64; 5] = [0.5, 0.75, 1.0, 1.25, 1.5];

/// Steps either side of the base risk, in tenths.
const RISK_STEPS: std::ops::RangeInclusive<i32> = -4..=4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskScenario {
    pub risk: f64,
    pub roi_percentage: f64,
    pub net_benefit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvestmentScenario {
    pub multiplier: f64,
    pub roi_percentage: f64,
    pub annual_compliance_cost: f64,
}

/// Risk levels from 60% to 140% of `base_risk` in 10% steps, clamped to 0-100.
pub fn risk_levels(base_risk: f64) -> Vec<f64> {
    RISK_STEPS
        .map(|i| (base_risk * (1.0 + f64::from(i) / 10.0)).clamp(0.0, 100.0))
        .collect()
}

/// Recomputes ROI at each of the nine [`risk_levels`] around `input.breach_risk`.
///
/// The base input is validated before clamping, so an out-of-range base risk
/// fails the same way [`CalculationInput::calculate`] does.
pub fn risk_sweep(input: &CalculationInput) -> Result<Vec<RiskScenario>> {
    let _span = tracing::debug_span!("risk_sweep", base_risk = input.breach_risk).entered();
    input.validate()?;

    risk_levels(input.breach_risk)
        .into_iter()
        .map(|risk| {
            let result = input.with_breach_risk(risk).calculate()?;
            Ok(RiskScenario {
                risk,
                roi_percentage: result.roi_percentage,
                net_benefit: result.net_benefit,
            })
        })
        .collect()
}

/// Recomputes ROI with audit spend scaled by each of [`INVESTMENT_MULTIPLIERS`].
pub fn investment_sweep(input: &CalculationInput) -> Result<Vec<InvestmentScenario>> {
    let _span = tracing::debug_span!("investment_sweep", audit_costs = input.audit_costs).entered();
    input.validate()?;

    INVESTMENT_MULTIPLIERS
        .into_iter()
        .map(|multiplier| {
            let result = input
                .with_audit_costs(input.audit_costs * multiplier)
                .calculate()?;
            Ok(InvestmentScenario {
                multiplier,
                roi_percentage: result.roi_percentage,
                annual_compliance_cost: result.annual_compliance_cost,
            })
        })
        .collect()
}

/// Both sweeps for one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioAnalysis {
    pub risk: Vec<RiskScenario>,
    pub investment: Vec<InvestmentScenario>,
}

impl ScenarioAnalysis {
    pub fn run(input: &CalculationInput) -> Result<Self> {
        Ok(Self {
            risk: risk_sweep(input)?,
            investment: investment_sweep(input)?,
        })
    }
}
