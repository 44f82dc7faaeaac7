//! ROI calculation for a compliance program.
//!
//! The model compares the cost of running a compliance program (a share of
//! revenue, scaled by framework complexity) against the savings it produces
//! through audit efficiency and avoided breach costs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Framework;
use crate::error::{Result, RoiError};

/// Share of annual revenue spent on compliance before framework adjustment.
pub const BASELINE_COST_RATE: f64 = 0.02;

/// Fraction of breach risk removed by effective compliance controls.
pub const CONTROL_EFFECTIVENESS: f64 = 0.67;

/// Fraction of audit spend recovered through compliance automation.
pub const AUDIT_EFFICIENCY_GAIN: f64 = 0.6;

/// Cost of a breach as a share of annual revenue.
pub const BREACH_COST_RATE: f64 = 0.04;

/// Inputs to a single ROI calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Annual revenue in USD
    pub annual_revenue: f64,
    /// Current annual audit and compliance spend in USD
    pub audit_costs: f64,
    /// Perceived breach risk as a percentage (0-100)
    pub breach_risk: f64,
    /// Framework complexity multiplier
    pub framework_multiplier: f64,
}

impl CalculationInput {
    /// Creates an input with the baseline framework multiplier of 1.0.
    pub fn new(annual_revenue: f64, audit_costs: f64, breach_risk: f64) -> Self {
        Self {
            annual_revenue,
            audit_costs,
            breach_risk,
            framework_multiplier: 1.0,
        }
    }

    pub fn with_framework(self, framework: Framework) -> Self {
        self.with_multiplier(framework.multiplier())
    }

    pub fn with_multiplier(mut self, framework_multiplier: f64) -> Self {
        self.framework_multiplier = framework_multiplier;
        self
    }

    pub fn with_breach_risk(mut self, breach_risk: f64) -> Self {
        self.breach_risk = breach_risk;
        self
    }

    pub fn with_audit_costs(mut self, audit_costs: f64) -> Self {
        self.audit_costs = audit_costs;
        self
    }

    /// Rejects non-finite values, negative amounts and risk outside 0-100.
    ///
    /// Zero revenue and a zero multiplier pass; they are reported as
    /// [`RoiError::DivisionByZero`] by [`calculate`].
    pub fn validate(&self) -> Result<()> {
        non_negative("annual_revenue", self.annual_revenue)?;
        non_negative("audit_costs", self.audit_costs)?;
        non_negative("framework_multiplier", self.framework_multiplier)?;

        if !self.breach_risk.is_finite() || !(0.0..=100.0).contains(&self.breach_risk) {
            return Err(RoiError::invalid_input(
                "breach_risk",
                format!("must be between 0 and 100, got {}", self.breach_risk),
            ));
        }
        Ok(())
    }

    /// Annual cost of the compliance program.
    pub fn annual_compliance_cost(&self) -> f64 {
        self.annual_revenue * BASELINE_COST_RATE * self.framework_multiplier
    }

    pub fn calculate(&self) -> Result<CalculationResult> {
        calculate(
            self.annual_revenue,
            self.audit_costs,
            self.breach_risk,
            self.framework_multiplier,
        )
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RoiError::invalid_input(field, format!("must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(RoiError::invalid_input(field, format!("must not be negative, got {value}")));
    }
    Ok(())
}

/// Derived ROI metrics. Recomputed on every call; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub annual_compliance_cost: f64,
    pub estimated_annual_savings: f64,
    pub roi_percentage: f64,
    pub breach_risk_reduction_percentage: f64,
    pub net_benefit: f64,
}

impl CalculationResult {
    /// True when the program pays for itself (ROI of zero counts as positive).
    pub fn is_positive_roi(&self) -> bool {
        self.roi_percentage >= 0.0
    }
}

/// Computes ROI metrics for a compliance program.
///
/// `breach_risk` is a percentage (25.0 means 25%). The savings term multiplies
/// revenue by the scaled risk reduction without dividing by 100; the figures
/// are kept as the dashboard has always reported them.
///
/// # Errors
///
/// - [`RoiError::InvalidInput`] for negative or non-finite amounts, risk outside 0-100,
///   or inputs whose results overflow `f64`
/// - [`RoiError::DivisionByZero`] when the annual compliance cost is zero
pub fn calculate(
    annual_revenue: f64,
    audit_costs: f64,
    breach_risk: f64,
    framework_multiplier: f64,
) -> Result<CalculationResult> {
    let input = CalculationInput {
        annual_revenue,
        audit_costs,
        breach_risk,
        framework_multiplier,
    };
    input.validate()?;

    let annual_compliance_cost = input.annual_compliance_cost();
    if annual_compliance_cost == 0.0 {
        crate::log_debug!(
            "Compliance cost is zero (revenue={}, multiplier={})",
            annual_revenue,
            framework_multiplier
        );
        return Err(RoiError::DivisionByZero);
    }

    let risk_reduction = breach_risk * CONTROL_EFFECTIVENESS;
    let savings = audit_costs * AUDIT_EFFICIENCY_GAIN
        + annual_revenue * risk_reduction * BREACH_COST_RATE;
    let net_benefit = savings - annual_compliance_cost;
    let roi_percentage = net_benefit / annual_compliance_cost * 100.0;

    // Finite inputs can still overflow: huge revenue in savings, tiny revenue in ROI.
    if !(savings.is_finite() && net_benefit.is_finite() && roi_percentage.is_finite()) {
        return Err(RoiError::invalid_input(
            "annual_revenue",
            format!("{annual_revenue} puts the results outside the representable range"),
        ));
    }

    crate::log_debug!(
        "cost={:.2} savings={:.2} roi={:.2}%",
        annual_compliance_cost,
        savings,
        roi_percentage
    );

    Ok(CalculationResult {
        annual_compliance_cost,
        estimated_annual_savings: savings,
        roi_percentage,
        breach_risk_reduction_percentage: risk_reduction * 100.0,
        net_benefit,
    })
}

/// Whether a breakdown line adds to cost or to benefit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreakdownKind {
    Cost,
    Benefit,
}

impl BreakdownKind {
    pub fn label(&self) -> &'static str {
        match self {
            BreakdownKind::Cost => "Cost",
            BreakdownKind::Benefit => "Benefit",
        }
    }
}

impl fmt::Display for BreakdownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownItem {
    pub category: &'static str,
    pub amount: f64,
    pub kind: BreakdownKind,
}

/// Cost versus benefit split of a compliance program.
///
/// Breach cost avoidance here treats `breach_risk` as a fraction (divided by
/// 100), unlike the savings term of [`calculate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBenefitBreakdown {
    pub items: Vec<BreakdownItem>,
}

impl CostBenefitBreakdown {
    pub fn from_input(input: &CalculationInput) -> Self {
        let breach_avoidance = input.annual_revenue
            * (input.breach_risk / 100.0)
            * CONTROL_EFFECTIVENESS
            * BREACH_COST_RATE;

        Self {
            items: vec![
                BreakdownItem {
                    category: "Compliance Costs",
                    amount: input.annual_compliance_cost(),
                    kind: BreakdownKind::Cost,
                },
                BreakdownItem {
                    category: "Breach Cost Avoidance",
                    amount: breach_avoidance,
                    kind: BreakdownKind::Benefit,
                },
                BreakdownItem {
                    category: "Audit Efficiency Gains",
                    amount: input.audit_costs * AUDIT_EFFICIENCY_GAIN,
                    kind: BreakdownKind::Benefit,
                },
            ],
        }
    }

    pub fn total(&self, kind: BreakdownKind) -> f64 {
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| item.amount)
            .sum()
    }
}
