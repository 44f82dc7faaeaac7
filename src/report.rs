//! Presentation of ROI results: metric formatting, text tables and the
//! Markdown executive report.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::calculator::{CalculationInput, CalculationResult, CostBenefitBreakdown};
use crate::config::Profile;
use crate::error::Result;
use crate::scenario::ScenarioAnalysis;

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole-number amount with thousands separators, e.g. `3,340,000`.
pub fn format_amount(value: f64) -> String {
    let rounded = value.abs().round();
    let sign = if value < 0.0 && rounded > 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(&format!("{rounded:.0}")))
}

/// Dollar amount rounded to whole dollars, e.g. `$3,440,000` or `-$1,200`.
pub fn format_currency(value: f64) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(digits) => format!("-${digits}"),
        None => format!("${amount}"),
    }
}

/// Percentage with one decimal place, e.g. `3,340.0%`.
pub fn format_percent(value: f64) -> String {
    let formatted = format!("{:.1}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "0"));
    let sign = if value < 0.0 && formatted != "0.0" { "-" } else { "" };
    format!("{sign}{}.{fraction}%", group_thousands(whole))
}

/// Annotation shown beside the ROI figure.
pub fn net_benefit_label(net_benefit: f64) -> String {
    if net_benefit >= 0.0 {
        format!("{} USD net benefit", format_amount(net_benefit))
    } else {
        format!("-${} USD net cost", format_amount(net_benefit.abs()))
    }
}

/// The four headline metrics.
pub struct MetricsView<'a>(pub &'a CalculationResult);

impl fmt::Display for MetricsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "Financial Impact Analysis")?;
        writeln!(
            f,
            "  Annual Compliance Cost:    {}",
            format_currency(result.annual_compliance_cost)
        )?;
        writeln!(
            f,
            "  Estimated Annual Savings:  {}",
            format_currency(result.estimated_annual_savings)
        )?;
        writeln!(
            f,
            "  ROI Percentage:            {} ({})",
            format_percent(result.roi_percentage),
            net_benefit_label(result.net_benefit)
        )?;
        writeln!(
            f,
            "  Breach Risk Reduction:     {}",
            format_percent(result.breach_risk_reduction_percentage)
        )
    }
}

pub struct BreakdownView<'a>(pub &'a CostBenefitBreakdown);

impl fmt::Display for BreakdownView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cost-Benefit Breakdown")?;
        for item in &self.0.items {
            writeln!(
                f,
                "  {:<8} {:<24} {:>16}",
                item.kind.label(),
                item.category,
                format_currency(item.amount)
            )?;
        }
        Ok(())
    }
}

pub struct ScenarioView<'a>(pub &'a ScenarioAnalysis);

impl fmt::Display for ScenarioView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Varying Breach Risk")?;
        writeln!(f, "  {:>15} {:>14} {:>20}", "Breach Risk (%)", "ROI (%)", "Net Benefit (USD)")?;
        for row in &self.0.risk {
            writeln!(
                f,
                "  {:>15.1} {:>14} {:>20}",
                row.risk,
                format_percent(row.roi_percentage),
                format_currency(row.net_benefit)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Varying Compliance Investment")?;
        writeln!(f, "  {:>10} {:>14} {:>22}", "Multiplier", "ROI (%)", "Compliance Cost (USD)")?;
        for row in &self.0.investment {
            writeln!(
                f,
                "  {:>10.2} {:>14} {:>22}",
                row.multiplier,
                format_percent(row.roi_percentage),
                format_currency(row.annual_compliance_cost)
            )?;
        }
        Ok(())
    }
}

/// Everything computed for one profile, as emitted by `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub profile: Profile,
    pub input: CalculationInput,
    pub result: CalculationResult,
    pub breakdown: CostBenefitBreakdown,
}

impl Summary {
    pub fn build(profile: &Profile) -> Result<Self> {
        let input = profile.to_input();
        Ok(Self {
            profile: profile.clone(),
            input,
            result: input.calculate()?,
            breakdown: CostBenefitBreakdown::from_input(&input),
        })
    }
}

/// Executive summary for a company, rendered as Markdown.
#[derive(Debug, Clone)]
pub struct ExecutiveReport {
    pub summary: Summary,
    pub scenarios: ScenarioAnalysis,
    pub date: NaiveDate,
}

impl ExecutiveReport {
    pub fn build(profile: &Profile, date: NaiveDate) -> Result<Self> {
        let summary = Summary::build(profile)?;
        let scenarios = ScenarioAnalysis::run(&summary.input)?;
        Ok(Self {
            summary,
            scenarios,
            date,
        })
    }

    /// `Compliance_ROI_Report_{company}_{YYYYMMDD}.md`, with path separators replaced.
    pub fn file_name(&self) -> String {
        let company: String = self
            .summary
            .profile
            .company_name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!(
            "Compliance_ROI_Report_{}_{}.md",
            company,
            self.date.format("%Y%m%d")
        )
    }

    /// Write the report into `dir`, returning the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.to_string())?;
        crate::log_info!("Wrote executive report to {}", path.display());
        Ok(path)
    }
}

impl fmt::Display for ExecutiveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Summary {
            profile,
            input,
            result,
            breakdown,
        } = &self.summary;

        writeln!(f, "# Compliance ROI Report: {}", profile.company_name)?;
        writeln!(f)?;
        writeln!(f, "Report date: {}", self.date.format("%Y-%m-%d"))?;
        writeln!(f)?;
        writeln!(f, "## Company Profile")?;
        writeln!(f)?;
        writeln!(f, "- Annual revenue: {}", format_currency(input.annual_revenue))?;
        writeln!(f, "- Industry: {}", profile.industry)?;
        writeln!(
            f,
            "- Primary framework: {} (x{})",
            profile.framework,
            profile.framework.multiplier()
        )?;
        writeln!(f, "- Annual audit/compliance costs: {}", format_currency(input.audit_costs))?;
        writeln!(f, "- Perceived breach risk: {}", format_percent(input.breach_risk))?;
        writeln!(f)?;
        writeln!(f, "## Financial Impact")?;
        writeln!(f)?;
        writeln!(f, "| Metric | Value |")?;
        writeln!(f, "|---|---|")?;
        writeln!(
            f,
            "| Annual Compliance Cost | {} |",
            format_currency(result.annual_compliance_cost)
        )?;
        writeln!(
            f,
            "| Estimated Annual Savings | {} |",
            format_currency(result.estimated_annual_savings)
        )?;
        writeln!(f, "| ROI Percentage | {} |", format_percent(result.roi_percentage))?;
        writeln!(f, "| Net Benefit | {} |", net_benefit_label(result.net_benefit))?;
        writeln!(
            f,
            "| Breach Risk Reduction | {} |",
            format_percent(result.breach_risk_reduction_percentage)
        )?;
        writeln!(f)?;
        writeln!(f, "## Cost-Benefit Breakdown")?;
        writeln!(f)?;
        writeln!(f, "| Type | Category | Amount |")?;
        writeln!(f, "|---|---|---|")?;
        for item in &breakdown.items {
            writeln!(
                f,
                "| {} | {} | {} |",
                item.kind,
                item.category,
                format_currency(item.amount)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "## Scenario Analysis")?;
        writeln!(f)?;
        writeln!(f, "### Varying Breach Risk")?;
        writeln!(f)?;
        writeln!(f, "| Breach Risk (%) | ROI (%) | Net Benefit (USD) |")?;
        writeln!(f, "|---|---|---|")?;
        for row in &self.scenarios.risk {
            writeln!(
                f,
                "| {:.1} | {} | {} |",
                row.risk,
                format_percent(row.roi_percentage),
                format_currency(row.net_benefit)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "### Varying Compliance Investment")?;
        writeln!(f)?;
        writeln!(f, "| Investment Multiplier | ROI (%) | Compliance Cost (USD) |")?;
        writeln!(f, "|---|---|---|")?;
        for row in &self.scenarios.investment {
            writeln!(
                f,
                "| {} | {} | {} |",
                row.multiplier,
                format_percent(row.roi_percentage),
                format_currency(row.annual_compliance_cost)
            )?;
        }
        Ok(())
    }
}
