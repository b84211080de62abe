use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// How grant support was applied to the initial investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantType {
    None,
    Percent,
    Amount,
}

/// Which productivity figure drove the annual profit uplift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductivityMode {
    Direct,
    Units,
}

/// Upfront investment after normalisation and grant support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentSummary {
    /// Sum of all upfront cost fields, each clamped to >= 0
    pub initial_investment: Money,
    /// Initial investment minus the applied grant, floored at 0
    pub effective_investment: Money,
    pub grant_type: GrantType,
    /// Grant actually applied, capped at the initial investment
    pub grant_applied_amount: Money,
}

/// Annual benefit and cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub labour_savings: Money,
    pub productivity_mode: ProductivityMode,
    /// Only populated in units mode
    pub extra_units_per_year: Option<Decimal>,
    pub productivity_profit: Money,
    pub other_savings: Money,
    pub total_benefits: Money,
    pub operating_costs: Money,
    pub net_annual_benefit: Money,
}

/// Simple payback on the effective investment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaybackSummary {
    pub is_achievable: bool,
    /// Present iff net annual benefit is positive
    pub payback_years: Option<Decimal>,
    /// Payback in whole months, rounded
    pub payback_months: Option<Decimal>,
    /// First year the undiscounted cumulative cash flow is non-negative
    pub breakeven_year_from_cumulative: Option<u32>,
}

/// Totals over the evaluation horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonSummary {
    pub years: u32,
    pub total_net_benefits: Money,
    pub net_profit: Money,
    /// Absent when the effective investment is zero
    pub roi_percent: Option<Decimal>,
}

/// Net present value at the supplied discount rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpvSummary {
    /// The rate actually used; absent when none was usable
    pub discount_rate: Option<Rate>,
    pub value: Option<Money>,
}

/// One point on the cumulative cash flow curve. Year 0 is the outlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumulativeCashFlowPoint {
    pub year: u32,
    pub cumulative_cash_flow: Money,
    /// Tracked only when a usable discount rate was supplied
    pub discounted_cumulative_cash_flow: Option<Money>,
}

/// Complete result of one ROI calculation.
///
/// A fresh, independently owned tree; nothing in it borrows from the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiCalculationResult {
    pub option_name: Option<String>,
    pub investment: InvestmentSummary,
    pub annual: AnnualSummary,
    pub payback: PaybackSummary,
    pub horizon: HorizonSummary,
    pub npv: NpvSummary,
    pub cumulative_cash_flow: Vec<CumulativeCashFlowPoint>,
    /// Ordered advisory notes describing every normalisation applied
    pub notes: Vec<String>,
}
