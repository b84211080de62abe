use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate, Years};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------
//
// Every numeric field an operator can leave blank deserialises to zero (via
// `#[serde(default)]`) or to `None`; the engine degrades rather than rejects.

/// Upfront investment costs and any grant support.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentInput {
    /// Purchase price of the equipment itself. Clamped to >= 0 before use.
    pub equipment_cost: Money,
    /// One-off installation / site preparation cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation_cost: Option<Money>,
    /// Integration with existing systems (software, retrofitting)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_cost: Option<Money>,
    /// Operator training cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_cost: Option<Money>,
    /// Production lost while commissioning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downtime_cost: Option<Money>,
    /// Any other one-off upfront cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_upfront_costs: Option<Money>,
    /// Further itemised upfront costs, each clamped to >= 0
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_upfront_costs: Vec<Money>,
    /// Grant support as a fraction of the initial investment (0.25 = 25%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_percent: Option<Rate>,
    /// Flat grant amount. Wins over `grant_percent` when both are given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_amount: Option<Money>,
}

/// Labour displaced by the automation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabourInput {
    /// Full-time-equivalent positions no longer needed
    pub fte_reduced: Decimal,
    /// Fully loaded annual cost of one FTE (wages, payroll tax, benefits)
    pub fully_loaded_annual_cost_per_fte: Money,
}

/// Productivity uplift, either as a direct annual profit figure or derived
/// from a units-based triple.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductivityInput {
    /// Direct annual profit increase. Takes priority over the units triple.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_profit_increase: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_units_per_year: Option<Decimal>,
    /// Fractional gain (0.1 = 10% more units)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub productivity_gain_percent: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_per_unit: Option<Money>,
}

/// Recurring annual savings beyond labour and productivity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnualSavingsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrap_savings: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overtime_savings: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_warranty_savings: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_savings: Option<Money>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_savings: Vec<Money>,
}

/// Recurring annual costs of owning and running the automation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnualCostsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_cost: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_subscription: Option<Money>,
    /// Change in energy spend; may be negative when the automation saves energy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_delta: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_annual_costs: Option<Money>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_annual_costs: Vec<Money>,
}

/// Evaluation horizon and optional discounting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialInput {
    /// Evaluation horizon in years. Floored to an integer, minimum 1.
    pub time_horizon_years: Years,
    /// Discount rate for NPV (0.08 = 8%). Must be > -1 to be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<Rate>,
}

/// Complete input for one ROI calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiCalculationInput {
    /// Label used in comparison tables; empty/whitespace treated as absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_name: Option<String>,
    pub investment: InvestmentInput,
    pub labour: LabourInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub productivity: Option<ProductivityInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_savings: Option<AnnualSavingsInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_costs: Option<AnnualCostsInput>,
    pub financial: FinancialInput,
}
