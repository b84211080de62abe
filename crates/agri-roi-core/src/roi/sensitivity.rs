use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::roi::calculate::evaluate;
use crate::roi::input::{AnnualCostsInput, ProductivityInput, RoiCalculationInput};
use crate::roi::result::RoiCalculationResult;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};

/// Default perturbation applied to each sensitivity variable (10%).
pub const DEFAULT_DELTA_PERCENT: Decimal = dec!(0.1);

/// Condensed view of one calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySnapshot {
    pub net_annual_benefit: Money,
    pub payback_years: Option<Decimal>,
    pub roi_percent: Option<Decimal>,
    pub npv: Option<Money>,
}

/// Low / base / high snapshots for one perturbed variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityScenario {
    pub low: SensitivitySnapshot,
    pub base: SensitivitySnapshot,
    pub high: SensitivitySnapshot,
}

/// Output of a one-way sensitivity analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiSensitivityResult {
    /// The normalised (absolute) delta actually applied
    pub delta_percent: Decimal,
    pub base_case: SensitivitySnapshot,
    pub productivity_gain: SensitivityScenario,
    pub labour_cost_per_fte: SensitivityScenario,
    pub annual_operating_costs: SensitivityScenario,
}

impl From<&RoiCalculationResult> for SensitivitySnapshot {
    fn from(result: &RoiCalculationResult) -> Self {
        SensitivitySnapshot {
            net_annual_benefit: result.annual.net_annual_benefit,
            payback_years: result.payback.payback_years,
            roi_percent: result.horizon.roi_percent,
            npv: result.npv.value,
        }
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Perturb productivity gain, labour cost per FTE, and annual operating
/// costs by ±`delta_percent` (sign ignored), one variable at a time, and
/// report low/base/high snapshots of the key metrics.
///
/// Every scenario runs on an independent clone of the input; the caller's
/// input is never mutated.
pub fn calculate_sensitivity(
    input: &RoiCalculationInput,
    delta_percent: Decimal,
) -> ComputationOutput<RoiSensitivityResult> {
    let start = Instant::now();

    let delta = delta_percent.abs();
    let low_factor = Decimal::ONE - delta;
    let high_factor = Decimal::ONE + delta;

    let base_case = evaluate(input);
    let base = SensitivitySnapshot::from(&base_case);

    let output = RoiSensitivityResult {
        delta_percent: delta,
        base_case: base.clone(),
        productivity_gain: build_scenario(input, &base, low_factor, high_factor, scale_productivity),
        labour_cost_per_fte: build_scenario(input, &base, low_factor, high_factor, scale_labour_cost),
        annual_operating_costs: build_scenario(
            input,
            &base,
            low_factor,
            high_factor,
            scale_operating_costs,
        ),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "One-Way Sensitivity Analysis (low/base/high)",
        &serde_json::json!({ "delta_percent": delta.to_string() }),
        base_case.notes.clone(),
        elapsed,
        output,
    )
}

fn build_scenario<F>(
    input: &RoiCalculationInput,
    base: &SensitivitySnapshot,
    low_factor: Decimal,
    high_factor: Decimal,
    scale: F,
) -> SensitivityScenario
where
    F: Fn(&RoiCalculationInput, Decimal) -> RoiCalculationInput,
{
    SensitivityScenario {
        low: SensitivitySnapshot::from(&evaluate(&scale(input, low_factor))),
        base: base.clone(),
        high: SensitivitySnapshot::from(&evaluate(&scale(input, high_factor))),
    }
}

// ---------------------------------------------------------------------------
// Input scaling
// ---------------------------------------------------------------------------

/// Scales the direct profit figure when present, otherwise the units-mode
/// gain percent. An absent productivity block becomes a zero direct figure,
/// which scales to zero in both directions.
fn scale_productivity(input: &RoiCalculationInput, factor: Rate) -> RoiCalculationInput {
    let mut scaled = input.clone();
    let productivity = scaled.productivity.get_or_insert_with(|| ProductivityInput {
        annual_profit_increase: Some(Decimal::ZERO),
        ..Default::default()
    });

    match productivity.annual_profit_increase {
        Some(direct) => {
            productivity.annual_profit_increase = Some(direct * factor);
        }
        None => {
            let gain = productivity.productivity_gain_percent.unwrap_or(Decimal::ZERO);
            productivity.productivity_gain_percent = Some(gain * factor);
        }
    }

    scaled
}

fn scale_labour_cost(input: &RoiCalculationInput, factor: Rate) -> RoiCalculationInput {
    let mut scaled = input.clone();
    scaled.labour.fully_loaded_annual_cost_per_fte *= factor;
    scaled
}

/// Scales all four cost fields and every itemised entry uniformly; missing
/// fields are treated as zero before scaling.
fn scale_operating_costs(input: &RoiCalculationInput, factor: Rate) -> RoiCalculationInput {
    let mut scaled = input.clone();
    let costs = scaled.annual_costs.take().unwrap_or_default();

    scaled.annual_costs = Some(AnnualCostsInput {
        maintenance_cost: Some(costs.maintenance_cost.unwrap_or(Decimal::ZERO) * factor),
        software_subscription: Some(
            costs.software_subscription.unwrap_or(Decimal::ZERO) * factor,
        ),
        energy_delta: Some(costs.energy_delta.unwrap_or(Decimal::ZERO) * factor),
        other_annual_costs: Some(costs.other_annual_costs.unwrap_or(Decimal::ZERO) * factor),
        additional_annual_costs: costs
            .additional_annual_costs
            .iter()
            .map(|value| *value * factor)
            .collect(),
    });

    scaled
}
