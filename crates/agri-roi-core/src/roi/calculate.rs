use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::roi::input::{ProductivityInput, RoiCalculationInput};
use crate::roi::result::{
    AnnualSummary, CumulativeCashFlowPoint, GrantType, HorizonSummary, InvestmentSummary,
    NpvSummary, PaybackSummary, ProductivityMode, RoiCalculationResult,
};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};

struct GrantComputation {
    grant_type: GrantType,
    grant_applied_amount: Money,
    effective_investment: Money,
}

struct ProductivityComputation {
    mode: ProductivityMode,
    extra_units_per_year: Option<Decimal>,
    annual_profit: Money,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Evaluate the financial viability of one automation investment.
///
/// Total function: invalid or missing numeric input degrades to zero (or a
/// safe default) and every normalisation is recorded as an advisory note on
/// the result. Computes effective investment after grants, annual net
/// benefit, simple payback, horizon ROI, NPV, and the year-by-year
/// cumulative cash flow curve.
pub fn calculate_roi(input: &RoiCalculationInput) -> ComputationOutput<RoiCalculationResult> {
    let start = Instant::now();

    let result = evaluate(input);
    let warnings = result.notes.clone();

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Automation Investment ROI (Simple Payback / ROI / NPV)",
        &serde_json::json!({
            "option_name": result.option_name,
            "time_horizon_years": result.horizon.years,
            "discount_rate": result.npv.discount_rate.map(|r| r.to_string()),
        }),
        warnings,
        elapsed,
        result,
    )
}

/// Bare evaluation without the output envelope. Shared by the comparison
/// and sensitivity operations, which run it many times per call.
pub(crate) fn evaluate(input: &RoiCalculationInput) -> RoiCalculationResult {
    let mut notes: Vec<String> = Vec::new();

    let option_name = normalize_option_name(input.option_name.as_deref());
    let years = normalize_time_horizon(input.financial.time_horizon_years, &mut notes);

    let inv = &input.investment;
    let initial_investment = clamped(inv.equipment_cost)
        + clamped_or_zero(inv.installation_cost)
        + clamped_or_zero(inv.integration_cost)
        + clamped_or_zero(inv.training_cost)
        + clamped_or_zero(inv.downtime_cost)
        + clamped_or_zero(inv.other_upfront_costs)
        + sum_clamped(&inv.additional_upfront_costs);

    let grant = compute_grant(initial_investment, inv.grant_percent, inv.grant_amount, &mut notes);

    let labour_savings =
        input.labour.fte_reduced * input.labour.fully_loaded_annual_cost_per_fte;

    let productivity = compute_productivity(input.productivity.as_ref());

    let other_savings = match &input.annual_savings {
        Some(savings) => {
            value_or_zero(savings.scrap_savings)
                + value_or_zero(savings.overtime_savings)
                + value_or_zero(savings.quality_warranty_savings)
                + value_or_zero(savings.other_savings)
                + sum(&savings.additional_savings)
        }
        None => Decimal::ZERO,
    };

    let operating_costs = match &input.annual_costs {
        Some(costs) => {
            value_or_zero(costs.maintenance_cost)
                + value_or_zero(costs.software_subscription)
                + value_or_zero(costs.energy_delta)
                + value_or_zero(costs.other_annual_costs)
                + sum(&costs.additional_annual_costs)
        }
        None => Decimal::ZERO,
    };

    let total_benefits = labour_savings + productivity.annual_profit + other_savings;
    let net_annual_benefit = total_benefits - operating_costs;

    let (payback_years, payback_months) = if net_annual_benefit > Decimal::ZERO {
        let to_payback = grant.effective_investment / net_annual_benefit;
        let months = (to_payback * dec!(12))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        (Some(to_payback), Some(months))
    } else {
        notes.push(
            "Payback is not achievable because net annual benefit is zero or negative."
                .to_string(),
        );
        (None, None)
    };
    let is_achievable = payback_years.is_some();

    let total_net_benefits = net_annual_benefit * Decimal::from(years);
    let net_profit = total_net_benefits - grant.effective_investment;

    let roi_percent = if grant.effective_investment.is_zero() {
        notes.push("ROI is undefined because effective_investment is zero.".to_string());
        None
    } else {
        Some(net_profit / grant.effective_investment * dec!(100))
    };

    let discount_rate = normalize_discount_rate(input.financial.discount_rate, &mut notes);
    let npv_value = discount_rate
        .map(|rate| compute_npv(grant.effective_investment, net_annual_benefit, years, rate));

    let cumulative_cash_flow = build_cumulative_cash_flow(
        grant.effective_investment,
        net_annual_benefit,
        years,
        discount_rate,
    );
    let breakeven_year_from_cumulative = find_breakeven_year(&cumulative_cash_flow);

    RoiCalculationResult {
        option_name,
        investment: InvestmentSummary {
            initial_investment,
            effective_investment: grant.effective_investment,
            grant_type: grant.grant_type,
            grant_applied_amount: grant.grant_applied_amount,
        },
        annual: AnnualSummary {
            labour_savings,
            productivity_mode: productivity.mode,
            extra_units_per_year: productivity.extra_units_per_year,
            productivity_profit: productivity.annual_profit,
            other_savings,
            total_benefits,
            operating_costs,
            net_annual_benefit,
        },
        payback: PaybackSummary {
            is_achievable,
            payback_years,
            payback_months,
            breakeven_year_from_cumulative,
        },
        horizon: HorizonSummary {
            years,
            total_net_benefits,
            net_profit,
            roi_percent,
        },
        npv: NpvSummary {
            discount_rate,
            value: npv_value,
        },
        cumulative_cash_flow,
        notes,
    }
}

// ---------------------------------------------------------------------------
// Normalisation helpers
// ---------------------------------------------------------------------------

fn normalize_option_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

fn normalize_time_horizon(raw: Years, notes: &mut Vec<String>) -> u32 {
    match raw.floor().to_u32() {
        Some(years) if years >= 1 => years,
        _ => {
            notes.push("time_horizon_years must be at least 1. Defaulted to 1 year.".to_string());
            1
        }
    }
}

fn compute_grant(
    initial_investment: Money,
    grant_percent: Option<Rate>,
    grant_amount: Option<Money>,
    notes: &mut Vec<String>,
) -> GrantComputation {
    if grant_percent.is_some() && grant_amount.is_some() {
        notes.push(
            "Both grant_percent and grant_amount were provided. grant_amount was applied."
                .to_string(),
        );
    }

    if let Some(amount) = grant_amount {
        let applied = amount.max(Decimal::ZERO).min(initial_investment);
        return GrantComputation {
            grant_type: GrantType::Amount,
            grant_applied_amount: applied,
            effective_investment: (initial_investment - applied).max(Decimal::ZERO),
        };
    }

    if let Some(raw_percent) = grant_percent {
        let percent = raw_percent.clamp(Decimal::ZERO, Decimal::ONE);
        if percent != raw_percent {
            notes.push("grant_percent was clamped to the 0-1 range.".to_string());
        }
        let applied = initial_investment * percent;
        return GrantComputation {
            grant_type: GrantType::Percent,
            grant_applied_amount: applied,
            effective_investment: (initial_investment - applied).max(Decimal::ZERO),
        };
    }

    GrantComputation {
        grant_type: GrantType::None,
        grant_applied_amount: Decimal::ZERO,
        effective_investment: initial_investment,
    }
}

fn compute_productivity(productivity: Option<&ProductivityInput>) -> ProductivityComputation {
    let productivity = match productivity {
        Some(productivity) => productivity,
        None => {
            return ProductivityComputation {
                mode: ProductivityMode::Direct,
                extra_units_per_year: None,
                annual_profit: Decimal::ZERO,
            }
        }
    };

    if let Some(direct) = productivity.annual_profit_increase {
        return ProductivityComputation {
            mode: ProductivityMode::Direct,
            extra_units_per_year: None,
            annual_profit: direct,
        };
    }

    let extra_units = value_or_zero(productivity.current_units_per_year)
        * value_or_zero(productivity.productivity_gain_percent);

    ProductivityComputation {
        mode: ProductivityMode::Units,
        extra_units_per_year: Some(extra_units),
        annual_profit: extra_units * value_or_zero(productivity.profit_per_unit),
    }
}

fn normalize_discount_rate(raw: Option<Rate>, notes: &mut Vec<String>) -> Option<Rate> {
    match raw {
        Some(rate) if rate <= dec!(-1) => {
            notes.push(
                "discount_rate must be greater than -100%. NPV was not calculated.".to_string(),
            );
            None
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Derived series
// ---------------------------------------------------------------------------

fn compute_npv(
    effective_investment: Money,
    net_annual_benefit: Money,
    years: u32,
    rate: Rate,
) -> Money {
    let mut npv = -effective_investment;
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;

    for _ in 1..=years {
        discount *= one_plus_r;
        // At rates near -100% the factor underflows Decimal precision;
        // the remaining terms cannot be represented.
        if discount.is_zero() {
            break;
        }
        npv += net_annual_benefit / discount;
    }

    npv
}

fn build_cumulative_cash_flow(
    effective_investment: Money,
    net_annual_benefit: Money,
    years: u32,
    discount_rate: Option<Rate>,
) -> Vec<CumulativeCashFlowPoint> {
    let mut points = Vec::with_capacity(years as usize + 1);
    let mut cumulative = -effective_investment;
    let mut discounted_cumulative = -effective_investment;

    points.push(CumulativeCashFlowPoint {
        year: 0,
        cumulative_cash_flow: cumulative,
        discounted_cumulative_cash_flow: discount_rate.map(|_| discounted_cumulative),
    });

    let one_plus_r = discount_rate.map(|rate| Decimal::ONE + rate);
    let mut discount = Decimal::ONE;

    for year in 1..=years {
        cumulative += net_annual_benefit;

        if let Some(one_plus_r) = one_plus_r {
            discount *= one_plus_r;
            if !discount.is_zero() {
                discounted_cumulative += net_annual_benefit / discount;
            }
        }

        points.push(CumulativeCashFlowPoint {
            year,
            cumulative_cash_flow: cumulative,
            discounted_cumulative_cash_flow: discount_rate.map(|_| discounted_cumulative),
        });
    }

    points
}

fn find_breakeven_year(points: &[CumulativeCashFlowPoint]) -> Option<u32> {
    points
        .iter()
        .find(|point| point.year > 0 && point.cumulative_cash_flow >= Decimal::ZERO)
        .map(|point| point.year)
}

// ---------------------------------------------------------------------------
// Numeric helpers
// ---------------------------------------------------------------------------

fn clamped(value: Money) -> Money {
    value.max(Decimal::ZERO)
}

fn clamped_or_zero(value: Option<Money>) -> Money {
    clamped(value.unwrap_or(Decimal::ZERO))
}

fn value_or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

fn sum(values: &[Money]) -> Money {
    values.iter().copied().sum()
}

fn sum_clamped(values: &[Money]) -> Money {
    values.iter().map(|value| clamped(*value)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::input::{
        AnnualCostsInput, AnnualSavingsInput, FinancialInput, InvestmentInput, LabourInput,
    };
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    /// Two FTEs at 45k, 100k of equipment, 5k annual running cost, 5 years.
    fn mvp_input() -> RoiCalculationInput {
        RoiCalculationInput {
            investment: InvestmentInput {
                equipment_cost: dec!(100000),
                ..Default::default()
            },
            labour: LabourInput {
                fte_reduced: dec!(2),
                fully_loaded_annual_cost_per_fte: dec!(45000),
            },
            annual_costs: Some(AnnualCostsInput {
                other_annual_costs: Some(dec!(5000)),
                ..Default::default()
            }),
            financial: FinancialInput {
                time_horizon_years: dec!(5),
                discount_rate: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_mvp_scenario() {
        let result = evaluate(&mvp_input());

        assert_eq!(result.annual.labour_savings, dec!(90000));
        assert_eq!(result.annual.net_annual_benefit, dec!(85000));
        assert_eq!(result.investment.effective_investment, dec!(100000));

        let payback = result.payback.payback_years.unwrap();
        assert!((payback - dec!(1.1765)).abs() < dec!(0.0001));
        assert_eq!(result.payback.payback_months, Some(dec!(14)));
        assert!(result.payback.is_achievable);

        assert_eq!(result.horizon.total_net_benefits, dec!(425000));
        assert_eq!(result.horizon.net_profit, dec!(325000));
        assert_eq!(result.horizon.roi_percent, Some(dec!(325)));
    }

    #[test]
    fn test_no_grant_leaves_investment_untouched() {
        let result = evaluate(&mvp_input());

        assert_eq!(result.investment.initial_investment, dec!(100000));
        assert_eq!(result.investment.effective_investment, dec!(100000));
        assert_eq!(result.investment.grant_type, GrantType::None);
        assert_eq!(result.investment.grant_applied_amount, Decimal::ZERO);
    }

    #[test]
    fn test_upfront_costs_clamped_per_field() {
        let mut input = mvp_input();
        input.investment.equipment_cost = dec!(-500);
        input.investment.installation_cost = Some(dec!(1000));
        input.investment.additional_upfront_costs = vec![dec!(200), dec!(-300)];

        let result = evaluate(&input);
        // -500 and -300 floor to 0 individually, not after summing
        assert_eq!(result.investment.initial_investment, dec!(1200));
    }

    #[test]
    fn test_grant_percent_applied() {
        let mut input = mvp_input();
        input.investment.equipment_cost = dec!(10000);
        input.investment.grant_percent = Some(dec!(0.2));

        let result = evaluate(&input);
        assert_eq!(result.investment.grant_type, GrantType::Percent);
        assert_eq!(result.investment.grant_applied_amount, dec!(2000));
        assert_eq!(result.investment.effective_investment, dec!(8000));
    }

    #[test]
    fn test_grant_amount_capped_at_initial_investment() {
        let mut input = mvp_input();
        input.investment.grant_amount = Some(dec!(150000));

        let result = evaluate(&input);
        assert_eq!(result.investment.grant_type, GrantType::Amount);
        assert_eq!(result.investment.grant_applied_amount, dec!(100000));
        assert_eq!(result.investment.effective_investment, Decimal::ZERO);
        // Fully funded: ROI undefined, payback immediate
        assert_eq!(result.horizon.roi_percent, None);
        assert_eq!(result.payback.payback_years, Some(Decimal::ZERO));
        assert!(result
            .notes
            .iter()
            .any(|note| note.contains("ROI is undefined")));
    }

    #[test]
    fn test_grant_amount_wins_over_percent() {
        let mut input = mvp_input();
        input.investment.grant_percent = Some(dec!(0.5));
        input.investment.grant_amount = Some(dec!(10000));

        let result = evaluate(&input);
        assert_eq!(result.investment.grant_type, GrantType::Amount);
        assert_eq!(result.investment.grant_applied_amount, dec!(10000));
        assert!(result
            .notes
            .iter()
            .any(|note| note.contains("grant_amount was applied")));
    }

    #[test]
    fn test_grant_percent_clamped() {
        let mut input = mvp_input();
        input.investment.grant_percent = Some(dec!(1.5));

        let result = evaluate(&input);
        assert_eq!(result.investment.grant_applied_amount, dec!(100000));
        assert_eq!(result.investment.effective_investment, Decimal::ZERO);
        assert!(result
            .notes
            .iter()
            .any(|note| note.contains("clamped to the 0-1 range")));
    }

    #[test]
    fn test_zero_net_benefit_payback_unachievable() {
        let mut input = mvp_input();
        input.labour.fte_reduced = Decimal::ZERO;
        input.annual_costs = None;

        let result = evaluate(&input);
        assert_eq!(result.annual.net_annual_benefit, Decimal::ZERO);
        assert!(!result.payback.is_achievable);
        assert_eq!(result.payback.payback_years, None);
        assert_eq!(result.payback.payback_months, None);
        assert!(result
            .notes
            .iter()
            .any(|note| note.contains("Payback is not achievable")));
    }

    #[test]
    fn test_time_horizon_floored() {
        let mut input = mvp_input();
        input.financial.time_horizon_years = dec!(5.9);

        let result = evaluate(&input);
        assert_eq!(result.horizon.years, 5);
        assert!(result.notes.is_empty());
    }

    #[test]
    fn test_time_horizon_minimum_of_one() {
        let mut input = mvp_input();
        input.financial.time_horizon_years = dec!(0);

        let result = evaluate(&input);
        assert_eq!(result.horizon.years, 1);
        assert!(result
            .notes
            .iter()
            .any(|note| note.contains("must be at least 1")));
    }

    #[test]
    fn test_cumulative_cash_flow_shape() {
        let result = evaluate(&mvp_input());
        let points = &result.cumulative_cash_flow;

        assert_eq!(points.len(), 6);
        assert_eq!(points[0].year, 0);
        assert_eq!(points[0].cumulative_cash_flow, dec!(-100000));
        for window in points.windows(2) {
            assert_eq!(window[1].year, window[0].year + 1);
        }
        // No discount rate: the discounted track is absent everywhere
        assert!(points
            .iter()
            .all(|point| point.discounted_cumulative_cash_flow.is_none()));

        assert_eq!(result.payback.breakeven_year_from_cumulative, Some(2));
    }

    #[test]
    fn test_breakeven_absent_when_never_recovered() {
        let mut input = mvp_input();
        input.labour.fully_loaded_annual_cost_per_fte = dec!(5000);

        let result = evaluate(&input);
        // net = 2*5000 - 5000 = 5000/year; 5 years recovers 25k of 100k
        assert_eq!(result.payback.breakeven_year_from_cumulative, None);
        assert!(result.payback.is_achievable);
    }

    #[test]
    fn test_npv_at_zero_rate_matches_undiscounted() {
        let mut input = mvp_input();
        input.financial.discount_rate = Some(Decimal::ZERO);

        let result = evaluate(&input);
        assert_eq!(result.npv.discount_rate, Some(Decimal::ZERO));
        assert_eq!(result.npv.value, Some(result.horizon.net_profit));
    }

    #[test]
    fn test_npv_discounts_future_benefits() {
        let mut input = mvp_input();
        input.financial.discount_rate = Some(dec!(0.10));

        let result = evaluate(&input);
        let npv = result.npv.value.unwrap();
        // -100000 + 85000 * annuity(10%, 5y) ≈ 222,216
        assert!((npv - dec!(222216)).abs() < dec!(1));

        // The last discounted cumulative point equals the NPV
        let last = result.cumulative_cash_flow.last().unwrap();
        assert_eq!(last.discounted_cumulative_cash_flow, Some(npv));
    }

    #[test]
    fn test_discount_rate_at_or_below_minus_one_rejected() {
        let mut input = mvp_input();
        input.financial.discount_rate = Some(dec!(-1));

        let result = evaluate(&input);
        assert_eq!(result.npv.discount_rate, None);
        assert_eq!(result.npv.value, None);
        assert!(result
            .cumulative_cash_flow
            .iter()
            .all(|point| point.discounted_cumulative_cash_flow.is_none()));
        assert!(result
            .notes
            .iter()
            .any(|note| note.contains("greater than -100%")));
    }

    #[test]
    fn test_units_productivity_mode() {
        let mut input = mvp_input();
        input.productivity = Some(ProductivityInput {
            current_units_per_year: Some(dec!(1000)),
            productivity_gain_percent: Some(dec!(0.1)),
            profit_per_unit: Some(dec!(50)),
            ..Default::default()
        });

        let result = evaluate(&input);
        assert_eq!(result.annual.productivity_mode, ProductivityMode::Units);
        assert_eq!(result.annual.extra_units_per_year, Some(dec!(100)));
        assert_eq!(result.annual.productivity_profit, dec!(5000));
        assert_eq!(result.annual.net_annual_benefit, dec!(90000));
    }

    #[test]
    fn test_direct_productivity_wins_over_units() {
        let mut input = mvp_input();
        input.productivity = Some(ProductivityInput {
            annual_profit_increase: Some(dec!(7000)),
            current_units_per_year: Some(dec!(1000)),
            productivity_gain_percent: Some(dec!(0.1)),
            profit_per_unit: Some(dec!(50)),
        });

        let result = evaluate(&input);
        assert_eq!(result.annual.productivity_mode, ProductivityMode::Direct);
        assert_eq!(result.annual.extra_units_per_year, None);
        assert_eq!(result.annual.productivity_profit, dec!(7000));
    }

    #[test]
    fn test_savings_and_cost_lists_summed() {
        let mut input = mvp_input();
        input.annual_savings = Some(AnnualSavingsInput {
            scrap_savings: Some(dec!(1000)),
            overtime_savings: Some(dec!(2000)),
            additional_savings: vec![dec!(500), dec!(500)],
            ..Default::default()
        });
        input.annual_costs = Some(AnnualCostsInput {
            maintenance_cost: Some(dec!(3000)),
            energy_delta: Some(dec!(-1000)),
            additional_annual_costs: vec![dec!(250)],
            ..Default::default()
        });

        let result = evaluate(&input);
        assert_eq!(result.annual.other_savings, dec!(4000));
        assert_eq!(result.annual.operating_costs, dec!(2250));
        assert_eq!(result.annual.total_benefits, dec!(94000));
    }

    #[test]
    fn test_option_name_trimmed() {
        let mut input = mvp_input();
        input.option_name = Some("  Robotic Milking System  ".to_string());
        assert_eq!(
            evaluate(&input).option_name,
            Some("Robotic Milking System".to_string())
        );

        input.option_name = Some("   ".to_string());
        assert_eq!(evaluate(&input).option_name, None);
    }

    #[test]
    fn test_envelope_mirrors_notes_as_warnings() {
        let mut input = mvp_input();
        input.financial.time_horizon_years = dec!(0);

        let output = calculate_roi(&input);
        assert_eq!(output.warnings, output.result.notes);
        assert!(!output.warnings.is_empty());
    }
}
