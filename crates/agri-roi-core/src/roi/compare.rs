use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Instant;

use crate::roi::calculate::evaluate;
use crate::roi::input::RoiCalculationInput;
use crate::roi::result::RoiCalculationResult;
use crate::types::{with_metadata, ComputationOutput};

/// One row of a ranking table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedOption {
    /// 1-based, contiguous; ties are not merged
    pub rank: u32,
    pub option_name: String,
    /// The metric this ranking sorts on; absent when undefined for the option
    pub metric_value: Option<Decimal>,
}

/// Three independent rankings over the same option set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiRanking {
    pub by_fastest_payback: Vec<RankedOption>,
    pub by_highest_roi: Vec<RankedOption>,
    pub by_highest_npv: Vec<RankedOption>,
}

/// Output of a multi-option comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiComparisonResult {
    /// Full per-option results, in input order
    pub options: Vec<RoiCalculationResult>,
    pub ranking: RoiRanking,
}

enum Direction {
    Ascending,
    Descending,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Evaluate several automation options and rank them by payback speed,
/// ROI, and NPV.
///
/// Options without a name are labelled `Option {n}` (1-based input
/// position). Each ranking sorts options with an undefined metric last;
/// equal metric values keep their input order (stable sort).
pub fn compare_options(
    inputs: &[RoiCalculationInput],
) -> ComputationOutput<RoiComparisonResult> {
    let start = Instant::now();

    let options: Vec<RoiCalculationResult> = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let mut result = evaluate(input);
            if result.option_name.is_none() {
                result.option_name = Some(format!("Option {}", index + 1));
            }
            result
        })
        .collect();

    let warnings: Vec<String> = options
        .iter()
        .flat_map(|option| {
            let name = option.option_name.clone().unwrap_or_default();
            option
                .notes
                .iter()
                .map(move |note| format!("{name}: {note}"))
        })
        .collect();

    let ranking = RoiRanking {
        by_fastest_payback: rank_by(
            &options,
            |option| option.payback.payback_years,
            Direction::Ascending,
        ),
        by_highest_roi: rank_by(
            &options,
            |option| option.horizon.roi_percent,
            Direction::Descending,
        ),
        by_highest_npv: rank_by(&options, |option| option.npv.value, Direction::Descending),
    };

    let num_options = options.len();
    let output = RoiComparisonResult { options, ranking };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Multi-Option ROI Comparison",
        &serde_json::json!({ "num_options": num_options }),
        warnings,
        elapsed,
        output,
    )
}

fn rank_by<F>(
    options: &[RoiCalculationResult],
    metric: F,
    direction: Direction,
) -> Vec<RankedOption>
where
    F: Fn(&RoiCalculationResult) -> Option<Decimal>,
{
    let mut order: Vec<usize> = (0..options.len()).collect();
    // sort_by is stable, so equal metrics keep input order
    order.sort_by(|&left, &right| {
        compare_metric(metric(&options[left]), metric(&options[right]), &direction)
    });

    order
        .iter()
        .enumerate()
        .map(|(position, &index)| RankedOption {
            rank: position as u32 + 1,
            option_name: options[index].option_name.clone().unwrap_or_default(),
            metric_value: metric(&options[index]),
        })
        .collect()
}

/// Options with an undefined metric sort last regardless of direction.
fn compare_metric(
    left: Option<Decimal>,
    right: Option<Decimal>,
    direction: &Direction,
) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => match direction {
            Direction::Ascending => left.cmp(&right),
            Direction::Descending => right.cmp(&left),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::input::{FinancialInput, InvestmentInput, LabourInput};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn option(name: Option<&str>, equipment_cost: Decimal, fte: Decimal) -> RoiCalculationInput {
        RoiCalculationInput {
            option_name: name.map(str::to_string),
            investment: InvestmentInput {
                equipment_cost,
                ..Default::default()
            },
            labour: LabourInput {
                fte_reduced: fte,
                fully_loaded_annual_cost_per_fte: dec!(40000),
            },
            financial: FinancialInput {
                time_horizon_years: dec!(5),
                discount_rate: Some(dec!(0.08)),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_rankings_cover_all_options() {
        let inputs = vec![
            option(Some("Drone"), dec!(50000), dec!(1)),
            option(Some("Milking Robot"), dec!(200000), dec!(2)),
            option(Some("Auto-Steer"), dec!(20000), dec!(1)),
        ];

        let output = compare_options(&inputs);
        let comparison = &output.result;

        assert_eq!(comparison.options.len(), 3);
        for ranking in [
            &comparison.ranking.by_fastest_payback,
            &comparison.ranking.by_highest_roi,
            &comparison.ranking.by_highest_npv,
        ] {
            assert_eq!(ranking.len(), 3);
            let ranks: Vec<u32> = ranking.iter().map(|row| row.rank).collect();
            assert_eq!(ranks, vec![1, 2, 3]);

            let mut names: Vec<&str> =
                ranking.iter().map(|row| row.option_name.as_str()).collect();
            names.sort_unstable();
            assert_eq!(names, vec!["Auto-Steer", "Drone", "Milking Robot"]);
        }
    }

    #[test]
    fn test_fastest_payback_ordering() {
        let inputs = vec![
            option(Some("Slow"), dec!(200000), dec!(1)),
            option(Some("Fast"), dec!(20000), dec!(1)),
        ];

        let ranking = compare_options(&inputs).result.ranking;
        assert_eq!(ranking.by_fastest_payback[0].option_name, "Fast");
        assert_eq!(ranking.by_fastest_payback[1].option_name, "Slow");
    }

    #[test]
    fn test_fallback_names_by_input_position() {
        let inputs = vec![
            option(None, dec!(50000), dec!(1)),
            option(Some("  "), dec!(20000), dec!(1)),
        ];

        let comparison = compare_options(&inputs).result;
        assert_eq!(
            comparison.options[0].option_name,
            Some("Option 1".to_string())
        );
        assert_eq!(
            comparison.options[1].option_name,
            Some("Option 2".to_string())
        );
    }

    #[test]
    fn test_undefined_metric_sorts_last() {
        // Zero FTEs: no net benefit, so payback is undefined
        let inputs = vec![
            option(Some("No Benefit"), dec!(50000), dec!(0)),
            option(Some("Viable"), dec!(50000), dec!(1)),
        ];

        let ranking = compare_options(&inputs).result.ranking;
        assert_eq!(ranking.by_fastest_payback[0].option_name, "Viable");
        assert_eq!(ranking.by_fastest_payback[1].option_name, "No Benefit");
        assert_eq!(ranking.by_fastest_payback[1].metric_value, None);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let inputs = vec![
            option(Some("First"), dec!(40000), dec!(1)),
            option(Some("Second"), dec!(40000), dec!(1)),
        ];

        let ranking = compare_options(&inputs).result.ranking;
        assert_eq!(ranking.by_highest_roi[0].option_name, "First");
        assert_eq!(ranking.by_highest_roi[1].option_name, "Second");
    }

    #[test]
    fn test_empty_input_produces_empty_comparison() {
        let output = compare_options(&[]);
        assert!(output.result.options.is_empty());
        assert!(output.result.ranking.by_highest_npv.is_empty());
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_warnings_prefixed_with_option_name() {
        let mut input = option(Some("Sprayer"), dec!(10000), dec!(1));
        input.financial.time_horizon_years = dec!(0);

        let output = compare_options(&[input]);
        assert!(output
            .warnings
            .iter()
            .any(|warning| warning.starts_with("Sprayer: ")));
    }
}
