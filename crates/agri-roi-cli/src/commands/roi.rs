use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use agri_roi_core::roi::input::{
    AnnualCostsInput, AnnualSavingsInput, FinancialInput, InvestmentInput, LabourInput,
    ProductivityInput, RoiCalculationInput,
};
use agri_roi_core::roi::{
    calculate_roi, calculate_sensitivity, compare_options, DEFAULT_DELTA_PERCENT,
};

use crate::input;

/// Arguments for a single ROI calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CalculateArgs {
    /// Label for comparison tables and reports
    #[arg(long)]
    pub option_name: Option<String>,

    /// Purchase price of the equipment
    #[arg(long)]
    pub equipment_cost: Option<Decimal>,

    /// Full-time-equivalent positions no longer needed
    #[arg(long)]
    pub fte_reduced: Option<Decimal>,

    /// Fully loaded annual cost of one FTE
    #[arg(long, alias = "cost-per-fte")]
    pub fully_loaded_annual_cost_per_fte: Option<Decimal>,

    /// Recurring annual operating costs of the automation
    #[arg(long)]
    pub annual_operating_costs: Option<Decimal>,

    /// Direct annual profit increase from productivity gains
    #[arg(long)]
    pub annual_profit_increase: Option<Decimal>,

    /// Other recurring annual savings (scrap, overtime, quality)
    #[arg(long)]
    pub other_savings: Option<Decimal>,

    /// Evaluation horizon in years
    #[arg(long, alias = "time-horizon", default_value = "5")]
    pub time_horizon_years: Decimal,

    /// Grant support as a fraction of the investment (0.25 = 25%)
    #[arg(long)]
    pub grant_percent: Option<Decimal>,

    /// Flat grant amount
    #[arg(long)]
    pub grant_amount: Option<Decimal>,

    /// Discount rate for NPV, in percent (10 = 10%)
    #[arg(long)]
    pub discount_rate_percent: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a multi-option comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to a JSON or YAML file holding an array of calculation inputs
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a one-way sensitivity analysis
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to a JSON or YAML file holding the base-case calculation input
    #[arg(long)]
    pub input: Option<String>,

    /// Perturbation applied to each variable (0.1 = ±10%)
    #[arg(long)]
    pub delta: Option<Decimal>,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roi_input: RoiCalculationInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        build_input_from_flags(&args)?
    };

    let output = calculate_roi(&roi_input);
    Ok(serde_json::to_value(output)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: Vec<RoiCalculationInput> = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input is required (or pipe a JSON array of inputs)".into());
    };

    let output = compare_options(&inputs);
    Ok(serde_json::to_value(output)?)
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roi_input: RoiCalculationInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input is required (or pipe a JSON calculation input)".into());
    };

    let delta = args.delta.unwrap_or(DEFAULT_DELTA_PERCENT);
    let output = calculate_sensitivity(&roi_input, delta);
    Ok(serde_json::to_value(output)?)
}

/// Assemble a calculation input from individual flags, mirroring the quick
/// calculator form: equipment cost, labour assumptions, a single operating
/// cost figure, and optional productivity / savings / grant / NPV extras.
fn build_input_from_flags(
    args: &CalculateArgs,
) -> Result<RoiCalculationInput, Box<dyn std::error::Error>> {
    let equipment_cost = args
        .equipment_cost
        .ok_or("--equipment-cost is required (or provide --input)")?;
    let fte_reduced = args
        .fte_reduced
        .ok_or("--fte-reduced is required (or provide --input)")?;
    let cost_per_fte = args
        .fully_loaded_annual_cost_per_fte
        .ok_or("--fully-loaded-annual-cost-per-fte is required (or provide --input)")?;

    Ok(RoiCalculationInput {
        option_name: args.option_name.clone(),
        investment: InvestmentInput {
            equipment_cost,
            grant_percent: args.grant_percent,
            grant_amount: args.grant_amount,
            ..Default::default()
        },
        labour: LabourInput {
            fte_reduced,
            fully_loaded_annual_cost_per_fte: cost_per_fte,
        },
        productivity: args.annual_profit_increase.map(|increase| ProductivityInput {
            annual_profit_increase: Some(increase),
            ..Default::default()
        }),
        annual_savings: args.other_savings.map(|savings| AnnualSavingsInput {
            other_savings: Some(savings),
            ..Default::default()
        }),
        annual_costs: args.annual_operating_costs.map(|costs| AnnualCostsInput {
            other_annual_costs: Some(costs),
            ..Default::default()
        }),
        financial: FinancialInput {
            time_horizon_years: args.time_horizon_years,
            discount_rate: args.discount_rate_percent.map(|percent| percent / dec!(100)),
        },
    })
}
