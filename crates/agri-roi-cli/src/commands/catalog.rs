use clap::Args;
use serde_json::Value;

use agri_roi_core::catalog::{self, InvestmentCategory, InvestmentOption};
use agri_roi_core::roi::calculate_roi;

/// Arguments for browsing the investment catalog
#[derive(Args)]
pub struct CatalogArgs {
    /// Show a single option by id instead of listing the catalog
    #[arg(long)]
    pub id: Option<u32>,

    /// Only list options in this category (e.g. "Livestock")
    #[arg(long)]
    pub category: Option<String>,

    /// Run an ROI calculation on the option's default assumptions
    /// (requires --id)
    #[arg(long)]
    pub quote: bool,
}

pub fn run_catalog(args: CatalogArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let options = catalog::default_catalog();

    if let Some(id) = args.id {
        let option = catalog::find_option(&options, id)?;
        if args.quote {
            let output = calculate_roi(&option.to_calculation_input());
            return Ok(serde_json::to_value(output)?);
        }
        return Ok(serde_json::to_value(option)?);
    }

    if args.quote {
        return Err("--quote requires --id".into());
    }

    let category = args
        .category
        .as_deref()
        .map(str::parse::<InvestmentCategory>)
        .transpose()?;

    let rows: Vec<Value> = options
        .iter()
        .filter(|option| category.map_or(true, |wanted| option.category == wanted))
        .map(summary_row)
        .collect();

    Ok(Value::Array(rows))
}

/// Condensed listing row: published ranges rather than the full record.
fn summary_row(option: &InvestmentOption) -> Value {
    serde_json::json!({
        "id": option.id,
        "name": option.name,
        "category": option.category.to_string(),
        "estimated_cost": format!("{} to {}", option.estimated_cost_low, option.estimated_cost_high),
        "annual_savings": format!("{} to {}", option.annual_savings_low, option.annual_savings_high),
        "roi_timeline": option.roi_timeline,
    })
}
