use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AgriRoiError;
use crate::roi::input::{
    AnnualCostsInput, FinancialInput, InvestmentInput, LabourInput, RoiCalculationInput,
};
use crate::types::{Money, Rate, Years};
use crate::AgriRoiResult;

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// Functional area an automation investment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentCategory {
    #[serde(rename = "Field Operations")]
    FieldOperations,
    Planting,
    #[serde(rename = "Crop Management")]
    CropManagement,
    #[serde(rename = "Water Management")]
    WaterManagement,
    Harvesting,
    Storage,
    #[serde(rename = "Nutrient Management")]
    NutrientManagement,
    Livestock,
    Software,
    #[serde(rename = "Data & Analytics")]
    DataAnalytics,
}

impl fmt::Display for InvestmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvestmentCategory::FieldOperations => "Field Operations",
            InvestmentCategory::Planting => "Planting",
            InvestmentCategory::CropManagement => "Crop Management",
            InvestmentCategory::WaterManagement => "Water Management",
            InvestmentCategory::Harvesting => "Harvesting",
            InvestmentCategory::Storage => "Storage",
            InvestmentCategory::NutrientManagement => "Nutrient Management",
            InvestmentCategory::Livestock => "Livestock",
            InvestmentCategory::Software => "Software",
            InvestmentCategory::DataAnalytics => "Data & Analytics",
        };
        f.write_str(label)
    }
}

impl FromStr for InvestmentCategory {
    type Err = AgriRoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "field operations" => Ok(InvestmentCategory::FieldOperations),
            "planting" => Ok(InvestmentCategory::Planting),
            "crop management" => Ok(InvestmentCategory::CropManagement),
            "water management" => Ok(InvestmentCategory::WaterManagement),
            "harvesting" => Ok(InvestmentCategory::Harvesting),
            "storage" => Ok(InvestmentCategory::Storage),
            "nutrient management" => Ok(InvestmentCategory::NutrientManagement),
            "livestock" => Ok(InvestmentCategory::Livestock),
            "software" => Ok(InvestmentCategory::Software),
            "data & analytics" | "data and analytics" => Ok(InvestmentCategory::DataAnalytics),
            other => Err(AgriRoiError::InvalidInput {
                field: "category".to_string(),
                reason: format!("Unknown investment category '{other}'"),
            }),
        }
    }
}

/// One catalog entry: published cost/savings ranges for display plus the
/// representative figures that seed a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentOption {
    pub id: u32,
    pub name: String,
    pub category: InvestmentCategory,
    pub description: String,
    /// Published purchase-cost range
    pub estimated_cost_low: Money,
    pub estimated_cost_high: Money,
    /// Published annual-savings range
    pub annual_savings_low: Money,
    pub annual_savings_high: Money,
    /// Typical payback band shown alongside the option (e.g. "3-5 years")
    pub roi_timeline: String,
    /// Representative equipment cost used as the calculation default
    pub equipment_cost: Money,
    /// Typical annual running cost (maintenance, subscriptions, parts)
    pub other_annual_costs: Money,
    /// Default labour assumptions for the calculator form
    pub default_fte_reduced: Decimal,
    pub default_cost_per_fte: Money,
    pub default_time_horizon_years: Years,
}

impl InvestmentOption {
    /// Seed a calculation from this option's default assumptions, the way
    /// the selection form pre-fills its fields.
    pub fn to_calculation_input(&self) -> RoiCalculationInput {
        RoiCalculationInput {
            option_name: Some(self.name.clone()),
            investment: InvestmentInput {
                equipment_cost: self.equipment_cost,
                ..Default::default()
            },
            labour: LabourInput {
                fte_reduced: self.default_fte_reduced,
                fully_loaded_annual_cost_per_fte: self.default_cost_per_fte,
            },
            annual_costs: Some(AnnualCostsInput {
                other_annual_costs: Some(self.other_annual_costs),
                ..Default::default()
            }),
            financial: FinancialInput {
                time_horizon_years: self.default_time_horizon_years,
                discount_rate: None,
            },
            ..Default::default()
        }
    }

    /// Like [`to_calculation_input`](Self::to_calculation_input), with a
    /// grant scheme's calculation hint funnelled into the investment block.
    pub fn to_calculation_input_with_grant(
        &self,
        hint: &GrantCalculationHint,
    ) -> RoiCalculationInput {
        let mut input = self.to_calculation_input();
        match resolve_grant_hint(self.equipment_cost, hint) {
            Some(ResolvedGrant::Amount(amount)) => input.investment.grant_amount = Some(amount),
            Some(ResolvedGrant::Percent(percent)) => {
                input.investment.grant_percent = Some(percent)
            }
            None => {}
        }
        input
    }
}

/// Look up a catalog entry by id.
pub fn find_option(catalog: &[InvestmentOption], id: u32) -> AgriRoiResult<&InvestmentOption> {
    catalog
        .iter()
        .find(|option| option.id == id)
        .ok_or(AgriRoiError::UnknownOption(id))
}

// ---------------------------------------------------------------------------
// Grant hints
// ---------------------------------------------------------------------------

/// Machine-readable hint attached to a grant scheme record: a flat cap
/// and/or a percent-of-cost figure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GrantCalculationHint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_percent: Option<Rate>,
}

/// Grant support in the form the calculation input accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedGrant {
    Amount(Money),
    Percent(Rate),
}

/// Funnel a grant hint into a single calculation field.
///
/// When both a flat cap and a percent are present, the applicable support
/// is the lower of the two evaluated against the equipment cost, carried
/// as a flat amount. A lone figure passes through (amount floored at 0,
/// percent clamped to [0, 1]). No usable figure means no grant.
pub fn resolve_grant_hint(
    equipment_cost: Money,
    hint: &GrantCalculationHint,
) -> Option<ResolvedGrant> {
    let amount_cap = hint.grant_amount.map(|amount| amount.max(Decimal::ZERO));
    let percent = hint
        .grant_percent
        .map(|percent| percent.clamp(Decimal::ZERO, Decimal::ONE));
    let cost = equipment_cost.max(Decimal::ZERO);

    match (amount_cap, percent) {
        (Some(amount), Some(percent)) => Some(ResolvedGrant::Amount(amount.min(cost * percent))),
        (Some(amount), None) => Some(ResolvedGrant::Amount(amount)),
        (None, Some(percent)) => Some(ResolvedGrant::Percent(percent)),
        (None, None) => None,
    }
}

// ---------------------------------------------------------------------------
// Built-in catalog
// ---------------------------------------------------------------------------

/// The built-in catalog of farm automation investment options.
pub fn default_catalog() -> Vec<InvestmentOption> {
    vec![
        InvestmentOption {
            id: 1,
            name: "Autonomous Tractor".to_string(),
            category: InvestmentCategory::FieldOperations,
            description: "Self-driving tractor capable of plowing, seeding, and field \
                          preparation with minimal human oversight."
                .to_string(),
            estimated_cost_low: dec!(250000),
            estimated_cost_high: dec!(500000),
            annual_savings_low: dec!(60000),
            annual_savings_high: dec!(120000),
            roi_timeline: "3-5 years".to_string(),
            equipment_cost: dec!(375000),
            other_annual_costs: dec!(12000),
            default_fte_reduced: dec!(2),
            default_cost_per_fte: dec!(55000),
            default_time_horizon_years: dec!(7),
        },
        InvestmentOption {
            id: 2,
            name: "GPS Auto-Steer System".to_string(),
            category: InvestmentCategory::FieldOperations,
            description: "Retrofittable GPS guidance system that provides sub-inch accuracy \
                          for straight rows and reduced overlap."
                .to_string(),
            estimated_cost_low: dec!(10000),
            estimated_cost_high: dec!(25000),
            annual_savings_low: dec!(8000),
            annual_savings_high: dec!(15000),
            roi_timeline: "1-2 years".to_string(),
            equipment_cost: dec!(17500),
            other_annual_costs: dec!(1000),
            default_fte_reduced: dec!(0.25),
            default_cost_per_fte: dec!(45000),
            default_time_horizon_years: dec!(5),
        },
        InvestmentOption {
            id: 3,
            name: "Precision Planter with Variable Rate Technology".to_string(),
            category: InvestmentCategory::Planting,
            description: "Advanced planter that adjusts seed spacing, depth, and population \
                          rates based on real-time soil data."
                .to_string(),
            estimated_cost_low: dec!(50000),
            estimated_cost_high: dec!(150000),
            annual_savings_low: dec!(20000),
            annual_savings_high: dec!(45000),
            roi_timeline: "2-4 years".to_string(),
            equipment_cost: dec!(100000),
            other_annual_costs: dec!(3000),
            default_fte_reduced: dec!(0.75),
            default_cost_per_fte: dec!(50000),
            default_time_horizon_years: dec!(5),
        },
        InvestmentOption {
            id: 4,
            name: "Agricultural Drones (Spraying & Scouting)".to_string(),
            category: InvestmentCategory::CropManagement,
            description: "Multi-purpose drones for aerial crop scouting, precision spraying, \
                          and field mapping with NDVI imaging."
                .to_string(),
            estimated_cost_low: dec!(15000),
            estimated_cost_high: dec!(75000),
            annual_savings_low: dec!(12000),
            annual_savings_high: dec!(35000),
            roi_timeline: "1-3 years".to_string(),
            equipment_cost: dec!(45000),
            other_annual_costs: dec!(2500),
            default_fte_reduced: dec!(0.5),
            default_cost_per_fte: dec!(45000),
            default_time_horizon_years: dec!(5),
        },
        InvestmentOption {
            id: 5,
            name: "Robotic Weeding System".to_string(),
            category: InvestmentCategory::CropManagement,
            description: "AI-powered robot that identifies and removes weeds mechanically or \
                          with targeted micro-sprays, reducing herbicide use."
                .to_string(),
            estimated_cost_low: dec!(100000),
            estimated_cost_high: dec!(200000),
            annual_savings_low: dec!(30000),
            annual_savings_high: dec!(70000),
            roi_timeline: "2-4 years".to_string(),
            equipment_cost: dec!(150000),
            other_annual_costs: dec!(5000),
            default_fte_reduced: dec!(1),
            default_cost_per_fte: dec!(45000),
            default_time_horizon_years: dec!(5),
        },
        InvestmentOption {
            id: 6,
            name: "Smart Irrigation System with Soil Moisture Sensors".to_string(),
            category: InvestmentCategory::WaterManagement,
            description: "Sensor-driven irrigation that monitors soil moisture at multiple \
                          depths and automates watering schedules."
                .to_string(),
            estimated_cost_low: dec!(5000),
            estimated_cost_high: dec!(30000),
            annual_savings_low: dec!(10000),
            annual_savings_high: dec!(25000),
            roi_timeline: "1-2 years".to_string(),
            equipment_cost: dec!(17500),
            other_annual_costs: dec!(1000),
            default_fte_reduced: dec!(0.25),
            default_cost_per_fte: dec!(40000),
            default_time_horizon_years: dec!(5),
        },
        InvestmentOption {
            id: 7,
            name: "Combine Yield Monitoring System".to_string(),
            category: InvestmentCategory::Harvesting,
            description: "Real-time yield mapping system installed on combines to track \
                          bushels per acre across every pass."
                .to_string(),
            estimated_cost_low: dec!(8000),
            estimated_cost_high: dec!(20000),
            annual_savings_low: dec!(10000),
            annual_savings_high: dec!(20000),
            roi_timeline: "1-2 years".to_string(),
            equipment_cost: dec!(14000),
            other_annual_costs: dec!(1200),
            default_fte_reduced: dec!(0.2),
            default_cost_per_fte: dec!(50000),
            default_time_horizon_years: dec!(3),
        },
        InvestmentOption {
            id: 8,
            name: "Automated Grain Bin Monitoring".to_string(),
            category: InvestmentCategory::Storage,
            description: "Wireless sensors that track temperature, moisture, and CO2 levels \
                          inside grain bins to prevent spoilage."
                .to_string(),
            estimated_cost_low: dec!(3000),
            estimated_cost_high: dec!(10000),
            annual_savings_low: dec!(5000),
            annual_savings_high: dec!(15000),
            roi_timeline: "under 1 year".to_string(),
            equipment_cost: dec!(6500),
            other_annual_costs: dec!(600),
            default_fte_reduced: dec!(0.15),
            default_cost_per_fte: dec!(48000),
            default_time_horizon_years: dec!(3),
        },
        InvestmentOption {
            id: 9,
            name: "AI Crop Disease Detection (Computer Vision)".to_string(),
            category: InvestmentCategory::CropManagement,
            description: "Camera-based system using machine learning to identify crop \
                          diseases, nutrient deficiencies, and pest damage early."
                .to_string(),
            estimated_cost_low: dec!(10000),
            estimated_cost_high: dec!(50000),
            annual_savings_low: dec!(15000),
            annual_savings_high: dec!(40000),
            roi_timeline: "1-2 years".to_string(),
            equipment_cost: dec!(30000),
            other_annual_costs: dec!(2400),
            default_fte_reduced: dec!(0.4),
            default_cost_per_fte: dec!(50000),
            default_time_horizon_years: dec!(5),
        },
        InvestmentOption {
            id: 10,
            name: "Automated Variable-Rate Fertilizer Spreader".to_string(),
            category: InvestmentCategory::NutrientManagement,
            description: "GPS-linked spreader that adjusts fertilizer application rates \
                          zone-by-zone based on soil test maps."
                .to_string(),
            estimated_cost_low: dec!(30000),
            estimated_cost_high: dec!(80000),
            annual_savings_low: dec!(15000),
            annual_savings_high: dec!(35000),
            roi_timeline: "2-3 years".to_string(),
            equipment_cost: dec!(55000),
            other_annual_costs: dec!(2000),
            default_fte_reduced: dec!(0.5),
            default_cost_per_fte: dec!(48000),
            default_time_horizon_years: dec!(5),
        },
        InvestmentOption {
            id: 11,
            name: "Livestock Monitoring Sensors".to_string(),
            category: InvestmentCategory::Livestock,
            description: "Wearable sensors tracking animal health, activity, feeding \
                          patterns, and estrus detection in real time."
                .to_string(),
            estimated_cost_low: dec!(5000),
            estimated_cost_high: dec!(25000),
            annual_savings_low: dec!(8000),
            annual_savings_high: dec!(20000),
            roi_timeline: "1-2 years".to_string(),
            equipment_cost: dec!(15000),
            other_annual_costs: dec!(900),
            default_fte_reduced: dec!(0.25),
            default_cost_per_fte: dec!(42000),
            default_time_horizon_years: dec!(5),
        },
        InvestmentOption {
            id: 12,
            name: "Robotic Milking System".to_string(),
            category: InvestmentCategory::Livestock,
            description: "Fully automated milking parlor where cows voluntarily enter and \
                          are milked by robotic arms on their own schedule."
                .to_string(),
            estimated_cost_low: dec!(150000),
            estimated_cost_high: dec!(250000),
            annual_savings_low: dec!(40000),
            annual_savings_high: dec!(80000),
            roi_timeline: "3-5 years".to_string(),
            equipment_cost: dec!(200000),
            other_annual_costs: dec!(8000),
            default_fte_reduced: dec!(1.2),
            default_cost_per_fte: dec!(48000),
            default_time_horizon_years: dec!(7),
        },
        InvestmentOption {
            id: 13,
            name: "Autonomous Harvesting Robots".to_string(),
            category: InvestmentCategory::Harvesting,
            description: "Robotic harvesters for fruits and vegetables using computer vision \
                          to identify ripe produce and pick without damage."
                .to_string(),
            estimated_cost_low: dec!(200000),
            estimated_cost_high: dec!(400000),
            annual_savings_low: dec!(50000),
            annual_savings_high: dec!(100000),
            roi_timeline: "3-5 years".to_string(),
            equipment_cost: dec!(300000),
            other_annual_costs: dec!(10000),
            default_fte_reduced: dec!(2),
            default_cost_per_fte: dec!(40000),
            default_time_horizon_years: dec!(7),
        },
        InvestmentOption {
            id: 14,
            name: "Farm Management Software (AI-Driven Optimization)".to_string(),
            category: InvestmentCategory::Software,
            description: "Centralized platform using AI to optimize planting schedules, \
                          input purchases, labor allocation, and market timing."
                .to_string(),
            estimated_cost_low: dec!(2000),
            estimated_cost_high: dec!(15000),
            annual_savings_low: dec!(20000),
            annual_savings_high: dec!(50000),
            roi_timeline: "under 1 year".to_string(),
            equipment_cost: dec!(8500),
            other_annual_costs: dec!(4000),
            default_fte_reduced: dec!(0.5),
            default_cost_per_fte: dec!(45000),
            default_time_horizon_years: dec!(3),
        },
        InvestmentOption {
            id: 15,
            name: "On-Farm Weather Station with Predictive Analytics".to_string(),
            category: InvestmentCategory::DataAnalytics,
            description: "Hyperlocal weather station providing micro-climate data and \
                          AI-powered forecasts for spray windows and frost alerts."
                .to_string(),
            estimated_cost_low: dec!(1500),
            estimated_cost_high: dec!(8000),
            annual_savings_low: dec!(5000),
            annual_savings_high: dec!(15000),
            roi_timeline: "under 1 year".to_string(),
            equipment_cost: dec!(4750),
            other_annual_costs: dec!(400),
            default_fte_reduced: dec!(0.15),
            default_cost_per_fte: dec!(45000),
            default_time_horizon_years: dec!(3),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::calculate::evaluate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_catalog_ids_are_unique_and_ordered() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 15);

        let ids: Vec<u32> = catalog.iter().map(|option| option.id).collect();
        let expected: Vec<u32> = (1..=15).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_find_option() {
        let catalog = default_catalog();
        let option = find_option(&catalog, 12).unwrap();
        assert_eq!(option.name, "Robotic Milking System");

        assert!(matches!(
            find_option(&catalog, 99),
            Err(AgriRoiError::UnknownOption(99))
        ));
    }

    #[test]
    fn test_default_inputs_are_calculable() {
        let catalog = default_catalog();
        for option in &catalog {
            let result = evaluate(&option.to_calculation_input());
            assert_eq!(result.option_name, Some(option.name.clone()));
            assert!(
                result.payback.is_achievable,
                "catalog defaults for '{}' should pay back",
                option.name
            );
        }
    }

    #[test]
    fn test_default_input_carries_option_assumptions() {
        let catalog = default_catalog();
        let option = find_option(&catalog, 2).unwrap();
        let input = option.to_calculation_input();

        assert_eq!(input.investment.equipment_cost, dec!(17500));
        assert_eq!(input.labour.fte_reduced, dec!(0.25));
        assert_eq!(input.financial.time_horizon_years, dec!(5));
        assert_eq!(
            input.annual_costs.unwrap().other_annual_costs,
            Some(dec!(1000))
        );
    }

    #[test]
    fn test_grant_hint_lower_of_rule() {
        let hint = GrantCalculationHint {
            grant_amount: Some(dec!(20000)),
            grant_percent: Some(dec!(0.1)),
        };
        // 10% of 100k (10000) undercuts the 20k cap
        assert_eq!(
            resolve_grant_hint(dec!(100000), &hint),
            Some(ResolvedGrant::Amount(dec!(10000)))
        );

        let hint = GrantCalculationHint {
            grant_amount: Some(dec!(5000)),
            grant_percent: Some(dec!(0.5)),
        };
        assert_eq!(
            resolve_grant_hint(dec!(100000), &hint),
            Some(ResolvedGrant::Amount(dec!(5000)))
        );
    }

    #[test]
    fn test_grant_hint_single_figures_normalised() {
        let amount_only = GrantCalculationHint {
            grant_amount: Some(dec!(-500)),
            grant_percent: None,
        };
        assert_eq!(
            resolve_grant_hint(dec!(100000), &amount_only),
            Some(ResolvedGrant::Amount(Decimal::ZERO))
        );

        let percent_only = GrantCalculationHint {
            grant_amount: None,
            grant_percent: Some(dec!(1.4)),
        };
        assert_eq!(
            resolve_grant_hint(dec!(100000), &percent_only),
            Some(ResolvedGrant::Percent(Decimal::ONE))
        );

        assert_eq!(
            resolve_grant_hint(dec!(100000), &GrantCalculationHint::default()),
            None
        );
    }

    #[test]
    fn test_grant_hint_funnelled_into_input() {
        let catalog = default_catalog();
        let option = find_option(&catalog, 5).unwrap();
        let hint = GrantCalculationHint {
            grant_amount: Some(dec!(30000)),
            grant_percent: Some(dec!(0.5)),
        };

        let input = option.to_calculation_input_with_grant(&hint);
        assert_eq!(input.investment.grant_amount, Some(dec!(30000)));
        assert_eq!(input.investment.grant_percent, None);

        let result = evaluate(&input);
        assert_eq!(result.investment.effective_investment, dec!(120000));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(
            "Water Management".parse::<InvestmentCategory>().unwrap(),
            InvestmentCategory::WaterManagement
        );
        assert_eq!(
            "data and analytics".parse::<InvestmentCategory>().unwrap(),
            InvestmentCategory::DataAnalytics
        );
        assert!("Aquaponics".parse::<InvestmentCategory>().is_err());
        assert_eq!(
            InvestmentCategory::NutrientManagement.to_string(),
            "Nutrient Management"
        );
    }
}
