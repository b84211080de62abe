use napi::Result as NapiResult;
use napi_derive::napi;

use rust_decimal::Decimal;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// ROI engine
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_roi(input_json: String) -> NapiResult<String> {
    let input: agri_roi_core::roi::input::RoiCalculationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = agri_roi_core::roi::calculate::calculate_roi(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_options(inputs_json: String) -> NapiResult<String> {
    let inputs: Vec<agri_roi_core::roi::input::RoiCalculationInput> =
        serde_json::from_str(&inputs_json).map_err(to_napi_error)?;
    let output = agri_roi_core::roi::compare::compare_options(&inputs);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_sensitivity(
    input_json: String,
    delta_percent: Option<String>,
) -> NapiResult<String> {
    let input: agri_roi_core::roi::input::RoiCalculationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let delta = match delta_percent {
        Some(raw) => raw.parse::<Decimal>().map_err(to_napi_error)?,
        None => agri_roi_core::roi::sensitivity::DEFAULT_DELTA_PERCENT,
    };
    let output = agri_roi_core::roi::sensitivity::calculate_sensitivity(&input, delta);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[napi]
pub fn investment_catalog() -> NapiResult<String> {
    serde_json::to_string(&agri_roi_core::catalog::default_catalog()).map_err(to_napi_error)
}
