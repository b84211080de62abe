pub mod calculate;
pub mod compare;
pub mod input;
pub mod result;
pub mod sensitivity;

pub use calculate::calculate_roi;
pub use compare::compare_options;
pub use input::RoiCalculationInput;
pub use result::RoiCalculationResult;
pub use sensitivity::{calculate_sensitivity, DEFAULT_DELTA_PERCENT};
