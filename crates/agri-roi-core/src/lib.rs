pub mod error;
pub mod roi;
pub mod types;

#[cfg(feature = "catalog")]
pub mod catalog;

pub use error::AgriRoiError;
pub use types::*;

/// Standard result type for all agri-roi operations
pub type AgriRoiResult<T> = Result<T, AgriRoiError>;
