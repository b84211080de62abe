use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgriRoiError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown investment option id: {0}")]
    UnknownOption(u32),
}
