use thiserror::Error;

/// Error type for every fallible operation of the layout engine.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Degenerate input (no positions, zero-width region, zero tracks, zero
    /// bin size, out-of-range configuration values).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A backend record could not be converted into a typed value.
    #[error("malformed payload: {0}")]
    Payload(String),

    /// A region string did not match any supported format.
    #[error("could not parse region '{0}'")]
    RegionParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

macro_rules! invalid_input {
    ($($arg:tt)*) => {
        $crate::LayoutError::InvalidInput(format!($($arg)*))
    };
}
pub(crate) use invalid_input;
