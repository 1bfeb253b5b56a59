// crates/travelmap-core/src/error.rs
use thiserror::Error;

/// Errors raised while loading or configuring travel data.
///
/// The resolver and the fuzzy matcher never produce these: a missing country
/// or a non-matching record simply drops out of the view. Only the I/O edges
/// (reading JSON, parsing config, downloading features) can fail.
#[derive(Debug, Error)]
pub enum TravelError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[cfg(feature = "fetch")]
    #[error("Fetch error: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, TravelError>;
