//! Error types for the fallible surfaces of the crate
//!
//! Parsing itself never fails; these cover configuration loading and the
//! review-to-submission step.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid price range: min {min} must be positive and below max {max}")]
    InvalidPriceRange { min: f64, max: f64 },

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("price window must span between 1 and 6 tokens, got {0}")]
    InvalidWindow(usize),

    #[error("failed to parse parser config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum ReviewError {
    #[error("no entries selected")]
    NothingSelected,

    #[error("no fuel type chosen for \"{spoken_fuel}\"")]
    MissingFuelType { spoken_fuel: String },

    #[error("unknown fuel type: {fuel_type_id}")]
    UnknownFuelType { fuel_type_id: String },

    #[error("invalid price \"{value}\" for \"{spoken_fuel}\"")]
    InvalidPrice { spoken_fuel: String, value: String },

    #[error("price {price} for \"{spoken_fuel}\" is outside the accepted range")]
    PriceOutOfRange { spoken_fuel: String, price: f64 },
}
