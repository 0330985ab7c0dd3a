//! Parser configuration
//!
//! Overriding the defaults is meant for tuning against a different ASR engine
//! or price regime.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lowest plausible price per litre
pub const MIN_PRICE: f64 = 0.5;
/// Highest plausible price per litre
pub const MAX_PRICE: f64 = 10.0;
/// Minimum confidence for a fuel match to be usable
pub const ACCEPTANCE_THRESHOLD: f64 = 0.75;
/// Cap applied to emitted candidate confidence
pub const MAX_CONFIDENCE: f64 = 0.99;
/// Longest price window (in tokens) tried by the extractor
pub const MAX_PRICE_WINDOW: usize = 3;
/// Upper bound accepted for a configured price window
pub const PRICE_WINDOW_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub min_price: f64,
    pub max_price: f64,
    pub acceptance_threshold: f64,
    pub max_confidence: f64,
    pub max_window: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_price: MIN_PRICE,
            max_price: MAX_PRICE,
            acceptance_threshold: ACCEPTANCE_THRESHOLD,
            max_confidence: MAX_CONFIDENCE,
            max_window: MAX_PRICE_WINDOW,
        }
    }
}

impl ParserConfig {
    /// Parse a JSON config, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_price > 0.0 && self.min_price < self.max_price) {
            return Err(ConfigError::InvalidPriceRange {
                min: self.min_price,
                max: self.max_price,
            });
        }

        for (name, value) in [
            ("acceptance_threshold", self.acceptance_threshold),
            ("max_confidence", self.max_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        if !(1..=PRICE_WINDOW_LIMIT).contains(&self.max_window) {
            return Err(ConfigError::InvalidWindow(self.max_window));
        }

        Ok(())
    }

    /// Whether `price` is a plausible fuel price
    pub fn price_in_range(&self, price: f64) -> bool {
        price >= self.min_price && price <= self.max_price
    }
}
