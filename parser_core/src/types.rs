//! Core data types for parser results

use serde::{Deserialize, Serialize};

/// A fuel type known to the caller
///
/// Supplied wholesale on every parse call. The parser never stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelTypeDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A (fuel, price) pair extracted from a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCandidate {
    pub spoken_fuel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_fuel_id: Option<String>,
    pub price: f64,
    pub confidence: f64,
}

/// Outcome of parsing one transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub transcript: String,
    pub candidates: Vec<VoiceCandidate>,
    pub unmatched: Vec<String>,
}

/// Best fuel match found for a single token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_id: Option<String>,
    pub confidence: f64,
    pub spoken_fuel: String,
}

/// A decoded price and the number of tokens it spans
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceMatch {
    pub price: f64,
    pub tokens_consumed: usize,
}

impl FuelTypeDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Human label, falling back to the canonical name
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

impl FuelMatch {
    /// A match with no resolved fuel id
    pub fn unresolved(spoken_fuel: &str, confidence: f64) -> Self {
        Self {
            fuel_id: None,
            confidence,
            spoken_fuel: spoken_fuel.to_string(),
        }
    }

    pub fn resolved(spoken_fuel: &str, fuel_id: String, confidence: f64) -> Self {
        Self {
            fuel_id: Some(fuel_id),
            confidence,
            spoken_fuel: spoken_fuel.to_string(),
        }
    }
}

impl ParseResult {
    /// Result for an empty or whitespace-only transcript
    pub fn empty() -> Self {
        Self::default()
    }
}
