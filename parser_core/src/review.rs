//! Review entries - the editable form of parse results, and their conversion
//! into submission entries once the user has confirmed them

use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::error::ReviewError;
use crate::types::{FuelTypeDescriptor, ParseResult, VoiceCandidate};

/// Coarse confidence label shown next to each entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.9 {
            ConfidenceBand::High
        } else if confidence >= 0.8 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// A candidate as the user edits it; price is kept as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub id: String,
    pub selected: bool,
    pub spoken_fuel: String,
    pub fuel_type_id: String,
    pub price: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelSubmissionEntry {
    pub fuel_type_id: String,
    pub fuel_type_name: String,
    pub price: f64,
}

impl ReviewEntry {
    pub fn from_candidate(index: usize, candidate: &VoiceCandidate) -> Self {
        Self {
            id: format!("voice-{index}"),
            selected: true,
            spoken_fuel: candidate.spoken_fuel.clone(),
            fuel_type_id: candidate.normalized_fuel_id.clone().unwrap_or_default(),
            price: format!("{:.2}", candidate.price),
            confidence: candidate.confidence,
        }
    }

    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

/// One pre-selected review entry per candidate
pub fn review_entries(result: &ParseResult) -> Vec<ReviewEntry> {
    result
        .candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| ReviewEntry::from_candidate(index, candidate))
        .collect()
}

/// Turn the selected review entries into submission entries.
///
/// Fails on the first entry that lacks a known fuel type or a plausible price.
pub fn apply_selections(
    entries: &[ReviewEntry],
    fuel_types: &[FuelTypeDescriptor],
    config: &ParserConfig,
) -> Result<Vec<FuelSubmissionEntry>, ReviewError> {
    let selected: Vec<&ReviewEntry> = entries.iter().filter(|e| e.selected).collect();
    if selected.is_empty() {
        return Err(ReviewError::NothingSelected);
    }

    let mut submissions = Vec::with_capacity(selected.len());

    for entry in selected {
        if entry.fuel_type_id.trim().is_empty() {
            return Err(ReviewError::MissingFuelType {
                spoken_fuel: entry.spoken_fuel.clone(),
            });
        }

        let fuel_type = fuel_types
            .iter()
            .find(|f| f.id == entry.fuel_type_id)
            .ok_or_else(|| ReviewError::UnknownFuelType {
                fuel_type_id: entry.fuel_type_id.clone(),
            })?;

        let price = parse_entered_price(&entry.price).ok_or_else(|| ReviewError::InvalidPrice {
            spoken_fuel: entry.spoken_fuel.clone(),
            value: entry.price.clone(),
        })?;

        if !config.price_in_range(price) {
            return Err(ReviewError::PriceOutOfRange {
                spoken_fuel: entry.spoken_fuel.clone(),
                price,
            });
        }

        submissions.push(FuelSubmissionEntry {
            fuel_type_id: fuel_type.id.clone(),
            fuel_type_name: fuel_type.label().to_string(),
            price,
        });
    }

    Ok(submissions)
}

fn parse_entered_price(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    digits.parse::<f64>().ok().filter(|price| price.is_finite())
}
