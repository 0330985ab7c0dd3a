//! Fuel matcher - Maps a spoken token onto one of the caller's fuel types

use ahash::AHashMap;
use tracing::trace;

use crate::config::ACCEPTANCE_THRESHOLD;
use crate::normalizer::normalize_text;
use crate::types::{FuelMatch, FuelTypeDescriptor};

/// Confidence levels for each matching tier
pub const EXACT_FUEL_CONFIDENCE: f64 = 0.99; // Token equals a known id/name/label
pub const ALIAS_CONFIDENCE: f64 = 0.98; // Token equals a static alias
pub const PARTIAL_ALIAS_CONFIDENCE: f64 = 0.9; // Token and alias overlap

/// Canonical fuel categories used for alias resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelBucket {
    E10,
    U91,
    P95,
    P98,
    Diesel,
}

impl FuelBucket {
    /// Alias lookup order
    pub const ALL: [FuelBucket; 5] = [
        FuelBucket::E10,
        FuelBucket::U91,
        FuelBucket::P95,
        FuelBucket::P98,
        FuelBucket::Diesel,
    ];

    /// Normalized phrases ASR tends to produce for this fuel
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            FuelBucket::E10 => &["e10", "e ten", "eden", "ether"],
            FuelBucket::U91 => &["u91", "91", "regular", "unleaded", "unleaded 91"],
            FuelBucket::P95 => &["u95", "95", "premium 95"],
            FuelBucket::P98 => &["u98", "98", "premium 98"],
            FuelBucket::Diesel => &["diesel", "d"],
        }
    }

    /// Classify a descriptor by tell-tale substrings in its id, name and label
    pub fn classify(fuel_type: &FuelTypeDescriptor) -> Option<FuelBucket> {
        let text = normalize_text(&format!(
            "{} {} {}",
            fuel_type.id,
            fuel_type.name,
            fuel_type.display_name.as_deref().unwrap_or("")
        ));

        if text.contains("e10") {
            Some(FuelBucket::E10)
        } else if text.contains("diesel") {
            Some(FuelBucket::Diesel)
        } else if text.contains("98") {
            Some(FuelBucket::P98)
        } else if text.contains("95") {
            Some(FuelBucket::P95)
        } else if text.contains("91") || text.contains("unleaded") {
            Some(FuelBucket::U91)
        } else {
            None
        }
    }
}

/// Matches tokens against one call's worth of known fuel types.
///
/// Bucket resolution and label normalization happen once in [`FuelMatcher::new`].
pub struct FuelMatcher {
    bucket_ids: AHashMap<FuelBucket, String>,
    labels: Vec<(String, Vec<String>)>, // (fuel id, normalized id/name/label)
    acceptance_threshold: f64,
}

impl FuelMatcher {
    pub fn new(fuel_types: &[FuelTypeDescriptor]) -> Self {
        Self::with_threshold(fuel_types, ACCEPTANCE_THRESHOLD)
    }

    pub fn with_threshold(fuel_types: &[FuelTypeDescriptor], acceptance_threshold: f64) -> Self {
        let mut bucket_ids = AHashMap::with_capacity(FuelBucket::ALL.len());
        let mut labels = Vec::with_capacity(fuel_types.len());

        for fuel_type in fuel_types {
            // Later descriptors in the same bucket replace earlier ones
            if let Some(bucket) = FuelBucket::classify(fuel_type) {
                bucket_ids.insert(bucket, fuel_type.id.clone());
            }

            let names: Vec<String> = [
                Some(fuel_type.id.as_str()),
                Some(fuel_type.name.as_str()),
                fuel_type.display_name.as_deref(),
            ]
            .into_iter()
            .flatten()
            .map(normalize_text)
            .filter(|name| !name.is_empty())
            .collect();

            labels.push((fuel_type.id.clone(), names));
        }

        Self {
            bucket_ids,
            labels,
            acceptance_threshold,
        }
    }

    /// Fuel id the caller uses for `bucket`, if any descriptor maps to it
    pub fn resolve(&self, bucket: FuelBucket) -> Option<&str> {
        self.bucket_ids.get(&bucket).map(String::as_str)
    }

    /// Score `token` and return the best fuel match.
    ///
    /// The returned match only carries a fuel id when it clears the
    /// acceptance threshold; otherwise it reports the best score seen.
    pub fn match_fuel(&self, token: &str) -> FuelMatch {
        let normalized = normalize_text(token);
        if normalized.is_empty() {
            return FuelMatch::unresolved(token, 0.0);
        }

        let mut best_id: Option<&str> = None;
        let mut best_score = 0.0;

        for bucket in FuelBucket::ALL {
            let fuel_id = self.resolve(bucket);

            for alias in bucket.aliases() {
                if normalized == *alias {
                    best_id = fuel_id;
                    best_score = ALIAS_CONFIDENCE;
                } else if (normalized.contains(*alias) || alias.contains(normalized.as_str()))
                    && best_score < PARTIAL_ALIAS_CONFIDENCE
                {
                    best_id = fuel_id;
                    best_score = PARTIAL_ALIAS_CONFIDENCE;
                }
            }
        }

        for (fuel_id, names) in &self.labels {
            if best_score < EXACT_FUEL_CONFIDENCE && names.iter().any(|name| *name == normalized) {
                best_id = Some(fuel_id.as_str());
                best_score = EXACT_FUEL_CONFIDENCE;
            }
        }

        trace!(token, ?best_id, best_score, "fuel match");

        match best_id {
            Some(fuel_id) if best_score >= self.acceptance_threshold => {
                FuelMatch::resolved(token, fuel_id.to_string(), best_score)
            }
            _ => FuelMatch::unresolved(token, best_score),
        }
    }
}
