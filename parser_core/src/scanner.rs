//! Transcript scanner - alternates between fuel and price expectations over
//! the token stream

use ahash::AHashSet;
use tracing::trace;

use crate::matcher::FuelMatcher;
use crate::price::PriceExtractor;
use crate::types::{FuelMatch, VoiceCandidate};

enum ScanState {
    ExpectFuel,
    ExpectPrice { pending: FuelMatch },
}

/// Raw scanner output, before the unmatched-fragment policy is applied
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub candidates: Vec<VoiceCandidate>,
    pub unmatched: Vec<String>,
}

pub struct TranscriptScanner<'a> {
    fuel_matcher: &'a FuelMatcher,
    price_extractor: &'a PriceExtractor,
    max_confidence: f64,
}

impl<'a> TranscriptScanner<'a> {
    pub fn new(
        fuel_matcher: &'a FuelMatcher,
        price_extractor: &'a PriceExtractor,
        max_confidence: f64,
    ) -> Self {
        Self {
            fuel_matcher,
            price_extractor,
            max_confidence,
        }
    }

    /// Walk `tokens` once, pairing each accepted fuel with the next price.
    ///
    /// A pending fuel survives filler tokens until a price turns up; tokens
    /// that are neither land in `unmatched`.
    pub fn scan(&self, tokens: &[String]) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        let mut state = ScanState::ExpectFuel;
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];

            state = match state {
                ScanState::ExpectFuel => {
                    index += 1;
                    let fuel = self.fuel_matcher.match_fuel(token);
                    if fuel.fuel_id.is_some() {
                        trace!(token = token.as_str(), confidence = fuel.confidence, "pending fuel");
                        ScanState::ExpectPrice { pending: fuel }
                    } else {
                        outcome.unmatched.push(token.clone());
                        ScanState::ExpectFuel
                    }
                }
                ScanState::ExpectPrice { pending } => {
                    match self.price_extractor.parse_price_window(tokens, index) {
                        Some(price) => {
                            index += price.tokens_consumed;
                            outcome.candidates.push(VoiceCandidate {
                                spoken_fuel: pending.spoken_fuel,
                                normalized_fuel_id: pending.fuel_id,
                                price: price.price,
                                confidence: round_confidence(pending.confidence.min(self.max_confidence)),
                            });
                            ScanState::ExpectFuel
                        }
                        None => {
                            index += 1;
                            outcome.unmatched.push(token.clone());
                            ScanState::ExpectPrice { pending }
                        }
                    }
                }
            };
        }

        outcome.candidates = dedupe(outcome.candidates);
        outcome
    }
}

fn round_confidence(confidence: f64) -> f64 {
    (confidence * 100.0).round() / 100.0
}

/// Drop repeated (fuel, price) pairs, keeping the first occurrence
pub fn dedupe(candidates: Vec<VoiceCandidate>) -> Vec<VoiceCandidate> {
    let mut seen = AHashSet::with_capacity(candidates.len());

    candidates
        .into_iter()
        .filter(|candidate| {
            let fuel = candidate
                .normalized_fuel_id
                .clone()
                .unwrap_or_else(|| candidate.spoken_fuel.clone());
            seen.insert((fuel, format!("{:.2}", candidate.price)))
        })
        .collect()
}
