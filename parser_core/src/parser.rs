//! Entry points for parsing voice transcripts

use lazy_static::lazy_static;
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::ConfigError;
use crate::matcher::FuelMatcher;
use crate::normalizer::{normalize_text, tokenize};
use crate::price::PriceExtractor;
use crate::scanner::TranscriptScanner;
use crate::types::{FuelMatch, FuelTypeDescriptor, ParseResult};

lazy_static! {
    static ref DEFAULT_PARSER: VoiceParser = VoiceParser::new();
}

/// Voice transcript parser
///
/// Holds no per-call state, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct VoiceParser {
    config: ParserConfig,
    price_extractor: PriceExtractor,
}

impl VoiceParser {
    pub fn new() -> Self {
        let config = ParserConfig::default();
        Self {
            price_extractor: PriceExtractor::new(&config),
            config,
        }
    }

    pub fn with_config(config: ParserConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            price_extractor: PriceExtractor::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Extract (fuel, price) candidates from a transcript
    pub fn parse_transcript(&self, transcript: &str, fuel_types: &[FuelTypeDescriptor]) -> ParseResult {
        let normalized = normalize_text(transcript);
        if normalized.is_empty() {
            return ParseResult::empty();
        }

        let tokens = tokenize(&normalized);
        let fuel_matcher = FuelMatcher::with_threshold(fuel_types, self.config.acceptance_threshold);
        let outcome =
            TranscriptScanner::new(&fuel_matcher, &self.price_extractor, self.config.max_confidence)
                .scan(&tokens);

        debug!(
            tokens = tokens.len(),
            candidates = outcome.candidates.len(),
            unmatched = outcome.unmatched.len(),
            "parsed voice transcript"
        );

        // Nothing recognized: report the whole utterance rather than a token salad
        let unmatched = if outcome.candidates.is_empty() && !outcome.unmatched.is_empty() {
            vec![normalized]
        } else {
            outcome.unmatched
        };

        ParseResult {
            transcript: transcript.trim().to_string(),
            candidates: outcome.candidates,
            unmatched,
        }
    }

    /// Decode a price from the whole input
    pub fn parse_spoken_price(&self, text: &str) -> Option<f64> {
        self.price_extractor.parse_spoken_price(text)
    }

    /// Match a single token against the known fuel types
    pub fn normalize_fuel_token(&self, token: &str, fuel_types: &[FuelTypeDescriptor]) -> FuelMatch {
        FuelMatcher::with_threshold(fuel_types, self.config.acceptance_threshold).match_fuel(token)
    }
}

impl Default for VoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a transcript with the default configuration
pub fn parse_voice_transcript(transcript: &str, fuel_types: &[FuelTypeDescriptor]) -> ParseResult {
    DEFAULT_PARSER.parse_transcript(transcript, fuel_types)
}

/// Decode a spoken or literal price with the default configuration
pub fn parse_spoken_price(text: &str) -> Option<f64> {
    DEFAULT_PARSER.parse_spoken_price(text)
}

/// Match a fuel token with the default configuration
pub fn normalize_fuel_token(token: &str, fuel_types: &[FuelTypeDescriptor]) -> FuelMatch {
    DEFAULT_PARSER.normalize_fuel_token(token, fuel_types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fuel_types() -> Vec<FuelTypeDescriptor> {
        vec![
            FuelTypeDescriptor::new("f-e10", "E10").with_display_name("E10"),
            FuelTypeDescriptor::new("f-91", "UNLEADED_91").with_display_name("Unleaded 91"),
            FuelTypeDescriptor::new("f-95", "PREMIUM_95").with_display_name("Premium 95"),
            FuelTypeDescriptor::new("f-98", "PREMIUM_98").with_display_name("Premium 98"),
            FuelTypeDescriptor::new("f-diesel", "DIESEL").with_display_name("Diesel"),
        ]
    }

    fn has_candidate(result: &ParseResult, fuel_id: &str, price: f64) -> bool {
        result
            .candidates
            .iter()
            .any(|c| c.normalized_fuel_id.as_deref() == Some(fuel_id) && (c.price - price).abs() < 1e-9)
    }

    #[test]
    fn test_multiple_pairs_in_order() {
        let result = parse_voice_transcript("E10 three seventy nine and diesel four twenty nine", &fuel_types());

        assert_eq!(result.candidates.len(), 2);
        assert_eq!(result.candidates[0].normalized_fuel_id.as_deref(), Some("f-e10"));
        assert_relative_eq!(result.candidates[0].price, 3.79, epsilon = 1e-9);
        assert_eq!(result.candidates[1].normalized_fuel_id.as_deref(), Some("f-diesel"));
        assert_relative_eq!(result.candidates[1].price, 4.29, epsilon = 1e-9);
    }

    #[test]
    fn test_connective_heard_as_diesel() {
        // "and" contains the one-letter diesel alias, so it claims the next price
        let result = parse_voice_transcript("E10 three seventy nine and diesel four twenty nine", &fuel_types());

        assert_eq!(result.candidates[1].spoken_fuel, "and");
        assert_eq!(result.candidates[1].confidence, 0.9);
        assert_eq!(result.unmatched, vec!["diesel"]);
    }

    #[test]
    fn test_fuel_number_is_not_price() {
        let result = parse_voice_transcript("91 is 3.59", &fuel_types());

        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].normalized_fuel_id.as_deref(), Some("f-91"));
        assert_relative_eq!(result.candidates[0].price, 3.59, epsilon = 1e-9);
        assert_eq!(result.unmatched, vec!["is"]);
    }

    #[test]
    fn test_unknown_fragments_collapse() {
        let result = parse_voice_transcript("Rocket fuel, seven seventy seven!", &fuel_types());

        assert!(result.candidates.is_empty());
        assert_eq!(result.unmatched, vec!["rocket fuel seven seventy seven"]);
        assert_eq!(result.transcript, "Rocket fuel, seven seventy seven!");
    }

    #[test]
    fn test_noisy_continuous_transcript() {
        let result = parse_voice_transcript(
            "u98 $1 u956 u95 $6 E10 $3 diesel $4 u917 u91 7 dollars",
            &fuel_types(),
        );

        assert!(result.candidates.len() >= 4);
        assert!(has_candidate(&result, "f-e10", 3.0));
        assert!(has_candidate(&result, "f-diesel", 4.0));
        assert!(has_candidate(&result, "f-91", 7.0));
        assert!(has_candidate(&result, "f-95", 6.0));

        let fuel_91: Vec<_> = result
            .candidates
            .iter()
            .filter(|c| c.normalized_fuel_id.as_deref() == Some("f-91"))
            .collect();
        assert_eq!(fuel_91.len(), 1);
    }

    #[test]
    fn test_blank_transcript() {
        for input in ["", "   ", "\t\n", "?!"] {
            assert_eq!(parse_voice_transcript(input, &fuel_types()), ParseResult::empty());
        }
    }

    #[test]
    fn test_transcript_is_trimmed() {
        let result = parse_voice_transcript("  diesel 4.29  ", &fuel_types());
        assert_eq!(result.transcript, "diesel 4.29");
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn test_no_known_fuel_types() {
        let result = parse_voice_transcript("diesel 4.29", &[]);
        assert!(result.candidates.is_empty());
        assert_eq!(result.unmatched, vec!["diesel 4.29"]);
    }

    #[test]
    fn test_out_of_range_values_are_skipped() {
        // The pending diesel waits past every implausible value
        let result = parse_voice_transcript("diesel 12 e10 0.3 u95 9.99 u98 fifteen", &fuel_types());

        assert_eq!(result.candidates.len(), 1);
        assert!(has_candidate(&result, "f-diesel", 9.99));
        assert_eq!(result.unmatched, vec!["12", "e10", "0.3", "u95", "fifteen"]);
    }

    #[test]
    fn test_spoken_price_entry_point() {
        assert_relative_eq!(parse_spoken_price("three seventy nine").unwrap(), 3.79, epsilon = 1e-9);
        assert_eq!(parse_spoken_price("rocket"), None);
    }

    #[test]
    fn test_fuel_token_entry_point() {
        let m = normalize_fuel_token("ether", &fuel_types());
        assert_eq!(m.fuel_id.as_deref(), Some("f-e10"));
        assert!(m.confidence >= 0.75);
    }

    #[test]
    fn test_custom_config() {
        let parser = VoiceParser::with_config(ParserConfig {
            max_price: 5.0,
            ..Default::default()
        })
        .unwrap();
        let result = parser.parse_transcript("diesel 7 e10 3.79", &fuel_types());

        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].normalized_fuel_id.as_deref(), Some("f-diesel"));
        assert_relative_eq!(result.candidates[0].price, 3.79, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ParserConfig {
            min_price: 0.0,
            ..Default::default()
        };
        assert!(VoiceParser::with_config(config).is_err());
    }

    #[test]
    fn test_oversized_window_config_rejected() {
        let config = ParserConfig {
            max_window: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            VoiceParser::with_config(config),
            Err(ConfigError::InvalidWindow(usize::MAX))
        ));
    }

    #[test]
    fn test_parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VoiceParser>();
    }
}
