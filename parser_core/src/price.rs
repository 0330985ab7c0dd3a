//! Price extraction from spoken or literal number fragments
//!
//! Decoders are tried in a fixed order and the first one producing a value in
//! the plausible price range wins:
//! 1. numeric literal (`3.79`)
//! 2. bare three-digit cents (`379`)
//! 3. "point" form (`three point seven nine`)
//! 4. dollars and cents (`three seventy nine`)
//! 5. whole number (`seven`)

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::config::ParserConfig;
use crate::normalizer::normalize_text;
use crate::numbers::{compose_number, digit_word, is_price_word, is_unit_word, number_word, POINT_WORD};
use crate::types::PriceMatch;

lazy_static! {
    static ref NUMERIC_LITERAL: Regex = Regex::new(r"\b\d+(?:\.\d{1,2})?\b").expect("Invalid regex pattern");
    static ref COMPACT_CENTS: Regex = Regex::new(r"\b\d{3}\b").expect("Invalid regex pattern");
    static ref NUMERIC_TOKEN: Regex = Regex::new(r"^\d+(?:\.\d+)?$").expect("Invalid regex pattern");
}

/// Decodes prices within a configured plausible range
#[derive(Debug, Clone)]
pub struct PriceExtractor {
    min_price: f64,
    max_price: f64,
    max_window: usize,
}

impl PriceExtractor {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            min_price: config.min_price,
            max_price: config.max_price,
            max_window: config.max_window,
        }
    }

    fn accept(&self, price: f64) -> Option<f64> {
        (price >= self.min_price && price <= self.max_price).then_some(price)
    }

    /// Decode a price from free text, or `None` if nothing plausible is found
    pub fn parse_spoken_price(&self, input: &str) -> Option<f64> {
        let normalized = normalize_text(input);
        if normalized.is_empty() {
            return None;
        }

        if let Some(price) = NUMERIC_LITERAL
            .find(&normalized)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .and_then(|value| self.accept(value))
        {
            return Some(price);
        }

        if let Some(price) = COMPACT_CENTS
            .find(&normalized)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .and_then(|value| self.accept(value / 100.0))
        {
            return Some(price);
        }

        let words: Vec<&str> = normalized
            .split(' ')
            .filter(|word| is_price_word(word) && !is_unit_word(word))
            .collect();

        if words.is_empty() {
            return None;
        }

        self.decode_point_form(&words)
            .or_else(|| self.decode_dollars_and_cents(&words))
            .or_else(|| compose_number(&words).and_then(|whole| self.accept(f64::from(whole))))
    }

    /// "three point seven nine" -> 3.79
    fn decode_point_form(&self, words: &[&str]) -> Option<f64> {
        let point = words.iter().position(|word| *word == POINT_WORD).filter(|&i| i > 0)?;
        let dollars = compose_number(&words[..point])?;

        let decimals = &words[point + 1..];
        if decimals.is_empty() {
            return None;
        }

        let digits = decimals
            .iter()
            .map(|word| digit_word(word).and_then(|d| char::from_digit(d, 10)))
            .collect::<Option<String>>()?;

        format!("{dollars}.{digits}")
            .parse::<f64>()
            .ok()
            .and_then(|price| self.accept(price))
    }

    /// "three seventy nine" -> 3.79, "four oh five" -> 4.05
    fn decode_dollars_and_cents(&self, words: &[&str]) -> Option<f64> {
        if words.len() < 2 {
            return None;
        }

        let dollars = number_word(words[0]).filter(|d| *d < 10)?;
        let cents = compose_number(&words[1..words.len().min(3)])?;

        self.accept(f64::from(dollars) + f64::from(cents) / 100.0)
    }

    /// Decode a price from the tokens starting at `start`.
    ///
    /// Longer windows are tried first so multi-word phrases beat a partial
    /// match. Every token in a window must be numeric or price vocabulary.
    pub fn parse_price_window(&self, tokens: &[String], start: usize) -> Option<PriceMatch> {
        if start >= tokens.len() {
            return None;
        }

        let longest = self.max_window.min(tokens.len() - start);
        for length in (1..=longest).rev() {
            let chunk = &tokens[start..start + length];

            if !chunk.iter().all(|token| is_price_token(token)) {
                continue;
            }

            if let Some(price) = self.parse_spoken_price(&chunk.join(" ")) {
                trace!(start, consumed = chunk.len(), price, "decoded price window");
                return Some(PriceMatch {
                    price,
                    tokens_consumed: chunk.len(),
                });
            }
        }

        None
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

/// A token that can take part in a price window
pub fn is_price_token(token: &str) -> bool {
    !token.is_empty() && (NUMERIC_TOKEN.is_match(token) || is_price_word(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn tokens(text: &str) -> Vec<String> {
        text.split(' ').map(str::to_string).collect()
    }

    #[rstest]
    #[case::literal("3.79", 3.79)]
    #[case::literal_with_symbol("$4.29", 4.29)]
    #[case::compact_cents("395", 3.95)]
    #[case::point_form("three point seven nine", 3.79)]
    #[case::point_single_digit("four point five", 4.5)]
    #[case::dollars_and_cents("three seventy nine", 3.79)]
    #[case::dollars_and_digit_pair("two four nine", 2.49)]
    #[case::dollars_oh_cents("four oh five", 4.05)]
    #[case::whole_word("seven", 7.0)]
    #[case::whole_with_unit("seven dollars", 7.0)]
    #[case::literal_with_unit("7 dollars", 7.0)]
    fn test_parse_spoken_price(#[case] input: &str, #[case] expected: f64) {
        let extractor = PriceExtractor::default();
        let price = extractor.parse_spoken_price(input).unwrap();
        assert_relative_eq!(price, expected, epsilon = 1e-9);
    }

    #[rstest]
    #[case::too_high("12.50")]
    #[case::too_low("0.2")]
    #[case::teen_whole("fifteen")]
    #[case::no_numbers("hello there")]
    #[case::point_without_decimals("three point")]
    #[case::point_first("point five")]
    #[case::units_only("dollars")]
    #[case::empty("")]
    fn test_parse_spoken_price_rejects(#[case] input: &str) {
        assert_eq!(PriceExtractor::default().parse_spoken_price(input), None);
    }

    #[test]
    fn test_encodings_agree() {
        let extractor = PriceExtractor::default();
        for input in ["3.79", "three seventy nine", "three point seven nine"] {
            assert_relative_eq!(extractor.parse_spoken_price(input).unwrap(), 3.79, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_window_prefers_longest_phrase() {
        let extractor = PriceExtractor::default();
        let result = extractor
            .parse_price_window(&tokens("four twenty nine and"), 0)
            .unwrap();
        assert_relative_eq!(result.price, 4.29, epsilon = 1e-9);
        assert_eq!(result.tokens_consumed, 3);
    }

    #[test]
    fn test_window_stops_at_non_price_token() {
        let extractor = PriceExtractor::default();
        let result = extractor.parse_price_window(&tokens("6 u95 6"), 0).unwrap();
        assert_relative_eq!(result.price, 6.0);
        assert_eq!(result.tokens_consumed, 1);
    }

    #[test]
    fn test_window_truncated_at_end() {
        let extractor = PriceExtractor::default();
        let result = extractor.parse_price_window(&tokens("is 3.59"), 1).unwrap();
        assert_relative_eq!(result.price, 3.59, epsilon = 1e-9);
        assert_eq!(result.tokens_consumed, 1);
    }

    #[test]
    fn test_wide_window_near_end() {
        let config = ParserConfig {
            max_window: 6,
            ..Default::default()
        };
        let extractor = PriceExtractor::new(&config);
        let words = tokens("diesel four twenty nine");

        let result = extractor.parse_price_window(&words, 1).unwrap();
        assert_relative_eq!(result.price, 4.29, epsilon = 1e-9);
        assert_eq!(result.tokens_consumed, 3);

        let last = extractor.parse_price_window(&words, 3).unwrap();
        assert_relative_eq!(last.price, 9.0);
        assert_eq!(last.tokens_consumed, 1);
    }

    #[test]
    fn test_window_rejects_filler() {
        let extractor = PriceExtractor::default();
        assert_eq!(extractor.parse_price_window(&tokens("is 3.59"), 0), None);
        assert_eq!(extractor.parse_price_window(&tokens("is"), 5), None);
    }

    #[test]
    fn test_custom_range() {
        let config = ParserConfig {
            max_price: 3.0,
            ..Default::default()
        };
        let extractor = PriceExtractor::new(&config);
        assert_eq!(extractor.parse_spoken_price("3.79"), None);
        assert_relative_eq!(extractor.parse_spoken_price("2.99").unwrap(), 2.99, epsilon = 1e-9);
    }

    #[test]
    fn test_price_tokens() {
        assert!(is_price_token("3.79"));
        assert!(is_price_token("seventy"));
        assert!(is_price_token("cents"));
        assert!(!is_price_token("3."));
        assert!(!is_price_token("u95"));
        assert!(!is_price_token(""));
    }
}
