//! Transcript normalization and tokenization

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISALLOWED_CHARS: Regex = Regex::new(r"[^a-z0-9.\s]").expect("Invalid regex pattern");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("Invalid regex pattern");
    // ASR sometimes glues a fuel code to the price that follows it: "u956"
    static ref COMPACT_FUEL_PRICE: Regex =
        Regex::new(r"^(u91|u95|u98|e10|diesel)(\d{1,2}(?:\.\d{1,2})?)$").expect("Invalid regex pattern");
}

/// Lower-case, replace anything but `a-z`, `0-9`, `.` and whitespace with a
/// space, collapse whitespace and trim.
///
/// Total and idempotent.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED_CHARS.replace_all(&lowered, " ");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

/// Split a compact `<fuelcode><price>` token into its two parts.
///
/// Tokens that do not match come back as a single normalized token.
pub fn expand_compact_token(token: &str) -> Vec<String> {
    let normalized = normalize_text(token);
    let joined: String = normalized.split_whitespace().collect();

    match COMPACT_FUEL_PRICE.captures(&joined) {
        Some(caps) => vec![caps[1].to_string(), caps[2].to_string()],
        None => vec![normalized],
    }
}

/// Normalize a transcript and split it into scanner tokens
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .flat_map(expand_compact_token)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::punctuation("E10: $3.79!", "e10 3.79")]
    #[case::whitespace("  diesel \t\n four  ", "diesel four")]
    #[case::underscores("UNLEADED_91", "unleaded 91")]
    #[case::non_ascii("Prémium 95", "pr mium 95")]
    #[case::empty("", "")]
    fn test_normalize_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_text(input), expected);
    }

    #[rstest]
    #[case("E10 three, seventy-nine")]
    #[case("  $4.29 -- DIESEL ")]
    #[case("u956 U95 $6")]
    fn test_normalize_is_idempotent(#[case] input: &str) {
        let once = normalize_text(input);
        assert_eq!(normalize_text(&once), once);
    }

    #[rstest]
    #[case::single_digit("u956", &["u95", "6"])]
    #[case::decimal("e103.5", &["e10", "3.5"])]
    #[case::diesel("diesel4", &["diesel", "4"])]
    #[case::plain_code("u91", &["u91"])]
    #[case::too_many_digits("u95123", &["u95123"])]
    #[case::unknown_code("x956", &["x956"])]
    fn test_expand_compact_token(#[case] token: &str, #[case] expected: &[&str]) {
        assert_eq!(expand_compact_token(token), expected);
    }

    #[test]
    fn test_tokenize_expands_glued_tokens() {
        let tokens = tokenize("u98 $1 u956 u95 $6");
        assert_eq!(tokens, vec!["u98", "1", "u95", "6", "u95", "6"]);
    }

    #[test]
    fn test_tokenize_blank_input() {
        assert!(tokenize("   ").is_empty());
    }
}
