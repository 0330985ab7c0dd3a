//! Spoken number vocabulary

const NUMBER_WORDS: &[(&str, u32)] = &[
    ("zero", 0),
    ("oh", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

pub const POINT_WORD: &str = "point";

const UNIT_WORDS: &[&str] = &["dollar", "dollars", "cent", "cents"];

/// Value of a single number word
pub fn number_word(word: &str) -> Option<u32> {
    NUMBER_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, value)| *value)
}

/// A number word below ten
pub fn digit_word(word: &str) -> Option<u32> {
    number_word(word).filter(|value| *value < 10)
}

pub fn is_unit_word(word: &str) -> bool {
    UNIT_WORDS.contains(&word)
}

/// Number words, `point`, and currency units
pub fn is_price_word(word: &str) -> bool {
    word == POINT_WORD || is_unit_word(word) || number_word(word).is_some()
}

/// Compose up to two number words with the tens+ones rule.
///
/// `a b` composes to `a + b` when `a` is a multiple of ten from twenty up and
/// `b < 10`, or to `a * 10 + b` when both are below ten. Any other pair does
/// not compose. Words past the second are ignored.
pub fn compose_number(words: &[&str]) -> Option<u32> {
    match words {
        [] => None,
        [single] => number_word(single),
        [first, second, ..] => {
            let a = number_word(first)?;
            let b = number_word(second)?;

            if a >= 20 && a % 10 == 0 && b < 10 {
                Some(a + b)
            } else if a < 10 && b < 10 {
                Some(a * 10 + b)
            } else {
                None
            }
        }
    }
}
