//! # Caption Tokenization
//!
//! The fixed cleaning pipeline applied to every caption:
//! 1. lowercase, and trim trailing whitespace;
//! 2. surround every non-word character with spaces;
//! 3. split on whitespace;
//! 4. drop punctuation words (see [`PUNCTUATION_WORDS`]).

use std::sync::LazyLock;

use regex::Regex;

use crate::vocab::{EOS_TOKEN, SOS_TOKEN};

/// Words removed from captions after symbol spacing.
pub const PUNCTUATION_WORDS: &[&str] = &[
    "''", "'", "``", "`", ".", "?", "!", ",", ":", "-", "--", "...", ";",
];

/// Word characters are letters, numbers and `_`; combining marks are symbols.
static NON_WORD_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\p{L}\p{N}_])").expect("static symbol pattern"));

static DECIMAL_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Nd}+$").expect("static digit pattern"));

/// Lowercase a caption and trim trailing whitespace.
pub fn lowercase_and_clean_trailing_spaces(caption: &str) -> String {
    caption.to_lowercase().trim_end().to_string()
}

/// Surround every non-word symbol with spaces.
pub fn add_space_between_non_alphanumeric_symbols(caption: &str) -> String {
    NON_WORD_SYMBOL.replace_all(caption, " ${1} ").into_owned()
}

/// Is `word` one of [`PUNCTUATION_WORDS`]?
pub fn is_punctuation_word(word: &str) -> bool {
    PUNCTUATION_WORDS.contains(&word)
}

/// Is `token` made up entirely of decimal digits (any script)?
///
/// Fractions such as `½` and numerals such as `ⅻ` are not digits.
pub fn is_numeric_token(token: &str) -> bool {
    DECIMAL_DIGITS.is_match(token)
}

/// Run the full cleaning pipeline over a caption.
///
/// ## Returns
/// The caption's tokens, without `SOS`/`EOS` markers.
pub fn tokenize_caption(caption: &str) -> Vec<String> {
    let cleaned = lowercase_and_clean_trailing_spaces(caption);
    let spaced = add_space_between_non_alphanumeric_symbols(&cleaned);
    spaced
        .split_whitespace()
        .filter(|w| !is_punctuation_word(w))
        .map(str::to_string)
        .collect()
}

/// Tokenize a caption and wrap it as `[SOS] + tokens + [EOS]`.
pub fn caption_sequence(caption: &str) -> Vec<String> {
    let tokens = tokenize_caption(caption);
    let mut seq = Vec::with_capacity(tokens.len() + 2);
    seq.push(SOS_TOKEN.to_string());
    seq.extend(tokens);
    seq.push(EOS_TOKEN.to_string());
    seq
}
