//! Primitives shared by the per-ecosystem parsers: Unicode folding, token
//! splitting, and the codepoint based encoding of non-numeric tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Unicode punctuation or separator characters, the token boundaries for the
/// generic scheme.
static PUNCTUATION_OR_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{P}\p{Z}]+").unwrap());

/// A run of ASCII digits inside a section, e.g. the `0` in `0bet`.
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)").unwrap());

/// A string holding a single decimal number.
static DECIMAL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+\.[0-9]*|\.?[0-9]+)$").unwrap());

/// Character bracketing digit runs before splitting. Sections have already
/// been split on punctuation, so a literal `-` cannot collide with input.
const DELIMITER: char = '-';

/// Folds the input to Unicode Canonical Composition, so that precomposed and
/// decomposed renderings of the same character encode identically.
pub(crate) fn normalize_unicode(version: &str) -> String {
    version.nfc().collect()
}

/// Whether the string is a decimal number: an integer, an integer with a
/// fraction, or a bare fraction like `.5`.
pub(crate) fn is_number(s: &str) -> bool {
    DECIMAL_NUMBER.is_match(s)
}

/// Encodes a non-numeric token as a decimal number string using the Unicode
/// codepoint of each character. The first codepoint becomes the integer
/// part; every subsequent codepoint is zero-padded to exactly ten digits
/// (0x10FFFF needs at most ten) and appended after a single decimal point.
///
/// `"alpha"` encodes to `"97.0000000108000000011200000001040000000097"`.
pub(crate) fn word_to_decimal(word: &str) -> String {
    let mut decimal = String::new();
    for (index, character) in word.chars().enumerate() {
        if index == 0 {
            decimal = (character as u32).to_string();
            continue;
        }
        if index == 1 {
            decimal.push('.');
        }
        decimal.push_str(&format!("{:010}", character as u32));
    }
    decimal
}

/// Reduces a decimal number string to its canonical form: no leading zeros
/// on the integer part, no trailing zeros on the fraction, and no decimal
/// point at all when the fraction is entirely zero.
pub(crate) fn normalize_decimal(s: &str) -> String {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s, None),
    };

    let mut normalized = if int_part.contains(|c| c != '0') {
        int_part.trim_start_matches('0').to_string()
    } else {
        "0".to_string()
    };

    if let Some(frac_part) = frac_part {
        if frac_part.contains(|c| c != '0') {
            normalized.push('.');
            normalized.push_str(frac_part.trim_end_matches('0'));
        }
    }

    normalized
}

/// Splits a version string into tokens: sections are separated by Unicode
/// punctuation or separators, and within a section every run of ASCII digits
/// becomes its own token, so `1.0bet` yields `1`, `0`, `bet`.
pub(crate) fn split_tokens(version: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for section in PUNCTUATION_OR_SEPARATOR.split(version) {
        let bracketed = DIGIT_RUN.replace_all(section, "-${1}-");
        for piece in bracketed.split(DELIMITER) {
            if !piece.is_empty() {
                tokens.push(piece.to_string());
            }
        }
    }
    tokens
}

/// Tokenizes the version and renders every token as a canonical decimal
/// number string. Numeric tokens are kept verbatim; everything else goes
/// through `convert`.
pub(crate) fn parse_by_separator(version: &str, convert: impl Fn(&str) -> String) -> Vec<String> {
    split_tokens(version)
        .iter()
        .map(|token| {
            if is_number(token) {
                normalize_decimal(token)
            } else {
                normalize_decimal(&convert(token))
            }
        })
        .collect()
}

/// Drops trailing zero segments while more than one segment remains.
pub(crate) fn trim_trailing_zeros(segments: &mut Vec<String>) {
    while segments.len() > 1 && segments.last().is_some_and(|segment| segment == "0") {
        segments.pop();
    }
}
