use once_cell::sync::Lazy;
use regex::Regex;

use crate::segment::word_to_decimal;
use crate::version::{ParsedAs, Version};
use crate::VersionParseError;

/// The whole-string validity pattern used by rubygems.
static RUBY_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A\s*[0-9]+(\.[0-9a-zA-Z]+)*(-[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?\s*\z").unwrap()
});

/// A version token: a run of digits or a run of letters.
static RUBY_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+|[A-Za-z]+").unwrap());

/// A string token must compare less than any numeric token at the same
/// position, so every one is preceded by this marker.
const STRING_TOKEN_MARKER: &str = "-1";

/// Parses a version according to the same rules used by rubygems
/// (<https://github.com/rubygems/rubygems>): a dash starts the pre-release
/// part, and textual segments sort below numeric ones.
pub fn parse_ruby(version: &str) -> Result<Version, VersionParseError> {
    let mut trimmed = version.trim();
    if trimmed.is_empty() {
        trimmed = "0";
    }

    if !RUBY_VERSION.is_match(trimmed) {
        return Err(VersionParseError::Ruby {
            version: version.to_string(),
        });
    }

    let replaced = trimmed.replace('-', ".pre.");

    let mut tokens = split_tokens(&replaced);
    if tokens.is_empty() {
        tokens.push("0".to_string());
    }

    let mut segments = Vec::with_capacity(tokens.len());
    for token in &tokens {
        if token.parse::<i64>().is_ok() {
            segments.push(token.clone());
        } else {
            segments.push(STRING_TOKEN_MARKER.to_string());
            segments.push(word_to_decimal(token));
        }
    }

    Version::from_segments(ParsedAs::Ruby, version, segments)
}

/// Splits the version into a leading block of numeric tokens and the block
/// that follows the first textual token. Numeric tokens are normalized
/// (`002` becomes `2`) and each block drops its trailing zeros, which is
/// what makes `1.2` and `1.2.0` equal.
fn split_tokens(version: &str) -> Vec<String> {
    let tokens: Vec<&str> = RUBY_TOKEN
        .find_iter(version)
        .map(|found| found.as_str())
        .collect();

    let mut before: Vec<String> = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
        match tokens[index].parse::<i64>() {
            Ok(number) => before.push(number.to_string()),
            Err(_) => break,
        }
        index += 1;
    }

    let mut after: Vec<String> = Vec::new();
    while index < tokens.len() {
        match tokens[index].parse::<i64>() {
            Ok(number) => after.push(number.to_string()),
            Err(_) => after.push(tokens[index].to_string()),
        }
        index += 1;
    }

    drop_trailing_zeros(&mut before);
    drop_trailing_zeros(&mut after);

    before.extend(after);
    before
}

fn drop_trailing_zeros(tokens: &mut Vec<String>) {
    while tokens.last().is_some_and(|token| token == "0") {
        tokens.pop();
    }
}
