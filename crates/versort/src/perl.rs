use once_cell::sync::Lazy;
use regex::Regex;

use crate::version::{ParsedAs, Version};
use crate::VersionParseError;

/// All produced versions are padded to at least this many segments.
const MINIMUM_SEGMENT_COUNT: usize = 3;

// These patterns are based off the lax regular expressions in
// version/regex.pm
// (https://metacpan.org/source/JPEACOCK/version-0.9924/lib/version/regex.pm).
// Lax instead of strict, to accept as many version strings as reasonably
// possible.

/// The decimal version type as defined by version.pm: no leading `v`, zero
/// or one decimal point, optionally a trailing underscore followed by
/// digits. Matches `1`, `1.`, `.2`, `1.2`, `1.002003`, `1.002_003`.
static DECIMAL_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+\.?|[0-9]+\.[0-9]+(_[0-9]+)?|\.[0-9]+(_[0-9]+)?)$").unwrap()
});

/// The dotted-decimal version type as defined by version.pm: starts with a
/// `v` or contains two or more decimal points, optionally a trailing
/// underscore followed by digits. Matches `v1`, `v1.`, `v1.0`, `v1.2.3`,
/// `.2.3`, `1.2.3`, `v1.23_456`, `1.2.3.4.5_6789`.
static DOTTED_DECIMAL_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(v[0-9]+\.?|v[0-9]+(\.[0-9]+)+(_[0-9]+)?|([0-9]+)?(\.[0-9]+){2,}(_[0-9]+)?)$")
        .unwrap()
});

/// Parses a version using the algorithm of Perl's version.pm
/// (<https://metacpan.org/pod/distribution/version/lib/version.pm>), which
/// distinguishes decimal versions (`1.20`) from dotted-decimal v-strings
/// (`v1.2.3`). Both forms are normalized to dotted-decimal for comparison.
pub fn parse_perl(version: &str) -> Result<Version, VersionParseError> {
    if DECIMAL_VERSION.is_match(version) {
        return parse_decimal(version);
    }
    if DOTTED_DECIMAL_VERSION.is_match(version) {
        return parse_v_string(version);
    }
    Err(VersionParseError::Perl {
        version: version.to_string(),
    })
}

fn parse_decimal(version: &str) -> Result<Version, VersionParseError> {
    let stripped = version.replace('_', "");
    let parts: Vec<&str> = stripped.split('.').collect();

    let mut segments = Vec::with_capacity(MINIMUM_SEGMENT_COUNT);
    segments.push(integer_part_segment(parts[0]));
    if parts.len() == 2 {
        segments.extend(fraction_segments(parts[1]));
    }
    pad_to_minimum(&mut segments);

    Version::from_segments(ParsedAs::PerlDecimal, version, segments)
}

fn integer_part_segment(part: &str) -> String {
    // No integer part in the given version string, e.g. ".2".
    if part.is_empty() {
        "0".to_string()
    } else {
        part.to_string()
    }
}

/// The fractional part, right-padded with zeros to a multiple of three and
/// split into three-digit groups, so `1.2` and `1.200` are the same
/// version while `1.2 < 1.25 < 1.3`.
fn fraction_segments(part: &str) -> Vec<String> {
    let mut padded = part.to_string();
    while padded.len() % 3 != 0 {
        padded.push('0');
    }

    let mut segments = Vec::with_capacity(padded.len() / 3);
    let mut rest = padded.as_str();
    while !rest.is_empty() {
        let (group, remainder) = rest.split_at(3);
        segments.push(remove_leading_zeros(group));
        rest = remainder;
    }
    segments
}

fn remove_leading_zeros(s: &str) -> String {
    let trimmed = s.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_v_string(version: &str) -> Result<Version, VersionParseError> {
    let stripped = version.strip_prefix('v').unwrap_or(version).replace('_', "");
    let mut segments: Vec<String> = stripped
        .split('.')
        .map(|field| {
            if field.is_empty() {
                "0".to_string()
            } else {
                field.to_string()
            }
        })
        .collect();
    pad_to_minimum(&mut segments);

    Version::from_segments(ParsedAs::PerlVString, version, segments)
}

fn pad_to_minimum(segments: &mut Vec<String>) {
    while segments.len() < MINIMUM_SEGMENT_COUNT {
        segments.push("0".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::segment_strings;

    #[test]
    fn parses_decimal_versions() {
        let cases: &[(&str, &[&str])] = &[
            ("1a", &[]),
            ("1", &["1", "0", "0"]),
            ("1.", &["1", "0", "0"]),
            (".2", &["0", "200", "0"]),
            ("1.2", &["1", "200", "0"]),
            ("1.02", &["1", "20", "0"]),
            ("1.002", &["1", "2", "0"]),
            ("1.0023", &["1", "2", "300"]),
            ("1.00203", &["1", "2", "30"]),
            ("1.002003", &["1", "2", "3"]),
            ("1.00200304", &["1", "2", "3", "40"]),
            ("1.00200", &["1", "2", "0"]),
            ("_123", &[]),
            ("1_234", &[]),
            ("1._234", &[]),
            ("1.0_2", &["1", "20", "0"]),
            ("82.2_4568", &["82", "245", "680"]),
            ("01.02", &["1", "20", "0"]),
        ];

        for (version, expected) in cases {
            let result = parse_perl(version);
            if expected.is_empty() {
                assert!(result.is_err(), "{version} should fail");
                continue;
            }
            let parsed = result.unwrap();
            assert_eq!(parsed.parsed_as(), ParsedAs::PerlDecimal, "{version}");
            assert_eq!(parsed.original(), *version);
            assert_eq!(&segment_strings(&parsed), expected, "{version}");
        }
    }

    #[test]
    fn parses_v_string_versions() {
        let cases: &[(&str, &[&str])] = &[
            ("v", &[]),
            ("v1", &["1", "0", "0"]),
            ("v1.", &["1", "0", "0"]),
            (".1.2", &["0", "1", "2"]),
            ("v.1.2", &[]),
            ("v1.2", &["1", "2", "0"]),
            ("v1.2345", &["1", "2345", "0"]),
            ("v1.2.3", &["1", "2", "3"]),
            ("v1.2.3.4", &["1", "2", "3", "4"]),
            ("v_123", &[]),
            ("v1_234", &[]),
            ("v1._234", &[]),
            ("v1.0_2", &["1", "2", "0"]),
            ("v1.02", &["1", "2", "0"]),
        ];

        for (version, expected) in cases {
            let result = parse_perl(version);
            if expected.is_empty() {
                assert!(result.is_err(), "{version} should fail");
                continue;
            }
            let parsed = result.unwrap();
            assert_eq!(parsed.parsed_as(), ParsedAs::PerlVString, "{version}");
            assert_eq!(parsed.original(), *version);
            assert_eq!(&segment_strings(&parsed), expected, "{version}");
        }
    }
}
