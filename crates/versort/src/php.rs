use once_cell::sync::Lazy;
use regex::Regex;

use crate::version::{ParsedAs, Version};
use crate::VersionParseError;

/// An `X as Y` alias; only the aliased version participates in ordering.
static ALIAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^,\s]+) +as +([^,\s]+)$").unwrap());

/// A trailing `@stability` flag, which composer strips before parsing.
static AT_STABILITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)@(?:stable|RC|beta|alpha|dev)$").unwrap());

/// Build metadata after a `+`, ignored for ordering.
static BUILD_METADATA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^,\s+]+)\+[^\s]+$").unwrap());

/// The classical `major.minor.patch.extra` form with an optional stability
/// suffix and dev flag.
static CLASSICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^v?([0-9]{1,5})(\.[0-9]+)?(\.[0-9]+)?(\.[0-9]+)?[._-]?(?:(stable|beta|b|RC|alpha|a|patch|pl|p)((?:[.-]?[0-9]+)*)?)?([.-]?dev)?$",
    )
    .unwrap()
});

/// The datetime form: a four digit year, one to six two-digit fields, and
/// an optional short tail, with `.`, `:` or `-` as separators.
static DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^v?([0-9]{4}(?:[.:-]?[0-9]{2}){1,6}(?:[.:-]?[0-9]{1,3})?)[._-]?(?:(stable|beta|b|RC|alpha|a|patch|pl|p)((?:[.-]?[0-9]+)*)?)?([.-]?dev)?$",
    )
    .unwrap()
});

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());
static DIGIT_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9])([a-zA-Z])").unwrap());
static LETTER_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-zA-Z])([0-9])").unwrap());

/// Inserted before a `patch` modifier when the leading block is short; what
/// makes datetime style versions sort correctly against classical
/// four-segment versions.
const DATETIME_PATCH_PADDING: &str = "1000000000";

/// Inserted in place of a missing fourth segment, and appended after a
/// trailing modifier so that `1.0.patch < 1.0.patch.0`.
const HALF_STEP_DOWN: &str = "-0.5";

/// Parses a version using the same rules as composer
/// (<https://github.com/composer/semver>). Inputs composer tolerates but
/// that have no total order, such as `1.x` or `dev-master` branch names,
/// are rejected.
pub fn parse_php(version: &str) -> Result<Version, VersionParseError> {
    let normalized = normalize(version)?;

    let mut replaced = normalized.replace(['_', '-', '+'], ".");
    replaced = DIGIT_LETTER.replace_all(&replaced, "${1}.${2}").into_owned();
    replaced = LETTER_DIGIT.replace_all(&replaced, "${1}.${2}").into_owned();

    let segments = convert_segments(replaced.split('.'));
    Version::from_segments(ParsedAs::Php, version, segments)
}

/// Maps modifier tokens to their signed sentinels and inserts the padding
/// segments that keep short and datetime style versions ordered against
/// four-segment ones.
fn convert_segments<'a>(split: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut results: Vec<String> = Vec::new();
    let mut leading_segment_count = 0;
    let mut has_modifier = false;
    let mut last_is_modifier = false;

    for segment in split {
        let modifier = match segment {
            "dev" => Some("-4"),
            "alpha" => Some("-3"),
            "beta" => Some("-2"),
            "RC" => Some("-1"),
            "patch" => Some("0.5"),
            _ => None,
        };
        match modifier {
            Some(value) => {
                has_modifier = true;
                last_is_modifier = true;
                results.push(value.to_string());
            }
            None => {
                if !has_modifier {
                    leading_segment_count += 1;
                }
                last_is_modifier = false;
                results.push(segment.to_string());
            }
        }
    }

    if leading_segment_count < 4 {
        let padding = if results.get(leading_segment_count).map(String::as_str) == Some("0.5") {
            DATETIME_PATCH_PADDING
        } else {
            HALF_STEP_DOWN
        };
        results.insert(leading_segment_count, padding.to_string());
    }

    // Ensure that "1.0.patch" < "1.0.patch.0".
    if last_is_modifier {
        results.push(HALF_STEP_DOWN.to_string());
    }

    results
}

fn expand_stability(stability: &str) -> &str {
    match stability {
        "a" => "alpha",
        "b" => "beta",
        "p" | "pl" => "patch",
        "rc" => "RC",
        other => other,
    }
}

/// Reimplements composer's `Semver\VersionParser::normalize`: strip alias,
/// stability and build tails, match the classical or datetime shape, and
/// re-append the expanded modifiers.
fn normalize(version: &str) -> Result<String, VersionParseError> {
    let error = || VersionParseError::Php {
        version: version.to_string(),
    };

    // Extra whitespace and case are tolerated.
    let mut v = version.trim().to_lowercase();

    if let Some(aliased) = ALIAS.captures(&v).map(|captures| captures[1].to_string()) {
        v = aliased;
    }
    if let Some(stability_start) = AT_STABILITY.find(&v).map(|found| found.start()) {
        v.truncate(stability_start);
    }
    if let Some(stripped) = BUILD_METADATA.captures(&v).map(|captures| captures[1].to_string()) {
        v = stripped;
    }

    // (normalized, stability, stability numbers, dev flag)
    let matched = if let Some(captures) = CLASSICAL.captures(&v) {
        let mut normalized = captures[1].to_string();
        for group in 2..=4 {
            normalized.push_str(captures.get(group).map_or(".0", |m| m.as_str()));
        }
        Some((
            normalized,
            captures.get(5).map(|m| m.as_str().to_string()),
            captures.get(6).map(|m| m.as_str().to_string()),
            captures.get(7).is_some(),
        ))
    } else if let Some(captures) = DATETIME.captures(&v) {
        Some((
            NON_DIGIT.replace_all(&captures[1], ".").into_owned(),
            captures.get(2).map(|m| m.as_str().to_string()),
            captures.get(3).map(|m| m.as_str().to_string()),
            captures.get(4).is_some(),
        ))
    } else {
        None
    };
    let Some((mut normalized, stability, numbers, dev)) = matched else {
        return Err(error());
    };

    if let Some(stability) = stability {
        // A "stable" suffix adds nothing, not even a dev flag.
        if stability == "stable" {
            return Ok(normalized);
        }
        normalized.push('-');
        normalized.push_str(expand_stability(&stability));
        if let Some(numbers) = numbers.filter(|numbers| !numbers.is_empty()) {
            normalized.push_str(numbers.trim_start_matches(['.', '-']));
        }
    }
    if dev {
        normalized.push_str("-dev");
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;
    use crate::compare;

    #[test]
    fn normalizes_composer_versions() {
        let cases = [
            (" 1.0.0", "1.0.0.0"),
            ("0", "0.0.0.0"),
            ("0.000.103.204", "0.000.103.204"),
            ("00.01.03.04", "00.01.03.04"),
            ("000.001.003.004", "000.001.003.004"),
            ("0000000", "0000000"),
            ("0000000000001", "0000000000001"),
            ("0700", "0700.0.0.0"),
            ("1.0", "1.0.0.0"),
            ("1.0-dev", "1.0.0.0-dev"),
            ("1.0.0 ", "1.0.0.0"),
            ("1.0.0", "1.0.0.0"),
            ("1.0.0+foo as 2.0", "1.0.0.0"),
            ("1.0.0+foo", "1.0.0.0"),
            ("1.0.0+foo@dev", "1.0.0.0"),
            ("1.0.0-alpha-2.1-3+foo", "1.0.0.0-alpha2.1-3"),
            ("1.0.0-alpha.3.1+foo", "1.0.0.0-alpha3.1"),
            ("1.0.0-alpha2.1+foo", "1.0.0.0-alpha2.1"),
            ("1.0.0-beta.5+foo", "1.0.0.0-beta5"),
            ("1.0.0-rC15-dev", "1.0.0.0-RC15-dev"),
            ("1.0.0-rc1", "1.0.0.0-RC1"),
            ("1.0.0-stable", "1.0.0.0"),
            ("1.0.0.RC.15-dev", "1.0.0.0-RC15-dev"),
            ("1.0.0.pl3-dev", "1.0.0.0-patch3-dev"),
            ("1.0.0RC1dev", "1.0.0.0-RC1-dev"),
            ("1.13.11.0-beta0", "1.13.11.0-beta0"),
            ("1.2.3.4", "1.2.3.4"),
            ("10.4.13-b", "10.4.13.0-beta"),
            ("10.4.13-b5", "10.4.13.0-beta5"),
            ("10.4.13-beta", "10.4.13.0-beta"),
            ("10.4.13beta.2", "10.4.13.0-beta2"),
            ("10.4.13beta2", "10.4.13.0-beta2"),
            ("2010-01-02", "2010.01.02"),
            ("2010-01-02.5", "2010.01.02.5"),
            ("2010.01", "2010.01.0.0"),
            ("2010.01.02", "2010.01.02.0"),
            ("2010.1.555", "2010.1.555.0"),
            ("2010.10.200", "2010.10.200.0"),
            ("20100102-203040", "20100102.203040"),
            ("20100102-203040-p1", "20100102.203040-patch1"),
            ("20100102203040-10", "20100102203040.10"),
            ("2012.06.07", "2012.06.07.0"),
            ("201903.0", "201903.0"),
            ("201903.0-p2", "201903.0-patch2"),
            ("v1.0.0", "1.0.0.0"),
            ("v1.13.11-beta.0", "1.13.11.0-beta0"),
            ("v20100102", "20100102"),
        ];
        for (input, expected) in cases {
            let normalized = normalize(input).unwrap();
            assert_eq!(normalized, expected, "normalize({input})");
        }
    }

    #[test]
    fn rejects_unorderable_versions() {
        let invalid = [
            " as ",
            " as 1.2",
            "",
            "1.*",
            "1.0 .2",
            "1.0.0#",
            "1.0.0+foo bar",
            "1.0.0-dev<1.0.5-dev",
            "1.0.0-meh",
            "1.0.0.0.0",
            "1.0.0.abc",
            "1.0.0.alpha2.99.beta",
            "1.0.0<1.0.5-dev",
            "1.0.1-SNAPSHOT",
            "1.0.alpha.beta",
            "1.p.0.p",
            "1.x",
            "2010-1-555",
            "20100102.203040.0.1",
            "2147483647.0.0.0",
            "^",
            "^1",
            "^8 || ^",
            "a",
            "alpha",
            "feature-foo",
            "foo bar-dev",
            "~",
            "~1 ~",
            "~1",
            // These may be allowed as "versions" in certain PHP scenarios,
            // but they are not sortable, so they are rejected here.
            "041.x-dev",
            "1.x-dev",
            "2.0.*-dev",
            "20100102.203040.x-dev",
            "20100102.x-dev",
            "2010102.203040dev",
            "201903.x-dev",
            "DEV-FOOBAR",
            "dev-041.003",
            "dev-1.0.0-dev<1.0.5-dev",
            "dev-feature+issue-1",
            "dev-feature-foo",
            "dev-feature/foo",
            "dev-foo bar",
            "dev-load-varnish-only-when-used as ^2.0",
            "dev-load-varnish-only-when-used@dev as ^2.0@dev",
            "dev-load-varnish-only-when-used@stable",
            "dev-master as 1.0.0",
            "dev-master",
            "dev-trunk",
            "master",
        ];
        for input in invalid {
            assert!(parse_php(input).is_err(), "{input:?} should fail to parse");
        }
    }

    #[test]
    fn equal_versions() {
        let groups: &[&[&str]] = &[
            &["0", "0.0", "0.0.0", "0000", "0.0.0.0-stable"],
            &["000000", "0000000", "00000000"],
            &["1a", "1alpha"],
            &["2.b", "2-beta", "2-b", "2.beta"],
            &["3RC", "3.0.0.0-rc"],
            &["4dev", "4.dev", "4-dev"],
            &["5.2.p", "5.2.0-patch", "5.2.0.0pl"],
            &["6p0", "6.p-0", "6.0.0.0.patch.0"],
            &["7010-01-02", "7010-01-02."],
            &["8010000102.", "8010000102"],
        ];
        for group in groups {
            for pair in group.windows(2) {
                let v1 = parse_php(pair[0]).unwrap();
                let v2 = parse_php(pair[1]).unwrap();
                assert_eq!(
                    compare(&v1, &v2),
                    Ordering::Equal,
                    "{} and {} should be equal",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn stable_suffix_and_bare_patch() {
        let plain = parse_php("1.0.0").unwrap();
        let stable = parse_php("1.0.0.0-stable").unwrap();
        assert_eq!(compare(&plain, &stable), Ordering::Equal);

        let patch = parse_php("1.0.0.patch").unwrap();
        let patch_zero = parse_php("1.0.0.patch.0").unwrap();
        assert_eq!(compare(&patch, &patch_zero), Ordering::Less);
    }

    #[test]
    fn ordering() {
        let ordered = [
            "0000000",
            "0",
            "0000000000001",
            "1.0.0.dev",
            "1.0.0.alpha",
            "1.0.0.alpha00000000000",
            "1.0.0.alpha1",
            "1.0.0.alpha2.99.1",
            "1.0.0.beta",
            "1.0.0.beta0.09",
            "1.0.0.beta009",
            "1.0.0.RC",
            "1.0.0",
            "1.0.0.p",
            "1.0.0.patch0",
            "1.0.0.patch1.0",
            "1.0.0.patch2",
            "1.0.0.1",
            "1.2.3",
            "1.2.3.4",
            "2.0.0.RC",
            "2.0.0-stable",
            "2.0.0.pl",
            "2.1",
            "2.2",
            "2.2.p",
            "2.2.0.1",
            "4.3.0",
            "5.3.dev",
            "5.3.0",
            "5.4",
            "5.9999999",
            "5.9999999.9999999",
            "5.9999999.9999999.p",
            "5.9999999.9999999.9999999",
            "5.9999999.9999999.9999999.p",
            "5.10000000",
            "5.10000001",
            "6.0",
            "2010-01-02-dev",
            "2010-01-02-a",
            "2010-01-02",
            "2010.01.02.dev",
            "2010.01.02.a",
            "2010.01.02-stable",
            "2010.01.02.p",
            "2010.01.02.p0",
            "2010.01.02.p1",
            "2010-01-02-p",
            "2010-01-02-p0",
            "2010-01-02-p1",
            "2010.1.555",
            "2010.10.200",
            "2010.11",
            "20112.dev",
            "20112.0alpha",
            "20112.beta",
            "20112.",
            "20112.0p",
            "20112.10.10.10",
            "20112.203040dev",
            "20112.203040alpha",
            "20112.203040.0beta",
            "20112.203040",
            "20112.203040.p1",
            "20112.203040.0p0123",
            "20113",
            "201101",
            "201102.dev",
            "201102.alpha",
            "201102.beta",
            "201102.",
            "201102.0alpha",
            "201102.0p",
            "201102.10.10.10",
            "201102.203040dev",
            "201102.203040alpha",
            "201102.203040",
            "201102.203040.0beta",
            "201102.203040.0",
            "201102.203040.0p0123",
            "201102-203040-p",
            "201102-203040-p1",
            "201102-p",
            "201103",
            "2010101",
            "2010102.dev",
            "2010102.beta",
            "2010102.",
            "2010102-p",
            "20100101",
            "20100102.dev",
            "20100102.alpha",
            "20100102.beta",
            "20100102.",
            "20100102.0alpha",
            "20100102.0p",
            "20100102.10.10.10",
            "20100102.203040dev",
            "20100102.203040alpha",
            "20100102.203040",
            "20100102.203040.0beta",
            "20100102.203040.0",
            "20100102.203040.0p0123",
            "20100102-203040-p",
            "20100102-203040-p1",
            "20100102-p",
            "20100103",
            "201000101",
            "201000102.dev",
            "201000102.alpha",
            "201000102.beta",
            "201000102.",
            "201000102-p",
            "201000103",
            "2010000101",
            "2010000102.dev",
            "2010000102.alpha",
            "2010000102.beta",
            "2010000102.",
            "2010000102.0alpha",
            "2010000102.0p",
            "2010000102.10.10.10",
            "2010000102.203040dev",
            "2010000102.203040alpha",
            "2010000102.203040",
            "2010000102.203040.0beta",
            "2010000102.203040.0",
            "2010000102.203040.0p0123",
            "2010000102-203040-p",
            "2010000102-203040-p1",
            "2010000102-999999999-p1",
            "2010000102-p",
            "2010000103",
        ];
        for pair in ordered.windows(2) {
            let smaller = parse_php(pair[0]).unwrap();
            let larger = parse_php(pair[1]).unwrap();
            assert_eq!(
                compare(&smaller, &larger),
                Ordering::Less,
                "{} < {}",
                pair[0],
                pair[1]
            );
        }
    }
}
