use once_cell::sync::Lazy;
use regex::Regex;

use crate::segment::{is_number, normalize_decimal, split_tokens, word_to_decimal};
use crate::version::{ParsedAs, Version};
use crate::VersionParseError;

/// The semver 2.0 grammar from <https://semver.org/>.
static SEMVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<major>0|[1-9][0-9]*)\.(?P<minor>0|[1-9][0-9]*)\.(?P<patch>0|[1-9][0-9]*)(?:-(?P<prerelease>(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+(?P<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .unwrap()
});

/// Appended to a released version in place of pre-release segments. Greater
/// than Unicode's upper limit of 0x10FFFF = 1,114,111, so a released version
/// sorts above every pre-release of the same triple.
const MAX_VALUE: &str = "2000000";

/// Marks an alphanumeric pre-release token, and terminates the pre-release
/// list so that `1.0.0-alpha` sorts below `1.0.0-alpha.1`.
const PRE_RELEASE_MARKER: &str = "-1";

/// Marks a numeric pre-release token.
const NUMERIC_TOKEN_MARKER: &str = "0";

/// Parses a semantic version (<https://semver.org/>) such that two parsed
/// versions compare as required by the semver specification: the triple
/// numerically, a pre-release strictly below its release, and build
/// metadata ignored.
pub fn parse_semver(version: &str) -> Result<Version, VersionParseError> {
    let Some(captures) = SEMVER.captures(version) else {
        return Err(VersionParseError::Semver {
            version: version.to_string(),
        });
    };

    let mut segments = vec![
        captures["major"].to_string(),
        captures["minor"].to_string(),
        captures["patch"].to_string(),
    ];

    match captures.name("prerelease") {
        None => segments.push(MAX_VALUE.to_string()),
        Some(prerelease) => {
            for token in split_tokens(prerelease.as_str()) {
                if is_number(&token) {
                    segments.push(NUMERIC_TOKEN_MARKER.to_string());
                    segments.push(normalize_decimal(&token));
                } else {
                    segments.push(PRE_RELEASE_MARKER.to_string());
                    segments.push(normalize_decimal(&word_to_decimal(&token)));
                }
            }
            segments.push(PRE_RELEASE_MARKER.to_string());
        }
    }

    Version::from_segments(ParsedAs::SemVer, version, segments)
}
