use once_cell::sync::Lazy;
use regex::Regex;

use crate::generic::generic_segments;
use crate::version::{ParsedAs, Version};
use crate::VersionParseError;

/// A pseudo-version commit suffix: 14 digits of YYYYMMDDhhmmss followed by
/// 12 hex digits naming the commit. Only the timestamp participates in
/// ordering.
static COMMIT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([-.][0-9]{14})-[a-f0-9]{12}$").unwrap());

/// Parses a Go module version. The leading `v` is mandatory; after
/// stripping it and any pseudo-version commit hash, the remainder is
/// parsed with the generic scheme.
pub fn parse_go(version: &str) -> Result<Version, VersionParseError> {
    let Some(trimmed) = version.strip_prefix('v') else {
        return Err(VersionParseError::Go {
            version: version.to_string(),
        });
    };

    let stripped = COMMIT_SUFFIX.replace(trimmed, "${1}");

    Version::from_segments(ParsedAs::Go, version, generic_segments(&stripped))
}
