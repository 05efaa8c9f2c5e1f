use crate::segment::{normalize_unicode, parse_by_separator, trim_trailing_zeros, word_to_decimal};
use crate::version::{ParsedAs, Version};
use crate::VersionParseError;

/// Maps the Greek-letter pre-release names (plus `pre` and `rc`) to the
/// negative decimal they sort as, `alpha` lowest and `rc` highest.
fn pre_release_identifier(token: &str) -> Option<&'static str> {
    Some(match token.to_lowercase().as_str() {
        "alpha" => "-26",
        "beta" => "-25",
        "gamma" => "-24",
        "delta" => "-23",
        "epsilon" => "-22",
        "zeta" => "-21",
        "eta" => "-20",
        "theta" => "-19",
        "iota" => "-18",
        "kappa" => "-17",
        "lambda" => "-16",
        "mu" => "-15",
        "nu" => "-14",
        "xi" => "-13",
        "omicron" => "-12",
        "pi" => "-11",
        "rho" => "-10",
        "sigma" => "-9",
        "tau" => "-8",
        "upsilon" => "-7",
        "phi" => "-6",
        "chi" => "-5",
        "psi" => "-4",
        "omega" => "-3",
        "pre" => "-2",
        "rc" => "-1",
        _ => return None,
    })
}

/// Parses a version string using the generic scheme: split into numeric and
/// textual tokens, encode the textual ones, and treat numbers as
/// individually comparable segments, so `1.2` compares as the two numbers
/// `1` and `2` rather than as the decimal `1.2`.
pub fn parse_generic(version: &str) -> Result<Version, VersionParseError> {
    Version::from_segments(ParsedAs::Generic, version, generic_segments(version))
}

/// The generic segmentation, shared with the Go module scheme.
pub(crate) fn generic_segments(version: &str) -> Vec<String> {
    let normalized = normalize_unicode(version);
    let mut segments = parse_by_separator(&normalized, |token| {
        pre_release_identifier(token)
            .map_or_else(|| word_to_decimal(token), ToString::to_string)
    });

    // A pre-release identifier encodes as a negative segment. When none is
    // present a zero sentinel takes its place, which is what puts
    // `1.0-alpha` strictly before `1.0`.
    if !segments.iter().any(|segment| segment.starts_with('-')) {
        segments.push("0".to_string());
    }

    trim_trailing_zeros(&mut segments);
    segments
}
