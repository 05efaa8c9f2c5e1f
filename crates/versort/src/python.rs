use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::segment::word_to_decimal;
use crate::version::{ParsedAs, Version};
use crate::VersionParseError;

/// The version grammar from PEP 440 Appendix B
/// (<https://www.python.org/dev/peps/pep-0440/>), adjusted to be
/// case-insensitive and to allow a leading `v` and surrounding whitespace.
static PEP440: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*",
        r"v?",
        r"(?:",
        r"(?:(?P<epoch>[0-9]+)!)?",
        r"(?P<release>[0-9]+(?:\.[0-9]+)*)",
        r"(?P<pre>[-_\.]?(?P<pre_l>(a|b|c|rc|alpha|beta|pre|preview))[-_\.]?(?P<pre_n>[0-9]+)?)?",
        r"(?P<post>(?:-(?P<post_n1>[0-9]+))|(?:[-_\.]?(?P<post_l>post|rev|r)[-_\.]?(?P<post_n2>[0-9]+)?))?",
        r"(?P<dev>[-_\.]?(?P<dev_l>dev)[-_\.]?(?P<dev_n>[0-9]+)?)?",
        r")",
        r"(?:\+(?P<local>[a-z0-9]+(?:[-_\.][a-z0-9]+)*))?",
        r"\s*$",
    ))
    .unwrap()
});

/// Release segments are stored at fixed indices so that a release number is
/// never compared against a pre/post/dev marker. Changing this width
/// re-indexes every stored version.
const MAX_RELEASE_SEGMENTS: usize = 15;

// Values given to segment labels to ensure sort order is correct: dev,
// pre-release, normal (implicit), post-release.
const DEV_RELEASE: &str = "-4";
const ALPHA_RELEASE: &str = "-3";
const BETA_RELEASE: &str = "-2";
const RC_RELEASE: &str = "-1";
const IMPLICIT: &str = "0";
const POST_RELEASE: &str = "1";

/// Numeric local segments sort above lexicographic ones; local text may
/// only be ASCII, so prepending 128 works.
const LOCAL_NUMBER_SENTINEL: &str = "128";

/// Legacy versions sort below every PEP 440 version, whose epoch is >= 0.
const LEGACY_EPOCH: &str = "-1";

/// Parses a version according to PEP 440 and falls back to legacy Python
/// parsing if that fails.
pub fn parse_python(version: &str) -> Result<Version, VersionParseError> {
    match parse_pep440(version) {
        Ok(parsed) => Ok(parsed),
        Err(error) => {
            trace!("parsing `{version}` as a legacy python version: {error}");
            parse_legacy(version)
        }
    }
}

/// A capture group counts as present only when it matched a non-empty
/// string.
fn named<'t>(captures: &Captures<'t>, name: &str) -> Option<&'t str> {
    captures
        .name(name)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

fn parse_pep440(version: &str) -> Result<Version, VersionParseError> {
    let Some(captures) = PEP440.captures(version) else {
        return Err(VersionParseError::Pep440 {
            version: version.to_string(),
        });
    };

    let release = named(&captures, "release").ok_or_else(|| VersionParseError::Pep440 {
        version: version.to_string(),
    })?;
    let release_segments: Vec<&str> = release.split('.').collect();
    if release_segments.len() > MAX_RELEASE_SEGMENTS {
        return Err(VersionParseError::ReleaseSegments {
            version: version.to_string(),
        });
    }

    let (mut pre_label, pre_number) = pre_release_segments(&captures);
    let (post_label, post_number) = post_release_segments(&captures);
    let (dev_label, dev_number) = dev_release_segments(&captures);

    // The general sort order is: dev, pre, <nothing>, post, local, e.g.
    // 1.0.dev1 < 1.0a1.dev1 < 1.0a1 < 1.0 < 1.0.post1.dev1 < 1.0.post1.
    // The only case the segment layout does not already handle is the
    // first: a bare dev release sorting before any pre-release. The pre
    // label borrows the dev value to get there, the way packaging's
    // _cmpkey does it.
    if pre_label == IMPLICIT && post_label == IMPLICIT && dev_label == DEV_RELEASE {
        pre_label = DEV_RELEASE;
    }

    let mut segments = Vec::with_capacity(1 + MAX_RELEASE_SEGMENTS + 6);
    segments.push(named(&captures, "epoch").unwrap_or(IMPLICIT).to_string());
    segments.extend(release_segments.iter().map(ToString::to_string));
    for _ in release_segments.len()..MAX_RELEASE_SEGMENTS {
        segments.push(IMPLICIT.to_string());
    }
    segments.extend(
        [pre_label, pre_number, post_label, post_number, dev_label, dev_number]
            .iter()
            .map(ToString::to_string),
    );
    segments.extend(local_segments(&captures));

    Version::from_segments(ParsedAs::PythonPep440, version, segments)
}

fn pre_release_segments<'t>(captures: &Captures<'t>) -> (&'t str, &'t str) {
    if named(captures, "pre").is_none() {
        return (IMPLICIT, IMPLICIT);
    }
    let label = match named(captures, "pre_l").unwrap_or_default().to_lowercase().as_str() {
        "a" | "alpha" => ALPHA_RELEASE,
        "b" | "beta" => BETA_RELEASE,
        // The grammar admits nothing else: c, rc, pre and preview are all
        // release candidates.
        _ => RC_RELEASE,
    };
    (label, named(captures, "pre_n").unwrap_or(IMPLICIT))
}

fn post_release_segments<'t>(captures: &Captures<'t>) -> (&'t str, &'t str) {
    if named(captures, "post").is_none() {
        return (IMPLICIT, IMPLICIT);
    }
    let number = named(captures, "post_n1")
        .or_else(|| named(captures, "post_n2"))
        .unwrap_or(IMPLICIT);
    (POST_RELEASE, number)
}

fn dev_release_segments<'t>(captures: &Captures<'t>) -> (&'t str, &'t str) {
    if named(captures, "dev").is_none() {
        return (IMPLICIT, IMPLICIT);
    }
    (DEV_RELEASE, named(captures, "dev_n").unwrap_or(IMPLICIT))
}

fn local_segments(captures: &Captures<'_>) -> Vec<String> {
    let Some(local) = named(captures, "local") else {
        return Vec::new();
    };

    // "With a local version, in addition to the use of . as a separator of
    // segments, the use of - and _ is also acceptable." - PEP 440
    let local = local.replace(['-', '_'], ".");

    let mut segments = Vec::new();
    for piece in local.split('.') {
        // Local strings are compared with case insensitivity.
        let piece = piece.to_lowercase();
        if piece.parse::<i64>().is_ok() {
            segments.push(LOCAL_NUMBER_SENTINEL.to_string());
            segments.push(piece);
        } else {
            segments.push(word_to_decimal(&piece));
        }
    }
    segments
}

/// The tokens of a legacy version, split at the end of each match of
/// `\d+|[a-z]+|\.|-`. Unmatched text stays attached to the front of the
/// token that follows it, and a trailing unmatched run becomes a final
/// token of its own.
static LEGACY_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+|[a-z]+|\.|-").unwrap());

fn split_legacy_tokens(version: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for found in LEGACY_TOKEN.find_iter(version) {
        tokens.push(version[start..found.end()].to_string());
        start = found.end();
    }
    if start < version.len() {
        tokens.push(version[start..].to_string());
    }

    let mut segments = Vec::new();
    for token in tokens {
        let token = match token.as_str() {
            "pre" | "preview" | "rc" => "c".to_string(),
            "-" => "final-".to_string(),
            "dev" => "@".to_string(),
            _ => token,
        };

        if token.is_empty() || token == "." {
            continue;
        }

        let token = match token.parse::<i64>() {
            // Zero-pad numeric segments so they compare as text, like
            // setuptools did.
            Ok(number) if token.len() <= 8 => format!("{number:08}"),
            Ok(_) => token,
            Err(_) => format!("*{token}"),
        };
        segments.push(token);
    }

    segments.push("*final".to_string());
    segments
}

/// Parses as described at
/// <https://github.com/pypa/packaging/blob/19.2/packaging/version.py#L124-L176>.
///
/// A legacy Python version always starts with a -1 epoch segment in order
/// to sort before all PEP 440 versions.
fn parse_legacy(version: &str) -> Result<Version, VersionParseError> {
    let mut segments: Vec<String> = Vec::new();
    for token in split_legacy_tokens(&version.to_lowercase()) {
        if token.starts_with('*') {
            if token.as_str() < "*final" {
                while segments.last().is_some_and(|s| s == "*final-") {
                    segments.pop();
                }
            }

            // Remove trailing zeros from each series of numeric segments.
            while segments.last().is_some_and(|s| s == "00000000") {
                segments.pop();
            }
        }
        segments.push(token);
    }

    // Legacy tokens are always compared lexicographically.
    let mut encoded = Vec::with_capacity(segments.len() + 1);
    encoded.push(LEGACY_EPOCH.to_string());
    encoded.extend(segments.iter().map(|segment| word_to_decimal(segment)));

    Version::from_segments(ParsedAs::PythonLegacy, version, encoded)
}
