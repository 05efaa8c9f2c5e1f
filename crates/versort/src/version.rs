use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::decimal::Decimal;
use crate::VersionParseError;

/// The scheme a [`Version`] was parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedAs {
    /// A generic version, for anything not covered by another scheme, such
    /// as C libraries.
    Generic,
    /// The well known semver scheme (<https://semver.org/>).
    SemVer,
    /// A Perl version which is simply a number (`42`, `1.2`, `1.002003`).
    PerlDecimal,
    /// A Perl v-string like `v1.1.2` (the leading `v` is optional, so
    /// `1.2.3` is also valid).
    PerlVString,
    /// A PHP version as used by composer.
    Php,
    /// A Python version as described in PEP 440.
    PythonPep440,
    /// A Python version predating the adoption of PEP 440.
    PythonLegacy,
    /// A Ruby version as used by rubygems.
    Ruby,
    /// A Go module version.
    Go,
}

impl fmt::Display for ParsedAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generic => "Generic",
            Self::SemVer => "SemVer",
            Self::PerlDecimal => "PerlDecimal",
            Self::PerlVString => "PerlVString",
            Self::Php => "PHP",
            Self::PythonPep440 => "PythonPEP440",
            Self::PythonLegacy => "PythonLegacy",
            Self::Ruby => "Ruby",
            Self::Go => "Go",
        };
        f.write_str(name)
    }
}

/// A parsed version: the original input string plus its canonical sequence
/// of decimal segments.
///
/// The segment sequence is what makes versions of a package sortable with a
/// plain numeric comparator, even in a database column. There is no
/// guarantee that the encoding stays identical between releases of this
/// library, so always store the original string alongside the segments and
/// re-parse after upgrading.
///
/// Versions of different schemes have no defined ordering relative to each
/// other; [`compare`] is only meaningful for two versions with the same
/// [`ParsedAs`] value. For that reason `Version` deliberately does not
/// implement `Ord`.
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    parsed_as: ParsedAs,
    segments: Vec<Decimal>,
}

impl Version {
    /// Builds a version from the decimal number strings a parser produced.
    ///
    /// Every parser guarantees at least one segment, and every string it
    /// hands over here must be a parseable decimal; a failure surfaces as
    /// [`VersionParseError::Segment`] and indicates a parser bug rather
    /// than bad input.
    pub(crate) fn from_segments(
        parsed_as: ParsedAs,
        original: &str,
        segments: Vec<String>,
    ) -> Result<Self, VersionParseError> {
        debug_assert!(!segments.is_empty(), "parsers always produce a segment");
        let segments = segments
            .into_iter()
            .map(|segment| {
                Decimal::from_str(&segment).map_err(|_| VersionParseError::Segment { segment })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            original: original.to_string(),
            parsed_as,
            segments,
        })
    }

    /// The exact string that was passed to the parsing function.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Which scheme the version was parsed as.
    pub fn parsed_as(&self) -> ParsedAs {
        self.parsed_as
    }

    /// The canonical segment sequence. Never empty.
    pub fn segments(&self) -> &[Decimal] {
        &self.segments
    }
}

/// Shows the original string and the scheme it was parsed as, e.g.
/// `1.2.3 (SemVer)`.
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.original, self.parsed_as)
    }
}

/// Serializes as `{"version": …, "sortable_version": […]}` where the
/// segments are rendered as canonical decimal strings. The scheme tag is
/// not serialized.
impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut version = serializer.serialize_struct("Version", 2)?;
        version.serialize_field("version", &self.original)?;
        version.serialize_field("sortable_version", &self.segments)?;
        version.end()
    }
}

/// Compares two versions of the same scheme.
///
/// Segments are compared pairwise; past the common prefix, the remaining
/// tail of the longer version is compared against zero, so versions that
/// differ only by trailing zero segments (`1.2` and `1.2.0`) are equal
/// while `1.2 < 1.2.1` and `1.2 > 1.1.9` still hold.
pub fn compare(a: &Version, b: &Version) -> Ordering {
    let common = a.segments.len().min(b.segments.len());
    for (left, right) in a.segments.iter().zip(&b.segments) {
        let ordering = left.cmp(right);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    let (tail, a_is_longer) = if a.segments.len() >= b.segments.len() {
        (&a.segments[common..], true)
    } else {
        (&b.segments[common..], false)
    };
    for segment in tail {
        if segment.is_zero() {
            continue;
        }
        let ordering = if segment.is_negative() {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        return if a_is_longer { ordering } else { ordering.reverse() };
    }

    Ordering::Equal
}

#[cfg(test)]
pub(crate) fn segment_strings(version: &Version) -> Vec<String> {
    version.segments().iter().map(ToString::to_string).collect()
}
