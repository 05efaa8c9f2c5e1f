//! Parsing of package version strings, such as `1.2.3`, into a normalized,
//! totally orderable numeric form.
//!
//! The primary motivation for this library is a representation of versions
//! that can be stored and sorted in a relational database. To that end,
//! every version is turned into a sequence of exact [`Decimal`] values
//! whose segment-by-segment numeric comparison reproduces the ordering
//! rules of the ecosystem it came from.
//!
//! It is not possible to produce reasonably sortable versions across
//! multiple language ecosystems, or even between different packages in the
//! same ecosystem. Instead, the aim is that all versions of a *single*
//! package are sortable, even if the versioning scheme for that package
//! changes over time. The assumption is that even if the scheme changes,
//! the "major" portion of the new scheme will sort higher than the "major"
//! portion of the old one.
//!
//! Each parsing function handles non-numeric components in the way its
//! ecosystem requires. For some schemes strings have special meaning, for
//! example semver's strict ordering of `alpha`, `beta` and the like. For
//! the others, non-numeric values are encoded into decimals using the
//! Unicode codepoint of each letter.
//!
//! There is no guarantee that the decimal representation of a version stays
//! identical between releases of this library. If you store parsed
//! versions, always store the original string alongside them and re-parse
//! after an upgrade.
//!
//! ```rust
//! use std::cmp::Ordering;
//! use versort::{compare, parse_semver};
//!
//! let pre_release = parse_semver("1.0.0-rc.1").unwrap();
//! let release = parse_semver("1.0.0").unwrap();
//! assert_eq!(compare(&pre_release, &release), Ordering::Less);
//! ```

#![deny(missing_docs)]

use thiserror::Error;

pub use crate::decimal::{Decimal, DecimalParseError};
pub use crate::generic::parse_generic;
pub use crate::go::parse_go;
pub use crate::perl::parse_perl;
pub use crate::php::parse_php;
pub use crate::python::parse_python;
pub use crate::ruby::parse_ruby;
pub use crate::semver::parse_semver;
pub use crate::version::{compare, ParsedAs, Version};

mod decimal;
mod generic;
mod go;
mod perl;
mod php;
mod python;
mod ruby;
mod segment;
mod semver;
mod version;

/// An error that occurs when a version string cannot be parsed.
///
/// Each parsing function reports at most one kind of rejection; the error
/// carries the offending input for diagnostics. Parsing never panics and
/// never aborts the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// The input did not match the anchored semver 2.0 grammar.
    #[error("version does not match semver regex: {version}")]
    Semver {
        /// The rejected input.
        version: String,
    },
    /// The input matched neither the Perl decimal nor the v-string grammar.
    #[error("not valid perl version: {version}")]
    Perl {
        /// The rejected input.
        version: String,
    },
    /// The input survived neither composer's classical nor its datetime
    /// normalization, or it is a composer construct with no total order
    /// (a wildcard or a `dev-` branch name).
    #[error("invalid php version: {version}")]
    Php {
        /// The rejected input.
        version: String,
    },
    /// The input did not match the PEP 440 grammar. Only an intermediate
    /// state for `parse_python`, which falls back to legacy parsing.
    #[error("not PEP440 version: {version}")]
    Pep440 {
        /// The rejected input.
        version: String,
    },
    /// The PEP 440 release had more than the fixed number of dotted
    /// components. Only an intermediate state for `parse_python`, which
    /// falls back to legacy parsing.
    #[error("exceeds max number of release segments: {version}")]
    ReleaseSegments {
        /// The rejected input.
        version: String,
    },
    /// The input did not match the whole-string rubygems validity pattern.
    #[error("invalid ruby version: {version}")]
    Ruby {
        /// The rejected input.
        version: String,
    },
    /// The input did not begin with `v`, which Go module versions require.
    #[error("invalid go version: {version}")]
    Go {
        /// The rejected input.
        version: String,
    },
    /// A parser produced a segment string the numeric backend could not
    /// parse. This cannot happen for any valid parse; seeing it means a
    /// bug in the parser that produced the segment.
    #[error("produced segment is not a decimal number: {segment}")]
    Segment {
        /// The segment string the backend rejected.
        segment: String,
    },
}
