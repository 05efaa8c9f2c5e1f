//! Normalization of package names.
//!
//! Currently only Python distribution names are covered; they are
//! normalized per PEP 503 so that the many spellings of the same
//! distribution (`backports.ssl`, `Backports-SSL`, `backports__ssl`)
//! resolve to one canonical name.

#![deny(missing_docs)]

pub use crate::package_name::PackageName;

mod package_name;
