use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A run of the characters PEP 503 treats as equivalent separators.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\._-]+").unwrap());

/// The normalized name of a Python distribution.
///
/// Converts the name to lowercase and collapses any run of the characters
/// `-`, `_` and `.` down to a single `-`, e.g. `---`, `.` and `__` all get
/// converted to just `-`. See
/// <https://www.python.org/dev/peps/pep-0503/#normalized-names> for details
/// on how names are normalized in Python.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PackageName(String);

impl PackageName {
    /// Creates a normalized package name. Normalization accepts any
    /// string, so construction cannot fail.
    pub fn new(name: &str) -> Self {
        Self(SEPARATORS.replace_all(name, "-").to_lowercase())
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_names() {
        let cases = [
            ("flask", "flask"),
            ("Flask", "flask"),
            ("FLASK", "flask"),
            ("backports.ssl", "backports-ssl"),
            ("backports-----ssl", "backports-ssl"),
            ("backports.SSL", "backports-ssl"),
            ("Backports.SSL", "backports-ssl"),
            ("backports-datetime-fromisoformat", "backports-datetime-fromisoformat"),
            ("backports-datetime_fromisoformat", "backports-datetime-fromisoformat"),
            ("BACKPORTS-DATETIME-FROMISOFORMAT", "backports-datetime-fromisoformat"),
            ("BACKPORTS-.-DATETIME__-.-FROMISOFORMAT", "backports-datetime-fromisoformat"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                PackageName::new(input).as_ref(),
                expected,
                "normalization of {input:?}"
            );
        }
    }

    #[test]
    fn serializes_as_a_string() {
        let name = PackageName::new("Backports.SSL");
        assert_eq!(serde_json::to_string(&name).unwrap(), r#""backports-ssl""#);
    }
}
