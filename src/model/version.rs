//! Lenient semantic version parsing.
//!
//! Observed version strings rarely satisfy strict semver: `lsb_release`
//! reports "20.04", `uname -r` reports "6.8.0-45-generic", container tags
//! look like "3.11". [`parse_loose`] accepts the leading dotted numeric run
//! and records how many segments were explicitly present, which the match
//! predicate uses to decide how strict a comparison must be.

use regex::Regex;
use semver::Version;
use std::fmt;
use std::sync::LazyLock;

/// Leading dotted numeric run at the start of a version-ish string.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?").expect("static regex")
});

/// A parsed version plus its *specificity*: the count of explicit
/// dot-separated segments beyond the major number.
///
/// "1" has specificity 0, "1.1" has 1, "1.1.1" has 2. The patch segment is
/// parsed but carries no weight during schedule matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LooseVersion {
    /// Normalized version, absent segments filled with zero
    pub version: Version,
    /// Number of segments explicitly present beyond the major
    pub specificity: usize,
}

impl fmt::Display for LooseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.version.fmt(f)
    }
}

/// Extract the leading dotted numeric run from a string, if any.
///
/// "3.18 (stable)" yields "3.18"; "Alpine 3.18" yields nothing because the
/// run must sit at the very start (a leading `v` is tolerated).
#[must_use]
pub fn numeric_prefix(s: &str) -> Option<&str> {
    let m = NUMERIC_PREFIX.find(s.trim())?;
    let matched = &s.trim()[m.range()];
    Some(matched.strip_prefix('v').unwrap_or(matched))
}

/// Parse a loosely formatted version string.
///
/// Returns `None` when the string does not begin with a number, or a
/// segment overflows. Trailing decoration ("-45-generic", "-slim", a
/// distro suffix) is ignored. Note "20.04" parses as 20.4.0, matching
/// numeric rather than lexical segment semantics.
#[must_use]
pub fn parse_loose(input: &str) -> Option<LooseVersion> {
    let caps = NUMERIC_PREFIX.captures(input.trim())?;

    let major: u64 = caps.get(1)?.as_str().parse().ok()?;
    let minor = match caps.get(2) {
        Some(m) => Some(m.as_str().parse::<u64>().ok()?),
        None => None,
    };
    let patch = match caps.get(3) {
        Some(m) => Some(m.as_str().parse::<u64>().ok()?),
        None => None,
    };

    let specificity = usize::from(minor.is_some()) + usize::from(patch.is_some());

    Some(LooseVersion {
        version: Version::new(major, minor.unwrap_or(0), patch.unwrap_or(0)),
        specificity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_major_only() {
        let v = parse_loose("18").unwrap();
        assert_eq!(v.version, Version::new(18, 0, 0));
        assert_eq!(v.specificity, 0);
    }

    #[test]
    fn test_parse_major_minor() {
        let v = parse_loose("20.04").unwrap();
        assert_eq!(v.version, Version::new(20, 4, 0));
        assert_eq!(v.specificity, 1);
    }

    #[test]
    fn test_parse_full() {
        let v = parse_loose("1.21.3").unwrap();
        assert_eq!(v.version, Version::new(1, 21, 3));
        assert_eq!(v.specificity, 2);
    }

    #[test]
    fn test_parse_kernel_release() {
        let v = parse_loose("6.8.0-45-generic").unwrap();
        assert_eq!(v.version, Version::new(6, 8, 0));
        assert_eq!(v.specificity, 2);
    }

    #[test]
    fn test_parse_leading_v() {
        let v = parse_loose("v22.11.0").unwrap();
        assert_eq!(v.version, Version::new(22, 11, 0));
    }

    #[test]
    fn test_parse_rejects_codename() {
        assert!(parse_loose("bookworm").is_none());
        assert!(parse_loose("latest").is_none());
        assert!(parse_loose("").is_none());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(parse_loose("99999999999999999999").is_none());
    }

    #[test]
    fn test_numeric_prefix_trims_decoration() {
        assert_eq!(numeric_prefix("3.18 (stable)"), Some("3.18"));
        assert_eq!(numeric_prefix("8"), Some("8"));
        assert_eq!(numeric_prefix("Alpine 3.18"), None);
    }
}
