//! Property-based tests for version parsing and schedule matching.
//!
//! Ensures the lenient parser handles arbitrary input without panicking,
//! and that the match predicate invariants hold across random versions.

use chrono::NaiveDate;
use eolscan::model::{parse_loose, Detected, LooseVersion, Schedule};
use proptest::prelude::*;
use semver::Version;

fn schedule(major: u64, minor: u64) -> Schedule {
    Schedule {
        name: "component".to_string(),
        codename: None,
        version: Version::new(major, minor, 0),
        expiration: None,
    }
}

fn observed(major: u64, minor: u64, specificity: usize) -> Detected {
    Detected::Version(LooseVersion {
        version: Version::new(major, minor, 0),
        specificity,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn parse_loose_doesnt_panic(s in "\\PC{0,80}") {
        let _ = parse_loose(&s);
    }

    #[test]
    fn parse_loose_roundtrips_segments(major in 0u64..100_000, minor in 0u64..100_000) {
        let parsed = parse_loose(&format!("{major}.{minor}")).unwrap();
        prop_assert_eq!(parsed.version.major, major);
        prop_assert_eq!(parsed.version.minor, minor);
        prop_assert_eq!(parsed.specificity, 1);
    }

    #[test]
    fn minor_zero_schedule_matches_whole_major(
        major in 0u64..1000,
        minor in 0u64..1000,
        specificity in 0usize..3,
    ) {
        let s = schedule(major, 0);
        prop_assert!(s.matches(&observed(major, minor, specificity)));
    }

    #[test]
    fn major_only_probe_matches_iff_majors_equal(
        schedule_major in 0u64..1000,
        schedule_minor in 1u64..1000,
        probe_major in 0u64..1000,
        probe_minor in 0u64..1000,
    ) {
        let s = schedule(schedule_major, schedule_minor);
        let matched = s.matches(&observed(probe_major, probe_minor, 0));
        prop_assert_eq!(matched, probe_major == schedule_major);
    }

    #[test]
    fn specific_probe_requires_equal_minor(
        major in 0u64..1000,
        schedule_minor in 1u64..1000,
        probe_minor in 0u64..1000,
    ) {
        let s = schedule(major, schedule_minor);
        let matched = s.matches(&observed(major, probe_minor, 1));
        prop_assert_eq!(matched, probe_minor == schedule_minor);
    }

    #[test]
    fn mismatched_major_never_matches(
        schedule_major in 0u64..500,
        offset in 1u64..500,
        minor in 0u64..1000,
        specificity in 0usize..3,
    ) {
        let s = schedule(schedule_major, minor);
        prop_assert!(!s.matches(&observed(schedule_major + offset, minor, specificity)));
    }

    #[test]
    fn expiry_is_inclusive_boundary(
        year in 2000i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let expiration = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let mut s = schedule(1, 0);
        s.expiration = Some(expiration);

        prop_assert!(s.is_expired(expiration));
        prop_assert!(s.is_expired(expiration + chrono::Days::new(1)));
        prop_assert!(!s.is_expired(expiration - chrono::Days::new(1)));
    }
}
