//! Lifecycle schedules and the match predicate.
//!
//! A [`Schedule`] describes one LTS release series of one component: its
//! name, an optional human codename, the series version, and an optional
//! expiration date. A component may carry many schedules, one per series.

use super::version::LooseVersion;
use crate::error::EolscanError;
use chrono::NaiveDate;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used for expirations throughout the catalog.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// What a version probe observed for a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detected {
    /// A parseable numeric version with its specificity
    Version(LooseVersion),
    /// A non-numeric release nickname, e.g. a distro codename or image tag
    Codename(String),
    /// Presence-only observation; matches every schedule
    Anything,
}

impl fmt::Display for Detected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(v) => v.fmt(f),
            Self::Codename(c) => c.fmt(f),
            Self::Anything => f.write_str("*"),
        }
    }
}

/// One LTS release series for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleRepr", into = "ScheduleRepr")]
pub struct Schedule {
    /// Component identifier: an OS product name or an executable base name
    pub name: String,
    /// Optional human nickname for the series; `None` means not applicable
    pub codename: Option<String>,
    /// Release series version; only major and conditionally minor matter
    pub version: Version,
    /// Termination date; `None` means no known end of life
    pub expiration: Option<NaiveDate>,
}

/// Wire representation: version and expiration travel as plain strings.
#[derive(Debug, Serialize, Deserialize)]
struct ScheduleRepr {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    codename: Option<String>,
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiration: Option<String>,
}

impl TryFrom<ScheduleRepr> for Schedule {
    type Error = EolscanError;

    fn try_from(repr: ScheduleRepr) -> Result<Self, Self::Error> {
        let version = super::version::parse_loose(&repr.version)
            .map(|v| v.version)
            .ok_or_else(|| {
                EolscanError::Config(format!("unparsable schedule version: {}", repr.version))
            })?;

        let expiration = match repr.expiration {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| {
                EolscanError::Config(format!("unparsable expiration {raw}: {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            name: repr.name,
            codename: repr.codename,
            version,
            expiration,
        })
    }
}

impl From<Schedule> for ScheduleRepr {
    fn from(schedule: Schedule) -> Self {
        Self {
            name: schedule.name,
            codename: schedule.codename,
            version: schedule.version.to_string(),
            expiration: schedule
                .expiration
                .map(|d| d.format(DATE_FORMAT).to_string()),
        }
    }
}

impl Schedule {
    /// Report whether this schedule applies to an observed component.
    ///
    /// Codename observations match by case-insensitive containment in the
    /// schedule's codename, and never match a schedule that has none.
    /// Numeric observations require equal majors; a schedule minor of zero
    /// is a wildcard over all minors, and a major-only observation
    /// (specificity 0) likewise matches any minor. A presence-only
    /// observation matches unconditionally.
    #[must_use]
    pub fn matches(&self, detected: &Detected) -> bool {
        let observed = match detected {
            Detected::Codename(nickname) => {
                let Some(codename) = self.codename.as_deref().filter(|c| !c.is_empty()) else {
                    // Nothing is known about the series; claiming a match
                    // here would warn on every untagged image.
                    return false;
                };
                return codename.to_lowercase().contains(&nickname.to_lowercase());
            }
            Detected::Anything => return true,
            Detected::Version(v) => v,
        };

        if observed.version.major != self.version.major {
            return false;
        }

        // A schedule minor of zero covers the whole major series.
        if self.version.minor == 0 {
            return true;
        }

        if observed.specificity == 0 {
            return true;
        }

        observed.version.minor == self.version.minor
    }

    /// True when the schedule has an expiration and `date` has reached it.
    /// The expiration day itself already counts as expired.
    #[must_use]
    pub fn is_expired(&self, date: NaiveDate) -> bool {
        self.expiration.is_some_and(|expiration| date >= expiration)
    }
}

/// Check a component observation against its schedules.
///
/// Iterates schedules in catalog order and emits a warning for the first
/// schedule that both matches and is expired at `date`. No match across
/// all schedules is not an error; it simply produces no warning.
#[must_use]
pub fn scan_component(
    name: &str,
    detected: &Detected,
    schedules: &[Schedule],
    date: NaiveDate,
) -> Option<String> {
    for schedule in schedules {
        if !schedule.matches(detected) {
            continue;
        }

        if let Some(expiration) = schedule.expiration {
            if schedule.is_expired(date) {
                let shown = match detected {
                    Detected::Anything => schedule.version.to_string(),
                    other => other.to_string(),
                };
                return Some(format!(
                    "end of life for {name} {shown} on {}",
                    expiration.format(DATE_FORMAT)
                ));
            }
        }
    }

    None
}
