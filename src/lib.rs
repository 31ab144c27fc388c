//! **LTS lifecycle scanner for installed software and container base images.**
//!
//! `eolscan` audits a host against a catalog of long-term-support schedules
//! and warns about components at or past end of life: the operating system,
//! the kernel on Linux hosts, command-line applications, and the base images
//! referenced by Dockerfiles in the working tree.
//!
//! ## Core concepts & modules
//!
//! - **[`model`]**: [`Schedule`] describes one release series of one
//!   component; [`Detected`] is what a probe observed. The match predicate
//!   is specificity-aware: "20" matches every 20.x schedule while "20.04"
//!   requires the minor to agree, and a schedule minor of zero covers its
//!   whole major series.
//! - **[`catalog`]**: the [`Catalog`] maps component names to schedules and
//!   version queries; [`catalog::record`] adapts loosely-typed
//!   endoflife.date records into schedules.
//! - **[`probe`]**: [`VersionQuery`] runs an external command and extracts
//!   a version string; the [`ProcessRunner`] trait keeps scans testable.
//! - **[`dockerfile`]**: extracts external base images from `FROM` lines,
//!   excluding locally declared build stages.
//! - **[`scan`]**: the [`Scanner`] orchestrates the four stages against a
//!   lead-time-adjusted reference date and aggregates warning lines.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use eolscan::model::{parse_loose, scan_component, Detected, Schedule};
//!
//! let schedules = vec![Schedule {
//!     name: "ubuntu".into(),
//!     codename: None,
//!     version: semver::Version::new(20, 0, 0),
//!     expiration: NaiveDate::from_ymd_opt(2023, 4, 1),
//! }];
//!
//! let observed = Detected::Version(parse_loose("20.04").unwrap());
//! let today = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
//! let warning = scan_component("ubuntu", &observed, &schedules, today).unwrap();
//! assert!(warning.contains("end of life for ubuntu"));
//! ```

pub mod catalog;
pub mod dockerfile;
pub mod error;
pub mod model;
pub mod probe;
pub mod scan;

pub use catalog::Catalog;
pub use dockerfile::{extract_base_images, ImageRef};
pub use error::{EolscanError, Result};
pub use model::{Detected, LooseVersion, Schedule};
pub use probe::{ProcessRunner, SystemRunner, VersionQuery};
pub use scan::{HostPlatform, Platform, ScanConfig, ScanOutcome, Scanner};
