//! Version and schedule data model.

pub mod schedule;
pub mod version;

pub use schedule::{scan_component, Detected, Schedule, DATE_FORMAT};
pub use version::{numeric_prefix, parse_loose, LooseVersion};
