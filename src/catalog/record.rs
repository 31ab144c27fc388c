//! Adapter from endoflife.date product records to lifecycle schedules.
//!
//! The upstream records are loosely typed: `cycle` arrives as a string or
//! an integer, `eol` as a date string or a boolean (`false` meaning no
//! planned end of life). Each field is decoded through an explicit tagged
//! variant rather than runtime type sniffing.

use crate::error::{EolscanError, Result};
use crate::model::{numeric_prefix, parse_loose, Schedule, DATE_FORMAT};
use chrono::NaiveDate;
use semver::Version;
use serde::Deserialize;

/// Release cycle identifier: `"3.18"`, `"3.18 (stable)"`, or plain `18`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CycleValue {
    /// Major-only numeric cycle
    Int(u64),
    /// Free-form cycle string; only a leading numeric run is usable
    Str(String),
}

/// End-of-life marker: a date, or a boolean standing in for "none planned".
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EolValue {
    /// The cycle ends (or ended) on this `YYYY-MM-DD` date
    Date(String),
    /// `true` = already ended without a recorded date, `false` = no plan.
    /// Either way there is no date to compare against, so no expiration.
    Bool(bool),
}

/// One endoflife.date product detail record. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    /// Release cycle identifier
    #[serde(default)]
    pub cycle: Option<CycleValue>,
    /// Release nickname, when the product uses them
    #[serde(default)]
    pub codename: Option<String>,
    /// End-of-life marker
    #[serde(default)]
    pub eol: Option<EolValue>,
}

/// Convert a product's records into schedules.
///
/// Records whose cycle carries no leading numeric run are quietly dropped;
/// they describe non-release rows. A cycle that looks numeric but fails
/// version parsing is corruption in trusted data and fails the whole load,
/// as does an unparsable `eol` date.
pub fn records_to_schedules(name: &str, records: &[ProductRecord]) -> Result<Vec<Schedule>> {
    let mut schedules = Vec::new();

    for record in records {
        let version = match &record.cycle {
            Some(CycleValue::Int(major)) => Version::new(*major, 0, 0),
            Some(CycleValue::Str(cycle)) => {
                let Some(prefix) = numeric_prefix(cycle) else {
                    tracing::debug!("dropping non-numeric cycle for {name}: {cycle}");
                    continue;
                };
                parse_loose(prefix)
                    .map(|v| v.version)
                    .ok_or_else(|| EolscanError::Catalog {
                        product: name.to_string(),
                        message: format!("unparsable cycle: {cycle}"),
                    })?
            }
            None => continue,
        };

        let expiration = match &record.eol {
            Some(EolValue::Date(raw)) => Some(
                NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
                    EolscanError::Catalog {
                        product: name.to_string(),
                        message: format!("unparsable eol date {raw}: {e}"),
                    }
                })?,
            ),
            Some(EolValue::Bool(_)) | None => None,
        };

        schedules.push(Schedule {
            name: name.to_string(),
            codename: record.codename.clone(),
            version,
            expiration,
        });
    }

    Ok(schedules)
}
