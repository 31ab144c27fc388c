//! The lifecycle catalog: schedules and version queries per component.

pub mod record;
#[cfg(feature = "fetch")]
pub mod source;

use crate::error::Result;
use crate::model::Schedule;
use crate::probe::VersionQuery;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Catalog of LTS schedules and the probes used to measure components.
///
/// Both maps preserve insertion order from the source documents; order has
/// no semantic weight beyond deterministic iteration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Enable additional logging during scans
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub debug: bool,

    /// Version probe commands, keyed on component name
    #[serde(default)]
    pub version_queries: IndexMap<String, VersionQuery>,

    /// Lifecycle schedules, keyed on component name.
    /// Populated from product records, not from the YAML document.
    #[serde(skip)]
    pub components: IndexMap<String, Vec<Schedule>>,
}

impl Catalog {
    /// Decode the catalog configuration document.
    pub fn from_yaml(document: &str) -> Result<Self> {
        let catalog: Self = serde_yaml_ng::from_str(document)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Ensure data integrity of the configured version queries.
    pub fn validate(&self) -> Result<()> {
        for (component, query) in &self.version_queries {
            query.validate(component)?;
        }
        Ok(())
    }

    /// Register the schedules for one component, replacing any previous set.
    pub fn insert_schedules(&mut self, name: impl Into<String>, schedules: Vec<Schedule>) {
        self.components.insert(name.into(), schedules);
    }

    /// Look up the schedules for a component.
    #[must_use]
    pub fn schedules(&self, name: &str) -> Option<&[Schedule]> {
        self.components.get(name).map(Vec::as_slice)
    }

    /// Look up the version query for a component.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&VersionQuery> {
        self.version_queries.get(name)
    }
}
