//! The scan engine: one synchronous pass over OS, kernel, applications,
//! and Dockerfile base images.
//!
//! Stages run to completion in sequence against a read-only catalog and a
//! lead-time-adjusted reference date. Missing probes and unparseable
//! application versions are skips; a broken OS or kernel entry is fatal,
//! because the tool's own configuration is expected to cover the host it
//! runs on.

pub mod paths;
pub mod platform;

use crate::catalog::Catalog;
use crate::error::{EolscanError, Result};
use crate::model::{parse_loose, scan_component, Detected, Schedule};
use crate::probe::ProcessRunner;
use chrono::{Months, NaiveDate, Utc};
use std::fs;
use std::path::Path;

pub use paths::{is_operating_system, is_system_executable, OPERATING_SYSTEMS, SYSTEM_PATHS};
pub use platform::{HostPlatform, Platform};

/// Lead time applied when the configured value is negative.
pub const DEFAULT_LEAD_MONTHS: i64 = 1;

/// Directories never descended into during Dockerfile discovery.
const SKIP_DIRS: &[&str] = &[".git", "node_modules", "vendor", "target"];

/// Immutable per-run scanner configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Months to shift the reference clock forward, for early warning
    /// ahead of the literal end-of-life date. Negative values and values
    /// that do not fit a month count fall back to
    /// [`DEFAULT_LEAD_MONTHS`]; zero disables the shift.
    pub lead_months: i64,
    /// Skip applications resolved to stock system directories
    pub quiet: bool,
    /// Log detected component versions
    pub debug: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            lead_months: DEFAULT_LEAD_MONTHS,
            quiet: false,
            debug: false,
        }
    }
}

impl ScanConfig {
    /// Reference date for expiration comparisons: today shifted forward
    /// by the configured lead time.
    #[must_use]
    pub fn reference_date(&self, today: NaiveDate) -> NaiveDate {
        let months = if self.lead_months < 0 {
            DEFAULT_LEAD_MONTHS
        } else {
            self.lead_months
        };
        let months = u32::try_from(months).unwrap_or(DEFAULT_LEAD_MONTHS as u32);
        today.checked_add_months(Months::new(months)).unwrap_or(today)
    }
}

/// Result of one scan pass.
///
/// Absence of a warning means "not end of life, or not determinable",
/// never a claim of full coverage. A tree-walk failure during Dockerfile
/// discovery is carried here as a partial result: warnings collected
/// before the failure are preserved.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Human-readable warnings, in stage order
    pub warnings: Vec<String>,
    /// Filesystem error that aborted Dockerfile discovery, if any
    pub walk_error: Option<EolscanError>,
}

/// Scans host components against a lifecycle catalog.
pub struct Scanner<'a> {
    catalog: &'a Catalog,
    config: ScanConfig,
    platform: &'a dyn Platform,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Scanner<'a> {
    /// Build a scanner over a catalog with explicit collaborators.
    pub fn new(
        catalog: &'a Catalog,
        config: ScanConfig,
        platform: &'a dyn Platform,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            catalog,
            config,
            platform,
            runner,
        }
    }

    /// Run all scan stages using the wall clock, rooted at `root` for
    /// Dockerfile discovery.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome> {
        let reference = self.config.reference_date(Utc::now().date_naive());
        self.scan_at(root, reference)
    }

    /// Run all scan stages against an explicit reference date.
    pub fn scan_at(&self, root: &Path, reference: NaiveDate) -> Result<ScanOutcome> {
        let mut warnings = Vec::new();

        if let Some(warning) = self.scan_os(reference)? {
            warnings.push(warning);
        }

        if self.platform.is_linux() {
            if let Some(warning) = self.scan_kernel(reference)? {
                warnings.push(warning);
            }
        }

        warnings.extend(self.scan_applications(reference));

        let walk_error = self.scan_dockerfiles(root, reference, &mut warnings);

        Ok(ScanOutcome {
            warnings,
            walk_error,
        })
    }

    /// Check the host operating system.
    ///
    /// Unknown platforms are expected and skip with a diagnostic. A
    /// configured probe that yields no usable version is fatal: the OS
    /// identity should always be resolvable on a covered platform.
    fn scan_os(&self, reference: NaiveDate) -> Result<Option<String>> {
        let os = self.platform.os_name();

        let Some(schedules) = self.catalog.schedules(&os) else {
            tracing::info!("no known support schedule found for os: {os}");
            return Ok(None);
        };

        let Some(query) = self.catalog.query(&os) else {
            tracing::info!("no known version query command found for os: {os}");
            return Ok(None);
        };

        let raw = query
            .execute(self.runner)
            .ok_or_else(|| EolscanError::UnresolvableOs(os.clone()))?;
        let version =
            parse_loose(&raw).ok_or_else(|| EolscanError::UnresolvableOs(os.clone()))?;

        if self.config.debug {
            tracing::info!("detected os: {os} v{version}");
        }

        Ok(scan_component(
            &os,
            &Detected::Version(version),
            schedules,
            reference,
        ))
    }

    /// Check the Linux kernel. Only called on Linux hosts, where the
    /// catalog is expected to always carry a `linux` entry.
    fn scan_kernel(&self, reference: NaiveDate) -> Result<Option<String>> {
        const KERNEL: &str = "linux";

        let schedules = self.catalog.schedules(KERNEL).ok_or_else(|| {
            EolscanError::MissingKernelEntry("no support schedule for linux".to_string())
        })?;
        let query = self.catalog.query(KERNEL).ok_or_else(|| {
            EolscanError::MissingKernelEntry("no version query for linux".to_string())
        })?;

        let raw = query
            .execute(self.runner)
            .ok_or_else(|| EolscanError::UnresolvableOs(KERNEL.to_string()))?;
        let version =
            parse_loose(&raw).ok_or_else(|| EolscanError::UnresolvableOs(KERNEL.to_string()))?;

        if self.config.debug {
            tracing::info!("detected kernel: {KERNEL} v{version}");
        }

        Ok(scan_component(
            KERNEL,
            &Detected::Version(version),
            schedules,
            reference,
        ))
    }

    /// Check every non-OS component in the catalog, sorted by name so the
    /// warning order is reproducible.
    fn scan_applications(&self, reference: NaiveDate) -> Vec<String> {
        let mut names: Vec<&str> = self
            .catalog
            .components
            .keys()
            .map(String::as_str)
            .filter(|name| !is_operating_system(name))
            .collect();
        names.sort_unstable();

        let mut warnings = Vec::new();
        for name in names {
            let schedules = match self.catalog.schedules(name) {
                Some(s) => s,
                None => continue,
            };
            if let Some(warning) = self.scan_application(name, schedules, reference) {
                warnings.push(warning);
            }
        }
        warnings
    }

    /// Check one application. Every missing precondition is a silent
    /// skip: a developer may simply not have a given tool installed.
    fn scan_application(
        &self,
        name: &str,
        schedules: &[Schedule],
        reference: NaiveDate,
    ) -> Option<String> {
        let query = self.catalog.query(name).or_else(|| {
            tracing::debug!("no version query command found for application: {name}");
            None
        })?;

        let executable = query.command.first()?;
        let resolved = self.runner.look_path(executable).or_else(|| {
            tracing::debug!("executable not found: {executable} for application {name}");
            None
        })?;

        if self.config.quiet && is_system_executable(&resolved) {
            tracing::debug!("skipping system executable in quiet mode: {executable}");
            return None;
        }

        let raw = query.execute(self.runner)?;
        let version = match parse_loose(&raw) {
            Some(v) => v,
            None => {
                tracing::debug!("unparsable version for application {name}: {raw}");
                return None;
            }
        };

        if self.config.debug {
            tracing::info!("detected application: {name} v{version}");
        }

        scan_component(name, &Detected::Version(version), schedules, reference)
    }

    /// Walk the working tree for Dockerfiles and check their base images.
    ///
    /// The walk is depth-first and aborts on the first filesystem error;
    /// warnings gathered before the failure stay in `warnings` and the
    /// error is returned for the caller to surface.
    fn scan_dockerfiles(
        &self,
        root: &Path,
        reference: NaiveDate,
        warnings: &mut Vec<String>,
    ) -> Option<EolscanError> {
        self.walk_dockerfiles(root, reference, warnings).err()
    }

    fn walk_dockerfiles(
        &self,
        dir: &Path,
        reference: NaiveDate,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| EolscanError::io(dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| EolscanError::io(dir, e))?;
            paths.push(entry.path());
        }
        // Directory enumeration order is platform-dependent; sort for
        // reproducible warning order.
        paths.sort();

        for path in paths {
            if path.is_dir() {
                let skip = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| SKIP_DIRS.contains(&n));
                if !skip {
                    self.walk_dockerfiles(&path, reference, warnings)?;
                }
            } else if is_dockerfile_name(&path) {
                self.scan_dockerfile(&path, reference, warnings)?;
            }
        }

        Ok(())
    }

    /// Check the base images of one Dockerfile.
    fn scan_dockerfile(
        &self,
        path: &Path,
        reference: NaiveDate,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|e| EolscanError::io(path, e))?;

        for image in crate::dockerfile::extract_base_images(&text) {
            let base = image.base_name();
            let Some(schedules) = self.catalog.schedules(base) else {
                tracing::debug!("no known support schedule found for image: {base}");
                continue;
            };

            // An unparsable tag is a codename, not a failure: distro
            // images are commonly tagged by release nickname.
            let detected = match parse_loose(&image.tag) {
                Some(version) => Detected::Version(version),
                None => Detected::Codename(image.tag.clone()),
            };

            if let Some(warning) = scan_component(base, &detected, schedules, reference) {
                warnings.push(warning);
            }
        }

        Ok(())
    }
}

/// True for files following Dockerfile naming conventions.
fn is_dockerfile_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name == "Dockerfile" || name.starts_with("Dockerfile.") || name.ends_with(".Dockerfile")
}
