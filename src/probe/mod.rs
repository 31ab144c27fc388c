//! Version queries: external probe commands that report component versions.
//!
//! A [`VersionQuery`] pairs an exec-style argument vector with an optional
//! regex whose `Version` named capture group extracts the version substring
//! from noisy tool output. Execution goes through the [`ProcessRunner`]
//! seam so scans can be driven hermetically in tests.

use crate::error::{EolscanError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Name of the capture group a query pattern must define.
pub const VERSION_GROUP: &str = "Version";

/// Executes probe commands and resolves executables on the search path.
///
/// The contract is deliberately lossy: any failure to run a command or to
/// find an executable is reported as absence, never as an error. A probe
/// blocks until the subprocess exits; no timeout is imposed here.
pub trait ProcessRunner {
    /// Run an argument vector, returning captured stdout on success.
    fn run(&self, argv: &[String]) -> Option<String>;

    /// Resolve an executable name against the search path.
    fn look_path(&self, executable: &str) -> Option<PathBuf>;
}

/// [`ProcessRunner`] backed by `std::process` and the `PATH` variable.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> Option<String> {
        let (command, args) = argv.split_first()?;
        let output = Command::new(command).args(args).output().ok()?;
        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn look_path(&self, executable: &str) -> Option<PathBuf> {
        // Absolute or relative paths bypass the PATH walk.
        if executable.contains(std::path::MAIN_SEPARATOR) {
            let candidate = PathBuf::from(executable);
            return candidate.is_file().then_some(candidate);
        }

        let path_var = std::env::var_os("PATH")?;
        std::env::split_paths(&path_var)
            .map(|dir| dir.join(executable))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Command line instruction for retrieving a component's version string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "QueryRepr", into = "QueryRepr")]
pub struct VersionQuery {
    /// Exec-style argument vector; the first element is the executable
    pub command: Vec<String>,
    /// Optional expression capturing the version within larger output
    pub pattern: Option<Regex>,
}

impl PartialEq for VersionQuery {
    fn eq(&self, other: &Self) -> bool {
        self.command == other.command
            && self.pattern.as_ref().map(Regex::as_str) == other.pattern.as_ref().map(Regex::as_str)
    }
}

impl Eq for VersionQuery {}

/// Wire representation: the pattern travels as its source string.
#[derive(Debug, Serialize, Deserialize)]
struct QueryRepr {
    command: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
}

impl TryFrom<QueryRepr> for VersionQuery {
    type Error = EolscanError;

    fn try_from(repr: QueryRepr) -> Result<Self> {
        let pattern = match repr.pattern.as_deref().filter(|p| !p.is_empty()) {
            Some(source) => Some(Regex::new(source).map_err(|e| {
                EolscanError::Config(format!("invalid version query pattern {source}: {e}"))
            })?),
            None => None,
        };
        Ok(Self {
            command: repr.command,
            pattern,
        })
    }
}

impl From<VersionQuery> for QueryRepr {
    fn from(query: VersionQuery) -> Self {
        Self {
            command: query.command,
            pattern: query.pattern.map(|p| p.as_str().to_string()),
        }
    }
}

impl VersionQuery {
    /// Build a query from an argument vector, without a pattern.
    pub fn new(command: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            command: command.into_iter().map(Into::into).collect(),
            pattern: None,
        }
    }

    /// Ensure the query is runnable.
    pub fn validate(&self, component: &str) -> Result<()> {
        if self.command.is_empty() {
            return Err(EolscanError::Config(format!(
                "{component} has an empty version query"
            )));
        }
        Ok(())
    }

    /// Run the query and extract a raw version or codename string.
    ///
    /// Trailing CR/LF is stripped. When a pattern is configured, each
    /// output line is scanned independently and the first line whose
    /// `Version` group matches wins; multi-line output is never treated
    /// as a single blob. Absence of output or of a match yields `None`.
    pub fn execute(&self, runner: &dyn ProcessRunner) -> Option<String> {
        let raw = runner.run(&self.command)?;
        let raw = raw.trim_end_matches(['\r', '\n']);

        let Some(pattern) = &self.pattern else {
            return Some(raw.to_string());
        };

        for line in raw.lines() {
            if let Some(captures) = pattern.captures(line) {
                if let Some(matched) = captures.name(VERSION_GROUP) {
                    return Some(matched.as_str().to_string());
                }
            }
        }

        None
    }
}
