//! Dockerfile base-image extraction.
//!
//! Parses `FROM` instructions into structured image references and filters
//! out references to locally declared build stages, which are not pullable
//! base images. Extraction is two-pass (collect, then filter) so that the
//! result does not depend on where stage declarations appear.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// `FROM [--platform=...] [<registry>/]<image>[:<tag>] [AS <stage>]`.
///
/// The registry component must look like a host: it contains a dot or a
/// port, or is `localhost`. A plain first path segment ("library/python")
/// is a namespace and stays part of the image name.
static FROM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*FROM\s+(?:--platform=\S+\s+)?(?:(?P<registry>[^\s/]*[.:][^\s/]*|localhost)/)?(?P<name>[^\s:]+)(?::(?P<tag>\S+))?(?:\s+AS\s+(?P<stage>\S+))?\s*$",
    )
    .expect("static regex")
});

/// Tag applied when a `FROM` line names no tag.
pub const DEFAULT_TAG: &str = "latest";

/// Debian slim variants share lifecycle data with their base series.
const SLIM_SUFFIX: &str = "-slim";

/// A container image reference from a `FROM` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Registry host, when the reference names one
    pub registry: Option<String>,
    /// Image name, possibly namespaced ("library/python")
    pub name: String,
    /// Image tag; defaults to `latest`
    pub tag: String,
    /// Build stage label introduced by an `AS` clause
    pub stage: Option<String>,
}

impl ImageRef {
    /// The last path segment of the image name, used as the component
    /// name when matching against lifecycle schedules.
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Parse a single `FROM` line into an image reference, verbatim.
fn parse_from_line(line: &str) -> Option<ImageRef> {
    let caps = FROM_LINE.captures(line)?;

    Some(ImageRef {
        registry: caps.name("registry").map(|m| m.as_str().to_string()),
        name: caps.name("name")?.as_str().to_string(),
        tag: caps
            .name("tag")
            .map_or_else(|| DEFAULT_TAG.to_string(), |m| m.as_str().to_string()),
        stage: caps.name("stage").map(|m| m.as_str().to_string()),
    })
}

fn strip_slim(s: &str) -> &str {
    s.strip_suffix(SLIM_SUFFIX).unwrap_or(s)
}

/// Extract the external base images referenced by a Dockerfile.
///
/// First pass parses every `FROM` line and records the build-stage names
/// it introduces; second pass drops candidates whose name matches a
/// declared stage. Stage comparison uses the verbatim names; `-slim`
/// suffixes are stripped only from the survivors. First-seen order is
/// preserved.
#[must_use]
pub fn extract_base_images(text: &str) -> Vec<ImageRef> {
    let mut candidates = Vec::new();
    let mut stages = HashSet::new();

    for line in text.lines() {
        if let Some(image) = parse_from_line(line) {
            if let Some(stage) = &image.stage {
                stages.insert(stage.clone());
            }
            candidates.push(image);
        }
    }

    candidates
        .into_iter()
        .filter(|image| !stages.contains(&image.name))
        .map(|mut image| {
            image.name = strip_slim(&image.name).to_string();
            image.tag = strip_slim(&image.tag).to_string();
            image
        })
        .collect()
}
