//! Platform identity: which OS product is this host, and is it Linux.

use std::fs;

/// Identifies the running host for schedule lookup purposes.
pub trait Platform {
    /// Canonical OS product name, as used by the lifecycle catalog.
    fn os_name(&self) -> String;

    /// Whether the execution environment is a Linux-family kernel.
    fn is_linux(&self) -> bool;
}

/// [`Platform`] implementation for the actual host.
///
/// On Linux the distribution identity comes from the `ID` field of
/// `/etc/os-release`, which uses the same lowercase product slugs as the
/// catalog ("ubuntu", "debian", "alpine").
#[derive(Debug, Default)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn os_name(&self) -> String {
        if cfg!(target_os = "macos") {
            "macos".to_string()
        } else if cfg!(target_os = "linux") {
            os_release_id().unwrap_or_else(|| "linux".to_string())
        } else {
            std::env::consts::OS.to_string()
        }
    }

    fn is_linux(&self) -> bool {
        cfg!(any(target_os = "linux", target_os = "android"))
    }
}

/// Read the distribution ID from `/etc/os-release`.
fn os_release_id() -> Option<String> {
    let content = fs::read_to_string("/etc/os-release").ok()?;
    parse_os_release_id(&content)
}

fn parse_os_release_id(content: &str) -> Option<String> {
    for line in content.lines() {
        if let Some(value) = line.strip_prefix("ID=") {
            let id = value.trim().trim_matches('"').trim_matches('\'');
            if !id.is_empty() {
                return Some(id.to_lowercase());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os_release_id() {
        let content = "NAME=\"Ubuntu\"\nID=ubuntu\nID_LIKE=debian\n";
        assert_eq!(parse_os_release_id(content).as_deref(), Some("ubuntu"));
    }

    #[test]
    fn test_parse_os_release_id_quoted() {
        let content = "ID=\"opensuse-leap\"\n";
        assert_eq!(
            parse_os_release_id(content).as_deref(),
            Some("opensuse-leap")
        );
    }

    #[test]
    fn test_parse_os_release_id_missing() {
        assert_eq!(parse_os_release_id("NAME=Something\n"), None);
    }
}
