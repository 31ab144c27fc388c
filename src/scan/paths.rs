//! Well-known component name and path tables.

use std::path::Path;

/// Operating system product names in the lifecycle catalog.
///
/// Components with these names are handled by the OS scan stage and
/// skipped by the application scan.
pub const OPERATING_SYSTEMS: &[&str] = &[
    "almalinux",
    "alpine",
    "amazon-linux",
    "android",
    "centos",
    "debian",
    "fedora",
    "freebsd",
    "iphone",
    "kindle",
    "linux",
    "linuxmint",
    "macos",
    "nixos",
    "openbsd",
    "opensuse",
    "rhel",
    "rocky-linux",
    "ros",
    "ubuntu",
    "windows",
    "windowsembedded",
    "windowsserver",
    "yocto",
];

/// True for known operating system product names.
#[must_use]
pub fn is_operating_system(product: &str) -> bool {
    OPERATING_SYSTEMS.contains(&product)
}

/// Stock executable directories eligible for skipping in quiet mode.
pub const SYSTEM_PATHS: &[&str] = &[
    "/bin",
    "/usr/bin",
    "/usr/sbin",
    "/usr/share/bin",
    "/sbin",
    "c:\\Windows",
    "c:\\Windows\\system32",
    "c:\\Windows\\System32\\Wbem",
    "/mnt/c/Windows",
    "/mnt/c/Windows/system32",
    "/mnt/c/Windows/System32/Wbem",
];

/// True when an executable path is a direct child of a system directory.
#[must_use]
pub fn is_system_executable(executable: &Path) -> bool {
    executable
        .parent()
        .is_some_and(|dir| SYSTEM_PATHS.iter().any(|system| Path::new(system) == dir))
}
