//! Platform directory ordering

/// Platform shared by every operating system, searched last
pub const COMMON_PLATFORM: &str = "common";

/// Page platform matching the operating system this binary was built for
pub fn host_platform() -> &'static str {
    match std::env::consts::OS {
        "macos" => "osx",
        "windows" => "windows",
        "android" => "android",
        "freebsd" => "freebsd",
        "openbsd" => "openbsd",
        "netbsd" => "netbsd",
        "solaris" | "illumos" => "sunos",
        _ => "linux",
    }
}

/// Platform directories in search order: the requested (or host) platform, then `common`
pub fn platform_dirs(platform_override: Option<&str>) -> Vec<String> {
    let primary = platform_override
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| host_platform().to_string());

    if primary == COMMON_PLATFORM {
        vec![primary]
    } else {
        vec![primary, COMMON_PLATFORM.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_platform_first() {
        let dirs = platform_dirs(None);
        assert_eq!(dirs, vec![host_platform().to_string(), "common".to_string()]);
    }

    #[test]
    fn test_override_replaces_host() {
        assert_eq!(platform_dirs(Some("OSX")), vec!["osx", "common"]);
        assert_eq!(platform_dirs(Some("")), platform_dirs(None));
    }

    #[test]
    fn test_common_not_duplicated() {
        assert_eq!(platform_dirs(Some("common")), vec!["common"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_host() {
        assert_eq!(host_platform(), "linux");
    }
}
