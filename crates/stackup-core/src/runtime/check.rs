//! Toolchain detection for the selected package manager and Node.js

use super::package_manager::PackageManager;
use crate::error::{Result, ScaffoldError};
use semver::Version;
use std::process::Command;

/// Oldest Node.js release current Vite templates support
pub const MIN_NODE_VERSION: Version = Version::new(18, 0, 0);

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(binary: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if the package manager binary is on PATH
pub fn check_package_manager(pm: PackageManager) -> RuntimeInfo {
    // npm is a .cmd shim on Windows
    let binary = if cfg!(windows) && pm == PackageManager::Npm {
        "npm.cmd"
    } else {
        pm.name()
    };
    probe(binary, pm.name())
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("node", "Node.js")
}

/// Parse `node --version` output such as `v20.11.1`
pub fn parse_node_version(raw: &str) -> Option<Version> {
    let cleaned = raw.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

/// Returns a warning when `node` is older than [`MIN_NODE_VERSION`]
pub fn node_version_warning(info: &RuntimeInfo) -> Option<String> {
    let raw = info.version.as_deref()?;
    let version = parse_node_version(raw)?;
    if version < MIN_NODE_VERSION {
        Some(format!(
            "Node.js {} detected; Vite needs {} or newer",
            version, MIN_NODE_VERSION
        ))
    } else {
        None
    }
}

/// Probe the toolchain for `pm`. A missing package manager is fatal; an old
/// or missing Node.js is only reported.
pub fn check_runtimes(pm: PackageManager) -> Result<(Vec<RuntimeInfo>, Vec<String>)> {
    let mut results = Vec::new();
    let mut warnings = Vec::new();

    let manager = check_package_manager(pm);
    if !manager.available {
        return Err(ScaffoldError::MissingRuntime(format!(
            "  - {}",
            pm.install_hint()
        )));
    }
    results.push(manager);

    let node = check_node();
    if node.available {
        if let Some(warning) = node_version_warning(&node) {
            warnings.push(warning);
        }
        results.push(node);
    } else if pm == PackageManager::Npm {
        warnings.push("Node.js not found on PATH".to_string());
    }

    Ok((results, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(version: &str) -> RuntimeInfo {
        RuntimeInfo {
            name: "Node.js",
            version: Some(version.to_string()),
            available: true,
        }
    }

    #[test]
    fn test_parse_node_version() {
        assert_eq!(parse_node_version("v20.11.1\n"), Some(Version::new(20, 11, 1)));
        assert_eq!(parse_node_version("18.0.0"), Some(Version::new(18, 0, 0)));
        assert_eq!(parse_node_version("garbage"), None);
    }

    #[test]
    fn test_old_node_warns() {
        let warning = node_version_warning(&node("v16.20.2"));
        assert!(warning.unwrap().contains("16.20.2"));
    }

    #[test]
    fn test_current_node_is_fine() {
        assert!(node_version_warning(&node("v22.1.0")).is_none());
        assert!(node_version_warning(&node("v18.0.0")).is_none());
    }

    #[test]
    fn test_unparseable_version_is_ignored() {
        assert!(node_version_warning(&node("nightly")).is_none());
    }
}
