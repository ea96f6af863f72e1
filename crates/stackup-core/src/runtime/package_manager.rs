//! Package manager selection

use crate::error::ScaffoldError;
use std::fmt;
use std::str::FromStr;

/// JavaScript package managers the orchestrator can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Bun,
}

impl PackageManager {
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Bun => "bun",
        }
    }

    /// Binary used to run a package's executable without installing it globally
    pub fn exec_name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npx",
            PackageManager::Bun => "bunx",
        }
    }

    /// Where to send the user when the binary is missing from PATH
    pub fn install_hint(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm (install Node.js from https://nodejs.org)",
            PackageManager::Bun => "bun (install from https://bun.sh)",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses free text the way it arrives from a prompt: trimmed and case-folded
impl FromStr for PackageManager {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "bun" => Ok(PackageManager::Bun),
            _ => Err(ScaffoldError::InvalidSelection {
                what: "package manager",
                value: s.trim().to_string(),
                expected: "'npm' or 'bun'",
            }),
        }
    }
}
