//! Run configuration
//!
//! Resolution order (lowest to highest): built-in defaults, the YAML file
//! passed with `--config`, environment variables, then CLI flags applied by
//! the binary.

use crate::error::{Result, ScaffoldError};
use crate::runtime::LaunchMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default compose file for the database step
pub const DEFAULT_COMPOSE_URL: &str =
    "https://raw.githubusercontent.com/docker/awesome-compose/master/postgresql-pgadmin/compose.yaml";

/// Environment variable overriding the compose file URL
pub const COMPOSE_URL_ENV: &str = "STACKUP_COMPOSE_URL";

/// Environment variable overriding the dev-server launch mode
pub const LAUNCH_MODE_ENV: &str = "STACKUP_LAUNCH_MODE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the database compose file is downloaded from
    pub compose_url: Url,
    pub launch_mode: LaunchMode,
    /// Probe the package manager and Node.js before running anything
    pub check_runtimes: bool,
    /// User agent for HTTP requests
    pub user_agent: String,
    /// Folder name suggested for the backend
    pub backend_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compose_url: Url::parse(DEFAULT_COMPOSE_URL).expect("default compose URL is valid"),
            launch_mode: LaunchMode::Auto,
            check_runtimes: true,
            user_agent: concat!("stackup/", env!("CARGO_PKG_VERSION")).to_string(),
            backend_dir: "backend".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional YAML file, and the process environment
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut settings = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScaffoldError::filesystem("Load configuration", path, e))?;
        Self::from_yaml(&content)
            .map_err(|e| ScaffoldError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(COMPOSE_URL_ENV) {
            self.compose_url = Url::parse(&raw).map_err(|e| {
                ScaffoldError::Config(format!("{}='{}' is not a valid URL: {}", COMPOSE_URL_ENV, raw, e))
            })?;
        }
        if let Some(raw) = lookup(LAUNCH_MODE_ENV) {
            self.launch_mode = raw
                .parse()
                .map_err(|e| ScaffoldError::Config(format!("{}: {}", LAUNCH_MODE_ENV, e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.compose_url.as_str(), DEFAULT_COMPOSE_URL);
        assert_eq!(settings.launch_mode, LaunchMode::Auto);
        assert!(settings.check_runtimes);
        assert_eq!(settings.backend_dir, "backend");
        assert!(settings.user_agent.starts_with("stackup/"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml("launch_mode: window\nbackend_dir: server\n").unwrap();
        assert_eq!(settings.launch_mode, LaunchMode::Window);
        assert_eq!(settings.backend_dir, "server");
        assert_eq!(settings.compose_url.as_str(), DEFAULT_COMPOSE_URL);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Settings::from_yaml("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_unknown_launch_mode_in_yaml_fails() {
        assert!(Settings::from_yaml("launch_mode: sometimes\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (COMPOSE_URL_ENV, "https://example.com/db.yaml"),
            (LAUNCH_MODE_ENV, "foreground"),
        ]);
        let mut settings = Settings::default();
        settings
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.compose_url.as_str(), "https://example.com/db.yaml");
        assert_eq!(settings.launch_mode, LaunchMode::Foreground);
    }

    #[test]
    fn test_invalid_env_url_is_a_config_error() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env(|key| (key == COMPOSE_URL_ENV).then(|| "not a url".to_string()))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stackup.yaml");
        std::fs::write(&path, "check_runtimes: false\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert!(!settings.check_runtimes);
    }
}
