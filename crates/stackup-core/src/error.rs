//! Error types for the orchestration engine
//!
//! Every variant is fatal to the run. The orchestrator records the failing
//! step and hands the error to the caller, which prints it and exits non-zero.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The user picked something outside the accepted set (package manager, workflow, provider)
    #[error("Invalid {what} '{value}'. Please choose {expected}.")]
    InvalidSelection {
        what: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The generator output contained no `  cd <name>` hint line
    #[error("Failed to capture project name from generator output")]
    ProjectNameNotFound,

    #[error("{step}: {}: {source}", .path.display())]
    Filesystem {
        step: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A child process ran but exited unsuccessfully
    #[error("{step}: `{command}` {status}")]
    CommandFailed {
        step: &'static str,
        command: String,
        status: String,
    },

    /// A child process could not be started at all
    #[error("{step}: could not start `{command}`: {message}")]
    Spawn {
        step: &'static str,
        command: String,
        message: String,
    },

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] io::Error),

    #[error("Directory stack error: {0}")]
    DirectoryStack(String),

    #[error("Missing required runtimes:\n{0}")]
    MissingRuntime(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ScaffoldError {
    pub(crate) fn filesystem(step: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            step,
            path: path.into(),
            source,
        }
    }
}
