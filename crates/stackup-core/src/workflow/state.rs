//! Mutable state threaded through a run

use super::Step;
use crate::error::{Result, ScaffoldError};
use crate::runtime::PackageManager;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Completed,
    /// Declined at its prompt, or not applicable
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    pub status: OutcomeStatus,
    pub message: String,
}

/// State owned by one orchestrator run
///
/// Child processes run in [`current_dir`](Self::current_dir) and files are
/// written relative to it. The process working directory is never changed.
#[derive(Debug)]
pub struct WorkflowState {
    package_manager: PackageManager,
    root: PathBuf,
    /// Directories entered, innermost last
    stack: Vec<PathBuf>,
    project_name: Option<String>,
    outcomes: Vec<StepOutcome>,
}

impl WorkflowState {
    pub fn new(package_manager: PackageManager, root: impl Into<PathBuf>) -> Self {
        Self {
            package_manager,
            root: root.into(),
            stack: Vec::new(),
            project_name: None,
            outcomes: Vec::new(),
        }
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current_dir(&self) -> &Path {
        self.stack.last().unwrap_or(&self.root)
    }

    /// Number of folders entered and not yet left
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = Some(name.into());
    }

    /// Enter `name` below the current directory, which must already exist
    pub fn descend(&mut self, step: &'static str, name: &str) -> Result<&Path> {
        if name.trim().is_empty() {
            return Err(ScaffoldError::DirectoryStack(format!(
                "{}: refusing to enter an unnamed directory",
                step
            )));
        }

        let target = self.current_dir().join(name);
        let metadata =
            std::fs::metadata(&target).map_err(|e| ScaffoldError::filesystem(step, &target, e))?;
        if !metadata.is_dir() {
            return Err(ScaffoldError::filesystem(
                step,
                &target,
                io::Error::new(io::ErrorKind::Other, "not a directory"),
            ));
        }

        tracing::debug!(dir = %target.display(), depth = self.stack.len() + 1, "entered directory");
        self.stack.push(target);
        Ok(self.current_dir())
    }

    /// Leave the innermost entered directory
    pub fn ascend(&mut self) -> Result<&Path> {
        if self.stack.pop().is_none() {
            return Err(ScaffoldError::DirectoryStack(
                "already at the starting directory".to_string(),
            ));
        }
        tracing::debug!(dir = %self.current_dir().display(), depth = self.stack.len(), "left directory");
        Ok(self.current_dir())
    }

    pub fn record(&mut self, step: Step, status: OutcomeStatus, message: impl Into<String>) {
        self.outcomes.push(StepOutcome {
            step,
            status,
            message: message.into(),
        });
    }

    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    /// Whether `step` already completed in this run
    pub fn completed(&self, step: Step) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.step == step && o.status == OutcomeStatus::Completed)
    }
}
