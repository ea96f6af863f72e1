//! Derivation of concrete external commands from abstract actions
//!
//! npm and bun differ only in binary name and flag spelling, so every
//! package-dependent command goes through [`PackageManager::command`].

use super::package_manager::PackageManager;
use std::fmt;

/// Program name plus ordered argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Abstract package-manager action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Scaffold a Vite project; without a name the generator asks for one
    Scaffold { name: Option<String> },
    /// Install everything listed in the manifest
    InstallDependencies,
    AddDev(Vec<String>),
    Add(Vec<String>),
    /// Run a package's executable, e.g. `npx tailwindcss init -p`
    Exec { tool: String, args: Vec<String> },
    InitManifest,
    /// Run a script from package.json
    RunScript(String),
}

impl Action {
    pub fn add<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Action::Add(packages.into_iter().map(Into::into).collect())
    }

    pub fn add_dev<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Action::AddDev(packages.into_iter().map(Into::into).collect())
    }

    pub fn exec<I, S>(tool: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Action::Exec {
            tool: tool.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl PackageManager {
    /// Derive the command for `action`. Pure: same inputs, same output.
    pub fn command(&self, action: &Action) -> CommandSpec {
        let pm = self.name();
        match (self, action) {
            (PackageManager::Npm, Action::Scaffold { name }) => {
                let mut args = vec!["create".to_string(), "vite@latest".to_string()];
                args.extend(name.iter().cloned());
                CommandSpec::new(pm, args)
            }
            (PackageManager::Bun, Action::Scaffold { name }) => {
                let mut args = vec!["create".to_string(), "vite".to_string()];
                args.extend(name.iter().cloned());
                CommandSpec::new(pm, args)
            }
            (_, Action::InstallDependencies) => CommandSpec::new(pm, ["install"]),
            (PackageManager::Npm, Action::AddDev(packages)) => {
                CommandSpec::new(pm, prepend(&["install", "-D"], packages))
            }
            (PackageManager::Bun, Action::AddDev(packages)) => {
                CommandSpec::new(pm, prepend(&["add", "-D"], packages))
            }
            (PackageManager::Npm, Action::Add(packages)) => {
                CommandSpec::new(pm, prepend(&["install"], packages))
            }
            (PackageManager::Bun, Action::Add(packages)) => {
                CommandSpec::new(pm, prepend(&["add"], packages))
            }
            (_, Action::Exec { tool, args }) => {
                CommandSpec::new(self.exec_name(), prepend(&[tool.as_str()], args))
            }
            (_, Action::InitManifest) => CommandSpec::new(pm, ["init", "-y"]),
            (_, Action::RunScript(script)) => CommandSpec::new(pm, ["run", script.as_str()]),
        }
    }
}

fn prepend(head: &[&str], tail: &[String]) -> Vec<String> {
    head.iter()
        .map(|s| s.to_string())
        .chain(tail.iter().cloned())
        .collect()
}
