//! Dev-server launch planning
//!
//! The server either runs in the foreground (the orchestrator blocks until the
//! user stops it) or in a new terminal window that the orchestrator does not
//! wait on.

use super::command::CommandSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// New window on macOS, foreground elsewhere
    #[default]
    Auto,
    Foreground,
    Window,
}

impl LaunchMode {
    /// Collapse `Auto` into the concrete mode for this platform
    pub fn resolve(self) -> LaunchMode {
        match self {
            LaunchMode::Auto if cfg!(target_os = "macos") => LaunchMode::Window,
            LaunchMode::Auto => LaunchMode::Foreground,
            other => other,
        }
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LaunchMode::Auto => "auto",
            LaunchMode::Foreground => "foreground",
            LaunchMode::Window => "window",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for LaunchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(LaunchMode::Auto),
            "foreground" | "fg" => Ok(LaunchMode::Foreground),
            "window" | "terminal" => Ok(LaunchMode::Window),
            other => Err(format!(
                "unknown launch mode '{}' (expected auto, foreground or window)",
                other
            )),
        }
    }
}

/// What the orchestrator should execute to start the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    /// Run `server` attached to this terminal and wait for it
    Foreground(CommandSpec),
    /// Run `opener`, which starts the server in a new window
    Window(CommandSpec),
}

/// Build the launch plan for `server`, to be started from `dir`
pub fn plan_launch(mode: LaunchMode, server: &CommandSpec, dir: &Path) -> LaunchPlan {
    match mode.resolve() {
        LaunchMode::Window => LaunchPlan::Window(window_command(server, dir)),
        _ => LaunchPlan::Foreground(server.clone()),
    }
}

/// Single-quote `dir` for a POSIX shell; embedded `'` becomes `'\''`
#[cfg(not(windows))]
fn shell_quote(dir: &Path) -> String {
    format!("'{}'", dir.display().to_string().replace('\'', "'\\''"))
}

/// Escape `text` for use inside an AppleScript string literal
#[cfg(target_os = "macos")]
fn applescript_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(target_os = "macos")]
fn window_command(server: &CommandSpec, dir: &Path) -> CommandSpec {
    let line = format!("cd {} && {}", shell_quote(dir), server);
    let script = format!(
        "tell app \"Terminal\" to do script \"{}\"",
        applescript_escape(&line)
    );
    CommandSpec::new("osascript", ["-e".to_string(), script])
}

#[cfg(windows)]
fn window_command(server: &CommandSpec, dir: &Path) -> CommandSpec {
    CommandSpec::new(
        "cmd",
        [
            "/C".to_string(),
            "start".to_string(),
            "cmd".to_string(),
            "/K".to_string(),
            format!("cd /d \"{}\" && {}", dir.display(), server),
        ],
    )
}

#[cfg(not(any(target_os = "macos", windows)))]
fn window_command(server: &CommandSpec, dir: &Path) -> CommandSpec {
    CommandSpec::new(
        "x-terminal-emulator",
        [
            "-e".to_string(),
            "sh".to_string(),
            "-c".to_string(),
            format!("cd {} && {}", shell_quote(dir), server),
        ],
    )
}
