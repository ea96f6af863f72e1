//! Interactive process execution
//!
//! Children inherit the terminal so generators can prompt and draw progress
//! bars. When capture is requested, stdout is piped through a [`TeeWriter`]
//! that forwards every chunk to the real stdout and to an in-memory buffer.

use super::command::CommandSpec;
use std::io::{self, Write};
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::{ChildStdout, Command as TokioCommand};

/// How a child process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// Exited unsuccessfully; `None` when killed by a signal
    Failed(Option<i32>),
    /// Never started (binary missing, permission denied, bad cwd)
    SpawnError(String),
}

/// Result of a single invocation. The runner never errors; the caller decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub status: RunStatus,
    /// Copy of stdout, present only when capture was requested
    pub stdout: Option<String>,
}

impl RunOutput {
    pub fn success(stdout: Option<String>) -> Self {
        Self {
            status: RunStatus::Success,
            stdout,
        }
    }

    pub fn failed(code: Option<i32>) -> Self {
        Self {
            status: RunStatus::Failed(code),
            stdout: None,
        }
    }

    pub fn spawn_error(message: impl Into<String>) -> Self {
        Self {
            status: RunStatus::SpawnError(message.into()),
            stdout: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}

/// Executes external commands on behalf of the orchestrator
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run to completion with the terminal attached
    async fn run(&mut self, spec: &CommandSpec, cwd: &Path, capture: bool) -> RunOutput;

    /// Start without waiting for exit (new terminal windows)
    async fn launch_detached(&mut self, spec: &CommandSpec, cwd: &Path) -> RunOutput;
}

/// Writer that duplicates every write into two sinks, in order
pub struct TeeWriter<A, B> {
    primary: A,
    secondary: B,
}

impl<A: Write, B: Write> TeeWriter<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.primary, self.secondary)
    }
}

impl<A: Write, B: Write> Write for TeeWriter<A, B> {
    /// Both sinks always see `buf`; a failing terminal must not starve the capture.
    /// The first error is returned after both writes.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let primary = self.primary.write_all(buf);
        let secondary = self.secondary.write_all(buf);
        primary.and(secondary).map(|_| buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let primary = self.primary.flush();
        let secondary = self.secondary.flush();
        primary.and(secondary)
    }
}

/// Real runner backed by tokio processes
#[derive(Debug, Default)]
pub struct InteractiveRunner;

impl InteractiveRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for InteractiveRunner {
    async fn run(&mut self, spec: &CommandSpec, cwd: &Path, capture: bool) -> RunOutput {
        let mut command = build_command(spec, cwd);
        command
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .stdout(if capture {
                Stdio::piped()
            } else {
                Stdio::inherit()
            });

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => return RunOutput::spawn_error(e.to_string()),
        };

        let captured = match child.stdout.take() {
            Some(stdout) => Some(stream_and_capture(stdout).await),
            None => None,
        };

        match child.wait().await {
            Ok(status) if status.success() => RunOutput::success(captured),
            Ok(status) => RunOutput {
                status: RunStatus::Failed(status.code()),
                stdout: captured,
            },
            Err(e) => RunOutput::spawn_error(format!("failed to wait for process: {}", e)),
        }
    }

    async fn launch_detached(&mut self, spec: &CommandSpec, cwd: &Path) -> RunOutput {
        let mut command = build_command(spec, cwd);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        match command.spawn() {
            Ok(_child) => RunOutput::success(None),
            Err(e) => RunOutput::spawn_error(e.to_string()),
        }
    }
}

/// npm, npx and bunx ship as `.cmd` shims on Windows, which only `cmd` resolves
#[cfg(windows)]
fn build_command(spec: &CommandSpec, cwd: &Path) -> TokioCommand {
    let mut command = TokioCommand::new("cmd");
    command
        .arg("/C")
        .arg(&spec.program)
        .args(&spec.args)
        .current_dir(cwd);
    command
}

#[cfg(not(windows))]
fn build_command(spec: &CommandSpec, cwd: &Path) -> TokioCommand {
    let mut command = TokioCommand::new(&spec.program);
    command.args(&spec.args).current_dir(cwd);
    command
}

/// Forward child stdout to the terminal as it arrives while keeping a copy
async fn stream_and_capture(mut stdout: ChildStdout) -> String {
    let mut tee = TeeWriter::new(io::stdout(), Vec::new());
    let mut chunk = [0u8; 4096];

    loop {
        match stdout.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                if let Err(e) = tee.write_all(&chunk[..n]).and_then(|_| tee.flush()) {
                    tracing::warn!("Failed to forward child output: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!("Error reading child stdout: {}", e);
                break;
            }
        }
    }

    let (_, buffer) = tee.into_inner();
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tee_writes_to_both_sinks() {
        let mut tee = TeeWriter::new(Vec::new(), Vec::new());
        tee.write_all(b"  cd my-app\n").unwrap();
        tee.write_all(b"  npm install\n").unwrap();
        tee.flush().unwrap();

        let (terminal, buffer) = tee.into_inner();
        assert_eq!(terminal, b"  cd my-app\n  npm install\n");
        assert_eq!(terminal, buffer);
    }

    #[test]
    fn test_tee_keeps_capturing_when_terminal_fails() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut tee = TeeWriter::new(Broken, Vec::new());
        let err = tee.write_all(b"  cd my-app\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(tee.write_all(b"  npm install\n").is_err());

        let (_, buffer) = tee.into_inner();
        assert_eq!(buffer, b"  cd my-app\n  npm install\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_reports_exit_status() {
        let cwd = std::env::temp_dir();
        let mut runner = InteractiveRunner::new();

        let ok = runner.run(&CommandSpec::new("true", Vec::<String>::new()), &cwd, false).await;
        assert!(ok.is_success());

        let failed = runner.run(&CommandSpec::new("false", Vec::<String>::new()), &cwd, false).await;
        assert!(matches!(failed.status, RunStatus::Failed(Some(1))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_stdout() {
        let cwd = std::env::temp_dir();
        let mut runner = InteractiveRunner::new();
        let spec = CommandSpec::new("sh", ["-c", "printf 'Done.\\n\\n  cd my-app\\n'"]);

        let output = runner.run(&spec, &cwd, true).await;
        assert!(output.is_success());
        assert_eq!(output.stdout.as_deref(), Some("Done.\n\n  cd my-app\n"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_spawn_error() {
        let cwd = std::env::temp_dir();
        let mut runner = InteractiveRunner::new();
        let spec = CommandSpec::new("stackup-definitely-not-a-binary", ["--version"]);

        let output = runner.run(&spec, &cwd, false).await;
        #[cfg(not(windows))]
        assert!(matches!(output.status, RunStatus::SpawnError(_)));
        #[cfg(windows)]
        assert!(!output.is_success());
    }
}
