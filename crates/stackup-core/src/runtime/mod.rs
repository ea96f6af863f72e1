//! Package manager commands and process execution
//!
//! This module provides:
//! - Package manager selection and command derivation
//! - The interactive process runner with stdout capture
//! - Dev-server launch planning
//! - Toolchain detection

pub mod check;
pub mod command;
pub mod launcher;
pub mod package_manager;
pub mod runner;

pub use check::{check_runtimes, RuntimeInfo};
pub use command::{Action, CommandSpec};
pub use launcher::{plan_launch, LaunchMode, LaunchPlan};
pub use package_manager::PackageManager;
pub use runner::{CommandRunner, InteractiveRunner, RunOutput, RunStatus, TeeWriter};
