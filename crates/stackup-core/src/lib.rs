//! Stackup Core - command orchestration for scaffolding JavaScript projects
//!
//! Asks a short series of questions, then drives npm or bun and the Vite
//! generator to assemble a frontend, a backend, or both, writing a handful of
//! config files along the way.
//!
//! # Architecture
//!
//! - **Runtime** - Package manager selection, command derivation, the interactive process runner
//! - **Templates** - Static config payloads, remote compose file fetching, file writing
//! - **Workflow** - Step plans per workflow kind and the `Orchestrator` that executes them
//! - **Prompts** - The `Prompter` seam, with a plain line-based and a cliclack implementation
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompter
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use stackup_core::{config::Settings, prompt::LinePrompter, runtime::InteractiveRunner};
//! use stackup_core::templates::HttpFetcher;
//! use stackup_core::workflow::{Orchestrator, RunRequest};
//!
//! let settings = Settings::load(None)?;
//! let fetcher = HttpFetcher::new(&settings.user_agent);
//! let mut orchestrator =
//!     Orchestrator::new(settings, LinePrompter::stdio()?, InteractiveRunner::new(), fetcher);
//! let state = orchestrator.run(RunRequest::default()).await?;
//! ```

pub mod config;
pub mod error;
pub mod prompt;
pub mod runtime;
pub mod templates;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::Settings;
pub use error::{Result, ScaffoldError};
pub use prompt::{LinePrompter, OneByteReader, Prompter};
pub use runtime::{Action, CommandRunner, CommandSpec, InteractiveRunner, LaunchMode, PackageManager};
pub use templates::{HttpFetcher, PayloadFetcher};
pub use workflow::{Orchestrator, RunRequest, Step, Workflow, WorkflowState};
