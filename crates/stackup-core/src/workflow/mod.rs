//! Workflow plans
//!
//! Frontend, backend and fullstack runs share one pipeline; a [`Workflow`]
//! only selects which [`Step`] descriptors it contains and in what order.

pub mod orchestrator;
pub mod scrape;
pub mod state;

use crate::error::ScaffoldError;
use std::fmt;
use std::str::FromStr;

pub use orchestrator::{Orchestrator, RunRequest};
pub use scrape::extract_project_name;
pub use state::{OutcomeStatus, StepOutcome, WorkflowState};

/// Which part of the stack to scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    Frontend,
    Backend,
    /// Backend first, then the frontend as a sibling folder
    Fullstack,
}

/// One unit of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CreateFrontend,
    InstallDependencies,
    Tailwind,
    DaisyUi,
    ReactRouter,
    Axios,
    LaunchDevServer,
    CreateBackend,
    Express,
    EnvFile,
    Auth,
    DatabaseCompose,
    Prisma,
    /// Leave the folder entered by the last create step
    Ascend,
}

const FRONTEND_STEPS: &[Step] = &[
    Step::CreateFrontend,
    Step::InstallDependencies,
    Step::Tailwind,
    Step::DaisyUi,
    Step::ReactRouter,
    Step::Axios,
    Step::LaunchDevServer,
];

const BACKEND_STEPS: &[Step] = &[
    Step::CreateBackend,
    Step::Express,
    Step::EnvFile,
    Step::Auth,
    Step::DatabaseCompose,
    Step::Prisma,
];

impl Workflow {
    pub fn name(&self) -> &'static str {
        match self {
            Workflow::Frontend => "frontend",
            Workflow::Backend => "backend",
            Workflow::Fullstack => "fullstack",
        }
    }

    /// Ordered steps for this workflow
    pub fn steps(&self) -> Vec<Step> {
        match self {
            Workflow::Frontend => FRONTEND_STEPS.to_vec(),
            Workflow::Backend => BACKEND_STEPS.to_vec(),
            Workflow::Fullstack => BACKEND_STEPS
                .iter()
                .copied()
                .chain([Step::Ascend])
                .chain(FRONTEND_STEPS.iter().copied())
                .chain([Step::Ascend])
                .collect(),
        }
    }

    /// Whether the run must end back in the directory it started from
    pub fn returns_to_root(&self) -> bool {
        matches!(self, Workflow::Fullstack)
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Workflow {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frontend" => Ok(Workflow::Frontend),
            "backend" => Ok(Workflow::Backend),
            "fullstack" => Ok(Workflow::Fullstack),
            _ => Err(ScaffoldError::InvalidSelection {
                what: "workflow",
                value: s.trim().to_string(),
                expected: "'frontend', 'backend' or 'fullstack'",
            }),
        }
    }
}

impl Step {
    /// Label used in progress output and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Step::CreateFrontend => "Create frontend project",
            Step::InstallDependencies => "Install dependencies",
            Step::Tailwind => "Tailwind CSS",
            Step::DaisyUi => "DaisyUI",
            Step::ReactRouter => "react-router-dom",
            Step::Axios => "axios",
            Step::LaunchDevServer => "Development server",
            Step::CreateBackend => "Create backend project",
            Step::Express => "Express",
            Step::EnvFile => "Environment file",
            Step::Auth => "Authentication",
            Step::DatabaseCompose => "Database compose file",
            Step::Prisma => "Prisma",
            Step::Ascend => "Return to parent directory",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
