//! Step execution
//!
//! Every step is all-or-nothing. The first failure is recorded in the run's
//! outcomes and returned; nothing after it runs and nothing already done is
//! rolled back.

use super::scrape::extract_project_name;
use super::state::{OutcomeStatus, WorkflowState};
use super::{Step, Workflow};
use crate::config::Settings;
use crate::error::{Result, ScaffoldError};
use crate::prompt::Prompter;
use crate::runtime::{
    self, plan_launch, Action, CommandRunner, CommandSpec, LaunchPlan, PackageManager, RunOutput,
    RunStatus,
};
use crate::templates::payload::{
    COMPOSE_FILE_PATH, ENV_FILE, INDEX_CSS, TAILWIND_CONFIG, TAILWIND_CONFIG_DAISYUI,
};
use crate::templates::{ensure_yaml_document, write_bytes, write_payload, PayloadFetcher};
use std::path::{Path, PathBuf};

/// What the caller already knows before prompting starts
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Raw package manager choice; prompted for when absent
    pub package_manager: Option<String>,
    /// Raw workflow choice; prompted for when absent
    pub workflow: Option<String>,
    /// Directory the run starts in; the process cwd when absent
    pub root: Option<PathBuf>,
}

enum StepResult {
    Completed(String),
    Skipped(String),
}

/// Authentication SDKs offered for the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthProvider {
    Clerk,
    Firebase,
}

impl AuthProvider {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "clerk" => Ok(AuthProvider::Clerk),
            "firebase" => Ok(AuthProvider::Firebase),
            _ => Err(ScaffoldError::InvalidSelection {
                what: "auth provider",
                value: raw.trim().to_string(),
                expected: "'clerk' or 'firebase'",
            }),
        }
    }

    fn package(&self) -> &'static str {
        match self {
            AuthProvider::Clerk => "@clerk/express",
            AuthProvider::Firebase => "firebase-admin",
        }
    }
}

/// Drives the external toolchain through a workflow's steps
pub struct Orchestrator<P, R, F> {
    settings: Settings,
    prompter: P,
    runner: R,
    fetcher: F,
}

impl<P: Prompter, R: CommandRunner, F: PayloadFetcher> Orchestrator<P, R, F> {
    pub fn new(settings: Settings, prompter: P, runner: R, fetcher: F) -> Self {
        Self {
            settings,
            prompter,
            runner,
            fetcher,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Select package manager and workflow, then execute the workflow
    pub async fn run(&mut self, request: RunRequest) -> Result<WorkflowState> {
        let package_manager = self.select_package_manager(request.package_manager.as_deref())?;

        if self.settings.check_runtimes {
            self.check_toolchain(package_manager)?;
        }

        let workflow = self.select_workflow(request.workflow.as_deref())?;

        let root = match request.root {
            Some(root) => root,
            None => std::env::current_dir()
                .map_err(|e| ScaffoldError::filesystem("Resolve working directory", ".", e))?,
        };

        let mut state = WorkflowState::new(package_manager, root);
        self.execute(workflow, &mut state).await?;
        Ok(state)
    }

    /// Run every step of `workflow`, stopping at the first failure
    pub async fn execute(&mut self, workflow: Workflow, state: &mut WorkflowState) -> Result<()> {
        tracing::info!(
            workflow = workflow.name(),
            package_manager = state.package_manager().name(),
            "starting workflow"
        );

        for step in workflow.steps() {
            tracing::info!(step = step.name(), "running step");
            match self.run_step(step, state).await {
                Ok(StepResult::Completed(message)) => {
                    state.record(step, OutcomeStatus::Completed, message)
                }
                Ok(StepResult::Skipped(message)) => {
                    state.record(step, OutcomeStatus::Skipped, message)
                }
                Err(e) => {
                    state.record(step, OutcomeStatus::Failed, e.to_string());
                    tracing::debug!(outcomes = ?state.outcomes(), "workflow aborted");
                    return Err(e);
                }
            }
        }

        if workflow.returns_to_root() && state.depth() != 0 {
            return Err(ScaffoldError::DirectoryStack(format!(
                "{} workflow finished {} level(s) below its starting directory",
                workflow,
                state.depth()
            )));
        }

        Ok(())
    }

    fn select_package_manager(&mut self, preset: Option<&str>) -> Result<PackageManager> {
        let raw = match preset {
            Some(raw) => raw.to_string(),
            None => self
                .prompter
                .input("Do you want to use npm or bun? (npm/bun)", None)?,
        };
        let package_manager: PackageManager = raw.parse()?;
        tracing::debug!(package_manager = package_manager.name(), "package manager selected");
        Ok(package_manager)
    }

    fn select_workflow(&mut self, preset: Option<&str>) -> Result<Workflow> {
        let raw = match preset {
            Some(raw) => raw.to_string(),
            None => self.prompter.input(
                "What do you want to set up? (frontend/backend/fullstack)",
                Some("frontend"),
            )?,
        };
        raw.parse()
    }

    fn check_toolchain(&mut self, package_manager: PackageManager) -> Result<()> {
        let (found, warnings) = runtime::check_runtimes(package_manager)?;
        for info in &found {
            tracing::info!(
                runtime = info.name,
                version = info.version.as_deref().unwrap_or("unknown"),
                "detected runtime"
            );
        }
        for warning in warnings {
            self.prompter.warning(&warning)?;
        }
        Ok(())
    }

    async fn run_step(&mut self, step: Step, state: &mut WorkflowState) -> Result<StepResult> {
        match step {
            Step::CreateFrontend => self.create_frontend(step, state).await,
            Step::InstallDependencies => {
                self.prompter.info("Installing dependencies...")?;
                self.run_action(step, state, Action::InstallDependencies).await?;
                Ok(StepResult::Completed("dependencies installed".to_string()))
            }
            Step::Tailwind => self.install_tailwind(step, state).await,
            Step::DaisyUi => self.install_daisyui(step, state).await,
            Step::ReactRouter => {
                self.install_package(step, state, "Do you want to install react-router-dom?", "react-router-dom")
                    .await
            }
            Step::Axios => {
                self.install_package(step, state, "Do you want to install axios?", "axios")
                    .await
            }
            Step::LaunchDevServer => self.launch_dev_server(step, state).await,
            Step::CreateBackend => self.create_backend(step, state).await,
            Step::Express => self.install_express(step, state).await,
            Step::EnvFile => {
                let path = write_payload(step.name(), state.current_dir(), &ENV_FILE).await?;
                Ok(StepResult::Completed(format!("wrote {}", path.display())))
            }
            Step::Auth => self.install_auth(step, state).await,
            Step::DatabaseCompose => self.write_compose_file(step, state).await,
            Step::Prisma => self.install_prisma(step, state).await,
            Step::Ascend => {
                let dir = state.ascend()?;
                Ok(StepResult::Completed(format!("now in {}", dir.display())))
            }
        }
    }

    async fn create_frontend(&mut self, step: Step, state: &mut WorkflowState) -> Result<StepResult> {
        self.prompter.info("Okay, let's set up the frontend...")?;

        let answer = self
            .prompter
            .input("Project name (leave blank to let Vite ask)", None)?;
        let requested = (!answer.is_empty()).then_some(answer);

        // Without a name, Vite asks for one and the hint line is the only
        // place it shows up.
        let spec = state.package_manager().command(&Action::Scaffold {
            name: requested.clone(),
        });
        let cwd = state.current_dir().to_path_buf();
        let output = self.run_command(step, &spec, &cwd, requested.is_none()).await?;

        let project_name = match requested {
            Some(name) => name,
            None => output
                .stdout
                .as_deref()
                .and_then(extract_project_name)
                .ok_or(ScaffoldError::ProjectNameNotFound)?,
        };
        self.prompter
            .info(&format!("Project name captured: {}", project_name))?;

        state.descend(step.name(), &project_name)?;
        state.set_project_name(project_name.as_str());
        self.prompter.success(&format!(
            "Successfully changed to project directory: {}",
            project_name
        ))?;

        Ok(StepResult::Completed(format!("created {}", project_name)))
    }

    async fn install_tailwind(&mut self, step: Step, state: &mut WorkflowState) -> Result<StepResult> {
        if !self.prompter.confirm("Do you want to install Tailwind CSS?")? {
            return Ok(declined());
        }
        self.prompter.info("Installing Tailwind CSS...")?;

        self.run_action(
            step,
            state,
            Action::add_dev(["tailwindcss", "postcss", "autoprefixer"]),
        )
        .await?;
        self.run_action(step, state, Action::exec("tailwindcss", ["init", "-p"]))
            .await?;

        write_payload(step.name(), state.current_dir(), &TAILWIND_CONFIG).await?;
        write_payload(step.name(), state.current_dir(), &INDEX_CSS).await?;

        self.prompter
            .success("Tailwind CSS installed and configured successfully!")?;
        Ok(StepResult::Completed("installed and configured".to_string()))
    }

    async fn install_daisyui(&mut self, step: Step, state: &mut WorkflowState) -> Result<StepResult> {
        if !self.prompter.confirm("Do you want to install DaisyUI?")? {
            return Ok(declined());
        }
        self.prompter.info("Installing DaisyUI...")?;

        self.run_action(step, state, Action::add_dev(["daisyui@latest"]))
            .await?;
        write_payload(step.name(), state.current_dir(), &TAILWIND_CONFIG_DAISYUI).await?;
        write_payload(step.name(), state.current_dir(), &INDEX_CSS).await?;

        self.prompter.success("DaisyUI installed successfully!")?;
        Ok(StepResult::Completed("installed and registered plugin".to_string()))
    }

    async fn install_package(
        &mut self,
        step: Step,
        state: &mut WorkflowState,
        question: &str,
        package: &str,
    ) -> Result<StepResult> {
        if !self.prompter.confirm(question)? {
            return Ok(declined());
        }
        self.prompter.info(&format!("Installing {}...", package))?;
        self.run_action(step, state, Action::add([package])).await?;
        self.prompter
            .success(&format!("{} installed successfully!", package))?;
        Ok(StepResult::Completed(format!("installed {}", package)))
    }

    async fn launch_dev_server(&mut self, step: Step, state: &mut WorkflowState) -> Result<StepResult> {
        if !self
            .prompter
            .confirm("Do you want to start the development server now?")?
        {
            return Ok(declined());
        }

        let server = state
            .package_manager()
            .command(&Action::RunScript("dev".to_string()));
        let cwd = state.current_dir().to_path_buf();

        match plan_launch(self.settings.launch_mode, &server, &cwd) {
            LaunchPlan::Foreground(spec) => {
                self.prompter
                    .info("Starting the development server (Ctrl+C to stop)...")?;
                self.run_command(step, &spec, &cwd, false).await?;
                Ok(StepResult::Completed("server exited".to_string()))
            }
            LaunchPlan::Window(opener) => {
                tracing::debug!(command = %opener, "opening terminal window");
                let output = self.runner.launch_detached(&opener, &cwd).await;
                check_status(step, &opener, output)?;
                self.prompter
                    .success("Server started in a new terminal window.")?;
                Ok(StepResult::Completed("server started in new window".to_string()))
            }
        }
    }

    async fn create_backend(&mut self, step: Step, state: &mut WorkflowState) -> Result<StepResult> {
        self.prompter.info("Okay, let's set up the backend...")?;

        let default_dir = self.settings.backend_dir.clone();
        let name = self
            .prompter
            .input("Backend folder name", Some(default_dir.as_str()))?;
        if name.is_empty() {
            return Err(ScaffoldError::InvalidSelection {
                what: "backend folder",
                value: name,
                expected: "a non-empty folder name",
            });
        }

        let target = state.current_dir().join(&name);
        tokio::fs::create_dir_all(&target)
            .await
            .map_err(|e| ScaffoldError::filesystem(step.name(), &target, e))?;
        state.descend(step.name(), &name)?;

        self.run_action(step, state, Action::InitManifest).await?;
        Ok(StepResult::Completed(format!("created {}", name)))
    }

    async fn install_express(&mut self, step: Step, state: &mut WorkflowState) -> Result<StepResult> {
        if !self.prompter.confirm("Do you want to install Express?")? {
            return Ok(declined());
        }
        self.prompter.info("Installing Express...")?;

        self.run_action(step, state, Action::add(["express", "cors", "dotenv"]))
            .await?;
        self.run_action(
            step,
            state,
            Action::add_dev(["@types/express", "@types/cors"]),
        )
        .await?;

        self.prompter.success("Express installed successfully!")?;
        Ok(StepResult::Completed("installed express, cors, dotenv".to_string()))
    }

    async fn install_auth(&mut self, step: Step, state: &mut WorkflowState) -> Result<StepResult> {
        if !self.prompter.confirm("Do you want to add authentication?")? {
            return Ok(declined());
        }
        let provider = AuthProvider::parse(
            &self
                .prompter
                .input("Auth provider (clerk/firebase)", Some("clerk"))?,
        )?;

        self.prompter
            .info(&format!("Installing {}...", provider.package()))?;
        self.run_action(step, state, Action::add([provider.package()]))
            .await?;
        Ok(StepResult::Completed(format!("installed {}", provider.package())))
    }

    async fn write_compose_file(&mut self, step: Step, state: &mut WorkflowState) -> Result<StepResult> {
        if !self
            .prompter
            .confirm("Do you want to set up a Postgres database with Docker Compose?")?
        {
            return Ok(declined());
        }

        let url = self.settings.compose_url.clone();
        self.prompter
            .info(&format!("Downloading compose file from {}...", url))?;
        tracing::debug!(url = %url, "fetching compose file");

        let bytes = self.fetcher.fetch(&url).await?;
        ensure_yaml_document(&url, &bytes)?;
        let path = write_bytes(step.name(), state.current_dir(), COMPOSE_FILE_PATH, &bytes).await?;

        self.prompter
            .success(&format!("Wrote {}", COMPOSE_FILE_PATH))?;
        Ok(StepResult::Completed(format!("wrote {}", path.display())))
    }

    async fn install_prisma(&mut self, step: Step, state: &mut WorkflowState) -> Result<StepResult> {
        if !self.prompter.confirm("Do you want to install Prisma?")? {
            return Ok(declined());
        }
        self.prompter.info("Installing Prisma...")?;

        self.run_action(step, state, Action::add_dev(["prisma"])).await?;
        self.run_action(step, state, Action::add(["@prisma/client"]))
            .await?;
        self.run_action(step, state, Action::exec("prisma", ["init"]))
            .await?;

        self.prompter.success("Prisma installed and initialized!")?;
        Ok(StepResult::Completed("installed and initialized".to_string()))
    }

    /// Derive the command for `action` and run it in the current directory
    async fn run_action(&mut self, step: Step, state: &WorkflowState, action: Action) -> Result<RunOutput> {
        let spec = state.package_manager().command(&action);
        self.run_command(step, &spec, state.current_dir(), false).await
    }

    async fn run_command(
        &mut self,
        step: Step,
        spec: &CommandSpec,
        cwd: &Path,
        capture: bool,
    ) -> Result<RunOutput> {
        tracing::debug!(command = %spec, cwd = %cwd.display(), capture, "running command");
        let output = self.runner.run(spec, cwd, capture).await;
        check_status(step, spec, output)
    }
}

fn declined() -> StepResult {
    StepResult::Skipped("declined".to_string())
}

/// Map a runner result onto the error taxonomy
fn check_status(step: Step, spec: &CommandSpec, output: RunOutput) -> Result<RunOutput> {
    match &output.status {
        RunStatus::Success => Ok(output),
        RunStatus::Failed(code) => Err(ScaffoldError::CommandFailed {
            step: step.name(),
            command: spec.to_string(),
            status: match code {
                Some(code) => format!("exited with code {}", code),
                None => "was terminated by a signal".to_string(),
            },
        }),
        RunStatus::SpawnError(message) => Err(ScaffoldError::Spawn {
            step: step.name(),
            command: spec.to_string(),
            message: message.clone(),
        }),
    }
}
