//! stackup CLI - Scaffold Vite + React frontends and Express backends with npm or bun

mod logging;

use anyhow::Result;
use clap::Parser;
use stackup_core::tui::ClackPrompter;
use stackup_core::workflow::OutcomeStatus;
use stackup_core::{
    HttpFetcher, InteractiveRunner, LaunchMode, LinePrompter, Orchestrator, Prompter, RunRequest,
    Settings, WorkflowState,
};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stackup")]
#[command(about = "CLI for scaffolding Vite + React frontends and Express backends")]
#[command(version)]
pub struct Args {
    /// Package manager to drive (npm or bun); prompted for when omitted
    #[arg(short, long = "package-manager")]
    pub package_manager: Option<String>,

    /// What to set up (frontend, backend or fullstack); prompted for when omitted
    #[arg(short, long)]
    pub workflow: Option<String>,

    /// How to start the dev server (auto, foreground or window)
    #[arg(long)]
    pub launch: Option<LaunchMode>,

    /// YAML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the npm/bun and Node.js availability check
    #[arg(long = "skip-runtime-check")]
    pub skip_runtime_check: bool,

    /// Plain line-based prompts instead of the interactive UI
    #[arg(long)]
    pub plain: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    logging::init_logging(args.verbose, args.quiet)?;

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(mode) = args.launch {
        settings.launch_mode = mode;
    }
    if args.skip_runtime_check {
        settings.check_runtimes = false;
    }
    tracing::debug!(?settings, "resolved settings");

    let request = RunRequest {
        package_manager: args.package_manager,
        workflow: args.workflow,
        root: None,
    };

    let interactive =
        !args.plain && std::io::stdin().is_terminal() && std::io::stdout().is_terminal();

    if interactive {
        let prompter = ClackPrompter::new();
        prompter.intro("stackup")?;
        let result = run(settings, prompter, request).await;

        // Ensure cursor is visible on normal exit
        let _ = console::Term::stderr().show_cursor();

        let state = result?;
        ClackPrompter::new().outro(&summary(&state))?;
    } else {
        let state = run(settings, LinePrompter::stdio()?, request).await?;
        println!("\n{}", summary(&state));
    }

    Ok(())
}

async fn run<P: Prompter>(
    settings: Settings,
    prompter: P,
    request: RunRequest,
) -> Result<WorkflowState> {
    let fetcher = HttpFetcher::new(&settings.user_agent);
    let mut orchestrator = Orchestrator::new(settings, prompter, InteractiveRunner::new(), fetcher);
    let state = orchestrator.run(request).await?;

    for outcome in state.outcomes() {
        tracing::debug!(
            step = outcome.step.name(),
            status = ?outcome.status,
            message = %outcome.message,
            "step outcome"
        );
    }

    Ok(state)
}

fn summary(state: &WorkflowState) -> String {
    let completed = state
        .outcomes()
        .iter()
        .filter(|o| o.status == OutcomeStatus::Completed)
        .count();
    match state.project_name() {
        Some(name) => format!(
            "Project {} created successfully ({} steps completed)",
            name, completed
        ),
        None => format!("Setup finished ({} steps completed)", completed),
    }
}
