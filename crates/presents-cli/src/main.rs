mod registry;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use presents_assign::{AssignOptions, AssignmentEngine, AssignmentError};
use presents_core::{Roster, RosterError};
use registry::{
    AssignmentsArtifact, RunContext, init_run_logging, init_stderr_logging, start_run,
    write_assignments,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("roster error: {0}")]
    Roster(#[from] RosterError),
    #[error("assignment error: {0}")]
    Assignment(#[from] AssignmentError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "presents",
    version,
    about = "Draw who gives a present to whom at the family gathering"
)]
struct Cli {
    /// TOML roster to use instead of the built-in family.
    #[arg(long, value_name = "PATH")]
    roster: Option<PathBuf>,
    /// Seed for a reproducible draw.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum greedy passes per matcher before giving up.
    #[arg(long, default_value_t = 10_000)]
    max_attempts: u32,
    /// Output directory for run artifacts.
    #[arg(long)]
    run_dir: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        roster,
        seed,
        max_attempts,
        run_dir,
    } = cli;

    if max_attempts == 0 {
        return Err(CliError::InvalidConfig(
            "--max-attempts must be greater than zero".to_string(),
        ));
    }

    let options = AssignOptions { seed, max_attempts };
    let roster_source = roster
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "builtin".to_string());
    let run_id = Uuid::new_v4().to_string();

    let run_paths = match run_dir {
        Some(run_dir) => {
            let run_ctx = RunContext {
                run_id: run_id.clone(),
                started_at: chrono::Utc::now(),
                run_dir,
                roster_source: roster_source.clone(),
                options: options.clone(),
            };
            let paths = start_run(&run_ctx)?;
            init_run_logging(&paths.logs_path)?;
            tracing::info!(event = "run_dir_created", path = %paths.root.display());
            Some(paths)
        }
        None => {
            init_stderr_logging()?;
            None
        }
    };

    tracing::info!(event = "run_started", run_id = %run_id, roster = %roster_source);
    let timer = Instant::now();

    let roster = match roster {
        Some(path) => Roster::from_toml_str(&std::fs::read_to_string(&path)?)?,
        None => Roster::builtin()?,
    };
    tracing::info!(
        event = "roster_loaded",
        adults = roster.adult_count(),
        children = roster.child_count()
    );

    let outcome = AssignmentEngine::new(options).run(&roster)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::render_report(&roster, &outcome, &mut out)?;
    out.flush()?;

    if let Some(paths) = run_paths {
        let artifact = AssignmentsArtifact::new(&run_id, &roster, &outcome)?;
        write_assignments(&paths, &artifact)?;
        tracing::info!(event = "assignments_written", path = %paths.assignments_path.display());
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(())
}
