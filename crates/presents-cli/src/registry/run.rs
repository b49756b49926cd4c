use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use presents_assign::{AssignOptions, AssignmentOutcome, AssignmentReport};
use presents_core::Roster;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub roster_source: String,
    pub options: AssignOptions,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub cli_version: &'static str,
    pub roster_source: String,
    pub options: AssignOptions,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub assignments_path: PathBuf,
    pub logs_path: PathBuf,
}

/// Both assignments by first name, plus the engine report.
#[derive(Debug, Serialize)]
pub struct AssignmentsArtifact {
    pub run_id: String,
    pub adults: Vec<AdultGift>,
    pub children: Vec<ChildGifts>,
    pub report: AssignmentReport,
}

#[derive(Debug, Serialize)]
pub struct AdultGift {
    pub giver: String,
    pub receiver: String,
}

#[derive(Debug, Serialize)]
pub struct ChildGifts {
    pub giver: String,
    pub receivers: Vec<String>,
}

impl AssignmentsArtifact {
    pub fn new(
        run_id: &str,
        roster: &Roster,
        outcome: &AssignmentOutcome,
    ) -> RegistryResult<Self> {
        let adults = outcome
            .adults
            .iter()
            .map(|(giver, receiver)| -> RegistryResult<AdultGift> {
                Ok(AdultGift {
                    giver: roster.adult(giver)?.to_string(),
                    receiver: roster.adult(receiver)?.to_string(),
                })
            })
            .collect::<RegistryResult<Vec<_>>>()?;

        let children = outcome
            .children
            .iter()
            .map(|(giver, receivers)| -> RegistryResult<ChildGifts> {
                let receivers = receivers
                    .iter()
                    .map(|child| -> RegistryResult<String> {
                        Ok(roster.child(*child)?.to_string())
                    })
                    .collect::<RegistryResult<Vec<_>>>()?;
                Ok(ChildGifts {
                    giver: roster.adult(giver)?.to_string(),
                    receivers,
                })
            })
            .collect::<RegistryResult<Vec<_>>>()?;

        Ok(Self {
            run_id: run_id.to_string(),
            adults,
            children,
            report: outcome.report.clone(),
        })
    }
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx
        .run_dir
        .join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let assignments_path = root.join("assignments.json");
    let logs_path = root.join("logs.ndjson");

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        cli_version: env!("CARGO_PKG_VERSION"),
        roster_source: ctx.roster_source.clone(),
        options: ctx.options.clone(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        root,
        assignments_path,
        logs_path,
    })
}

pub fn write_assignments(paths: &RunPaths, artifact: &AssignmentsArtifact) -> RegistryResult<()> {
    write_json(&paths.assignments_path, artifact)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}
