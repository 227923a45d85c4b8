//! The sync command: resolve configuration, run the engine, deliver reports

use std::path::Path;

use colored::Colorize;
use sync_core::{ConfigResolver, ErrorKind, RunOutcome, SyncConfig, SyncEngine, SyncRequest};
use sync_fs::io::write_text;
use sync_git::GitCli;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Run one sync and return the process exit code.
///
/// The markdown report goes to stdout on success and to stderr on failure.
pub fn run_sync(cli: &Cli) -> Result<i32> {
    if cli.report.is_some() && cli.report == cli.json_report {
        return Err(CliError::user(
            "--report and --json-report must point at different files",
        ));
    }

    let mut resolver = ConfigResolver::new();
    if let Some(dir) = &cli.config_dir {
        resolver = resolver.with_global_config_dir(dir);
    }
    if let Some(file) = &cli.config {
        resolver = resolver.with_config_file(file);
    }

    let request = SyncRequest {
        source: cli.source.clone(),
        skill_name: cli.skill_name.clone(),
        dry_run: cli.dry_run,
    };
    let outcome = match resolver.resolve(cli.overrides()) {
        Ok(config) => SyncEngine::new(GitCli::new(), config).run(&request),
        Err(e) => {
            tracing::debug!(error = %e, "Configuration could not be resolved");
            let mut header = SyncConfig::default();
            header.apply(cli.overrides());
            RunOutcome::aborted(&request, &header, e)
        }
    };

    deliver(cli, &outcome)?;
    Ok(outcome.exit_code())
}

fn deliver(cli: &Cli, outcome: &RunOutcome) -> Result<()> {
    let markdown = outcome.report.to_markdown();
    match &outcome.error {
        None => print!("{markdown}"),
        Some(error) => {
            eprint!("{markdown}");
            if error.kind() != ErrorKind::Validation {
                eprintln!("{}: {}", "error".red().bold(), error);
            }
        }
    }

    if let Some(path) = &cli.report {
        write_report(path, &markdown)?;
    }
    if let Some(path) = &cli.json_report {
        write_report(path, &outcome.report.to_json()?)?;
    }
    Ok(())
}

fn write_report(path: &Path, content: &str) -> Result<()> {
    let path = sync_fs::resolve(path)?;
    write_text(&path, content)?;
    tracing::debug!(path = %path.display(), "Wrote report");
    Ok(())
}
