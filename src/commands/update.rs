//! Fleet update command implementation
//!
//! Discovers the working copies under the base directory, then runs
//! `git pull origin --rebase` in each of them with bounded concurrency.

use anyhow::{Context, Result};
use std::io::{IsTerminal, Write};
use std::sync::Arc;
use tracing::info;

use crate::core::{
    clear_transient, discover, emit_line, set_terminal_title, set_terminal_title_and_flush,
    show_transient, update_all, ExclusionSet, FleetConfig, FleetStatistics, RepositoryRef,
    UpdateReport, NO_REPOS_MESSAGE, SCANNING_MESSAGE,
};
use crate::git::{GitPull, Launcher};

/// Handles a full discover-then-update run
///
/// Discovery problems are returned as errors. Per-repository failures are
/// part of the returned report.
pub async fn handle_update_command(config: FleetConfig) -> Result<UpdateReport> {
    let launcher = GitPull::new()
        .timeout(config.timeout)
        .output(config.output);
    run_update(config, Arc::new(launcher)).await
}

/// Same as [`handle_update_command`] with a caller-chosen launcher
pub async fn run_update(config: FleetConfig, launcher: Arc<dyn Launcher>) -> Result<UpdateReport> {
    // Set terminal title to indicate git-fleet is running
    set_terminal_title("🔽 git-fleet");

    let result = update_fleet(config, launcher).await;

    // Set terminal title to green checkbox to indicate completion
    set_terminal_title_and_flush("✅ git-fleet");

    result
}

async fn update_fleet(config: FleetConfig, launcher: Arc<dyn Launcher>) -> Result<UpdateReport> {
    // The scan notice is erased again, so pipes only ever see whole lines
    let scanning = show_transient(
        &mut std::io::stdout(),
        std::io::stdout().is_terminal(),
        SCANNING_MESSAGE,
    );
    let discovered = discover_repositories(&config).await;
    clear_transient(&mut std::io::stdout(), scanning);
    let repos = discovered?;

    if repos.is_empty() {
        emit_line(&mut std::io::stdout().lock(), NO_REPOS_MESSAGE);
    } else {
        emit_line(
            &mut std::io::stdout().lock(),
            &format!("Repositories: {}", repos.len()),
        );
    }
    info!(
        repos = repos.len(),
        concurrency = config.concurrency,
        timeout_secs = config.timeout.map(|t| t.as_secs()),
        "starting update"
    );

    let total_repos = repos.len();
    let report = update_all(repos, config.concurrency, launcher).await;

    write_failure_block(&mut std::io::stdout().lock(), &report.statistics);
    info!(
        "{}",
        report.statistics.generate_summary(total_repos, report.duration)
    );

    Ok(report)
}

async fn discover_repositories(config: &FleetConfig) -> Result<Vec<RepositoryRef>> {
    let exclusions = match &config.exclude_file {
        Some(path) => ExclusionSet::load(path)?,
        None => ExclusionSet::new(),
    };

    let base_dir = config.base_dir.clone();
    let repos = tokio::task::spawn_blocking(move || discover(&base_dir, &exclusions))
        .await
        .context("repository discovery task failed")?
        .with_context(|| format!("cannot scan {}", config.base_dir.display()))?;
    Ok(repos)
}

/// Blank line, then `Update failure:` and one `- <path>` per failed repository
///
/// Writes nothing when every repository updated.
fn write_failure_block<W: Write>(out: &mut W, statistics: &FleetStatistics) {
    let failure_report = statistics.generate_failure_report();
    if !failure_report.is_empty() {
        emit_line(out, "");
        emit_line(out, &failure_report);
    }
}
