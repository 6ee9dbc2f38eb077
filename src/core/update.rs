//! Concurrent `git pull` over a discovered fleet

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info_span, Instrument};

use crate::utils::emit_line;

use super::discovery::RepositoryRef;
use super::parallel::bounded_map;
use super::stats::FleetStatistics;
use crate::git::{Failure, Launcher, Stage, UpdateStatus};

/// What happened to one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    pub repo: RepositoryRef,
    pub status: UpdateStatus,
    pub elapsed: Duration,
}

impl UpdateResult {
    /// `Repo: <path> Status: <code>`, printed as the repository finishes
    pub fn status_line(&self) -> String {
        format!("Repo: {} Status: {}", self.repo, self.status.code())
    }
}

/// Every result of a run plus the shared tallies
#[derive(Debug)]
pub struct UpdateReport {
    /// In completion order
    pub results: Vec<UpdateResult>,
    pub statistics: Arc<FleetStatistics>,
    pub duration: Duration,
}

impl UpdateReport {
    pub fn has_failures(&self) -> bool {
        self.statistics.failed() > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|result| !result.status.is_success())
    }
}

/// Updates every repository, at most `limit` at a time
///
/// Prints `Repo: <path> Status: <code>` as each one finishes. A failing or
/// panicking launcher only affects its own repository. Returns once all
/// repositories are done.
pub async fn update_all(
    repos: Vec<RepositoryRef>,
    limit: usize,
    launcher: Arc<dyn Launcher>,
) -> UpdateReport {
    let start_time = Instant::now();
    let statistics = Arc::new(FleetStatistics::new());

    let body = {
        let statistics = Arc::clone(&statistics);
        move |repo: RepositoryRef| {
            let launcher = Arc::clone(&launcher);
            let statistics = Arc::clone(&statistics);
            let span = info_span!("repo", path = %repo);
            async move {
                let result = update_one(repo, launcher.as_ref()).await;
                statistics.record(&result);
                emit_line(&mut std::io::stdout().lock(), &result.status_line());
                result
            }
            .instrument(span)
        }
    };

    for repo in &repos {
        debug!(repo = %repo, stage = %Stage::Queued);
    }
    let results = bounded_map(repos, limit, body).await;

    UpdateReport {
        results,
        statistics,
        duration: start_time.elapsed(),
    }
}

/// Runs the launcher for a single repository; called with a permit held
async fn update_one(repo: RepositoryRef, launcher: &dyn Launcher) -> UpdateResult {
    debug!(stage = %Stage::Running);
    let started = Instant::now();

    let status = AssertUnwindSafe(launcher.launch(repo.path()))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| UpdateStatus::Failed(Failure::Launch("launcher panicked".into())));

    let elapsed = started.elapsed();
    let stage = Stage::from(&status);
    debug_assert!(stage.is_terminal());
    debug!(stage = %stage, status = %status, elapsed_ms = elapsed.as_millis() as u64);

    UpdateResult {
        repo,
        status,
        elapsed,
    }
}
