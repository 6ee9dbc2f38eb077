//! Statistics tracking for fleet updates

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::config::FAILURE_HEADER;
use super::update::UpdateResult;

/// Tallies for one run, shared by every unit of work
///
/// Counters are atomic; the failure list sits behind a Mutex because many
/// units append to it concurrently.
#[derive(Debug, Default)]
pub struct FleetStatistics {
    pub updated_repos: AtomicU64,
    pub failed_count: AtomicU64,
    pub failed_repos: Mutex<Vec<(PathBuf, String)>>, // (repo_path, reason)
}

impl FleetStatistics {
    /// Creates a new statistics tracker with all counters initialized to zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, result: &UpdateResult) {
        match &result.status {
            crate::git::UpdateStatus::Success => {
                self.updated_repos.fetch_add(1, Ordering::Relaxed);
            }
            crate::git::UpdateStatus::Failed(failure) => {
                self.failed_count.fetch_add(1, Ordering::Relaxed);
                self.failed_repos
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push((result.repo.path().to_path_buf(), failure.to_string()));
            }
        }
    }

    pub fn updated(&self) -> u64 {
        self.updated_repos.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed_count.load(Ordering::Relaxed)
    }

    /// Paths of failed repositories, in the order they finished
    pub fn failed_paths(&self) -> Vec<PathBuf> {
        self.failed_repos
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// One-line summary of the run
    pub fn generate_summary(&self, total_repos: usize, duration: Duration) -> String {
        let duration_secs = duration.as_secs_f64();
        let updated = self.updated();
        let failed = self.failed();

        if failed > 0 {
            format!(
                "Completed {total_repos} repos in {duration_secs:.1}s • {updated} updated • {failed} failed"
            )
        } else {
            format!("Completed {total_repos} repos in {duration_secs:.1}s • {updated} updated")
        }
    }

    /// The trailing failure block, empty when everything succeeded
    pub fn generate_failure_report(&self) -> String {
        let failed_repos = self
            .failed_repos
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if failed_repos.is_empty() {
            return String::new();
        }

        let mut lines = Vec::with_capacity(failed_repos.len() + 1);
        lines.push(FAILURE_HEADER.to_string());
        for (path, _) in failed_repos.iter() {
            lines.push(format!("- {}", path.display()));
        }
        lines.join("\n")
    }
}
