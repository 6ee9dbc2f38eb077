//! Fake launchers that stand in for git

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use git_fleet::git::{Failure, Launcher, UpdateStatus};

/// Sleeps per call and records start/end timestamps and in-flight counts
#[derive(Default)]
pub struct RecordingLauncher {
    pub delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    intervals: Mutex<Vec<(PathBuf, Instant, Instant)>>,
}

impl RecordingLauncher {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.intervals.lock().unwrap().len()
    }

    /// Largest number of recorded intervals that overlap at any instant
    pub fn max_overlap(&self) -> usize {
        let intervals = self.intervals.lock().unwrap();
        let mut events: Vec<(Instant, i32)> = intervals
            .iter()
            .flat_map(|(_, start, end)| [(*start, 1), (*end, -1)])
            .collect();
        // Ends sort before starts at the same instant
        events.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut current = 0;
        let mut max = 0;
        for (_, delta) in events {
            current += delta;
            max = max.max(current);
        }
        max as usize
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn launch(&self, repo: &Path) -> UpdateStatus {
        let start = Instant::now();
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let end = Instant::now();
        self.intervals
            .lock()
            .unwrap()
            .push((repo.to_path_buf(), start, end));
        UpdateStatus::Success
    }
}

/// Fails for repositories whose path ends with `name`, succeeds otherwise
pub struct FailingFor {
    pub name: String,
    pub code: i32,
}

#[async_trait]
impl Launcher for FailingFor {
    async fn launch(&self, repo: &Path) -> UpdateStatus {
        tokio::time::sleep(Duration::from_millis(5)).await;
        if repo.ends_with(&self.name) {
            UpdateStatus::Failed(Failure::Exit(self.code))
        } else {
            UpdateStatus::Success
        }
    }
}
