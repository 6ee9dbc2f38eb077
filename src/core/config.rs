//! Configuration constants and settings

use std::path::PathBuf;
use std::time::Duration;

// Concurrency Configuration
//
// Every repository gets its own task right away; this limit only caps how many
// of them may hold a permit (and thus run git) at the same time.

/// Floor for the default limit, used when the host reports fewer CPUs
pub const MIN_DEFAULT_CONCURRENCY: usize = 2;

/// Determines the concurrency limit for git operations based on CLI args and system resources
///
/// Priority order:
/// 1. --sequential flag → 1
/// 2. --jobs N flag → N (at least 1)
/// 3. Default → logical CPU count, at least 2
pub fn get_git_concurrency(jobs: Option<usize>, sequential: bool) -> usize {
    if sequential {
        return 1;
    }

    if let Some(n) = jobs {
        return n.max(1);
    }

    num_cpus::get().max(MIN_DEFAULT_CONCURRENCY)
}

// Repository discovery configuration
pub const GIT_MARKER: &str = ".git";
pub const SCAN_DEPTH: usize = 2; // <base>/<group>/<repo>

// Git command
pub const GIT_PROGRAM: &str = "git";
pub const GIT_PULL_ARGS: &[&str] = &["pull", "origin", "--rebase"];

// UI Constants
pub const SCANNING_MESSAGE: &str = "🔍 Scanning for git repositories...";
pub const NO_REPOS_MESSAGE: &str = "No git repositories found under base directory.";
pub const FAILURE_HEADER: &str = "Update failure:";

/// What a run does with its exit status when some repositories failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Failures are reported on stdout only; the process still exits 0
    #[default]
    Report,
    /// Any failed repository turns into a non-zero exit status
    Strict,
}

impl FailurePolicy {
    pub fn should_fail(self, has_failures: bool) -> bool {
        matches!(self, FailurePolicy::Strict) && has_failures
    }
}

/// Where the output of each git child process goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Children share our stdout/stderr, so native git output is visible
    #[default]
    Inherit,
    /// Children write to the null device
    Quiet,
}

/// Settings for one run, built once at startup and handed to the command
#[derive(Debug, Clone)]
pub struct FleetConfig {
    /// Root scanned two levels deep
    pub base_dir: PathBuf,
    /// Newline-delimited list of `.git` marker paths to leave alone
    pub exclude_file: Option<PathBuf>,
    pub concurrency: usize,
    /// Per-repository limit; `None` waits for git however long it takes
    pub timeout: Option<Duration>,
    pub output: OutputMode,
    pub failure_policy: FailurePolicy,
}

impl FleetConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            exclude_file: None,
            concurrency: get_git_concurrency(None, false),
            timeout: None,
            output: OutputMode::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}
