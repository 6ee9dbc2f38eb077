//! Update status enumeration and utilities

use std::fmt;
use std::process::ExitStatus;
use std::time::Duration;

/// Outcome of one `git pull` invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateStatus {
    /// git exited with status 0
    Success,
    /// git could not finish cleanly
    Failed(Failure),
}

/// Why a repository failed to update
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    /// Non-zero exit code
    Exit(i32),
    /// Killed by a signal, so there is no exit code
    Signal,
    /// The process never started (missing binary, vanished directory, ...)
    Launch(String),
    /// Killed after exceeding the configured timeout
    TimedOut(Duration),
}

impl UpdateStatus {
    pub fn from_exit(status: ExitStatus) -> Self {
        if status.success() {
            return UpdateStatus::Success;
        }
        match status.code() {
            Some(code) => UpdateStatus::Failed(Failure::Exit(code)),
            None => UpdateStatus::Failed(Failure::Signal),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UpdateStatus::Success)
    }

    /// Short code shown on the per-repository line
    pub fn code(&self) -> String {
        match self {
            UpdateStatus::Success => "0".to_string(),
            UpdateStatus::Failed(Failure::Exit(code)) => code.to_string(),
            UpdateStatus::Failed(Failure::Signal) => "signal".to_string(),
            UpdateStatus::Failed(Failure::Launch(_)) => "launch-error".to_string(),
            UpdateStatus::Failed(Failure::TimedOut(_)) => "timeout".to_string(),
        }
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Exit(code) => write!(f, "exit code {code}"),
            Failure::Signal => f.write_str("terminated by signal"),
            Failure::Launch(reason) => write!(f, "failed to start: {reason}"),
            Failure::TimedOut(limit) => write!(f, "timed out after {}s", limit.as_secs()),
        }
    }
}

/// Lifecycle of a repository within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Discovered,
    Queued,
    Running,
    Succeeded,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Succeeded | Stage::Failed)
    }
}

impl From<&UpdateStatus> for Stage {
    fn from(status: &UpdateStatus) -> Self {
        if status.is_success() {
            Stage::Succeeded
        } else {
            Stage::Failed
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::Discovered => "discovered",
            Stage::Queued => "queued",
            Stage::Running => "running",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        };
        f.write_str(text)
    }
}
