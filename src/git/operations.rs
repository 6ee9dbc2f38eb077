//! Running the pull command inside a working copy

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use super::status::{Failure, UpdateStatus};
use crate::core::{OutputMode, GIT_PROGRAM, GIT_PULL_ARGS};

/// Starts the synchronization command for one repository and waits for it
///
/// Implementations report every problem through the returned status; nothing
/// here is allowed to fail the run as a whole.
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn launch(&self, repo: &Path) -> UpdateStatus;
}

/// `git pull origin --rebase`, run with the repository as working directory
#[derive(Debug, Clone)]
pub struct GitPull {
    program: OsString,
    args: Vec<OsString>,
    timeout: Option<Duration>,
    output: OutputMode,
}

impl Default for GitPull {
    fn default() -> Self {
        Self::new()
    }
}

impl GitPull {
    pub fn new() -> Self {
        Self::with_command(GIT_PROGRAM, GIT_PULL_ARGS)
    }

    /// Same launcher semantics around an arbitrary program
    pub fn with_command<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: None,
            output: OutputMode::default(),
        }
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    fn command(&self, repo: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(repo).kill_on_drop(true);
        if self.output == OutputMode::Quiet {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }
        command
    }
}

#[async_trait]
impl Launcher for GitPull {
    async fn launch(&self, repo: &Path) -> UpdateStatus {
        let mut child = match self.command(repo).spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!(repo = %repo.display(), error = %e, "could not start git");
                return UpdateStatus::Failed(Failure::Launch(e.to_string()));
            }
        };

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(waited) => waited,
                Err(_) => {
                    if let Err(e) = child.kill().await {
                        warn!(repo = %repo.display(), error = %e, "failed to kill timed out git");
                    }
                    return UpdateStatus::Failed(Failure::TimedOut(limit));
                }
            },
            None => child.wait().await,
        };

        match waited {
            Ok(status) => UpdateStatus::from_exit(status),
            Err(e) => UpdateStatus::Failed(Failure::Launch(e.to_string())),
        }
    }
}
