//! git-fleet: pull every git working copy below a base directory
//! Scans `<base>/<group>/<repo>` and runs `git pull origin --rebase` in each, a bounded number at a time.

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use git_fleet::commands::handle_update_command;
use git_fleet::core::{get_git_concurrency, FailurePolicy, FleetConfig, OutputMode};

#[derive(Parser, Debug)]
#[command(name = "git-fleet", version, about = "Update a collection of git repositories")]
struct Cli {
    /// Repositories collection directory, scanned two levels deep
    dir_base: PathBuf,

    /// File listing absolute `.git` paths to skip, one per line
    /// (compared against the base made absolute, `..` resolved)
    #[arg(short = 'e', long = "exclude", value_name = "FILE")]
    exclude: Option<PathBuf>,

    /// Number of concurrent git processes (default: CPU count, at least 2)
    #[arg(short = 'j', long, value_name = "N")]
    jobs: Option<usize>,

    /// Update one repository at a time
    #[arg(long, conflicts_with = "jobs")]
    sequential: bool,

    /// Kill git after this many seconds per repository
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Discard git's own output
    #[arg(short, long)]
    quiet: bool,

    /// Exit non-zero when any repository fails to update
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> FleetConfig {
        FleetConfig {
            concurrency: get_git_concurrency(self.jobs, self.sequential),
            exclude_file: self.exclude,
            timeout: self.timeout.map(Duration::from_secs),
            output: if self.quiet {
                OutputMode::Quiet
            } else {
                OutputMode::Inherit
            },
            failure_policy: if self.strict {
                FailurePolicy::Strict
            } else {
                FailurePolicy::Report
            },
            base_dir: self.dir_base,
        }
    }
}

/// Initialize tracing subscriber with env filter, logging to stderr
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("git_fleet={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.into_config();
    let policy = config.failure_policy;

    let report = handle_update_command(config).await?;

    if policy.should_fail(report.has_failures()) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
