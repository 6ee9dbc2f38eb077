//! # git-fleet
//!
//! `git-fleet` keeps a directory of git working copies up to date. It powers
//! the `git-fleet` CLI tool.
//!
//! ## Core Features
//!
//! - **Two-level discovery**: finds `<base>/<group>/<repo>` working copies,
//!   with an optional exclusion list of `.git` marker paths.
//! - **Bounded concurrency**: one task per repository, a semaphore caps how
//!   many `git pull --rebase` processes run at once.
//! - **Contained failures**: a failing repository is reported, never fatal.
//!
//! ## Example
//!
//! ```rust,no_run
//! use git_fleet::core::{discover, update_all, ExclusionSet};
//! use git_fleet::git::GitPull;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repos = discover("/srv/git", &ExclusionSet::new())?;
//!     let report = update_all(repos, 4, Arc::new(GitPull::new())).await;
//!     println!("{} failed", report.statistics.failed());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod utils;
