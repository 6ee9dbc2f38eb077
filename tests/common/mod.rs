//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;
pub mod launchers;

pub use self::fixtures::FleetBuilder;
pub use self::git::{create_test_commit, is_git_available, setup_git_repo};
pub use self::launchers::{FailingFor, RecordingLauncher};
