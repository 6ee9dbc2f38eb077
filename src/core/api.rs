//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Repository discovery and exclusion lists
//! - Bounded concurrent updates
//! - Statistics tracking
//! - Configuration utilities
//!
//! Internal implementation details are not exposed through this API.

// Discovery
pub use super::discovery::{discover, DiscoveryError, ExclusionSet, RepositoryRef};

// Updating
pub use super::parallel::bounded_map;
pub use super::stats::FleetStatistics;
pub use super::update::{update_all, UpdateReport, UpdateResult};

// Configuration
pub use super::config::{
    get_git_concurrency, FailurePolicy, FleetConfig, OutputMode, MIN_DEFAULT_CONCURRENCY,
};
pub use super::config::{GIT_MARKER, GIT_PROGRAM, GIT_PULL_ARGS, SCAN_DEPTH};

// User-facing messages
pub use super::config::{FAILURE_HEADER, NO_REPOS_MESSAGE, SCANNING_MESSAGE};

// Terminal and output utilities (re-exported from utils)
pub use crate::utils::{clear_transient, emit_line, show_transient};
pub use crate::utils::{set_terminal_title, set_terminal_title_and_flush};
