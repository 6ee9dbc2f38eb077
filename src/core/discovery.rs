//! Repository discovery over a two-level `<group>/<repo>` layout

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

use super::config::{GIT_MARKER, SCAN_DEPTH};
use crate::git::Stage;

/// Errors that abort a run before any git process is started
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("base directory {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("base path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot read base directory {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read exclusion file {}", path.display())]
    ExclusionFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A git working copy found during discovery
///
/// The marker was present when the directory was scanned; nothing re-checks
/// it before git runs there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    path: PathBuf,
}

impl RepositoryRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Root of the working copy
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<path>/.git`, the form used by exclusion lists
    pub fn marker_path(&self) -> PathBuf {
        self.path.join(GIT_MARKER)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Marker paths the operator asked to skip, matched by exact string
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    entries: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one path per line. A missing file means nothing is excluded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DiscoveryError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let set = Self::parse(&contents);
                debug!(file = %path.display(), entries = set.len(), "loaded exclusion list");
                Ok(set)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = %path.display(), "exclusion list not found, nothing excluded");
                Ok(Self::default())
            }
            Err(source) => Err(DiscoveryError::ExclusionFile {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn parse(contents: &str) -> Self {
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn contains(&self, marker: &Path) -> bool {
        self.entries.contains(marker.to_string_lossy().as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Finds every `<base>/<group>/<repo>` directory that holds a `.git` marker
///
/// The base directory must exist and be listable, otherwise the whole run is
/// off. Group directories that cannot be listed are skipped without a word.
/// The result is fully collected and in no particular order.
pub fn discover(
    base: impl AsRef<Path>,
    exclusions: &ExclusionSet,
) -> Result<Vec<RepositoryRef>, DiscoveryError> {
    let base = check_base_dir(base.as_ref())?;

    let repos: Vec<RepositoryRef> = collect_candidates(&base)
        .into_par_iter()
        .filter(|dir| has_git_marker(dir))
        .map(RepositoryRef::new)
        .filter(|repo| {
            let excluded = exclusions.contains(&repo.marker_path());
            if excluded {
                debug!(repo = %repo, "excluded");
            } else {
                trace!(repo = %repo, stage = %Stage::Discovered);
            }
            !excluded
        })
        .collect();

    debug!(base = %base.display(), count = repos.len(), "discovery finished");
    Ok(repos)
}

fn check_base_dir(base: &Path) -> Result<PathBuf, DiscoveryError> {
    let unreadable = |source: std::io::Error| DiscoveryError::Unreadable {
        path: base.to_path_buf(),
        source,
    };

    // Made absolute lexically so symlinked bases keep the path the operator typed
    let absolute = normalize_lexically(&std::path::absolute(base).map_err(unreadable)?);

    let metadata = match fs::metadata(&absolute) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(DiscoveryError::NotFound(absolute));
        }
        Err(e) => return Err(unreadable(e)),
    };

    if !metadata.is_dir() {
        return Err(DiscoveryError::NotADirectory(absolute));
    }

    // Only the base is strict; nested listing errors are skipped by the walker
    fs::read_dir(&absolute).map_err(unreadable)?;

    Ok(absolute)
}

/// Drops `.` and resolves `..` against the preceding component, without
/// touching the filesystem
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Every directory exactly two levels below `base`
fn collect_candidates(base: &Path) -> Vec<PathBuf> {
    WalkBuilder::new(base)
        .standard_filters(false) // .git markers and dotted groups are fair game
        .follow_links(true)
        .max_depth(Some(SCAN_DEPTH))
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable directory");
                None
            }
        })
        .filter(|entry| {
            entry.depth() == SCAN_DEPTH && entry.file_type().is_some_and(|ft| ft.is_dir())
        })
        .map(ignore::DirEntry::into_path)
        .collect()
}

/// A `.git` directory or a `.git` file (worktrees, submodules) both count
fn has_git_marker(dir: &Path) -> bool {
    let found = dir.join(GIT_MARKER).exists();
    trace!(dir = %dir.display(), found, "checked git marker");
    found
}
