//! Test fixtures and builders

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A `<base>/<group>/<repo>` tree with automatic cleanup
pub struct Fleet {
    pub temp_dir: TempDir,
}

impl Fleet {
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `<base>/<rel>`
    pub fn repo(&self, rel: &str) -> PathBuf {
        self.path().join(rel)
    }

    /// Absolute marker path of `<base>/<rel>/.git`, as exclusion lists spell it
    pub fn marker(&self, rel: &str) -> String {
        self.repo(rel).join(".git").to_string_lossy().into_owned()
    }

    /// Writes an exclusion list file and returns its path
    pub fn write_exclusions(&self, entries: &[String]) -> Result<PathBuf> {
        let file = self.path().join("exclude.txt");
        fs::write(&file, entries.join("\n"))?;
        Ok(file)
    }
}

/// Builder for fake fleets; markers are bare `.git` directories, no git needed
#[derive(Default)]
pub struct FleetBuilder {
    repos: Vec<String>,
    plain_dirs: Vec<String>,
}

impl FleetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory with a `.git` marker
    pub fn repo(mut self, rel: impl Into<String>) -> Self {
        self.repos.push(rel.into());
        self
    }

    /// A directory without a marker
    pub fn plain_dir(mut self, rel: impl Into<String>) -> Self {
        self.plain_dirs.push(rel.into());
        self
    }

    pub fn build(self) -> Result<Fleet> {
        let temp_dir = TempDir::new()?;
        for rel in &self.repos {
            fs::create_dir_all(temp_dir.path().join(rel).join(".git"))?;
        }
        for rel in &self.plain_dirs {
            fs::create_dir_all(temp_dir.path().join(rel))?;
        }
        Ok(Fleet { temp_dir })
    }
}
