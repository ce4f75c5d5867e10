use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Locates and reads serialized fixture files for round-trip tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureLoader {
    base_dir: PathBuf,
    parent_dir_depth: usize,
}

impl FixtureLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            parent_dir_depth: 0,
        }
    }

    /// Rooted at the crate under test when run by cargo, else the working directory.
    pub fn from_env() -> Self {
        let base_dir = std::env::var_os("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base_dir)
    }

    /// Inserts `depth` `..` components after the base dir.
    pub fn with_parent_dir_depth(mut self, depth: usize) -> Self {
        self.parent_dir_depth = depth;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn build_path<S: AsRef<Path>>(&self, parts: &[S]) -> PathBuf {
        let mut path = self.base_dir.clone();
        for _ in 0..self.parent_dir_depth {
            path.push("..");
        }
        for part in parts {
            path.push(part);
        }
        path
    }

    pub fn read_to_string<S: AsRef<Path>>(&self, parts: &[S]) -> Result<String> {
        let path = self.build_path(parts);
        tracing::debug!("Reading fixture {}", path.display());
        Ok(std::fs::read_to_string(path)?)
    }

    pub fn read_lines<S: AsRef<Path>>(&self, parts: &[S]) -> Result<Vec<String>> {
        let content = self.read_to_string(parts)?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

impl Default for FixtureLoader {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Reads a fixture relative to the crate under test.
pub fn read_fixture<S: AsRef<Path>>(parts: &[S]) -> Result<String> {
    FixtureLoader::from_env().read_to_string(parts)
}

pub fn read_fixture_lines<S: AsRef<Path>>(parts: &[S]) -> Result<Vec<String>> {
    FixtureLoader::from_env().read_lines(parts)
}
