//! Environments and properties files for tests.

use anyhow::Context;
use prop_core::{InMemoryEnvironment, PropertiesFile, ResourceLocator, SharedEnvironment};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Property names shared by the lifecycle tests.
pub const OS: &str = "os";
pub const BROWSER: &str = "browser";
pub const HEADLESS: &str = "headless";

/// In-memory environment holding `entries`.
pub fn seeded_environment(entries: &[(&str, &str)]) -> InMemoryEnvironment {
    entries
        .iter()
        .fold(InMemoryEnvironment::new(), |env, (name, value)| env.with(name, value))
}

/// A `.properties` file in its own temporary directory.
///
/// The directory is removed on drop.
pub struct TempProperties {
    dir: TempDir,
    path: PathBuf,
}

impl TempProperties {
    /// Write `content` to `<tempdir>/<relative>`.
    pub fn new(relative: &str, content: &str) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir().context("creating temp dir")?;
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(Self { dir, path })
    }

    /// Write `key=value` lines.
    pub fn from_entries(relative: &str, entries: &[(&str, &str)]) -> anyhow::Result<Self> {
        let content: String = entries
            .iter()
            .map(|(name, value)| format!("{name}={value}\n"))
            .collect();
        Self::new(relative, &content)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The temporary directory, usable as a search root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Locator searching this file's directory first.
    pub fn locator(&self, env: &SharedEnvironment) -> ResourceLocator {
        ResourceLocator::new(env, self.root()).with_search_root(self.root())
    }

    /// Properties file reading this file by path.
    pub fn open(&self, env: &SharedEnvironment) -> PropertiesFile {
        PropertiesFile::from_path(env, &self.path)
    }
}
