//! Resource lookup for properties files.
//!
//! A resource name such as `fixtures/File2.properties` is resolved either
//! against an ordered list of search roots or against the fixed source
//! tree of a crate (`tests/resources`, then `resources`). The choice is made
//! by the `propcheck.findOnClasspath` option, read fresh on every lookup.

use crate::config::ChecksConfig;
use crate::environment::SharedEnvironment;
use crate::error::{PropError, Result};
use std::path::{Path, PathBuf};

/// Subdirectories of the source root searched when search roots are off.
pub const SOURCE_TREE_DIRS: [&str; 2] = ["tests/resources", "resources"];

/// Locates resource files by name.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    env: SharedEnvironment,
    search_roots: Vec<PathBuf>,
    source_root: PathBuf,
}

impl ResourceLocator {
    /// Locator rooted at `source_root`, with no extra search roots.
    #[must_use]
    pub fn new(env: &SharedEnvironment, source_root: impl Into<PathBuf>) -> Self {
        Self {
            env: env.clone(),
            search_roots: Vec::new(),
            source_root: source_root.into(),
        }
    }

    /// Locator rooted at the current working directory.
    #[must_use]
    pub fn from_current_dir(env: &SharedEnvironment) -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(env, root)
    }

    /// Append a search root (builder style). Roots are tried in order.
    #[must_use]
    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_roots.push(root.into());
        self
    }

    /// The fixed source tree root.
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Resolve `name` to an existing file.
    pub fn find(&self, name: &str) -> Result<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PropError::InvalidResourceName);
        }

        let relative: PathBuf = name.split('/').filter(|part| !part.is_empty()).collect();
        let found = if ChecksConfig::read_find_on_classpath(&self.env)? {
            self.search_roots
                .iter()
                .map(|root| root.join(&relative))
                .find(|candidate| candidate.is_file())
        } else {
            SOURCE_TREE_DIRS
                .iter()
                .map(|dir| self.source_root.join(dir).join(&relative))
                .find(|candidate| candidate.is_file())
        };

        match found {
            Some(path) => {
                tracing::debug!(target: "prop.resource", resource = %name, path = %path.display(), "Found resource");
                Ok(path)
            }
            None => {
                tracing::warn!(target: "prop.resource", resource = %name, "Resource not found");
                Err(PropError::ResourceMissing(name.to_string()))
            }
        }
    }

    /// Read a resource as UTF-8 text. Missing resources are an error.
    pub fn read_to_string(&self, name: &str) -> Result<String> {
        let path = self.find(name)?;
        std::fs::read_to_string(&path).map_err(|source| PropError::Io { path, source })
    }
}
