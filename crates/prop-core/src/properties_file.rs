//! File-backed property source layered under the environment.
//!
//! Lookup order for [`PropertiesFile::get_property`]:
//!
//! 1. environment entry for the name;
//! 2. the property's own override, when the handle was written to;
//! 3. the value from the file;
//! 4. the property's default.
//!
//! The file is read on first access and memoised. A file that cannot be
//! found or read behaves as an empty file.

use crate::environment::SharedEnvironment;
use crate::error::{ConversionError, PropError};
use crate::properties::parse_properties;
use crate::property::Property;
use crate::resource::ResourceLocator;
use crate::value::PropertyValue;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Resource {
        locator: ResourceLocator,
        name: String,
    },
}

impl Source {
    fn read(&self) -> Result<String, PropError> {
        match self {
            Self::Path(path) => std::fs::read_to_string(path).map_err(|source| PropError::Io {
                path: path.clone(),
                source,
            }),
            Self::Resource { locator, name } => locator.read_to_string(name),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Resource { name, .. } => name.clone(),
        }
    }
}

/// Properties loaded from a `.properties` file.
#[derive(Debug)]
pub struct PropertiesFile {
    env: SharedEnvironment,
    source: Source,
    mirror_to_environment: bool,
    properties: OnceLock<BTreeMap<String, String>>,
}

impl PropertiesFile {
    /// Read from a filesystem path.
    #[must_use]
    pub fn from_path(env: &SharedEnvironment, path: impl Into<PathBuf>) -> Self {
        Self::with_source(env, Source::Path(path.into()))
    }

    /// Read from a named resource resolved by `locator`.
    #[must_use]
    pub fn from_resource(env: &SharedEnvironment, locator: &ResourceLocator, name: &str) -> Self {
        Self::with_source(
            env,
            Source::Resource {
                locator: locator.clone(),
                name: name.to_string(),
            },
        )
    }

    fn with_source(env: &SharedEnvironment, source: Source) -> Self {
        Self {
            env: env.clone(),
            source,
            mirror_to_environment: false,
            properties: OnceLock::new(),
        }
    }

    /// Push every file entry into the environment when the file is loaded,
    /// skipping names the environment already holds.
    #[must_use]
    pub fn with_system_mirroring(mut self, enabled: bool) -> Self {
        self.mirror_to_environment = enabled;
        self
    }

    /// All entries of the file, sorted by key.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        self.properties.get_or_init(|| self.load())
    }

    fn load(&self) -> BTreeMap<String, String> {
        let origin = self.source.describe();
        let properties = match self.source.read() {
            Ok(content) => {
                let parsed = parse_properties(&content);
                tracing::debug!(target: "prop.file", file = %origin, entries = parsed.len(), "Read properties");
                parsed
            }
            Err(e) => {
                tracing::debug!(target: "prop.file", file = %origin, error = %e, "Properties file unavailable, using empty set");
                BTreeMap::new()
            }
        };

        if self.mirror_to_environment {
            for (name, value) in &properties {
                if self.env.contains(name) {
                    tracing::trace!(target: "prop.file", name = %name, "Environment already set, not mirroring");
                    continue;
                }
                self.env.set(name, value);
            }
        }

        properties
    }

    /// Raw value from the file only.
    pub fn file_value(&self, name: &str) -> Option<&str> {
        self.properties().get(name).map(String::as_str)
    }

    /// Raw value: environment first, then file.
    pub fn get(&self, name: &str) -> Option<String> {
        self.env
            .get(name)
            .or_else(|| self.file_value(name).map(str::to_string))
    }

    /// Raw value with a fallback.
    pub fn get_or(&self, name: &str, default_value: &str) -> String {
        self.get(name).unwrap_or_else(|| default_value.to_string())
    }

    /// Resolve `property` against the environment, its own override, this
    /// file and finally its default.
    pub fn get_property<T: PropertyValue>(
        &self,
        property: &Property<T>,
    ) -> Result<Option<T>, ConversionError> {
        let name = property.name();

        if let Some(raw) = self.env.get(name) {
            return T::parse_value(&raw);
        }

        if property.was_set() {
            return Ok(property.override_value().cloned());
        }

        match self.file_value(name) {
            Some(raw) => T::parse_value(raw),
            None => Ok(property.default_value().cloned()),
        }
    }

    /// Whether the file has been read yet.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.properties.get().is_some()
    }
}
