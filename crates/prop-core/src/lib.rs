//! Typed property handles over an injectable key/value environment.
//!
//! This crate provides:
//! - [`Environment`] - the external namespace (in-memory or process-backed)
//! - [`Property`] - a typed, defaulted handle over one environment entry
//! - [`PropertiesFile`] - a lazily loaded `.properties` layer beneath the environment
//! - [`ResourceLocator`] - resource-name to file resolution
//! - [`ChecksConfig`] - options read from the environment
//!
//! ## Usage
//!
//! ```rust
//! use prop_core::{InMemoryEnvironment, Property};
//!
//! let env = InMemoryEnvironment::new().with("browser", "safari").shared();
//!
//! let mut browser = Property::string_or(&env, "browser", "chrome");
//! assert_eq!(browser.get_value()?.as_deref(), Some("safari"));
//!
//! browser.clear_value();
//! assert_eq!(browser.get_value()?, None);
//! # Ok::<(), prop_core::ConversionError>(())
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

/// Module for resolution options
pub mod config;

/// Module for the external key/value namespace
pub mod environment;

/// Module for error types
pub mod error;

/// Module for `.properties` parsing
pub mod properties;

/// Module for the file-backed property layer
pub mod properties_file;

/// Module for typed property handles
pub mod property;

/// Module for resource lookup
pub mod resource;

/// Module for value conversion
pub mod value;

pub use config::{ChecksConfig, FIND_ON_CLASSPATH_KEY, MULTI_VALUE_ENABLED_KEY};
pub use environment::{Environment, InMemoryEnvironment, ProcessEnvironment, SharedEnvironment};
pub use error::{ConversionError, PropError, Result};
pub use properties::parse_properties;
pub use properties_file::PropertiesFile;
pub use property::Property;
pub use resource::ResourceLocator;
pub use value::{convert_value, PropertyValue, TypedValue, ValueType};
