//! Options that steer property resolution.
//!
//! Options live in the same environment as every other property, so a
//! host can toggle them per process (`-D`-style) or per scope (through a
//! setter declaration). They are re-read on every use.

use crate::environment::{InMemoryEnvironment, SharedEnvironment};
use crate::error::ConversionError;
use crate::property::Property;
use std::collections::HashMap;

/// Environment key toggling bracket-list matching (`[a,b,c]`).
pub const MULTI_VALUE_ENABLED_KEY: &str = "propcheck.multiValueEnabled";

/// Environment key choosing search roots over the fixed source tree.
pub const FIND_ON_CLASSPATH_KEY: &str = "propcheck.findOnClasspath";

/// Default for [`MULTI_VALUE_ENABLED_KEY`].
pub const DEFAULT_MULTI_VALUE_ENABLED: bool = true;

/// Default for [`FIND_ON_CLASSPATH_KEY`].
pub const DEFAULT_FIND_ON_CLASSPATH: bool = true;

/// Snapshot of the resolution options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksConfig {
    /// Whether `[a,b,c]` values are matched part by part.
    pub multi_value_enabled: bool,

    /// Whether resources are looked up under the search roots.
    pub find_on_classpath: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            multi_value_enabled: DEFAULT_MULTI_VALUE_ENABLED,
            find_on_classpath: DEFAULT_FIND_ON_CLASSPATH,
        }
    }
}

impl ChecksConfig {
    /// Load options from an environment.
    pub fn from_environment(env: &SharedEnvironment) -> Result<Self, ConversionError> {
        Ok(Self {
            multi_value_enabled: Self::read_multi_value_enabled(env)?,
            find_on_classpath: Self::read_find_on_classpath(env)?,
        })
    }

    /// Read only [`MULTI_VALUE_ENABLED_KEY`].
    pub fn read_multi_value_enabled(env: &SharedEnvironment) -> Result<bool, ConversionError> {
        read_flag(env, MULTI_VALUE_ENABLED_KEY, DEFAULT_MULTI_VALUE_ENABLED)
    }

    /// Read only [`FIND_ON_CLASSPATH_KEY`].
    pub fn read_find_on_classpath(env: &SharedEnvironment) -> Result<bool, ConversionError> {
        read_flag(env, FIND_ON_CLASSPATH_KEY, DEFAULT_FIND_ON_CLASSPATH)
    }

    /// Load options from a `HashMap` (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConversionError> {
        Self::from_environment(&InMemoryEnvironment::from_vars(vars).shared())
    }
}

fn read_flag(env: &SharedEnvironment, key: &str, default: bool) -> Result<bool, ConversionError> {
    Ok(Property::boolean(env, key, default)?
        .get_value()?
        .unwrap_or(default))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ChecksConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config, ChecksConfig::default());
        assert!(config.multi_value_enabled);
        assert!(config.find_on_classpath);
    }

    #[test]
    fn test_custom_values() {
        let vars = HashMap::from([
            (MULTI_VALUE_ENABLED_KEY.to_string(), "false".to_string()),
            (FIND_ON_CLASSPATH_KEY.to_string(), "FALSE".to_string()),
        ]);

        let config = ChecksConfig::from_vars(&vars).unwrap();
        assert!(!config.multi_value_enabled);
        assert!(!config.find_on_classpath);
    }

    #[test]
    fn test_rejects_non_boolean() {
        let vars = HashMap::from([(MULTI_VALUE_ENABLED_KEY.to_string(), "maybe".to_string())]);

        let result = ChecksConfig::from_vars(&vars);
        assert!(
            matches!(result, Err(ConversionError::InvalidValue { type_name, value, .. }) if type_name == "bool" && value == "maybe")
        );
    }

    #[test]
    fn test_each_option_reads_independently() {
        let env = InMemoryEnvironment::new()
            .with(FIND_ON_CLASSPATH_KEY, "src/test")
            .with(MULTI_VALUE_ENABLED_KEY, "false")
            .shared();

        assert!(!ChecksConfig::read_multi_value_enabled(&env).unwrap());
        assert!(ChecksConfig::read_find_on_classpath(&env).is_err());
        assert!(ChecksConfig::from_environment(&env).is_err());
    }
}
