//! Typed handle over a single named environment slot.
//!
//! A [`Property`] resolves in a fixed order:
//!
//! 1. the environment, when it holds the name (converted to `T`);
//! 2. otherwise the in-memory override, if one was ever recorded;
//! 3. otherwise the default fixed at construction.
//!
//! Two narrow rules sit on top of that order:
//!
//! - If the environment held a value when the handle was built (or the
//!   handle wrote one) and the entry has since been removed, resolution
//!   yields `None` instead of the default. An explicit clear is never masked
//!   by a stale default. `clear_value` has the same effect.
//! - If the environment gains a value after a handle with an explicit
//!   default was built over an empty slot, and the handle itself never
//!   wrote, the default still wins. The first read observed by the handle
//!   decides.
//!
//! Handles are cheap and meant to be built fresh for each resolution
//! context; nothing is cached across constructions.

use crate::environment::SharedEnvironment;
use crate::error::ConversionError;
use crate::value::PropertyValue;

/// Typed view of one environment entry with a default and an override.
#[derive(Debug, Clone)]
pub struct Property<T: PropertyValue> {
    name: String,
    env: SharedEnvironment,
    default_value: Option<T>,
    initial_value: Option<T>,
    value: Option<T>,
    reassigned: bool,
    cleared: bool,
}

impl<T: PropertyValue> Property<T> {
    /// Build a handle whose default is whatever the environment holds now.
    pub fn new(env: &SharedEnvironment, name: &str) -> Result<Self, ConversionError> {
        let captured = Self::read(env, name)?;
        Ok(Self::assemble(env, name, captured.clone(), captured))
    }

    /// Build a handle with an explicit default.
    pub fn with_default(
        env: &SharedEnvironment,
        name: &str,
        default_value: T,
    ) -> Result<Self, ConversionError> {
        let captured = Self::read(env, name)?;
        Ok(Self::assemble(env, name, captured, Some(default_value)))
    }

    fn assemble(
        env: &SharedEnvironment,
        name: &str,
        captured: Option<T>,
        default_value: Option<T>,
    ) -> Self {
        Self {
            name: name.to_string(),
            env: env.clone(),
            default_value,
            initial_value: captured.clone(),
            value: captured,
            reassigned: false,
            cleared: false,
        }
    }

    fn read(env: &SharedEnvironment, name: &str) -> Result<Option<T>, ConversionError> {
        match env.get(name) {
            Some(raw) => T::parse_value(&raw),
            None => Ok(None),
        }
    }

    /// The environment key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the value type, as used in conversion errors.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    /// The default fixed at construction.
    #[must_use]
    pub fn default_value(&self) -> Option<&T> {
        self.default_value.as_ref()
    }

    /// The value observed in the environment when the handle was built.
    #[must_use]
    pub fn initial_value(&self) -> Option<&T> {
        self.initial_value.as_ref()
    }

    /// The in-memory override (captured at construction or written by
    /// `set_value`), without consulting the environment.
    #[must_use]
    pub fn override_value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The environment this handle reads and writes.
    #[must_use]
    pub fn environment(&self) -> &SharedEnvironment {
        &self.env
    }

    /// Resolve the current value.
    pub fn get_value(&self) -> Result<Option<T>, ConversionError> {
        match self.env.get(&self.name) {
            None => {
                if self.value.is_some() || self.cleared {
                    Ok(None)
                } else {
                    Ok(self.default_value.clone())
                }
            }
            Some(raw) => {
                if self.value.is_none() && !self.reassigned && self.default_value.is_some() {
                    return Ok(self.default_value.clone());
                }
                T::parse_value(&raw)
            }
        }
    }

    /// Write `value` to the environment and record it as the override.
    pub fn set_value(&mut self, value: T) {
        let raw = value.to_property_string();
        tracing::debug!(target: "prop.property", name = %self.name, value = %raw, "Setting property");
        self.env.set(&self.name, &raw);
        self.value = Some(value);
        self.reassigned = true;
        self.cleared = false;
    }

    /// Remove the environment entry and drop the override.
    ///
    /// The default and the reassignment history are kept.
    pub fn clear_value(&mut self) {
        tracing::debug!(target: "prop.property", name = %self.name, "Clearing property");
        self.env.clear(&self.name);
        self.value = None;
        self.cleared = true;
    }

    /// Whether `set_value` was called, or the resolved value no longer
    /// equals the value captured at construction.
    ///
    /// Comparison is by value equality.
    pub fn is_reassigned(&self) -> Result<bool, ConversionError> {
        if self.reassigned {
            return Ok(true);
        }
        Ok(self.get_value()? != self.initial_value)
    }

    /// Whether `set_value` was ever called on this handle.
    #[must_use]
    pub fn was_set(&self) -> bool {
        self.reassigned
    }
}

impl Property<String> {
    /// String handle; string conversion cannot fail.
    #[must_use]
    pub fn string(env: &SharedEnvironment, name: &str) -> Self {
        let captured = env.get(name);
        Self::assemble(env, name, captured.clone(), captured)
    }

    /// String handle with an explicit default.
    #[must_use]
    pub fn string_or(env: &SharedEnvironment, name: &str, default_value: &str) -> Self {
        let captured = env.get(name);
        Self::assemble(env, name, captured, Some(default_value.to_string()))
    }
}

impl Property<bool> {
    /// Boolean handle with an explicit default.
    pub fn boolean(
        env: &SharedEnvironment,
        name: &str,
        default_value: bool,
    ) -> Result<Self, ConversionError> {
        Self::with_default(env, name, default_value)
    }
}

impl Property<i32> {
    /// Integer handle with an explicit default.
    pub fn integer(
        env: &SharedEnvironment,
        name: &str,
        default_value: i32,
    ) -> Result<Self, ConversionError> {
        Self::with_default(env, name, default_value)
    }
}
