//! The external key/value namespace properties are resolved against.
//!
//! Every [`Property`](crate::Property), properties file and lifecycle scope
//! receives its environment explicitly. Tests that need isolation build
//! their own [`InMemoryEnvironment`]; code that must observe the real
//! process state uses [`ProcessEnvironment`].
//!
//! # Example
//!
//! ```rust
//! use prop_core::{Environment, InMemoryEnvironment};
//!
//! let env = InMemoryEnvironment::new().with("browser", "safari");
//! assert_eq!(env.get("browser").as_deref(), Some("safari"));
//!
//! env.clear("browser");
//! assert!(env.get("browser").is_none());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A string-keyed store with get/set/clear semantics.
///
/// Implementations use interior mutability so that handles can be shared
/// between properties and scopes without `&mut` plumbing.
pub trait Environment: Send + Sync + fmt::Debug {
    /// Current value for `name`, if any.
    fn get(&self, name: &str) -> Option<String>;

    /// Store `value` under `name`, replacing any previous value.
    fn set(&self, name: &str, value: &str);

    /// Remove `name`. Clearing an absent name is a no-op.
    fn clear(&self, name: &str);

    /// Whether `name` currently has a value.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Shared, dynamically dispatched environment handle.
pub type SharedEnvironment = Arc<dyn Environment>;

/// In-memory environment backed by a mutex-protected map.
///
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnvironment {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryEnvironment {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value (builder style).
    #[must_use]
    pub fn with(self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Create an environment pre-populated from `vars`.
    #[must_use]
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(vars.clone())),
        }
    }

    /// Wrap this environment in a [`SharedEnvironment`] handle.
    #[must_use]
    pub fn shared(&self) -> SharedEnvironment {
        Arc::new(self.clone())
    }

    /// Sorted copy of every entry.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The map only holds owned strings, so a poisoned lock still guards
    // consistent data.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Environment for InMemoryEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.lock().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) {
        self.lock().insert(name.to_string(), value.to_string());
    }

    fn clear(&self, name: &str) {
        self.lock().remove(name);
    }
}

/// Environment backed by the variables of the current process.
///
/// Not safe for tests running in parallel; pair with `serial_test`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    /// Create a handle to the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Wrap in a [`SharedEnvironment`] handle.
    #[must_use]
    pub fn shared() -> SharedEnvironment {
        Arc::new(Self)
    }

    // std::env::set_var panics on these inputs.
    fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && !name.contains('=') && !name.contains('\0')
    }
}

impl Environment for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        if !Self::is_valid_name(name) {
            return None;
        }
        std::env::var_os(name).and_then(|v| v.into_string().ok())
    }

    fn set(&self, name: &str, value: &str) {
        if !Self::is_valid_name(name) || value.contains('\0') {
            tracing::warn!(target: "prop.environment", name = %name, "Rejected invalid process environment entry");
            return;
        }
        std::env::set_var(name, value);
    }

    fn clear(&self, name: &str) {
        if Self::is_valid_name(name) {
            std::env::remove_var(name);
        }
    }
}
