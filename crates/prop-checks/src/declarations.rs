//! Condition and setter declarations attached to a scope.
//!
//! Declarations are plain data. Hosts build them with the
//! [`ScopeDeclarations`] builder or load them from JSON:
//!
//! ```json
//! {
//!   "label": "LoginTest::opens_dashboard",
//!   "conditions": [{ "name": "os", "value": ["windows", "linux"] }],
//!   "setters": [{ "name": "browser", "value": "firefox" }]
//! }
//! ```

use crate::error::{ChecksError, Result};
use serde::Deserialize;
use std::path::Path;

/// Enables a scope only when `name` resolves to one of `value`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConditionDeclaration {
    pub name: String,

    /// Allowed values.
    #[serde(default)]
    pub value: Vec<String>,
}

impl ConditionDeclaration {
    pub fn new<I, S>(name: &str, value: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            value: value.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sets `name` to `value` for the lifetime of a scope, unless the
/// environment already holds `name`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetterDeclaration {
    pub name: String,
    pub value: String,
}

impl SetterDeclaration {
    #[must_use]
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Everything declared on one scope, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScopeDeclarations {
    /// Appended to the disabled reason, e.g. the test path.
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub conditions: Vec<ConditionDeclaration>,

    #[serde(default)]
    pub setters: Vec<SetterDeclaration>,
}

impl ScopeDeclarations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition.
    #[must_use]
    pub fn enabled_if<I, S>(mut self, name: &str, value: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.push(ConditionDeclaration::new(name, value));
        self
    }

    /// Add a setter.
    #[must_use]
    pub fn set(mut self, name: &str, value: &str) -> Self {
        self.setters.push(SetterDeclaration::new(name, value));
        self
    }

    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Parse and validate declarations from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let declarations: Self = serde_json::from_str(json)?;
        declarations.validate()?;
        Ok(declarations)
    }

    /// Read declarations from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ChecksError::Declaration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Reject names and values no environment can hold: blank names,
    /// names containing `=` or NUL, and values containing NUL.
    pub fn validate(&self) -> Result<()> {
        let condition_names = self.conditions.iter().map(|c| c.name.as_str());
        let setter_names = self.setters.iter().map(|s| s.name.as_str());

        for name in condition_names.chain(setter_names) {
            if name.trim().is_empty() {
                return Err(ChecksError::Declaration(
                    "property name must not be blank".to_string(),
                ));
            }
            if name.contains('=') || name.contains('\0') {
                return Err(ChecksError::Declaration(format!(
                    "property name {name:?} contains '=' or NUL"
                )));
            }
        }

        if let Some(setter) = self.setters.iter().find(|s| s.value.contains('\0')) {
            return Err(ChecksError::Declaration(format!(
                "value for {} contains NUL",
                setter.name
            )));
        }
        Ok(())
    }

    /// `parent` followed by `self`, as seen by a nested scope.
    ///
    /// The label is this scope's when present, otherwise the parent's.
    #[must_use]
    pub fn layered_on(&self, parent: &Self) -> Self {
        Self {
            label: self.label.clone().or_else(|| parent.label.clone()),
            conditions: parent
                .conditions
                .iter()
                .chain(&self.conditions)
                .cloned()
                .collect(),
            setters: parent.setters.iter().chain(&self.setters).cloned().collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.setters.is_empty()
    }
}
