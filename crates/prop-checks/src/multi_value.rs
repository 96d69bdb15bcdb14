//! Condition matching with bracket-list (`[a,b,c]`) support.
//!
//! When an environment value is a bracketed list and one of its parts is
//! allowed, the entry is narrowed to that part for the rest of the scope
//! and a [`MultiValueSubstitution`] is recorded so the list can be put
//! back afterwards.

use crate::declarations::ConditionDeclaration;
use prop_core::{ChecksConfig, ConversionError, Property, SharedEnvironment};
use regex::Regex;
use std::sync::OnceLock;

static BRACKET_LIST_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn bracket_interior(value: &str) -> Option<&str> {
    BRACKET_LIST_RE
        .get_or_init(|| Regex::new(r"^\[(.*)]$").ok())
        .as_ref()
        .and_then(|re| re.captures(value))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A narrowed entry and the list it was narrowed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiValueSubstitution {
    pub name: String,
    pub original_combined_value: String,
}

impl MultiValueSubstitution {
    /// Write the original list back.
    pub fn restore(&self, env: &SharedEnvironment) {
        tracing::debug!(
            target: "prop.checks",
            name = %self.name,
            value = %self.original_combined_value,
            "Restoring multi-value property"
        );
        Property::string(env, &self.name).set_value(self.original_combined_value.clone());
    }
}

/// Current value of `name`, trimmed, as conditions and reasons see it.
pub(crate) fn observed_value(env: &SharedEnvironment, name: &str) -> Option<String> {
    Property::string(env, name)
        .get_value()
        .ok()
        .flatten()
        .map(|v| v.trim().to_string())
}

/// Check one condition.
///
/// Returns `Ok(true)` when the condition holds. A bracket-list match
/// narrows the environment and pushes the substitution onto
/// `substitutions`.
pub fn evaluate_condition(
    env: &SharedEnvironment,
    condition: &ConditionDeclaration,
    substitutions: &mut Vec<MultiValueSubstitution>,
) -> Result<bool, ConversionError> {
    let Some(current) = observed_value(env, &condition.name) else {
        tracing::debug!(target: "prop.checks", name = %condition.name, "Condition property unset");
        return Ok(false);
    };

    let allowed = |candidate: &str| condition.value.iter().any(|v| v == candidate);

    if ChecksConfig::read_multi_value_enabled(env)? {
        if let Some(interior) = bracket_interior(&current) {
            if let Some(part) = interior.split(',').map(str::trim).find(|p| allowed(p)) {
                tracing::debug!(
                    target: "prop.checks",
                    name = %condition.name,
                    from = %current,
                    to = %part,
                    "Narrowing multi-value property"
                );
                Property::string(env, &condition.name).set_value(part.to_string());
                substitutions.push(MultiValueSubstitution {
                    name: condition.name.clone(),
                    original_combined_value: current.clone(),
                });
                return Ok(true);
            }
        }
    }

    Ok(allowed(&current))
}
