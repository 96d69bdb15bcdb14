//! Human-readable outcome reasons.

use crate::declarations::ConditionDeclaration;
use crate::multi_value::observed_value;
use prop_core::SharedEnvironment;

/// Reason reported for a scope without conditions.
pub const NO_CONDITIONS_REASON: &str = "no property conditions declared";

/// Placeholder for an unset observed value.
pub const UNSET_MARKER: &str = "null";

/// One line per condition, in declaration order:
///
/// ```text
/// @EnabledIfProperty(name=os,value=[macos,windows]) <- linux
/// ```
///
/// Spaces are removed from the allowed-value list. When `label` is given it
/// is appended on its own line.
pub fn condition_reason(
    env: &SharedEnvironment,
    conditions: &[ConditionDeclaration],
    label: Option<&str>,
) -> String {
    if conditions.is_empty() {
        return NO_CONDITIONS_REASON.to_string();
    }

    let mut lines: Vec<String> = conditions
        .iter()
        .map(|condition| {
            let name = condition.name.trim();
            let allowed = format!("[{}]", condition.value.join(",")).replace(' ', "");
            let observed =
                observed_value(env, name).unwrap_or_else(|| UNSET_MARKER.to_string());
            format!("@EnabledIfProperty(name={name},value={allowed}) <- {observed}")
        })
        .collect();

    if let Some(label) = label {
        lines.push(label.to_string());
    }

    lines.join("\n")
}
