//! Scope lifecycle: set declared properties, check conditions, restore.
//!
//! Each scope walks through
//! `Idle -> Setting -> Evaluating -> Enabled | Disabled -> Running -> Clearing -> Idle`.
//!
//! - **Setting** writes every effective setter whose name is absent from
//!   the environment. Values already present are never overridden.
//! - **Evaluating** checks every effective condition in order and stops at
//!   the first one that fails. Bracket-list matches narrow the environment
//!   and are recorded on the owning [`PropertyChecks`].
//! - **Clearing** removes the scope's own setter names, then writes
//!   recorded bracket lists back.
//!
//! A nested scope sees its parent's setters and conditions before its own,
//! but only clears what it declared itself.

use crate::declarations::{ScopeDeclarations, SetterDeclaration};
use crate::error::Result;
use crate::multi_value::{evaluate_condition, MultiValueSubstitution};
use crate::reason::condition_reason;
use prop_core::{ConversionError, Property, SharedEnvironment};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lifecycle position of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    Idle,
    Setting,
    Evaluating,
    Enabled,
    Disabled,
    Running,
    Clearing,
}

impl fmt::Display for ScopeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Setting => "setting",
            Self::Evaluating => "evaluating",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Running => "running",
            Self::Clearing => "clearing",
        };
        f.write_str(s)
    }
}

/// Entry point for scope lifecycles over one environment.
///
/// Clones share the substitution list, so guards opened from any clone
/// restore each other's narrowed values.
#[derive(Debug, Clone)]
pub struct PropertyChecks {
    env: SharedEnvironment,
    substitutions: Arc<Mutex<Vec<MultiValueSubstitution>>>,
}

impl PropertyChecks {
    #[must_use]
    pub fn new(env: &SharedEnvironment) -> Self {
        Self {
            env: env.clone(),
            substitutions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn environment(&self) -> &SharedEnvironment {
        &self.env
    }

    /// Narrowed values not yet restored.
    #[must_use]
    pub fn pending_substitutions(&self) -> Vec<MultiValueSubstitution> {
        self.lock().clone()
    }

    /// Open a top-level (class) scope.
    ///
    /// A disabled outcome has already been cleared. A conversion error
    /// clears the scope before it is returned.
    pub fn enter(&self, declarations: &ScopeDeclarations) -> Result<ScopeOutcome> {
        self.open(declarations.clone(), declarations.setters.clone())
    }

    /// Run `body` inside a scope when its conditions hold.
    ///
    /// Returns `Ok(None)` when the scope is disabled.
    pub fn run<R>(
        &self,
        declarations: &ScopeDeclarations,
        body: impl FnOnce(&ScopeGuard) -> R,
    ) -> Result<Option<R>> {
        match self.enter(declarations)? {
            ScopeOutcome::Enabled { mut guard, .. } => {
                let result = body(&guard);
                guard.exit();
                Ok(Some(result))
            }
            ScopeOutcome::Disabled { .. } => Ok(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<MultiValueSubstitution>> {
        self.substitutions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn open(
        &self,
        effective: ScopeDeclarations,
        own_setters: Vec<SetterDeclaration>,
    ) -> Result<ScopeOutcome> {
        effective.validate()?;

        let mut guard = ScopeGuard {
            checks: self.clone(),
            effective,
            own_setters,
            state: ScopeState::Idle,
            reason: String::new(),
        };

        self.restore_substitutions();

        guard.transition(ScopeState::Setting);
        self.apply_setters(&guard.effective.setters);

        guard.transition(ScopeState::Evaluating);
        let enabled = match self.evaluate(&guard.effective) {
            Ok(enabled) => enabled,
            Err(e) => {
                tracing::warn!(target: "prop.checks", error = %e, "Condition evaluation failed");
                guard.exit();
                return Err(e.into());
            }
        };

        let reason = condition_reason(
            &self.env,
            &guard.effective.conditions,
            guard.effective.label.as_deref(),
        );
        guard.reason.clone_from(&reason);

        if enabled {
            guard.transition(ScopeState::Enabled);
            guard.transition(ScopeState::Running);
            Ok(ScopeOutcome::Enabled { guard, reason })
        } else {
            guard.transition(ScopeState::Disabled);
            tracing::info!(target: "prop.checks", reason = %reason, "Scope disabled");
            guard.exit();
            Ok(ScopeOutcome::Disabled { reason })
        }
    }

    fn apply_setters(&self, setters: &[SetterDeclaration]) {
        for setter in setters {
            if self.env.contains(&setter.name) {
                tracing::debug!(target: "prop.checks", name = %setter.name, "Property already set, keeping it");
                continue;
            }
            Property::string(&self.env, &setter.name).set_value(setter.value.clone());
        }
    }

    fn evaluate(&self, declarations: &ScopeDeclarations) -> std::result::Result<bool, ConversionError> {
        let mut substitutions = self.lock();
        for condition in &declarations.conditions {
            if !evaluate_condition(&self.env, condition, &mut substitutions)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn restore_substitutions(&self) {
        let pending: Vec<_> = self.lock().drain(..).collect();
        for substitution in &pending {
            substitution.restore(&self.env);
        }
    }
}

/// Result of opening a scope.
#[derive(Debug)]
pub enum ScopeOutcome {
    /// Conditions hold. Dropping the guard clears the scope.
    Enabled { guard: ScopeGuard, reason: String },

    /// A condition failed. Clearing has already run.
    Disabled { reason: String },
}

impl ScopeOutcome {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Enabled { reason, .. } | Self::Disabled { reason } => reason,
        }
    }

    #[must_use]
    pub fn into_guard(self) -> Option<ScopeGuard> {
        match self {
            Self::Enabled { guard, .. } => Some(guard),
            Self::Disabled { .. } => None,
        }
    }
}

/// An open scope. Clearing runs once, on [`exit`](Self::exit) or drop.
#[derive(Debug)]
pub struct ScopeGuard {
    checks: PropertyChecks,
    effective: ScopeDeclarations,
    own_setters: Vec<SetterDeclaration>,
    state: ScopeState,
    reason: String,
}

impl ScopeGuard {
    #[must_use]
    pub fn state(&self) -> ScopeState {
        self.state
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Parent declarations followed by this scope's own.
    #[must_use]
    pub fn declarations(&self) -> &ScopeDeclarations {
        &self.effective
    }

    /// Open a method scope inside this one.
    pub fn enter_nested(&self, declarations: &ScopeDeclarations) -> Result<ScopeOutcome> {
        self.checks.open(
            declarations.layered_on(&self.effective),
            declarations.setters.clone(),
        )
    }

    /// Clear this scope's setters, then restore narrowed values.
    ///
    /// A bracket list narrowed under a setter's name survives the scope.
    /// Calling it again is a no-op.
    pub fn exit(&mut self) {
        if self.state == ScopeState::Idle {
            return;
        }
        self.transition(ScopeState::Clearing);

        for setter in &self.own_setters {
            Property::string(&self.checks.env, &setter.name).clear_value();
        }
        self.checks.restore_substitutions();

        self.transition(ScopeState::Idle);
    }

    fn transition(&mut self, next: ScopeState) {
        tracing::trace!(target: "prop.checks", from = %self.state, to = %next, "Scope state change");
        self.state = next;
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.exit();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ChecksError;
    use crate::reason::NO_CONDITIONS_REASON;
    use prop_core::{Environment, InMemoryEnvironment, MULTI_VALUE_ENABLED_KEY};

    fn checks(env: &InMemoryEnvironment) -> PropertyChecks {
        PropertyChecks::new(&env.shared())
    }

    #[test]
    fn test_no_conditions_is_enabled() {
        let env = InMemoryEnvironment::new();
        let outcome = checks(&env).enter(&ScopeDeclarations::new()).unwrap();

        assert!(outcome.is_enabled());
        assert_eq!(outcome.reason(), NO_CONDITIONS_REASON);
    }

    #[test]
    fn test_guard_runs_then_goes_idle() {
        let env = InMemoryEnvironment::new();
        let decls = ScopeDeclarations::new().set("browser", "firefox");

        let mut guard = checks(&env).enter(&decls).unwrap().into_guard().unwrap();
        assert_eq!(guard.state(), ScopeState::Running);
        assert_eq!(env.get("browser").as_deref(), Some("firefox"));

        guard.exit();
        assert_eq!(guard.state(), ScopeState::Idle);
        assert!(env.get("browser").is_none());

        env.set("browser", "later");
        guard.exit();
        assert_eq!(env.get("browser").as_deref(), Some("later"));
    }

    #[test]
    fn test_drop_clears() {
        let env = InMemoryEnvironment::new();
        let decls = ScopeDeclarations::new().set("browser", "firefox");

        {
            let _outcome = checks(&env).enter(&decls).unwrap();
            assert!(env.contains("browser"));
        }
        assert!(!env.contains("browser"));
    }

    #[test]
    fn test_disabled_scope_is_already_cleared() {
        let env = InMemoryEnvironment::new().with("os", "linux");
        let decls = ScopeDeclarations::new()
            .set("browser", "firefox")
            .enabled_if("os", ["windows"]);

        let outcome = checks(&env).enter(&decls).unwrap();

        assert!(!outcome.is_enabled());
        assert!(!env.contains("browser"));
        assert_eq!(env.get("os").as_deref(), Some("linux"));
    }

    #[test]
    fn test_conversion_error_clears_before_returning() {
        let env = InMemoryEnvironment::new()
            .with("os", "[linux,macos]")
            .with(MULTI_VALUE_ENABLED_KEY, "perhaps");
        let decls = ScopeDeclarations::new()
            .set("browser", "firefox")
            .enabled_if("os", ["linux"]);

        let result = checks(&env).enter(&decls);

        assert!(matches!(result, Err(ChecksError::Conversion(_))));
        assert!(!env.contains("browser"));
    }

    #[test]
    fn test_invalid_declarations_touch_nothing() {
        let env = InMemoryEnvironment::new();
        let decls = ScopeDeclarations::new().set("browser", "firefox").set("", "x");

        let result = checks(&env).enter(&decls);

        assert!(matches!(result, Err(ChecksError::Declaration(_))));
        assert!(env.is_empty());
    }

    #[test]
    fn test_next_evaluation_restores_stale_substitutions() {
        let env = InMemoryEnvironment::new().with("os", "[macos,windows]");
        let checks = checks(&env);
        let decls = ScopeDeclarations::new().enabled_if("os", ["macos"]);

        let guard = checks.enter(&decls).unwrap().into_guard().unwrap();
        assert_eq!(env.get("os").as_deref(), Some("macos"));
        std::mem::forget(guard);

        let plain = ScopeDeclarations::new().enabled_if("os", ["[macos,windows]"]);
        let outcome = checks.enter(&plain).unwrap();

        assert!(outcome.is_enabled());
        assert!(checks.pending_substitutions().is_empty());
    }

    #[test]
    fn test_run_skips_body_when_disabled() {
        let env = InMemoryEnvironment::new().with("os", "linux");
        let checks = checks(&env);

        let ran = checks
            .run(&ScopeDeclarations::new().enabled_if("os", ["windows"]), |_| ())
            .unwrap();
        assert!(ran.is_none());

        let seen = checks
            .run(&ScopeDeclarations::new().set("browser", "edge"), |guard| {
                (guard.state(), guard.checks.env.get("browser"))
            })
            .unwrap();
        assert_eq!(seen, Some((ScopeState::Running, Some("edge".to_string()))));
        assert!(!env.contains("browser"));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ScopeState::Evaluating.to_string(), "evaluating");
        assert_eq!(ScopeState::Clearing.to_string(), "clearing");
    }
}
