//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for environments and scope outcomes.

use prop_checks::ScopeOutcome;
use prop_core::Environment;

/// Custom assertions for environment contents
///
/// # Example
/// ```rust,ignore
/// env.assert_value("os", "windows")
///     .assert_absent("browser");
/// ```
pub trait EnvironmentAssertions {
    /// Assert that `name` holds exactly `expected`
    fn assert_value(&self, name: &str, expected: &str) -> &Self;

    /// Assert that `name` has no entry
    fn assert_absent(&self, name: &str) -> &Self;
}

impl<E: Environment + ?Sized> EnvironmentAssertions for E {
    fn assert_value(&self, name: &str, expected: &str) -> &Self {
        assert_eq!(
            self.get(name).as_deref(),
            Some(expected),
            "Expected environment entry {name}={expected}"
        );
        self
    }

    fn assert_absent(&self, name: &str) -> &Self {
        let actual = self.get(name);
        assert!(
            actual.is_none(),
            "Expected {name} to be unset, found {actual:?}"
        );
        self
    }
}

/// Custom assertions for scope outcomes
pub trait ScopeOutcomeAssertions {
    /// Assert that the scope is enabled
    fn assert_enabled(&self) -> &Self;

    /// Assert that the scope is disabled
    fn assert_disabled(&self) -> &Self;

    /// Assert the exact reason string
    fn assert_reason(&self, expected: &str) -> &Self;
}

impl ScopeOutcomeAssertions for ScopeOutcome {
    fn assert_enabled(&self) -> &Self {
        assert!(
            self.is_enabled(),
            "Expected scope to be enabled, reason: {}",
            self.reason()
        );
        self
    }

    fn assert_disabled(&self) -> &Self {
        assert!(
            !self.is_enabled(),
            "Expected scope to be disabled, reason: {}",
            self.reason()
        );
        self
    }

    fn assert_reason(&self, expected: &str) -> &Self {
        assert_eq!(self.reason(), expected, "Unexpected scope reason");
        self
    }
}
