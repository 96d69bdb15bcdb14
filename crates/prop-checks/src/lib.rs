//! Property-driven scope lifecycle for test hosts.
//!
//! A host (test harness, runner integration) describes each class or
//! method scope with [`ScopeDeclarations`], opens it with
//! [`PropertyChecks::enter`] and keeps the returned [`ScopeGuard`] alive
//! while the scope runs.
//!
//! ## Usage
//!
//! ```rust
//! use prop_checks::{PropertyChecks, ScopeDeclarations, ScopeOutcome};
//! use prop_core::{Environment, InMemoryEnvironment};
//!
//! let env = InMemoryEnvironment::new().with("os", "[macos,windows]");
//! let checks = PropertyChecks::new(&env.shared());
//!
//! let class = ScopeDeclarations::new()
//!     .set("browser", "firefox")
//!     .enabled_if("os", ["windows", "linux"]);
//!
//! match checks.enter(&class)? {
//!     ScopeOutcome::Enabled { guard, .. } => {
//!         assert_eq!(env.get("os").as_deref(), Some("windows"));
//!         assert_eq!(env.get("browser").as_deref(), Some("firefox"));
//!         drop(guard);
//!     }
//!     ScopeOutcome::Disabled { reason } => panic!("{reason}"),
//! }
//!
//! assert_eq!(env.get("os").as_deref(), Some("[macos,windows]"));
//! assert!(env.get("browser").is_none());
//! # Ok::<(), prop_checks::ChecksError>(())
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

/// Module for the scope lifecycle
pub mod checks;

/// Module for condition and setter declarations
pub mod declarations;

/// Module for error types
pub mod error;

/// Module for bracket-list condition matching
pub mod multi_value;

/// Module for outcome reasons
pub mod reason;

pub use checks::{PropertyChecks, ScopeGuard, ScopeOutcome, ScopeState};
pub use declarations::{ConditionDeclaration, ScopeDeclarations, SetterDeclaration};
pub use error::{ChecksError, Result};
pub use multi_value::{evaluate_condition, MultiValueSubstitution};
pub use reason::{condition_reason, NO_CONDITIONS_REASON, UNSET_MARKER};
