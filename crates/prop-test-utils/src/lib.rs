//! # Prop Test Utilities
//!
//! Shared test utilities for the property scope crates.
//!
//! This crate provides:
//! - Seeded environments and temporary properties files
//! - Custom assertions (EnvironmentAssertions, ScopeOutcomeAssertions)
//! - One-time tracing setup for test binaries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prop_test_utils::*;
//!
//! #[test]
//! fn test_example() {
//!     init_test_tracing();
//!
//!     let env = seeded_environment(&[("os", "[macos,windows]")]);
//!     let checks = PropertyChecks::new(&env.shared());
//!
//!     checks
//!         .enter(&ScopeDeclarations::new().enabled_if("os", ["windows"]))?
//!         .assert_enabled();
//!
//!     env.assert_value("os", "windows");
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod tracing_setup;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use tracing_setup::*;
