//! Tracing output for test binaries.
//!
//! Filter with `RUST_LOG`, e.g. `RUST_LOG=prop.checks=trace`.

use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install a test-writer fmt subscriber once per process.
///
/// Later calls, and calls after another subscriber was installed, do nothing.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "prop=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}
