//! Tracing output for tests, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Installs a test-friendly fmt subscriber. Defaults to `warn` when
/// `RUST_LOG` is unset. Safe to call from every test; only the first call
/// installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
