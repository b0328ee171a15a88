//! Logging initialization
//!
//! Library code emits `tracing` events; the binary installs a subscriber
//! once at startup. Output goes to stderr so command output on stdout stays
//! clean for piping.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "bookstore=debug"
    } else {
        "bookstore=warn"
    }
}

/// Install the stderr subscriber. Later calls are no-ops.
///
/// `RUST_LOG` takes precedence over the `verbose` flag.
pub fn init(verbose: bool) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(false);
        init(true);
        init(false);
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "bookstore=warn");
        assert_eq!(default_filter(true), "bookstore=debug");
    }
}
