//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output on stderr, debug level
    Development,
    /// JSON structured output on stderr, info level
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "evotree=debug,evotree_core=debug,evotree_cli=debug",
            Profile::Production => "evotree=info,evotree_core=info,evotree_cli=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// This function should be called once at application startup. Later calls
/// are no-ops. `RUST_LOG` overrides the profile's default filter.
///
/// # Example
///
/// ```
/// use evotree_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
    install(profile, filter);
}

/// Initialize with an explicit filter directive, ignoring `RUST_LOG`
///
/// Used by the CLI's `--verbose` flag.
pub fn init_with_filter(profile: Profile, directive: &str) {
    install(profile, EnvFilter::new(directive));
}

fn install(profile: Profile, filter: EnvFilter) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
        Profile::Test => {
            // Test capture is initialized separately via init_test_capture()
            let _ = tracing_subscriber::registry().try_init();
        }
    });
}
