//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the air-freight document system.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `database`: Database test helpers and container management
//! - `generators`: Property-based test data generators

pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;

pub use builders::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;

/// Initializes tracing for tests; repeated calls are fine
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
