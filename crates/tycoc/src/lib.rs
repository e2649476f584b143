//! Tyco command-line driver.
//!
//! Loads a descriptor manifest, builds the registry from it, and runs one of
//! the `tyco` commands against the result.

use std::sync::Once;

pub mod commands;
pub mod manifest;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
///
/// ```bash
/// RUST_LOG=tyco_registry=debug tyco check tyco.toml
/// RUST_LOG=tyco_registry=trace tyco resolve tyco.toml 'Pair<String, Integer>'
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
