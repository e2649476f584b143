//! Run-once, publish-once registry holder.
//!
//! A [`RegistryCell`] is meant to live in a `static`. The first caller of
//! [`get_or_build`](RegistryCell::get_or_build) runs the build; every other
//! caller blocks until it finishes and then sees the same result. The
//! registry is published only after `build()` has returned, so nobody ever
//! observes one whose link pass is still running. A failed build is kept as
//! well: the build is not retried.

use std::sync::OnceLock;

use crate::{Registry, RegistryError};

/// Lazily built, process-wide registry.
#[derive(Debug, Default)]
pub struct RegistryCell {
    cell: OnceLock<Result<Registry, RegistryError>>,
}

impl RegistryCell {
    /// An empty cell.
    pub const fn new() -> Self {
        RegistryCell {
            cell: OnceLock::new(),
        }
    }

    /// The registry, running `build` if no build has run yet.
    ///
    /// # Errors
    /// The error of the one build that ran, if it failed.
    pub fn get_or_build(
        &self,
        build: impl FnOnce() -> Result<Registry, RegistryError>,
    ) -> Result<&Registry, &RegistryError> {
        self.cell
            .get_or_init(|| {
                tracing::debug!("building process registry");
                build()
            })
            .as_ref()
    }

    /// The registry, if a build has run and succeeded.
    pub fn get(&self) -> Option<&Registry> {
        self.cell.get().and_then(|result| result.as_ref().ok())
    }

    /// Check whether a build has run, successfully or not.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
