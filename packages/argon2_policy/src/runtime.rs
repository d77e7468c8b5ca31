//! Execution environment probe
//!
//! The probe runs once per process; the resulting [`Runtime`] value is passed
//! explicitly into every constructor that has to enforce the parallelism rule.

use crate::{PasswordError, Result};
use once_cell::sync::Lazy;

static DETECTED: Lazy<Runtime> = Lazy::new(|| {
    if cfg!(any(target_family = "wasm", target_os = "emscripten")) {
        Runtime::Constrained
    } else {
        Runtime::Native
    }
});

/// Kind of runtime the hasher executes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    /// Native threads are available
    Native,
    /// No native threading (wasm/wasi); Argon2 lanes must be 1
    Constrained,
}

impl Runtime {
    /// The runtime of the current process, evaluated once and cached
    #[must_use]
    pub fn detect() -> Self {
        *DETECTED
    }

    /// Whether native threading is unavailable
    #[must_use]
    pub fn is_constrained(self) -> bool {
        matches!(self, Self::Constrained)
    }

    /// Largest default parallelism that is safe on this runtime
    #[must_use]
    pub fn default_parallelism(self, preferred: u32) -> u32 {
        if self.is_constrained() { 1 } else { preferred }
    }

    /// Enforce `parallelism == 1` on constrained runtimes.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::UnsupportedParams`] for any other parallelism
    /// when running constrained.
    pub fn check_parallelism(self, parallelism: u32) -> Result<()> {
        if self.is_constrained() && parallelism != 1 {
            return Err(PasswordError::UnsupportedParams { parallelism });
        }
        Ok(())
    }
}
