//! Shared types used across the library.

use core::fmt;
#[cfg(feature = "std")]
use std::error;

/// Error for an unsupported CPU: no accelerated backend could be selected.
///
/// `engine::dispatcher`'s own functions never return this: they always fall
/// back to the portable backend rather than fail, so every dispatch call
/// succeeds on every host. This type exists for callers that want a hard-fail
/// "accelerated or nothing" policy instead, such as `verification`'s
/// cross-backend checker, which constructs it directly when no SIMD backend
/// is compiled in or detected on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendSelectError {
    missing: &'static str,
}

impl BackendSelectError {
    /// Create a new `BackendSelectError` describing the missing CPU feature.
    #[must_use]
    pub const fn new(missing: &'static str) -> Self {
        Self { missing }
    }
}

impl fmt::Display for BackendSelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU feature '{}' required; no accelerated SIMON/SPECK backend available on this host",
            self.missing
        )
    }
}

#[cfg(feature = "std")]
impl error::Error for BackendSelectError {}
