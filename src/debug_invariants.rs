//! Invariant checking for assembled meshes.
//!
//! `validate_invariants` is always available; the [`debug_invariants!`] macro
//! only runs it in debug builds or when the `check-invariants` /
//! `strict-invariants` features are enabled.

use crate::mesh_error::MeshError;

/// Absolute tolerance used when checking floating-point invariants.
pub const INVARIANT_TOLERANCE: f64 = 1e-9;

/// Trait for validating mesh invariants.
pub trait DebugInvariants {
    /// Panic on the first violated invariant when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Fail with [`MeshError::TopologyInvariant`] unless `holds`.
#[inline]
pub(crate) fn ensure(holds: bool, message: impl FnOnce() -> String) -> Result<(), MeshError> {
    if holds {
        Ok(())
    } else {
        Err(MeshError::TopologyInvariant(message()))
    }
}

/// Run a fallible invariant check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
