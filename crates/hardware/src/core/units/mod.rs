//! Execution units.
//!
//! Only the floating-point unit is needed by the extension modules; integer
//! arithmetic is simple enough to live inside the semantic routines themselves.

/// Floating-point conversion, NaN-boxing, rounding and flag helpers.
pub mod fpu;
