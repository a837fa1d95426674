//! Floating-Point Unit (FPU) helpers.
//!
//! Numeric building blocks shared by the floating-point extension modules:
//! - [`convert`]: generic saturating float→integer and rounding integer→float conversions.
//! - [`nan_handling`]: NaN boxing/unboxing of single-precision values.
//! - [`rounding_modes`]: Rounding mode encodings.
//! - [`exception_flags`]: Accrued exception flag set.

/// Generic integer/floating-point conversions.
pub mod convert;

/// Floating-point exception flag types.
pub mod exception_flags;

/// NaN boxing and unboxing.
pub mod nan_handling;

/// Rounding mode definitions and support.
pub mod rounding_modes;
