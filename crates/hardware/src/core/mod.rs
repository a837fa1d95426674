//! Per-hart processor state and the hart driver.
//!
//! This module contains the architectural state a semantic routine manipulates,
//! the floating-point helpers the extension modules share, and the `Hart` that
//! drives fetch, decode and execute.

/// Architecture-specific components (features, register files, `fcsr`).
pub mod arch;

/// Hart driver (fetch, dispatch, retirement accounting).
pub mod hart;

/// Execution units (floating-point conversion helpers).
pub mod units;

pub use self::hart::Hart;
