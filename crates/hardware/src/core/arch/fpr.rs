//! RISC-V Floating-Point Register File.
//!
//! This module implements the Floating-Point Register (FPR) file for the RISC-V architecture.
//! It performs the following:
//! 1. **Storage:** Maintains 32 floating-point registers (`f0`-`f31`).
//! 2. **Bit Preservation:** Slots hold raw 64-bit patterns, so signalling NaN payloads
//!    and NaN-boxed single-precision values survive untouched.

use crate::common::constants::NUM_FREGS;

/// Floating-Point Register file.
///
/// Every slot is a 64-bit pattern regardless of the logical operand width.
/// How narrower values sit inside a slot is decided by the owning extension.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fpr {
    fregs: [u64; NUM_FREGS],
}

impl Fpr {
    /// Creates a new floating-point register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            fregs: [0; NUM_FREGS],
        }
    }

    /// Reads a floating-point register value as raw bits.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    pub const fn read(&self, idx: usize) -> u64 {
        self.fregs[idx]
    }

    /// Writes a floating-point register value from raw bits.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 64-bit pattern to store.
    pub const fn write(&mut self, idx: usize, val: u64) {
        self.fregs[idx] = val;
    }
}
