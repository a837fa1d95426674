//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file for the RISC-V architecture.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`) as 64-bit slots.
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//!
//! Width handling (RV32 truncation, sign extension) lives in
//! [`RegisterFile`](crate::common::reg::RegisterFile); this type stores whatever it is given.

use crate::common::constants::NUM_XREGS;
use crate::isa::abi::REG_ZERO;

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers used for integer operations. Register `x0`
/// is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u64; NUM_XREGS],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_XREGS],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the specified register. Register `x0` always returns 0.
    pub const fn read(&self, idx: usize) -> u64 {
        if idx == REG_ZERO { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 64-bit value to write.
    pub const fn write(&mut self, idx: usize, val: u64) {
        if idx != REG_ZERO {
            self.regs[idx] = val;
        }
    }
}
