//! Unified Register File.
//!
//! This module provides the `RegisterFile` struct, the per-hart architectural state handed
//! to every semantic routine. It provides:
//! 1. **Unified Storage:** Integer registers, floating-point registers, `fcsr` and the PC.
//! 2. **Typed Access:** Width-aware integer reads and writes through [`XValue`].
//! 3. **PC Accounting:** The only two PC mutators, plus a counter the dispatcher uses to
//!    check that each instruction updated the PC exactly once.

use crate::core::arch::fcsr::Fcsr;
use crate::core::arch::features::Xlen;
use crate::core::arch::fpr::Fpr;
use crate::core::arch::gpr::Gpr;
use crate::core::units::fpu::nan_handling::{box_f32, unbox_f32};

/// An integer type that can be read from or written to a native integer register.
///
/// Slots hold the native value zero-extended to 64 bits, so on RV32 the upper
/// half of every slot is zero.
pub trait XValue: Copy {
    /// Interprets a native register value at this type's width and signedness.
    fn from_native(native: u64, xlen: Xlen) -> Self;

    /// Produces the full native-width register value for this value.
    fn into_native(self, xlen: Xlen) -> u64;
}

impl XValue for u64 {
    fn from_native(native: u64, _xlen: Xlen) -> Self {
        native
    }

    fn into_native(self, xlen: Xlen) -> u64 {
        self & xlen.mask()
    }
}

impl XValue for i64 {
    fn from_native(native: u64, xlen: Xlen) -> Self {
        match xlen {
            Xlen::Rv32 => i64::from(native as u32 as i32),
            Xlen::Rv64 => native as Self,
        }
    }

    fn into_native(self, xlen: Xlen) -> u64 {
        (self as u64) & xlen.mask()
    }
}

impl XValue for u32 {
    fn from_native(native: u64, _xlen: Xlen) -> Self {
        native as Self
    }

    fn into_native(self, _xlen: Xlen) -> u64 {
        u64::from(self)
    }
}

impl XValue for i32 {
    fn from_native(native: u64, _xlen: Xlen) -> Self {
        native as u32 as Self
    }

    fn into_native(self, xlen: Xlen) -> u64 {
        (i64::from(self) as u64) & xlen.mask()
    }
}

/// Per-hart register state.
///
/// Owned exclusively by one hart and mutated only by the semantic routine
/// executing on that hart's behalf.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    xlen: Xlen,
    gpr: Gpr,
    fpr: Fpr,
    fcsr: Fcsr,
    pc: u64,
    pc_updates: u8,
}

impl RegisterFile {
    /// Creates a new register file with all registers and the PC at zero.
    pub const fn new(xlen: Xlen) -> Self {
        Self {
            xlen,
            gpr: Gpr::new(),
            fpr: Fpr::new(),
            fcsr: Fcsr::new(),
            pc: 0,
            pc_updates: 0,
        }
    }

    /// Native register width.
    pub const fn xlen(&self) -> Xlen {
        self.xlen
    }

    /// Reads an integer register at type `T`'s width and signedness.
    ///
    /// On RV32, reading as `i64` sign-extends and reading as `u64` zero-extends
    /// the 32-bit native value. Reading as `i32`/`u32` takes the low word.
    pub fn get_x<T: XValue>(&self, idx: usize) -> T {
        T::from_native(self.gpr.read(idx), self.xlen)
    }

    /// Writes an integer register, always filling the full native width.
    ///
    /// `i32` sign-extends and `u32` zero-extends on RV64; on RV32 every value
    /// is truncated to 32 bits. Writes to `x0` are ignored.
    pub fn set_x<T: XValue>(&mut self, idx: usize, val: T) {
        self.gpr.write(idx, val.into_native(self.xlen));
    }

    /// Reads the raw native value of an integer register.
    pub const fn read(&self, idx: usize) -> u64 {
        self.gpr.read(idx)
    }

    /// Writes a raw value to an integer register, truncated to the native width.
    pub const fn write(&mut self, idx: usize, val: u64) {
        self.gpr.write(idx, val & self.xlen.mask());
    }

    /// Reads the full 64-bit pattern of a floating-point register.
    pub const fn read_f(&self, idx: usize) -> u64 {
        self.fpr.read(idx)
    }

    /// Writes the full 64-bit pattern of a floating-point register.
    pub const fn write_f(&mut self, idx: usize, val: u64) {
        self.fpr.write(idx, val);
    }

    /// Reads a floating-point register as a double.
    pub const fn get_fp64(&self, idx: usize) -> f64 {
        f64::from_bits(self.fpr.read(idx))
    }

    /// Writes a double into a floating-point register, preserving its bit pattern.
    pub const fn set_fp64(&mut self, idx: usize, val: f64) {
        self.fpr.write(idx, val.to_bits());
    }

    /// Reads a NaN-boxed single from a floating-point register.
    ///
    /// Slots that are not properly boxed read as the canonical NaN.
    pub const fn get_fp32(&self, idx: usize) -> f32 {
        unbox_f32(self.fpr.read(idx))
    }

    /// Writes a single into a floating-point register, NaN-boxing it.
    pub const fn set_fp32(&mut self, idx: usize, val: f32) {
        self.fpr.write(idx, box_f32(val));
    }

    /// Floating-point control and status register.
    pub const fn fcsr(&self) -> &Fcsr {
        &self.fcsr
    }

    /// Mutable access to the floating-point control and status register.
    pub const fn fcsr_mut(&mut self) -> &mut Fcsr {
        &mut self.fcsr
    }

    /// Current program counter.
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Redirects the program counter (control-flow instructions, harness reset).
    pub const fn set_pc(&mut self, target: u64) {
        self.pc = target & self.xlen.mask();
        self.pc_updates = self.pc_updates.saturating_add(1);
    }

    /// Advances the program counter past an instruction of `inst_size` bytes.
    pub const fn advance_pc(&mut self, inst_size: u8) {
        self.pc = self.pc.wrapping_add(inst_size as u64) & self.xlen.mask();
        self.pc_updates = self.pc_updates.saturating_add(1);
    }

    /// Resets the PC update counter before a semantic routine runs.
    pub(crate) const fn begin_instruction(&mut self) {
        self.pc_updates = 0;
    }

    /// Puts the PC back at a faulting instruction without counting an update.
    pub(crate) const fn restore_pc(&mut self, pc: u64) {
        self.pc = pc;
    }

    /// Number of PC updates made by the instruction currently executing.
    pub const fn pc_updates(&self) -> u8 {
        self.pc_updates
    }
}
