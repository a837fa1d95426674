//! Floating-point control and status register (`fcsr`).
//!
//! Holds the accrued exception flags (`fflags`, bits 4:0) and the dynamic
//! rounding mode (`frm`, bits 7:5). Conversion routines OR their flags in and
//! resolve the instruction's `rm` field against `frm`.

use crate::core::units::fpu::exception_flags::FpFlags;
use crate::core::units::fpu::rounding_modes::RoundingMode;

/// Bit position of `frm` inside `fcsr`.
const FRM_SHIFT: u32 = 5;

/// Mask of the 3-bit `frm` field.
const FRM_MASK: u8 = 0x7;

/// Mask of the 5-bit `fflags` field.
const FFLAGS_MASK: u8 = 0x1F;

/// Floating-point control and status register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fcsr {
    fflags: FpFlags,
    frm: u8,
}

impl Fcsr {
    /// Creates an `fcsr` with no flags raised and `frm` = RNE.
    pub const fn new() -> Self {
        Self {
            fflags: FpFlags::NONE,
            frm: 0,
        }
    }

    /// Accrued exception flags.
    pub const fn fflags(&self) -> FpFlags {
        self.fflags
    }

    /// Raw dynamic rounding mode field.
    pub const fn frm(&self) -> u8 {
        self.frm
    }

    /// Sets the dynamic rounding mode field (only the low three bits are kept).
    pub const fn set_frm(&mut self, frm: u8) {
        self.frm = frm & FRM_MASK;
    }

    /// ORs `flags` into the accrued flags.
    pub fn accrue(&mut self, flags: FpFlags) {
        self.fflags |= flags;
    }

    /// Clears the accrued flags.
    pub const fn clear_flags(&mut self) {
        self.fflags = FpFlags::NONE;
    }

    /// Full `fcsr` value (`frm << 5 | fflags`).
    pub const fn read(&self) -> u32 {
        ((self.frm as u32) << FRM_SHIFT) | self.fflags.bits() as u32
    }

    /// Writes the full `fcsr` value; reserved upper bits are dropped.
    pub const fn write(&mut self, val: u32) {
        self.fflags = FpFlags::from_bits(val as u8 & FFLAGS_MASK);
        self.frm = (val >> FRM_SHIFT) as u8 & FRM_MASK;
    }

    /// Resolves an instruction `rm` field to a concrete rounding mode.
    ///
    /// `DYN` (0b111) defers to `frm`. Returns `None` when the instruction field,
    /// or `frm` under `DYN`, holds a reserved encoding; the instruction is then illegal.
    pub const fn resolve(&self, rm: u8) -> Option<RoundingMode> {
        if rm == RoundingMode::DYN {
            RoundingMode::from_bits(self.frm)
        } else {
            RoundingMode::from_bits(rm)
        }
    }
}
