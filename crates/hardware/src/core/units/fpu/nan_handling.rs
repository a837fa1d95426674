//! NaN boxing and unboxing for single-precision values.
//!
//! RISC-V stores single-precision (f32) values in 64-bit floating-point
//! registers using "NaN boxing": the upper 32 bits must be all 1s.
//!
//! - **Boxing** ([`box_f32`]): Sets upper 32 bits to 1s when writing an f32
//!   result into a 64-bit register.
//! - **Unboxing** ([`unbox_f32`]): Checks that the upper 32 bits are all 1s.
//!   If not, the value is treated as canonical NaN (RISC-V unprivileged ISA §12.2).

/// Canonical quiet NaN for IEEE 754 single-precision (positive, quiet, zero payload).
pub const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;

/// Upper-32-bit mask used for NaN boxing validation.
pub const NAN_BOX_MASK: u64 = 0xFFFF_FFFF_0000_0000;

/// Boxes an f32 value into a 64-bit NaN-boxed representation.
///
/// # Arguments
///
/// * `f` - The 32-bit floating-point value to box.
///
/// # Returns
///
/// A 64-bit value with the f32 in the lower 32 bits and all 1s in the upper 32 bits.
#[inline]
pub const fn box_f32(f: f32) -> u64 {
    (f.to_bits() as u64) | NAN_BOX_MASK
}

/// Unboxes a 64-bit register value to obtain an f32.
///
/// Validates that the upper 32 bits are all 1s. If valid, returns the
/// lower 32 bits interpreted as f32. If invalid (not properly NaN-boxed),
/// returns the canonical NaN per RISC-V unprivileged ISA §12.2.
#[inline]
pub const fn unbox_f32(val: u64) -> f32 {
    if (val & NAN_BOX_MASK) == NAN_BOX_MASK {
        f32::from_bits(val as u32)
    } else {
        f32::from_bits(CANONICAL_NAN_F32)
    }
}
