//! Integer ⇄ floating-point conversions.
//!
//! Both directions are written once, generically:
//! - [`fp_to_int`] truncates toward zero and saturates. NaN and values above the
//!   destination range produce the destination maximum, values below it produce
//!   the minimum (0 for unsigned). Out-of-range inputs raise `NV`; in-range inputs
//!   with a fractional part raise `NX`.
//! - [`int_to_fp`] rounds to nearest, ties to even (the host's `as` conversion,
//!   performed directly into the destination width so no double rounding occurs),
//!   raising `NX` when the value is not exactly representable.

use super::exception_flags::FpFlags;
use crate::core::arch::features::IsaExt;
use super::nan_handling::{box_f32, unbox_f32};

/// A floating-point operand format that can live in a 64-bit register slot.
pub trait FpFormat: Copy {
    /// Standard extension providing this format.
    const EXTENSION: IsaExt;

    /// True if the value is any NaN.
    fn is_nan(self) -> bool;

    /// Exact widening to `f64`.
    fn widen(self) -> f64;

    /// Round-to-nearest-even conversion from an integer.
    fn from_int<I: IntFormat>(value: I) -> Self;

    /// Integer value of an integral, finite `self`.
    fn to_i128(self) -> i128;

    /// Reads the value out of a register slot, applying the format's slot convention.
    fn from_slot(bits: u64) -> Self;

    /// Produces the register slot pattern for the value.
    fn into_slot(self) -> u64;
}

/// An integer operand format with saturating bounds.
pub trait IntFormat: Copy {
    /// Width in bits.
    const BITS: u32;
    /// Value produced for NaN and positive overflow.
    const MAX: Self;
    /// Value produced for negative overflow.
    const MIN: Self;
    /// Smallest truncated value that still fits (inclusive).
    const LOWER: f64;
    /// First truncated value that no longer fits (exclusive).
    const UPPER: f64;

    /// Converts a value already known to be integral and in range.
    fn from_truncated(value: f64) -> Self;

    /// Round-to-nearest-even conversion to `f32`.
    fn to_f32(self) -> f32;

    /// Round-to-nearest-even conversion to `f64`.
    fn to_f64(self) -> f64;

    /// Lossless widening used for exactness checks.
    fn to_i128(self) -> i128;
}

impl FpFormat for f32 {
    const EXTENSION: IsaExt = IsaExt::F;

    fn is_nan(self) -> bool {
        self.is_nan()
    }

    fn widen(self) -> f64 {
        f64::from(self)
    }

    fn from_int<I: IntFormat>(value: I) -> Self {
        value.to_f32()
    }

    fn to_i128(self) -> i128 {
        self as i128
    }

    fn from_slot(bits: u64) -> Self {
        unbox_f32(bits)
    }

    fn into_slot(self) -> u64 {
        box_f32(self)
    }
}

impl FpFormat for f64 {
    const EXTENSION: IsaExt = IsaExt::D;

    fn is_nan(self) -> bool {
        self.is_nan()
    }

    fn widen(self) -> f64 {
        self
    }

    fn from_int<I: IntFormat>(value: I) -> Self {
        value.to_f64()
    }

    fn to_i128(self) -> i128 {
        self as i128
    }

    fn from_slot(bits: u64) -> Self {
        Self::from_bits(bits)
    }

    fn into_slot(self) -> u64 {
        self.to_bits()
    }
}

macro_rules! int_format {
    ($ty:ty, $lower:expr, $upper:expr) => {
        impl IntFormat for $ty {
            const BITS: u32 = <$ty>::BITS;
            const MAX: Self = <$ty>::MAX;
            const MIN: Self = <$ty>::MIN;
            const LOWER: f64 = $lower;
            const UPPER: f64 = $upper;

            fn from_truncated(value: f64) -> Self {
                value as $ty
            }

            fn to_f32(self) -> f32 {
                self as f32
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn to_i128(self) -> i128 {
                self as i128
            }
        }
    };
}

int_format!(i32, -2_147_483_648.0, 2_147_483_648.0);
int_format!(u32, 0.0, 4_294_967_296.0);
int_format!(i64, -9_223_372_036_854_775_808.0, 9_223_372_036_854_775_808.0);
int_format!(u64, 0.0, 18_446_744_073_709_551_616.0);

/// Converts a floating-point value to an integer, truncating toward zero.
///
/// # Returns
///
/// The converted (or saturated) value and the exception flags it raises.
pub fn fp_to_int<F: FpFormat, I: IntFormat>(value: F) -> (I, FpFlags) {
    if value.is_nan() {
        return (I::MAX, FpFlags::NV);
    }

    let wide = value.widen();
    let truncated = wide.trunc();
    if truncated < I::LOWER {
        return (I::MIN, FpFlags::NV);
    }
    if truncated >= I::UPPER {
        return (I::MAX, FpFlags::NV);
    }

    let flags = if truncated.to_bits() == wide.to_bits() {
        FpFlags::NONE
    } else {
        FpFlags::NX
    };
    (I::from_truncated(truncated), flags)
}

/// Converts an integer to floating point, rounding to nearest, ties to even.
///
/// # Returns
///
/// The converted value and `NX` when rounding occurred.
pub fn int_to_fp<I: IntFormat, F: FpFormat>(value: I) -> (F, FpFlags) {
    let result = F::from_int(value);
    let flags = if result.to_i128() == value.to_i128() {
        FpFlags::NONE
    } else {
        FpFlags::NX
    };
    (result, flags)
}
