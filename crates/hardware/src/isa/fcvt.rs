//! Generic integer ⇄ floating-point conversion routines.
//!
//! Every `fcvt` variant between an integer register and a floating-point register is an
//! instantiation of one of the two routines below; extension tables store the
//! instantiations directly as their semantic routines.

use crate::common::reg::{RegisterFile, XValue};
use crate::core::arch::features::Features;
use crate::core::units::fpu::convert::{FpFormat, IntFormat, fp_to_int, int_to_fp};
use crate::isa::instruction::Inst;
use crate::soc::traits::Memory;

/// Whether the hart can run a conversion between `F` and an `I`-wide integer.
///
/// `rm` is only validated. Float to integer always truncates toward zero and integer
/// to float always rounds to nearest-even, whatever mode `rm` selects.
fn supported<F: FpFormat, I: IntFormat>(features: &Features, regs: &RegisterFile, rm: u8) -> bool {
    features.has(F::EXTENSION)
        && I::BITS <= features.xlen().bits()
        && regs.fcsr().resolve(rm).is_some()
}

/// `fcvt.<int>.<fp> rd, rs1`: converts `rs1` to an integer, truncating toward zero.
///
/// NaN and positive overflow saturate to the destination maximum; negative overflow
/// saturates to the minimum. The result is written at the integer's width and
/// extended to the native register width.
pub fn fcvt_fp_to_int<F: FpFormat, I: IntFormat + XValue>(
    features: &Features,
    regs: &mut RegisterFile,
    _mem: &dyn Memory,
    inst: &Inst<'_>,
) -> bool {
    if !supported::<F, I>(features, regs, inst.rm()) {
        return false;
    }

    let value = F::from_slot(regs.read_f(inst.rs1));
    let (result, flags) = fp_to_int::<F, I>(value);
    regs.fcsr_mut().accrue(flags);
    regs.set_x(inst.rd, result);
    regs.advance_pc(inst.inst_size);
    true
}

/// `fcvt.<fp>.<int> rd, rs1`: converts integer `rs1` to floating point.
///
/// Rounds to nearest, ties to even, and raises `NX` when the value is not exactly
/// representable.
pub fn fcvt_int_to_fp<I: IntFormat + XValue, F: FpFormat>(
    features: &Features,
    regs: &mut RegisterFile,
    _mem: &dyn Memory,
    inst: &Inst<'_>,
) -> bool {
    if !supported::<F, I>(features, regs, inst.rm()) {
        return false;
    }

    let value: I = regs.get_x(inst.rs1);
    let (result, flags) = int_to_fp::<I, F>(value);
    regs.fcsr_mut().accrue(flags);
    regs.write_f(inst.rd, result.into_slot());
    regs.advance_pc(inst.inst_size);
    true
}
