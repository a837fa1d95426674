//! RISC-V Double-Precision Floating-Point Extension, RV64-only instructions.
//!
//! Conversions between 64-bit integers and doubles, plus raw bit moves between the
//! integer and floating-point register files. All six instructions share the OP-FP
//! opcode and are told apart by funct7 and the `rs2` selector.
//!
//! # Structure
//!
//! - `opcodes`: Shared floating-point opcode.
//! - `funct7`: Format-specific operation codes.

/// Function code 7 definitions for double-precision operations.
pub mod funct7;

/// Double-precision floating-point opcodes.
pub mod opcodes;

use crate::common::error::EntryError;
use crate::common::reg::RegisterFile;
use crate::core::arch::features::{Features, IsaExt};
use crate::isa::entry::{Funct3, InstDefaults, InstEntry, RegClass};
use crate::isa::extension::Extension;
use crate::isa::fcvt::{fcvt_fp_to_int, fcvt_int_to_fp};
use crate::isa::instruction::Inst;
use crate::isa::rv64f::rs2::{CVT_L, CVT_LU};
use crate::soc::traits::Memory;

/// Defaults shared by every RV64D entry: OP-FP, R-type, `rm` in funct3.
#[derive(Debug)]
pub struct Rv64DDefaults;

impl InstDefaults for Rv64DDefaults {
    const OPCODE: u8 = opcodes::OP_FP;
    const FUNCT3: Funct3 = Funct3::RoundingMode;
    const RS2_CLASS: RegClass = RegClass::Unknown;
}

/// The RV64D extension module.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rv64D;

impl Extension for Rv64D {
    fn name(&self) -> &'static str {
        "RV64D"
    }

    fn is_supported(&self, features: &Features) -> bool {
        features.is_rv64() && features.has(IsaExt::D)
    }

    fn table(&self) -> Result<Vec<InstEntry>, EntryError> {
        Ok(vec![
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("fcvt.l.d %rd, %rs1")
                .funct7(funct7::FCVT_INT_D)
                .rs2_op(CVT_L)
                .rs1(RegClass::FloatingPoint)
                .semantic(fcvt_fp_to_int::<f64, i64>)
                .build()?,
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("fcvt.lu.d %rd, %rs1")
                .funct7(funct7::FCVT_INT_D)
                .rs2_op(CVT_LU)
                .rs1(RegClass::FloatingPoint)
                .semantic(fcvt_fp_to_int::<f64, u64>)
                .build()?,
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("fcvt.d.l %rd, %rs1")
                .funct7(funct7::FCVT_D_INT)
                .rs2_op(CVT_L)
                .rd(RegClass::FloatingPoint)
                .semantic(fcvt_int_to_fp::<i64, f64>)
                .build()?,
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("fcvt.d.lu %rd, %rs1")
                .funct7(funct7::FCVT_D_INT)
                .rs2_op(CVT_LU)
                .rd(RegClass::FloatingPoint)
                .semantic(fcvt_int_to_fp::<u64, f64>)
                .build()?,
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("fmv.x.d %rd, %rs1")
                .funct3(0)
                .funct7(funct7::FMV_X_D)
                .rs2_op(0)
                .rs1(RegClass::FloatingPoint)
                .semantic(fmv_x_d)
                .build()?,
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("fmv.d.x %rd, %rs1")
                .funct3(0)
                .funct7(funct7::FMV_D_X)
                .rs2_op(0)
                .rd(RegClass::FloatingPoint)
                .semantic(fmv_d_x)
                .build()?,
        ])
    }
}

/// `fmv.x.d rd, rs1`: copies the bit pattern of `rs1` into integer `rd`.
fn fmv_x_d(
    features: &Features,
    regs: &mut RegisterFile,
    _mem: &dyn Memory,
    inst: &Inst<'_>,
) -> bool {
    if !features.is_rv64() || !features.has(IsaExt::D) {
        return false;
    }
    let bits = regs.read_f(inst.rs1);
    regs.set_x(inst.rd, bits);
    regs.advance_pc(inst.inst_size);
    true
}

/// `fmv.d.x rd, rs1`: copies the bit pattern of integer `rs1` into `rd`.
fn fmv_d_x(
    features: &Features,
    regs: &mut RegisterFile,
    _mem: &dyn Memory,
    inst: &Inst<'_>,
) -> bool {
    if !features.is_rv64() || !features.has(IsaExt::D) {
        return false;
    }
    let bits: u64 = regs.get_x(inst.rs1);
    regs.write_f(inst.rd, bits);
    regs.advance_pc(inst.inst_size);
    true
}
