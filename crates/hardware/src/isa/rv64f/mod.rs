//! RISC-V Single-Precision Floating-Point Extension, RV64-only instructions.
//!
//! Conversions between 64-bit integers and NaN-boxed singles.
//!
//! # Structure
//!
//! - `opcodes`: Major opcode shared with the 'D' extension.
//! - `funct7`: Function codes for specific conversion operations.
//! - `rs2`: Integer-width selectors shared by every FCVT instruction.

/// Function code 7 definitions for single-precision operations.
pub mod funct7;

/// Single-precision floating-point opcodes.
pub mod opcodes;

/// FCVT operation selectors carried in the `rs2` field.
pub mod rs2;

use crate::common::error::EntryError;
use crate::core::arch::features::{Features, IsaExt};
use crate::isa::entry::{Funct3, InstDefaults, InstEntry, RegClass};
use crate::isa::extension::Extension;
use crate::isa::fcvt::{fcvt_fp_to_int, fcvt_int_to_fp};

/// Defaults shared by every RV64F entry.
#[derive(Debug)]
pub struct Rv64FDefaults;

impl InstDefaults for Rv64FDefaults {
    const OPCODE: u8 = opcodes::OP_FP;
    const FUNCT3: Funct3 = Funct3::RoundingMode;
    const RS2_CLASS: RegClass = RegClass::Unknown;
}

/// The RV64F extension module.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rv64F;

impl Extension for Rv64F {
    fn name(&self) -> &'static str {
        "RV64F"
    }

    fn is_supported(&self, features: &Features) -> bool {
        features.is_rv64() && features.has(IsaExt::F)
    }

    fn table(&self) -> Result<Vec<InstEntry>, EntryError> {
        let to_int = |mnemonic: &'static str, selector: u8| {
            InstEntry::builder::<Rv64FDefaults>()
                .mnemonic(mnemonic)
                .funct7(funct7::FCVT_INT_S)
                .rs2_op(selector)
                .rs1(RegClass::FloatingPoint)
        };
        let to_fp = |mnemonic: &'static str, selector: u8| {
            InstEntry::builder::<Rv64FDefaults>()
                .mnemonic(mnemonic)
                .funct7(funct7::FCVT_S_INT)
                .rs2_op(selector)
                .rd(RegClass::FloatingPoint)
        };

        Ok(vec![
            to_int("fcvt.l.s %rd, %rs1", rs2::CVT_L)
                .semantic(fcvt_fp_to_int::<f32, i64>)
                .build()?,
            to_int("fcvt.lu.s %rd, %rs1", rs2::CVT_LU)
                .semantic(fcvt_fp_to_int::<f32, u64>)
                .build()?,
            to_fp("fcvt.s.l %rd, %rs1", rs2::CVT_L)
                .semantic(fcvt_int_to_fp::<i64, f32>)
                .build()?,
            to_fp("fcvt.s.lu %rd, %rs1", rs2::CVT_LU)
                .semantic(fcvt_int_to_fp::<u64, f32>)
                .build()?,
        ])
    }
}
