//! Format-directed operand extraction.
//!
//! The registry resolves an opcode bucket to an [`InstFormat`] first; this module then
//! pulls the register indices, the funct3 field, the secondary selector and the
//! sign-extended immediate out of the raw word according to that format. It provides:
//! 1. **Length Detection:** Classifying the first fetched parcel as a 16- or 32-bit instruction.
//! 2. **Operand Extraction:** One [`Operands`] record per format, standard and compressed.
//! 3. **Immediates:** Reassembly and sign extension of the scattered immediate fields.

use crate::common::constants::{
    COMPRESSED_INSTRUCTION_MASK, INSTRUCTION_SIZE_16, INSTRUCTION_SIZE_32,
    STANDARD_INSTRUCTION_VALUE,
};
use crate::isa::entry::InstFormat;
use crate::isa::instruction::InstructionBits;

/// Mask of the upper-immediate field of U-type instructions (bits 12-31).
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Width of the reassembled S-type immediate.
const S_IMM_BITS: u32 = 12;

/// Width of the reassembled B-type immediate.
const B_IMM_BITS: u32 = 13;

/// Width of the reassembled J-type immediate.
const J_IMM_BITS: u32 = 21;

/// Width of the CI-type immediate (`imm[5] | imm[4:0]`).
const CI_IMM_BITS: u32 = 6;

/// Width of the CB-type branch offset.
const CB_IMM_BITS: u32 = 9;

/// Width of the CJ-type jump offset.
const CJ_IMM_BITS: u32 = 12;

/// Fields extracted from one raw instruction word for a known format.
///
/// Fields a format does not encode are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    /// Destination register.
    pub rd: usize,
    /// First source register.
    pub rs1: usize,
    /// Second source register, or the `rs2` selector of unary conversions.
    pub rs2: usize,
    /// Third source register (R4 only).
    pub rs3: usize,
    /// Sign-extended immediate.
    pub imm: i64,
    /// funct3 field.
    pub funct3: u8,
    /// The format's secondary selector (funct7, funct2, funct4 or funct6 ++ funct2).
    pub secondary: u8,
}

/// Returns the byte length of the instruction whose first parcel is `parcel`.
///
/// Low bits `0b11` mark a 32-bit instruction; anything else is compressed.
pub const fn instruction_length(parcel: u16) -> u8 {
    if parcel & COMPRESSED_INSTRUCTION_MASK == STANDARD_INSTRUCTION_VALUE {
        INSTRUCTION_SIZE_32
    } else {
        INSTRUCTION_SIZE_16
    }
}

/// Extracts every operand `format` defines from `raw`.
///
/// `raw` holds a compressed instruction in its low 16 bits; the upper bits are ignored
/// for compressed formats.
pub fn decode_operands(raw: u32, format: InstFormat) -> Operands {
    match format {
        InstFormat::R => Operands {
            rd: raw.rd(),
            rs1: raw.rs1(),
            rs2: raw.rs2(),
            funct3: raw.funct3() as u8,
            secondary: raw.funct7() as u8,
            ..Operands::default()
        },
        InstFormat::R4 => Operands {
            rd: raw.rd(),
            rs1: raw.rs1(),
            rs2: raw.rs2(),
            rs3: raw.rs3(),
            funct3: raw.funct3() as u8,
            secondary: raw.funct2() as u8,
            ..Operands::default()
        },
        InstFormat::I => Operands {
            rd: raw.rd(),
            rs1: raw.rs1(),
            imm: i_imm(raw),
            funct3: raw.funct3() as u8,
            ..Operands::default()
        },
        InstFormat::S => Operands {
            rs1: raw.rs1(),
            rs2: raw.rs2(),
            imm: s_imm(raw),
            funct3: raw.funct3() as u8,
            ..Operands::default()
        },
        InstFormat::B => Operands {
            rs1: raw.rs1(),
            rs2: raw.rs2(),
            imm: b_imm(raw),
            funct3: raw.funct3() as u8,
            ..Operands::default()
        },
        InstFormat::U => Operands {
            rd: raw.rd(),
            imm: i64::from((raw & U_IMM_MASK) as i32),
            ..Operands::default()
        },
        InstFormat::J => Operands {
            rd: raw.rd(),
            imm: j_imm(raw),
            ..Operands::default()
        },
        InstFormat::CR => Operands {
            rd: raw.c_rd_rs1(),
            rs1: raw.c_rd_rs1(),
            rs2: raw.c_rs2(),
            secondary: raw.c_funct4() as u8,
            ..Operands::default()
        },
        InstFormat::CI => Operands {
            rd: raw.c_rd_rs1(),
            rs1: raw.c_rd_rs1(),
            imm: ci_imm(raw),
            funct3: raw.c_funct3() as u8,
            ..Operands::default()
        },
        InstFormat::CSS => Operands {
            rs2: raw.c_rs2(),
            imm: i64::from((raw >> 7) & 0x3F),
            funct3: raw.c_funct3() as u8,
            ..Operands::default()
        },
        InstFormat::CIW => Operands {
            rd: raw.c_rs2_prime(),
            imm: i64::from((raw >> 5) & 0xFF),
            funct3: raw.c_funct3() as u8,
            ..Operands::default()
        },
        InstFormat::CL => Operands {
            rd: raw.c_rs2_prime(),
            rs1: raw.c_rs1_prime(),
            imm: cl_cs_imm(raw),
            funct3: raw.c_funct3() as u8,
            ..Operands::default()
        },
        InstFormat::CS => Operands {
            rs1: raw.c_rs1_prime(),
            rs2: raw.c_rs2_prime(),
            imm: cl_cs_imm(raw),
            funct3: raw.c_funct3() as u8,
            ..Operands::default()
        },
        InstFormat::CA => Operands {
            rd: raw.c_rs1_prime(),
            rs1: raw.c_rs1_prime(),
            rs2: raw.c_rs2_prime(),
            secondary: ((((raw >> 10) & 0x3F) << 2) | ((raw >> 5) & 0x3)) as u8,
            ..Operands::default()
        },
        InstFormat::CB => Operands {
            rs1: raw.c_rs1_prime(),
            imm: cb_imm(raw),
            funct3: raw.c_funct3() as u8,
            ..Operands::default()
        },
        InstFormat::CJ => Operands {
            imm: cj_imm(raw),
            funct3: raw.c_funct3() as u8,
            ..Operands::default()
        },
    }
}

/// I-type: `imm[11:0] | rs1 | funct3 | rd | opcode`.
const fn i_imm(raw: u32) -> i64 {
    ((raw as i32) >> 20) as i64
}

/// S-type: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
const fn s_imm(raw: u32) -> i64 {
    let low = (raw >> 7) & 0x1F;
    let high = (raw >> 25) & 0x7F;
    sign_extend((high << 5) | low, S_IMM_BITS)
}

/// B-type: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
const fn b_imm(raw: u32) -> i64 {
    let combined = (((raw >> 31) & 1) << 12)
        | (((raw >> 7) & 1) << 11)
        | (((raw >> 25) & 0x3F) << 5)
        | (((raw >> 8) & 0xF) << 1);
    sign_extend(combined, B_IMM_BITS)
}

/// J-type: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
const fn j_imm(raw: u32) -> i64 {
    let combined = (((raw >> 31) & 1) << 20)
        | (((raw >> 12) & 0xFF) << 12)
        | (((raw >> 20) & 1) << 11)
        | (((raw >> 21) & 0x3FF) << 1);
    sign_extend(combined, J_IMM_BITS)
}

/// CI: `imm[5]` in bit 12, `imm[4:0]` in bits 6:2.
///
/// CB-format `c.srli`, `c.srai` and `c.andi` carry their operand in the same place.
pub const fn ci_imm(raw: u32) -> i64 {
    sign_extend((((raw >> 12) & 1) << 5) | ((raw >> 2) & 0x1F), CI_IMM_BITS)
}

/// CL/CS: the raw `uimm` field bits `[12:10]` and `[6:5]`, unscaled.
const fn cl_cs_imm(raw: u32) -> i64 {
    ((((raw >> 10) & 0x7) << 2) | ((raw >> 5) & 0x3)) as i64
}

/// CB: `offset[8|4:3]` in bits 12:10, `offset[7:6|2:1|5]` in bits 6:2.
const fn cb_imm(raw: u32) -> i64 {
    let combined = (((raw >> 12) & 1) << 8)
        | (((raw >> 10) & 0x3) << 3)
        | (((raw >> 5) & 0x3) << 6)
        | (((raw >> 3) & 0x3) << 1)
        | (((raw >> 2) & 1) << 5);
    sign_extend(combined, CB_IMM_BITS)
}

/// CJ: `offset[11|4|9:8|10|6|7|3:1|5]` in bits 12:2.
const fn cj_imm(raw: u32) -> i64 {
    let combined = (((raw >> 12) & 1) << 11)
        | (((raw >> 11) & 1) << 4)
        | (((raw >> 9) & 0x3) << 8)
        | (((raw >> 8) & 1) << 10)
        | (((raw >> 7) & 1) << 6)
        | (((raw >> 6) & 1) << 7)
        | (((raw >> 3) & 0x7) << 1)
        | (((raw >> 2) & 1) << 5);
    sign_extend(combined, CJ_IMM_BITS)
}

/// Sign extends the low `bits` of `val` to 64 bits.
const fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = u32::BITS - bits;
    (((val << shift) as i32) >> shift) as i64
}
