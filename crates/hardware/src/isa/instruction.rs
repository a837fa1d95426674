//! Instruction field extraction and the decoded instruction.
//!
//! Provides bit extraction for the fixed-position fields of standard (32-bit)
//! and compressed (16-bit) RISC-V encodings, and the [`Inst`] structure that
//! carries one decoded instruction from the registry to its semantic routine.

use crate::isa::disasm;
use crate::isa::entry::InstEntry;

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field.
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for extracting the funct2 field of R4-type instructions (bits 25-26).
pub const FUNCT2_MASK: u32 = 0x3;
/// Bit mask for extracting the quadrant of a compressed instruction (bits 0-1).
pub const QUADRANT_MASK: u32 = 0x3;
/// Bit mask for a 3-bit compressed register field (`rd'`, `rs1'`, `rs2'`).
pub const CREG_MASK: u32 = 0x7;
/// First register reachable through a 3-bit compressed register field (x8/f8).
pub const CREG_BASE: usize = 8;

/// Trait for extracting instruction fields from encoded instructions.
///
/// Standard fields follow the 32-bit layout; `c_*` fields follow the 16-bit
/// compressed layout and only look at the low half of the word.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    ///
    /// Also used as an operation selector by conversions such as `fcvt.l.d`.
    fn rs2(&self) -> usize;

    /// Extracts the third source register field (bits 27-31, for FMA instructions).
    fn rs3(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// Extracts the funct2 field of R4-type instructions (bits 25-26).
    fn funct2(&self) -> u32;

    /// Extracts the quadrant of a compressed instruction (bits 0-1).
    fn c_quadrant(&self) -> u32;

    /// Extracts the compressed funct3 field (bits 13-15).
    fn c_funct3(&self) -> u32;

    /// Extracts the compressed funct4 field of CR-type instructions (bits 12-15).
    fn c_funct4(&self) -> u32;

    /// Extracts the full compressed `rd`/`rs1` field (bits 7-11).
    fn c_rd_rs1(&self) -> usize;

    /// Extracts the full compressed `rs2` field (bits 2-6).
    fn c_rs2(&self) -> usize;

    /// Extracts the 3-bit compressed `rs1'`/`rd'` field (bits 7-9), mapped to x8–x15.
    fn c_rs1_prime(&self) -> usize;

    /// Extracts the 3-bit compressed `rs2'`/`rd'` field (bits 2-4), mapped to x8–x15.
    fn c_rs2_prime(&self) -> usize;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs3(&self) -> usize {
        ((self >> 27) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn funct2(&self) -> u32 {
        (self >> 25) & FUNCT2_MASK
    }

    #[inline(always)]
    fn c_quadrant(&self) -> u32 {
        self & QUADRANT_MASK
    }

    #[inline(always)]
    fn c_funct3(&self) -> u32 {
        (self >> 13) & FUNCT3_MASK
    }

    #[inline(always)]
    fn c_funct4(&self) -> u32 {
        (self >> 12) & 0xF
    }

    #[inline(always)]
    fn c_rd_rs1(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn c_rs2(&self) -> usize {
        ((self >> 2) & REG_MASK) as usize
    }

    #[inline(always)]
    fn c_rs1_prime(&self) -> usize {
        CREG_BASE + ((self >> 7) & CREG_MASK) as usize
    }

    #[inline(always)]
    fn c_rs2_prime(&self) -> usize {
        CREG_BASE + ((self >> 2) & CREG_MASK) as usize
    }
}

/// One decoded instruction, produced by the registry for a single fetch.
///
/// Semantic routines take every operand they need from here; they keep no
/// state of their own between invocations.
#[derive(Clone, Copy, Debug)]
pub struct Inst<'r> {
    /// Raw instruction encoding (a compressed instruction occupies the low 16 bits).
    pub raw: u32,
    /// Instruction length in bytes (2 or 4).
    pub inst_size: u8,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Third source register index.
    pub rs3: usize,
    /// Sign-extended immediate (0 for formats without one).
    pub imm: i64,
    /// funct3 field; the `rm` operand for floating-point conversions.
    pub funct3: u8,
    /// The registry entry this word resolved to.
    pub entry: &'r InstEntry,
}

impl Inst<'_> {
    /// Rounding-mode field of a floating-point instruction.
    pub const fn rm(&self) -> u8 {
        self.funct3
    }

    /// Mnemonic template of the resolved entry.
    pub const fn mnemonic(&self) -> &'static str {
        self.entry.mnemonic()
    }

    /// Renders the mnemonic template with this instruction's operands.
    pub fn disassemble(&self) -> String {
        disasm::render(self)
    }
}
