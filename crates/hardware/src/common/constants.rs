//! Global constants.
//!
//! This module defines constants shared by the register file, decoder and hart. It includes:
//! 1. **Instruction Constants:** Instruction sizes and the length-encoding bits.
//! 2. **Register Constants:** Register counts and index widths.
//! 3. **Field Widths:** Bit widths of the encoding fields validated by the entry builder.

/// Size of a compressed (16-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE_16: u8 = 2;

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE_32: u8 = 4;

/// Bit mask for checking if an instruction is compressed.
pub const COMPRESSED_INSTRUCTION_MASK: u16 = 0x3;

/// Low-bit value marking a standard (non-compressed) 32-bit instruction.
pub const STANDARD_INSTRUCTION_VALUE: u16 = 0x3;

/// Number of architectural integer registers.
pub const NUM_XREGS: usize = 32;

/// Number of architectural floating-point registers.
pub const NUM_FREGS: usize = 32;

/// Width of a register index field in bits.
pub const REG_INDEX_BITS: u32 = 5;

/// Width of a standard opcode field in bits.
pub const OPCODE_BITS: u32 = 7;

/// Width of a compressed quadrant opcode field in bits.
pub const COMPRESSED_OPCODE_BITS: u32 = 2;

/// Width of the funct3 field in bits.
pub const FUNCT3_BITS: u32 = 3;

/// Width of the funct7 field in bits.
pub const FUNCT7_BITS: u32 = 7;

/// Width of the secondary field of CA-format instructions (funct6 ++ funct2).
pub const CA_SECONDARY_BITS: u32 = 8;

/// Width of the funct4 field of CR-format instructions.
pub const FUNCT4_BITS: u32 = 4;

/// Width of the funct2 field of R4-format and CB-format instructions.
pub const FUNCT2_BITS: u32 = 2;

/// Width of the I-format immediate when it acts as an operation selector.
pub const IMM12_BITS: u32 = 12;

/// Mask for the 32-bit native register width of RV32 harts.
pub const XLEN32_MASK: u64 = 0xFFFF_FFFF;
