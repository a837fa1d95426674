//! RISC-V Single-Precision (F) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) encodes the operation and format.
//! For Single Precision, the format bits (26-25) are `00`.

/// Convert Single to Integer (FCVT.W.S, FCVT.L.S, ...).
pub const FCVT_INT_S: u8 = 0b110_0000;
/// Convert Integer to Single (FCVT.S.W, FCVT.S.L, ...).
pub const FCVT_S_INT: u8 = 0b110_1000;
