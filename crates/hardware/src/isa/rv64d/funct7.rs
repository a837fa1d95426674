//! RISC-V Double-Precision (D) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) encodes the operation and format.
//! For Double Precision, the format bits (26-25) are `01`.

/// Convert Double to Integer (FCVT.W.D, FCVT.L.D, ...).
pub const FCVT_INT_D: u8 = 0b110_0001;
/// Convert Integer to Double (FCVT.D.W, FCVT.D.L, ...).
pub const FCVT_D_INT: u8 = 0b110_1001;
/// Move Double to Integer register (shares funct7 with FCLASS.D).
pub const FMV_X_D: u8 = 0b111_0001;
/// Move Integer to Double register.
pub const FMV_D_X: u8 = 0b111_1001;
