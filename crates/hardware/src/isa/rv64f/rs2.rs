//! Operation selectors carried in the `rs2` field of FCVT instructions.
//!
//! Shared by every floating-point extension: the selector names the integer
//! operand's width and signedness.

/// 32-bit signed integer operand (`.w`).
pub const CVT_W: u8 = 0b00000;
/// 32-bit unsigned integer operand (`.wu`).
pub const CVT_WU: u8 = 0b00001;
/// 64-bit signed integer operand (`.l`).
pub const CVT_L: u8 = 0b00010;
/// 64-bit unsigned integer operand (`.lu`).
pub const CVT_LU: u8 = 0b00011;
