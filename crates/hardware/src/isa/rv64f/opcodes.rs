//! RISC-V Floating-Point (F/D) Opcodes.
//!
//! The conversion and move instructions of both floating-point extensions live
//! under the single OP-FP major opcode.

/// Floating-point arithmetic, conversion and move (FCVT, FMV, ...).
pub const OP_FP: u8 = 0b101_0011;
