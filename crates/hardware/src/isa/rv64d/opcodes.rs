//! RISC-V Double-Precision (D) Opcodes.
//!
//! The 'D' extension shares the major opcodes with the 'F' extension.

pub use crate::isa::rv64f::opcodes::OP_FP;
