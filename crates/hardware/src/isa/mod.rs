//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the instruction entry model, the extension modules built on it, and the
//! registry that resolves fetched words to semantic routines.
//!
//! # Extensions
//!
//! * `rv64f`: Single-precision conversions to and from 64-bit integers.
//! * `rv64d`: Double-precision conversions to and from 64-bit integers, and bit moves.
//! * `privileged`: Exception cause codes.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Format-directed operand extraction for all RISC-V instruction formats.
pub mod decode;

/// Mnemonic template rendering for tracing and diagnostics.
pub mod disasm;

/// Instruction entries, encoding keys and the entry builder.
pub mod entry;

/// Extension module trait and the builtin catalog.
pub mod extension;

/// Generic integer/floating-point conversion routines.
pub mod fcvt;

/// Instruction field extraction and the decoded instruction.
pub mod instruction;

/// Privileged architecture definitions (trap causes).
pub mod privileged;

/// Decode registry and dispatcher.
pub mod registry;

/// Double-precision floating-point extension, RV64-only instructions.
pub mod rv64d;

/// Single-precision floating-point extension, RV64-only instructions.
pub mod rv64f;
