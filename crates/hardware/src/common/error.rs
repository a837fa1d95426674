//! Trap and configuration error definitions.
//!
//! This module defines the two error families of the extension core. It provides:
//! 1. **Trap Representation:** Synchronous exceptions raised while fetching or executing an instruction.
//! 2. **Configuration Errors:** Fatal problems detected while assembling the decode registry.
//! 3. **Entry Errors:** Rejections from the instruction entry builder.

use std::fmt;

use crate::isa::entry::{EncodingKey, InstFormat};
use crate::isa::privileged::cause::exception;

/// RISC-V synchronous exceptions observable at the decode/execute boundary.
///
/// The core only reports traps; delivering them (updating `mcause`, `mepc`,
/// jumping to the handler) is the surrounding harness's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Instruction address misaligned exception.
    ///
    /// The associated value is the misaligned program counter.
    InstructionAddressMisaligned(u64),

    /// Instruction access fault exception.
    ///
    /// Raised by the memory interface when an instruction fetch cannot be served.
    /// The associated value is the faulting address.
    InstructionAccessFault(u64),

    /// Illegal instruction exception.
    ///
    /// Raised when no registered entry matches a fetched word, when the fetched
    /// length disagrees with the matched entry, or when a semantic routine
    /// reports that the instruction cannot execute. The associated value is the
    /// raw instruction encoding.
    IllegalInstruction(u32),

    /// Load address misaligned exception.
    LoadAddressMisaligned(u64),

    /// Load access fault exception.
    LoadAccessFault(u64),

    /// Store address misaligned exception.
    StoreAddressMisaligned(u64),

    /// Store access fault exception.
    StoreAccessFault(u64),
}

impl Trap {
    /// Returns the architectural exception code written to `mcause`.
    pub const fn cause(&self) -> u64 {
        match self {
            Self::InstructionAddressMisaligned(_) => exception::INSTRUCTION_ADDRESS_MISALIGNED,
            Self::InstructionAccessFault(_) => exception::INSTRUCTION_ACCESS_FAULT,
            Self::IllegalInstruction(_) => exception::ILLEGAL_INSTRUCTION,
            Self::LoadAddressMisaligned(_) => exception::LOAD_ADDRESS_MISALIGNED,
            Self::LoadAccessFault(_) => exception::LOAD_ACCESS_FAULT,
            Self::StoreAddressMisaligned(_) => exception::STORE_ADDRESS_MISALIGNED,
            Self::StoreAccessFault(_) => exception::STORE_ACCESS_FAULT,
        }
    }

    /// Returns the value written to `mtval`: the faulting address, or the raw
    /// instruction bits for an illegal instruction.
    pub const fn tval(&self) -> u64 {
        match self {
            Self::IllegalInstruction(raw) => *raw as u64,
            Self::InstructionAddressMisaligned(addr)
            | Self::InstructionAccessFault(addr)
            | Self::LoadAddressMisaligned(addr)
            | Self::LoadAccessFault(addr)
            | Self::StoreAddressMisaligned(addr)
            | Self::StoreAccessFault(addr) => *addr,
        }
    }
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstructionAddressMisaligned(addr) => {
                write!(f, "InstructionAddressMisaligned({addr:#x})")
            }
            Self::InstructionAccessFault(addr) => write!(f, "InstructionAccessFault({addr:#x})"),
            Self::IllegalInstruction(inst) => write!(f, "IllegalInstruction({inst:#x})"),
            Self::LoadAddressMisaligned(addr) => write!(f, "LoadAddressMisaligned({addr:#x})"),
            Self::LoadAccessFault(addr) => write!(f, "LoadAccessFault({addr:#x})"),
            Self::StoreAddressMisaligned(addr) => write!(f, "StoreAddressMisaligned({addr:#x})"),
            Self::StoreAccessFault(addr) => write!(f, "StoreAccessFault({addr:#x})"),
        }
    }
}

impl std::error::Error for Trap {}

/// Reasons the instruction entry builder refuses to produce an entry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    /// No mnemonic template was supplied.
    #[error("instruction entry has no mnemonic")]
    MissingMnemonic,

    /// No semantic routine was supplied.
    #[error("instruction entry `{mnemonic}` has no semantic routine")]
    MissingSemantic {
        /// Mnemonic template of the incomplete entry.
        mnemonic: &'static str,
    },

    /// An encoding field does not fit its bit width.
    #[error("instruction entry `{mnemonic}`: {field} value {value:#x} exceeds {bits} bits")]
    FieldOutOfRange {
        /// Mnemonic template of the offending entry.
        mnemonic: &'static str,
        /// Name of the encoding field.
        field: &'static str,
        /// Supplied value.
        value: u32,
        /// Width of the field in bits.
        bits: u32,
    },
}

/// Fatal configuration problems. Any of these prevents simulation from starting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Two enabled entries claim overlapping encodings.
    #[error(
        "duplicate encoding {key}: `{first}` ({first_ext}) collides with `{second}` ({second_ext})"
    )]
    DuplicateEncoding {
        /// Encoding key of the entry registered second.
        key: EncodingKey,
        /// Mnemonic of the entry registered first.
        first: &'static str,
        /// Extension that registered the first entry.
        first_ext: String,
        /// Mnemonic of the entry registered second.
        second: &'static str,
        /// Extension that registered the second entry.
        second_ext: String,
    },

    /// Two entries of different formats share an opcode bucket and cannot be told
    /// apart by the bits at the funct3 position.
    #[error("format conflict on {key}: `{first}` ({first_format}) and `{second}` cannot be distinguished")]
    FormatConflict {
        /// Encoding key of the entry registered second.
        key: EncodingKey,
        /// Mnemonic of the entry registered first.
        first: &'static str,
        /// Format of the entry registered first.
        first_format: InstFormat,
        /// Mnemonic of the entry registered second.
        second: &'static str,
    },

    /// Two extension modules report the same name.
    #[error("extension `{0}` registered twice")]
    DuplicateExtension(String),

    /// An extension table contained an entry the builder rejected.
    #[error("extension `{extension}`: {source}")]
    InvalidEntry {
        /// Extension whose table failed to build.
        extension: String,
        /// Builder rejection.
        #[source]
        source: EntryError,
    },

    /// The ISA string could not be parsed.
    #[error("invalid ISA string `{isa}`: {reason}")]
    InvalidIsa {
        /// The offending ISA string.
        isa: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The configuration document is malformed.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
}
