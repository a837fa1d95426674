//! Memory Access Types.
//!
//! This module defines the classification of memory accesses made through the
//! shared memory interface. These types are used for the following:
//! 1. **Fault Generation:** Choosing the right trap for a failed fetch, load or store.
//! 2. **Width Selection:** Describing how many bytes one access moves.

use crate::common::error::Trap;

/// Type of memory access operation.
///
/// Used to distinguish between instruction fetches, data loads, and data stores
/// when a memory implementation reports a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    Fetch,

    /// Data read access.
    Read,

    /// Data write access.
    Write,
}

impl AccessType {
    /// Access fault trap for this access type at `addr`.
    pub const fn access_fault(self, addr: u64) -> Trap {
        match self {
            Self::Fetch => Trap::InstructionAccessFault(addr),
            Self::Read => Trap::LoadAccessFault(addr),
            Self::Write => Trap::StoreAccessFault(addr),
        }
    }

    /// Misaligned-address trap for this access type at `addr`.
    pub const fn misaligned(self, addr: u64) -> Trap {
        match self {
            Self::Fetch => Trap::InstructionAddressMisaligned(addr),
            Self::Read => Trap::LoadAddressMisaligned(addr),
            Self::Write => Trap::StoreAddressMisaligned(addr),
        }
    }
}

/// Width of a single memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemWidth {
    /// One byte.
    Byte,
    /// Two bytes (halfword).
    Half,
    /// Four bytes (word).
    Word,
    /// Eight bytes (doubleword).
    Double,
}

impl MemWidth {
    /// Number of bytes moved by an access of this width.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }

    /// Mask selecting the low `bytes() * 8` bits of a value.
    pub const fn mask(self) -> u64 {
        match self {
            Self::Byte => 0xFF,
            Self::Half => 0xFFFF,
            Self::Word => 0xFFFF_FFFF,
            Self::Double => u64::MAX,
        }
    }
}
