//! Memory interface shared by every hart.
//!
//! This module defines the `Memory` trait, the only view of physical memory the extension
//! core has. It provides:
//! 1. **Access:** Load and store by address and width, reporting faults as traps.
//! 2. **Fetch:** Halfword instruction fetch used by the hart to assemble variable-length words.
//!
//! Implementations are shared across harts running on separate threads, so all methods take
//! `&self` and implementors must synchronize internally. The core never caches a value it
//! loaded across instruction boundaries.

use crate::common::data::{AccessType, MemWidth};
use crate::common::error::Trap;

/// Physical memory as seen by semantic routines.
pub trait Memory: Send + Sync {
    /// Loads `width` bytes (little-endian) at `addr`, zero-extended to 64 bits.
    ///
    /// # Errors
    ///
    /// Returns the access-fault or misaligned trap matching `access` when the
    /// address cannot be served.
    fn load(&self, addr: u64, width: MemWidth, access: AccessType) -> Result<u64, Trap>;

    /// Stores the low `width` bytes of `value` (little-endian) at `addr`.
    ///
    /// # Errors
    ///
    /// Returns a store access-fault or misaligned trap when the address cannot be served.
    fn store(&self, addr: u64, width: MemWidth, value: u64) -> Result<(), Trap>;

    /// Fetches one 16-bit instruction parcel.
    ///
    /// # Errors
    ///
    /// Propagates the fetch fault reported by [`load`](Self::load).
    fn fetch_parcel(&self, addr: u64) -> Result<u16, Trap> {
        self.load(addr, MemWidth::Half, AccessType::Fetch)
            .map(|parcel| parcel as u16)
    }
}
