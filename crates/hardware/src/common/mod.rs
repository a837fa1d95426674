//! Common utilities and types used throughout the extension core.
//!
//! This module provides the building blocks shared by the decoder, the extension
//! modules and the hart. It includes:
//! 1. **Constants:** Instruction sizes, register counts and encoding field widths.
//! 2. **Memory Access:** Access classification and widths for the shared memory interface.
//! 3. **Error Handling:** Trap representations and configuration errors.
//! 4. **Register Management:** The per-hart register file and its typed accessors.

/// Common constants used throughout the core.
pub mod constants;

/// Memory access type and width definitions.
pub mod data;

/// Trap and configuration error definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::{AccessType, MemWidth};
pub use error::{ConfigError, EntryError, Trap};
pub use reg::{RegisterFile, XValue};
