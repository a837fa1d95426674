//! Composable RISC-V ISA extension core.
//!
//! This crate implements the instruction-set-extension layer of a RISC-V simulator:
//! 1. **Entries:** Immutable descriptors of one instruction's encoding, operand classes
//!    and semantic routine, built fluently from per-extension defaults.
//! 2. **Extensions:** Named tables of entries (RV64F, RV64D) composed at configuration time.
//! 3. **Registry:** Aggregates enabled tables, rejects colliding encodings, and resolves
//!    fetched words to entries in two phases (opcode bucket, then format-aware fields).
//! 4. **State:** The per-hart register file with width-aware integer access, NaN-boxed
//!    singles, `fcsr`, and PC-update accounting.
//! 5. **Hart:** Fetch, dispatch and retirement accounting against shared memory.
//!
//! # Example
//!
//! ```
//! use rvsim_ext::{Features, Hart, Registry};
//!
//! let features = Features::parse("rv64gc").unwrap();
//! let registry = Registry::for_features(&features).unwrap();
//! assert_eq!(registry.extensions(), ["RV64F", "RV64D"]);
//!
//! let hart = Hart::new(features, 0x8000_0000);
//! assert_eq!(hart.regs.pc(), 0x8000_0000);
//! ```

/// Common types and constants (registers, traps, access widths).
pub mod common;
/// Core configuration (hart settings, ISA selection).
pub mod config;
/// Per-hart state (features, register files, `fcsr`), FPU helpers and the hart driver.
pub mod core;
/// Instruction set (entries, extensions, decode, registry, disassembly).
pub mod isa;
/// Memory interface shared by every hart.
pub mod soc;

/// Fatal configuration errors and synchronous traps.
pub use crate::common::{ConfigError, EntryError, Trap};
/// Per-hart register file.
pub use crate::common::RegisterFile;
/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// ISA profile of a hart.
pub use crate::core::arch::features::{Features, IsaExt, Xlen};
/// Hardware thread driver.
pub use crate::core::Hart;
/// Extension module trait.
pub use crate::isa::extension::Extension;
/// Decode registry and dispatcher.
pub use crate::isa::registry::Registry;
/// Memory interface.
pub use crate::soc::Memory;
