//! System-on-Chip (SoC) boundary.
//!
//! The memory subsystem itself belongs to the surrounding simulator; the core
//! only depends on the [`Memory`] trait defined here.

/// Shared memory interface.
pub mod traits;

pub use traits::Memory;
