//! Privileged Architecture Definitions.
//!
//! The core raises synchronous exceptions but never delivers them; only the
//! architectural cause codes it reports are defined here.
//!
//! # Modules
//!
//! - `cause`: Exception cause codes.

/// Exception cause code definitions.
pub mod cause;
