//! RISC-V architecture-specific components.
//!
//! This module contains the per-hart architectural state. It includes the following modules:
//! 1. **Features:** The ISA profile (XLEN and enabled extensions) a hart was configured with.
//! 2. **FCSR:** Floating-point flags and dynamic rounding mode.
//! 3. **FPRs:** Floating-Point Register file implementation.
//! 4. **GPRs:** General-Purpose Register file implementation.

/// Floating-point control and status register.
pub mod fcsr;

/// Hart feature descriptor (XLEN, enabled extensions).
pub mod features;

/// Floating-Point Register file implementation.
pub mod fpr;

/// General-Purpose Register file implementation.
pub mod gpr;
