//! Hardware thread (hart) driver.
//!
//! A `Hart` owns one register file and its feature descriptor, and drives the
//! fetch → decode → execute cycle against a shared [`Registry`] and [`Memory`]:
//! 1. **Fetch:** Reads a 16-bit parcel at the PC and, when its low bits mark a
//!    32-bit instruction, the following parcel.
//! 2. **Dispatch:** Hands the assembled word to the registry, which decodes it and
//!    runs its semantic routine.
//! 3. **Accounting:** Counts retired instructions and accumulates entry cost in cycles.
//!
//! Traps are returned to the caller untouched; delivering them is the harness's job.

use tracing::trace;

use crate::common::constants::{INSTRUCTION_SIZE_16, INSTRUCTION_SIZE_32};
use crate::common::error::{ConfigError, Trap};
use crate::common::reg::RegisterFile;
use crate::config::Config;
use crate::core::arch::features::{Features, IsaExt};
use crate::isa::decode::instruction_length;
use crate::isa::registry::Registry;
use crate::soc::traits::Memory;

/// One hardware thread.
#[derive(Clone, Debug)]
pub struct Hart {
    /// Feature descriptor handed to every semantic routine.
    pub features: Features,
    /// Architectural register state.
    pub regs: RegisterFile,
    /// Log every executed instruction at `trace` level.
    pub trace: bool,
    retired: u64,
    cycles: u64,
}

impl Hart {
    /// Creates a hart with zeroed registers and the PC at `start_pc`.
    pub fn new(features: Features, start_pc: u64) -> Self {
        let mut regs = RegisterFile::new(features.xlen());
        regs.set_pc(start_pc);
        Self {
            features,
            regs,
            trace: false,
            retired: 0,
            cycles: 0,
        }
    }

    /// Creates hart `hart_id` as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIsa`] when the configured ISA string is not recognised.
    pub fn from_config(config: &Config, hart_id: u32) -> Result<Self, ConfigError> {
        let features = config.features()?.with_hart_id(hart_id);
        let mut hart = Self::new(features, config.general.start_pc);
        hart.trace = config.general.trace_instructions;
        Ok(hart)
    }

    /// Hart identifier.
    pub const fn id(&self) -> u32 {
        self.features.hart_id()
    }

    /// Instructions retired so far.
    pub const fn retired(&self) -> u64 {
        self.retired
    }

    /// Accumulated entry cost of the retired instructions.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Fetches the instruction at the PC.
    ///
    /// # Returns
    ///
    /// The raw word (a compressed instruction in the low 16 bits) and its length in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Trap::InstructionAddressMisaligned`] when the PC is not aligned to the
    /// smallest instruction the hart supports, and propagates fetch faults from memory.
    pub fn fetch(&self, mem: &dyn Memory) -> Result<(u32, u8), Trap> {
        let pc = self.regs.pc();
        let align = if self.features.has(IsaExt::C) {
            INSTRUCTION_SIZE_16
        } else {
            INSTRUCTION_SIZE_32
        };
        if pc % u64::from(align) != 0 {
            return Err(Trap::InstructionAddressMisaligned(pc));
        }

        let low = mem.fetch_parcel(pc)?;
        let len = instruction_length(low);
        if len == INSTRUCTION_SIZE_16 {
            return Ok((u32::from(low), len));
        }

        let next = pc.wrapping_add(u64::from(INSTRUCTION_SIZE_16)) & self.features.xlen().mask();
        let high = mem.fetch_parcel(next)?;
        Ok((u32::from(low) | (u32::from(high) << 16), len))
    }

    /// Runs one fetch-decode-execute cycle.
    ///
    /// # Errors
    ///
    /// Propagates fetch faults and the registry's illegal-instruction traps. The
    /// PC is left at the faulting instruction.
    pub fn step(&mut self, registry: &Registry, mem: &dyn Memory) -> Result<(), Trap> {
        let pc = self.regs.pc();
        let (raw, len) = self.fetch(mem)?;
        let inst = registry.step(&self.features, &mut self.regs, mem, raw, len)?;

        if self.trace {
            trace!(
                hart = self.id(),
                pc = format_args!("{pc:#x}"),
                raw = format_args!("{raw:#010x}"),
                "{}",
                inst.disassemble()
            );
        }
        self.retired += 1;
        self.cycles += u64::from(inst.entry.cost());
        Ok(())
    }

    /// Runs up to `max_steps` instructions, stopping at the first trap.
    ///
    /// # Returns
    ///
    /// The number of instructions executed when `max_steps` is reached.
    ///
    /// # Errors
    ///
    /// Returns the first trap raised; instructions before it have retired.
    pub fn run(
        &mut self,
        registry: &Registry,
        mem: &dyn Memory,
        max_steps: u64,
    ) -> Result<u64, Trap> {
        for _ in 0..max_steps {
            self.step(registry, mem)?;
        }
        Ok(max_steps)
    }
}
