//! Decode registry and dispatcher.
//!
//! The registry aggregates the tables of every enabled extension, rejects encodings
//! that two entries could both claim, and resolves fetched words to entries:
//! 1. **Bucket:** The length bits and the fixed-position opcode (or compressed quadrant)
//!    select the candidate entries.
//! 2. **Match:** Each candidate's format says where funct3, the secondary selector and
//!    the `rs2`, immediate or CB funct2 selectors live; the first candidate whose
//!    pinned bits all match wins. Registration guarantees at most one can.
//!
//! Once built, a registry is immutable and may be shared between harts through an
//! `Arc`.

use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use crate::common::constants::INSTRUCTION_SIZE_16;
use crate::common::error::{ConfigError, Trap};
use crate::common::reg::RegisterFile;
use crate::core::arch::features::Features;
use crate::isa::decode::{ci_imm, decode_operands, instruction_length};
use crate::isa::entry::InstEntry;
use crate::isa::extension::{Extension, enabled_extensions};
use crate::isa::instruction::{Inst, InstructionBits};
use crate::soc::traits::Memory;

/// Mask of the low half-word holding a compressed instruction.
const COMPRESSED_MASK: u32 = 0xFFFF;

/// Bucket selector: (compressed, opcode or quadrant).
type BucketKey = (bool, u8);

/// Frozen table of every enabled instruction.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<InstEntry>,
    owners: Vec<usize>,
    extensions: Vec<&'static str>,
    buckets: HashMap<BucketKey, Vec<usize>>,
}

impl Registry {
    /// Builds a registry from the given extension modules, in order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when two modules share a name, a module's table
    /// fails to build, or two entries could claim the same instruction word. The
    /// error names both colliding entries.
    pub fn build(extensions: &[Box<dyn Extension>]) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for ext in extensions {
            registry.register(ext.as_ref())?;
        }
        info!(
            extensions = registry.extensions.len(),
            entries = registry.entries.len(),
            "decode registry built"
        );
        Ok(registry)
    }

    /// Builds a registry holding every builtin extension `features` supports.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn for_features(features: &Features) -> Result<Self, ConfigError> {
        Self::build(&enabled_extensions(features))
    }

    fn register(&mut self, ext: &dyn Extension) -> Result<(), ConfigError> {
        let name = ext.name();
        if self.extensions.contains(&name) {
            error!(extension = name, "extension registered twice");
            return Err(ConfigError::DuplicateExtension(name.to_string()));
        }

        let table = ext.table().map_err(|source| {
            error!(extension = name, %source, "extension table rejected");
            ConfigError::InvalidEntry {
                extension: name.to_string(),
                source,
            }
        })?;

        let owner = self.extensions.len();
        self.extensions.push(name);
        info!(extension = name, entries = table.len(), "registering extension");

        for entry in table {
            self.insert(entry, owner)?;
        }
        Ok(())
    }

    fn insert(&mut self, entry: InstEntry, owner: usize) -> Result<(), ConfigError> {
        let key = *entry.key();
        let bucket = self
            .buckets
            .entry((key.format.is_compressed(), key.opcode))
            .or_default();

        for &idx in bucket.iter() {
            let other = &self.entries[idx];
            let other_key = other.key();
            if !other_key.overlaps(&key) {
                continue;
            }

            if other_key.format == key.format {
                let first_ext = self.extensions[self.owners[idx]];
                let second_ext = self.extensions[owner];
                error!(
                    %key,
                    first = other.mnemonic(),
                    first_ext,
                    second = entry.mnemonic(),
                    second_ext,
                    "duplicate encoding"
                );
                return Err(ConfigError::DuplicateEncoding {
                    key,
                    first: other.mnemonic(),
                    first_ext: first_ext.to_string(),
                    second: entry.mnemonic(),
                    second_ext: second_ext.to_string(),
                });
            }

            error!(
                %key,
                first = other.mnemonic(),
                first_format = %other_key.format,
                second = entry.mnemonic(),
                "format conflict"
            );
            return Err(ConfigError::FormatConflict {
                key,
                first: other.mnemonic(),
                first_format: other_key.format,
                second: entry.mnemonic(),
            });
        }

        debug!(
            extension = self.extensions[owner],
            %key,
            mnemonic = entry.mnemonic(),
            "entry registered"
        );
        bucket.push(self.entries.len());
        self.entries.push(entry);
        self.owners.push(owner);
        Ok(())
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entry is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the registered extensions, in registration order.
    pub fn extensions(&self) -> &[&'static str] {
        &self.extensions
    }

    /// Registered entries, in registration order.
    pub fn entries(&self) -> &[InstEntry] {
        &self.entries
    }

    /// Finds the entry for an instruction name (the first word of its mnemonic).
    pub fn find(&self, name: &str) -> Option<&InstEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Resolves a fetched word to its entry and operands.
    ///
    /// `fetched_len` is the number of bytes the fetch unit assembled into `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`Trap::IllegalInstruction`] when no entry matches, or when the
    /// matched entry's length differs from `fetched_len`.
    pub fn decode(&self, raw: u32, fetched_len: u8) -> Result<Inst<'_>, Trap> {
        let length = instruction_length(raw as u16);
        let compressed = length == INSTRUCTION_SIZE_16;
        let (raw, opcode) = if compressed {
            let raw = raw & COMPRESSED_MASK;
            (raw, raw.c_quadrant() as u8)
        } else {
            (raw, raw.opcode() as u8)
        };

        let Some(bucket) = self.buckets.get(&(compressed, opcode)) else {
            debug!(raw = format_args!("{raw:#010x}"), opcode, "no bucket for opcode");
            return Err(Trap::IllegalInstruction(raw));
        };

        for &idx in bucket {
            let entry = &self.entries[idx];
            let key = entry.key();
            if !key.matches(raw) {
                continue;
            }
            let mut ops = decode_operands(raw, key.format);
            if key.funct2.is_some() {
                // CB shifts and `c.andi` hold a CI-style immediate, not a branch offset.
                ops.imm = ci_imm(raw);
            }

            if entry.inst_size() != fetched_len {
                debug!(
                    raw = format_args!("{raw:#010x}"),
                    mnemonic = entry.mnemonic(),
                    fetched_len,
                    "fetched length does not match entry"
                );
                return Err(Trap::IllegalInstruction(raw));
            }

            return Ok(Inst {
                raw,
                inst_size: entry.inst_size(),
                rd: ops.rd,
                rs1: ops.rs1,
                rs2: ops.rs2,
                rs3: ops.rs3,
                imm: ops.imm,
                funct3: ops.funct3,
                entry,
            });
        }

        debug!(raw = format_args!("{raw:#010x}"), opcode, "no entry matches");
        Err(Trap::IllegalInstruction(raw))
    }

    /// Runs the semantic routine of a decoded instruction and checks the PC contract.
    ///
    /// # Errors
    ///
    /// Returns [`Trap::IllegalInstruction`] carrying the raw word when the routine
    /// reports it cannot execute, or when it did not update the PC exactly once.
    /// The PC is then put back at the instruction.
    pub fn execute(
        &self,
        features: &Features,
        regs: &mut RegisterFile,
        mem: &dyn Memory,
        inst: &Inst<'_>,
    ) -> Result<(), Trap> {
        let pc = regs.pc();
        regs.begin_instruction();

        if !(inst.entry.semantic())(features, regs, mem, inst) {
            regs.restore_pc(pc);
            warn!(
                hart = features.hart_id(),
                pc = format_args!("{pc:#x}"),
                raw = format_args!("{:#010x}", inst.raw),
                mnemonic = inst.mnemonic(),
                "instruction cannot execute on this hart"
            );
            return Err(Trap::IllegalInstruction(inst.raw));
        }

        match regs.pc_updates() {
            1 => Ok(()),
            updates => {
                regs.restore_pc(pc);
                error!(
                    pc = format_args!("{pc:#x}"),
                    mnemonic = inst.mnemonic(),
                    updates,
                    "semantic routine broke the PC contract"
                );
                Err(Trap::IllegalInstruction(inst.raw))
            }
        }
    }

    /// Decodes and executes one fetched word.
    ///
    /// # Returns
    ///
    /// The decoded instruction, so the caller can account for its cost.
    ///
    /// # Errors
    ///
    /// Propagates the traps of [`decode`](Self::decode) and [`execute`](Self::execute).
    pub fn step(
        &self,
        features: &Features,
        regs: &mut RegisterFile,
        mem: &dyn Memory,
        raw: u32,
        fetched_len: u8,
    ) -> Result<Inst<'_>, Trap> {
        let inst = self.decode(raw, fetched_len).inspect_err(|_| {
            warn!(
                hart = features.hart_id(),
                pc = format_args!("{:#x}", regs.pc()),
                raw = format_args!("{raw:#010x}"),
                "illegal instruction"
            );
        })?;
        self.execute(features, regs, mem, &inst)?;
        Ok(inst)
    }
}
