//! Instruction entries and their builder.
//!
//! An [`InstEntry`] is the immutable descriptor of one machine instruction: its
//! bit-level identity ([`EncodingKey`]), the register class of each operand, its
//! mnemonic template, its cost and the semantic routine that executes it. Entries
//! are produced by [`InstEntryBuilder`], which starts from a per-extension
//! [`InstDefaults`] type and validates every field width before yielding an entry.

use std::fmt;
use std::marker::PhantomData;

use crate::common::constants::{
    CA_SECONDARY_BITS, COMPRESSED_OPCODE_BITS, FUNCT2_BITS, FUNCT3_BITS, FUNCT4_BITS, FUNCT7_BITS,
    IMM12_BITS, INSTRUCTION_SIZE_16, INSTRUCTION_SIZE_32, OPCODE_BITS, REG_INDEX_BITS,
};
use crate::common::error::EntryError;
use crate::common::reg::RegisterFile;
use crate::core::arch::features::Features;
use crate::isa::instruction::Inst;
use crate::soc::traits::Memory;

/// Semantic routine of one instruction.
///
/// Returns `false` when the instruction decoded but cannot legally execute on this
/// hart; the dispatcher turns that into an illegal-instruction trap. On `true` the
/// routine must have called exactly one of [`RegisterFile::advance_pc`] or
/// [`RegisterFile::set_pc`].
pub type Semantic = fn(&Features, &mut RegisterFile, &dyn Memory, &Inst<'_>) -> bool;

/// Register file an operand field refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RegClass {
    /// Integer register (`x0`–`x31`).
    Integer,
    /// Floating-point register (`f0`–`f31`).
    FloatingPoint,
    /// The field is not a register operand.
    #[default]
    Unknown,
}

/// Encoding format of an instruction.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstFormat {
    /// Register-register.
    R,
    /// Four-register (fused multiply-add).
    R4,
    /// Register-immediate.
    I,
    /// Store.
    S,
    /// Conditional branch.
    B,
    /// Upper immediate.
    U,
    /// Jump.
    J,
    /// Compressed register.
    CR,
    /// Compressed immediate.
    CI,
    /// Compressed stack-relative store.
    CSS,
    /// Compressed wide immediate.
    CIW,
    /// Compressed load.
    CL,
    /// Compressed store.
    CS,
    /// Compressed arithmetic.
    CA,
    /// Compressed branch.
    CB,
    /// Compressed jump.
    CJ,
}

impl InstFormat {
    /// Returns `true` for the 16-bit formats.
    pub const fn is_compressed(self) -> bool {
        matches!(
            self,
            Self::CR
                | Self::CI
                | Self::CSS
                | Self::CIW
                | Self::CL
                | Self::CS
                | Self::CA
                | Self::CB
                | Self::CJ
        )
    }

    /// Instruction length in bytes.
    pub const fn size(self) -> u8 {
        if self.is_compressed() {
            INSTRUCTION_SIZE_16
        } else {
            INSTRUCTION_SIZE_32
        }
    }

    /// Width of the opcode field: 7 bits, or the 2-bit quadrant for compressed formats.
    pub const fn opcode_bits(self) -> u32 {
        if self.is_compressed() {
            COMPRESSED_OPCODE_BITS
        } else {
            OPCODE_BITS
        }
    }

    /// Whether the format encodes a funct3 field.
    pub const fn has_funct3(self) -> bool {
        !matches!(self, Self::U | Self::J | Self::CR | Self::CA)
    }

    /// Width of the secondary selector (the "funct7 slot"); 0 when the format has none.
    pub const fn secondary_bits(self) -> u32 {
        match self {
            Self::R => FUNCT7_BITS,
            Self::R4 => FUNCT2_BITS,
            Self::CR => FUNCT4_BITS,
            Self::CA => CA_SECONDARY_BITS,
            _ => 0,
        }
    }

    /// Whether the format has an `rs2` field that can act as an operation selector.
    pub const fn has_rs2(self) -> bool {
        matches!(self, Self::R | Self::R4 | Self::S | Self::B | Self::CR)
    }

    /// Whether the format's 12-bit immediate can act as an operation selector.
    pub const fn has_imm12(self) -> bool {
        matches!(self, Self::I)
    }

    /// Whether the format carries a funct2 selector in bits 11:10.
    pub const fn has_cb_funct2(self) -> bool {
        matches!(self, Self::CB)
    }

    /// Position of the `rs2` field: bit 20, or bit 2 when compressed.
    const fn rs2_shift(self) -> u32 {
        if self.is_compressed() { 2 } else { 20 }
    }

    /// Mask and placement of the secondary selector inside the raw word.
    const fn place_secondary(self, value: u8) -> (u32, u32) {
        let value = value as u32;
        match self {
            Self::R => (0x7F << 25, value << 25),
            Self::R4 => (0x3 << 25, value << 25),
            Self::CR => (0xF << 12, value << 12),
            Self::CA => (
                (0x3F << 10) | (0x3 << 5),
                ((value >> 2) << 10) | ((value & 0x3) << 5),
            ),
            _ => (0, 0),
        }
    }
}

impl fmt::Display for InstFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How an entry matches the funct3 field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Funct3 {
    /// The field must hold exactly this value.
    Fixed(u8),
    /// The field is the instruction's rounding-mode operand and matches any value.
    RoundingMode,
}

impl fmt::Display for Funct3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => write!(f, "{value:#05b}"),
            Self::RoundingMode => f.write_str("rm"),
        }
    }
}

/// How an entry matches the `rs2` field when it acts as an operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rs2Op {
    /// The field must hold exactly this value.
    Fixed(u8),
    /// The field must not be zero (`c.mv` against `c.jr`).
    NonZero,
}

impl Rs2Op {
    /// Whether a decoded `rs2` value selects this matcher.
    pub const fn matches(self, rs2: u32) -> bool {
        match self {
            Self::Fixed(value) => value as u32 == rs2,
            Self::NonZero => rs2 != 0,
        }
    }

    /// Whether some `rs2` value is matched by both `self` and `other`.
    pub const fn overlaps(self, other: Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Fixed(value), Self::NonZero) | (Self::NonZero, Self::Fixed(value)) => {
                value != 0
            }
            (Self::NonZero, Self::NonZero) => true,
        }
    }
}

impl fmt::Display for Rs2Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => write!(f, "{value}"),
            Self::NonZero => f.write_str("!0"),
        }
    }
}

/// Bit-level identity of an instruction inside one registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EncodingKey {
    /// Opcode (7 bits) or compressed quadrant (2 bits).
    pub opcode: u8,
    /// funct3 matcher.
    pub funct3: Funct3,
    /// Secondary selector: funct7, funct2, funct4 or funct6 ++ funct2 depending on format.
    pub funct7: u8,
    /// `rs2` field used as an operation selector, if any.
    pub rs2: Option<Rs2Op>,
    /// I-format immediate used as an operation selector (`ecall` against `ebreak`).
    pub imm12: Option<u16>,
    /// CB-format funct2 in bits 11:10 (`c.srli`, `c.srai`, `c.andi`).
    pub funct2: Option<u8>,
    /// Encoding format.
    pub format: InstFormat,
}

impl EncodingKey {
    /// Mask of the bits this key pins and the value they must hold.
    ///
    /// Compressed keys only pin bits 15:0. A `NonZero` rs2 matcher pins nothing
    /// here and is checked separately.
    pub const fn pattern(&self) -> (u32, u32) {
        let format = self.format;
        let compressed = format.is_compressed();

        let (mut mask, mut value) = if compressed {
            (0x3, self.opcode as u32 & 0x3)
        } else {
            (0x7F, self.opcode as u32 & 0x7F)
        };

        if let (Funct3::Fixed(funct3), true) = (self.funct3, format.has_funct3()) {
            let shift = if compressed { 13 } else { 12 };
            mask |= 0x7 << shift;
            value |= (funct3 as u32 & 0x7) << shift;
        }

        let (secondary_mask, secondary) = format.place_secondary(self.funct7);
        mask |= secondary_mask;
        value |= secondary & secondary_mask;

        if let (Some(Rs2Op::Fixed(rs2)), true) = (self.rs2, format.has_rs2()) {
            let shift = format.rs2_shift();
            mask |= 0x1F << shift;
            value |= (rs2 as u32 & 0x1F) << shift;
        }

        if let (Some(imm12), true) = (self.imm12, format.has_imm12()) {
            mask |= 0xFFF << 20;
            value |= (imm12 as u32 & 0xFFF) << 20;
        }

        if let (Some(funct2), true) = (self.funct2, format.has_cb_funct2()) {
            mask |= 0x3 << 10;
            value |= (funct2 as u32 & 0x3) << 10;
        }

        (mask, value)
    }

    /// Whether `raw` (already trimmed to 16 bits when compressed) is claimed by this key.
    pub const fn matches(&self, raw: u32) -> bool {
        let (mask, value) = self.pattern();
        if raw & mask != value {
            return false;
        }
        match self.rs2 {
            Some(Rs2Op::NonZero) if self.format.has_rs2() => {
                Rs2Op::NonZero.matches((raw >> self.format.rs2_shift()) & 0x1F)
            }
            _ => true,
        }
    }

    /// Whether some instruction word would be claimed by both keys.
    ///
    /// Holds across formats too: two keys of different formats in one opcode
    /// bucket overlap when no pinned bit tells them apart.
    pub const fn overlaps(&self, other: &Self) -> bool {
        if self.format.is_compressed() != other.format.is_compressed() {
            return false;
        }
        let (mask_a, value_a) = self.pattern();
        let (mask_b, value_b) = other.pattern();
        if (value_a ^ value_b) & mask_a & mask_b != 0 {
            return false;
        }
        match (self.rs2, other.rs2) {
            (Some(a), Some(b)) if self.format.has_rs2() && other.format.has_rs2() => {
                a.overlaps(b)
            }
            _ => true,
        }
    }
}

impl fmt::Display for EncodingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} opcode={:#04x} funct3={} funct7={:#04x}",
            self.format, self.opcode, self.funct3, self.funct7
        )?;
        if let Some(rs2) = self.rs2 {
            write!(f, " rs2={rs2}")?;
        }
        if let Some(imm12) = self.imm12 {
            write!(f, " imm12={imm12:#05x}")?;
        }
        if let Some(funct2) = self.funct2 {
            write!(f, " funct2={funct2:#04b}")?;
        }
        f.write_str("]")
    }
}

/// Immutable descriptor of one instruction.
#[derive(Clone, Copy)]
pub struct InstEntry {
    mnemonic: &'static str,
    key: EncodingKey,
    rd_class: RegClass,
    rs1_class: RegClass,
    rs2_class: RegClass,
    rs3_class: RegClass,
    cost: u32,
    semantic: Semantic,
}

impl InstEntry {
    /// Starts a builder from the defaults type `D`.
    pub const fn builder<D: InstDefaults>() -> InstEntryBuilder<D> {
        InstEntryBuilder::new()
    }

    /// Mnemonic template, e.g. `"fcvt.d.l %rd, %rs1"`.
    pub const fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    /// Instruction name: the first word of the template.
    pub fn name(&self) -> &'static str {
        self.mnemonic
            .split_whitespace()
            .next()
            .unwrap_or(self.mnemonic)
    }

    /// Encoding key.
    pub const fn key(&self) -> &EncodingKey {
        &self.key
    }

    /// Opcode or compressed quadrant.
    pub const fn opcode(&self) -> u8 {
        self.key.opcode
    }

    /// funct3 matcher.
    pub const fn funct3(&self) -> Funct3 {
        self.key.funct3
    }

    /// Secondary selector value.
    pub const fn funct7(&self) -> u8 {
        self.key.funct7
    }

    /// `rs2` operation selector, if any.
    pub const fn rs2_op(&self) -> Option<Rs2Op> {
        self.key.rs2
    }

    /// Immediate operation selector, if any.
    pub const fn imm12(&self) -> Option<u16> {
        self.key.imm12
    }

    /// CB funct2 selector, if any.
    pub const fn funct2(&self) -> Option<u8> {
        self.key.funct2
    }

    /// Encoding format.
    pub const fn format(&self) -> InstFormat {
        self.key.format
    }

    /// Whether the instruction is 16 bits long.
    pub const fn is_compressed(&self) -> bool {
        self.key.format.is_compressed()
    }

    /// Instruction length in bytes.
    pub const fn inst_size(&self) -> u8 {
        self.key.format.size()
    }

    /// Register class of `rd`.
    pub const fn rd_class(&self) -> RegClass {
        self.rd_class
    }

    /// Register class of `rs1`.
    pub const fn rs1_class(&self) -> RegClass {
        self.rs1_class
    }

    /// Register class of `rs2`.
    pub const fn rs2_class(&self) -> RegClass {
        self.rs2_class
    }

    /// Register class of `rs3`.
    pub const fn rs3_class(&self) -> RegClass {
        self.rs3_class
    }

    /// Execution cost in cycles.
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Semantic routine.
    pub const fn semantic(&self) -> Semantic {
        self.semantic
    }
}

impl fmt::Debug for InstEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstEntry")
            .field("mnemonic", &self.mnemonic)
            .field("key", &self.key)
            .field("rd_class", &self.rd_class)
            .field("rs1_class", &self.rs1_class)
            .field("rs2_class", &self.rs2_class)
            .field("rs3_class", &self.rs3_class)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

/// Per-extension starting point for [`InstEntryBuilder`].
///
/// An extension declares one zero-sized type implementing this trait per encoding
/// family it uses (e.g. "OP-FP, rounding-mode funct3").
pub trait InstDefaults {
    /// Opcode (or quadrant) shared by the family.
    const OPCODE: u8;
    /// Encoding format.
    const FORMAT: InstFormat = InstFormat::R;
    /// funct3 matcher.
    const FUNCT3: Funct3 = Funct3::Fixed(0);
    /// Secondary selector.
    const FUNCT7: u8 = 0;
    /// Register class of `rd`.
    const RD_CLASS: RegClass = RegClass::Integer;
    /// Register class of `rs1`.
    const RS1_CLASS: RegClass = RegClass::Integer;
    /// Register class of `rs2`.
    const RS2_CLASS: RegClass = RegClass::Integer;
    /// Register class of `rs3`.
    const RS3_CLASS: RegClass = RegClass::Unknown;
    /// Execution cost in cycles.
    const COST: u32 = 1;
}

/// Fluent builder for [`InstEntry`].
///
/// Building is pure: the entry is only returned, never registered.
pub struct InstEntryBuilder<D> {
    mnemonic: Option<&'static str>,
    key: EncodingKey,
    rd_class: RegClass,
    rs1_class: RegClass,
    rs2_class: RegClass,
    rs3_class: RegClass,
    cost: u32,
    semantic: Option<Semantic>,
    _defaults: PhantomData<D>,
}

impl<D> fmt::Debug for InstEntryBuilder<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstEntryBuilder")
            .field("mnemonic", &self.mnemonic)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<D: InstDefaults> Default for InstEntryBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: InstDefaults> InstEntryBuilder<D> {
    /// Creates a builder populated from `D`.
    pub const fn new() -> Self {
        Self {
            mnemonic: None,
            key: EncodingKey {
                opcode: D::OPCODE,
                funct3: D::FUNCT3,
                funct7: D::FUNCT7,
                rs2: None,
                imm12: None,
                funct2: None,
                format: D::FORMAT,
            },
            rd_class: D::RD_CLASS,
            rs1_class: D::RS1_CLASS,
            rs2_class: D::RS2_CLASS,
            rs3_class: D::RS3_CLASS,
            cost: D::COST,
            semantic: None,
            _defaults: PhantomData,
        }
    }

    /// Sets the mnemonic template.
    #[must_use]
    pub const fn mnemonic(mut self, mnemonic: &'static str) -> Self {
        self.mnemonic = Some(mnemonic);
        self
    }

    /// Overrides the opcode.
    #[must_use]
    pub const fn opcode(mut self, opcode: u8) -> Self {
        self.key.opcode = opcode;
        self
    }

    /// Overrides the format.
    #[must_use]
    pub const fn format(mut self, format: InstFormat) -> Self {
        self.key.format = format;
        self
    }

    /// Requires a fixed funct3 value.
    #[must_use]
    pub const fn funct3(mut self, funct3: u8) -> Self {
        self.key.funct3 = Funct3::Fixed(funct3);
        self
    }

    /// Treats funct3 as the rounding-mode operand.
    #[must_use]
    pub const fn rounding_mode(mut self) -> Self {
        self.key.funct3 = Funct3::RoundingMode;
        self
    }

    /// Sets the secondary selector.
    #[must_use]
    pub const fn funct7(mut self, funct7: u8) -> Self {
        self.key.funct7 = funct7;
        self
    }

    /// Uses the `rs2` field as an operation selector with this value.
    #[must_use]
    pub const fn rs2_op(mut self, rs2: u8) -> Self {
        self.key.rs2 = Some(Rs2Op::Fixed(rs2));
        self
    }

    /// Requires a non-zero `rs2` field.
    #[must_use]
    pub const fn rs2_nonzero(mut self) -> Self {
        self.key.rs2 = Some(Rs2Op::NonZero);
        self
    }

    /// Uses the I-format immediate as an operation selector with this value.
    #[must_use]
    pub const fn imm12(mut self, imm12: u16) -> Self {
        self.key.imm12 = Some(imm12);
        self
    }

    /// Uses bits 11:10 of a CB-format instruction as an operation selector.
    #[must_use]
    pub const fn funct2(mut self, funct2: u8) -> Self {
        self.key.funct2 = Some(funct2);
        self
    }

    /// Sets the register class of `rd`.
    #[must_use]
    pub const fn rd(mut self, class: RegClass) -> Self {
        self.rd_class = class;
        self
    }

    /// Sets the register class of `rs1`.
    #[must_use]
    pub const fn rs1(mut self, class: RegClass) -> Self {
        self.rs1_class = class;
        self
    }

    /// Sets the register class of `rs2`.
    #[must_use]
    pub const fn rs2(mut self, class: RegClass) -> Self {
        self.rs2_class = class;
        self
    }

    /// Sets the register class of `rs3`.
    #[must_use]
    pub const fn rs3(mut self, class: RegClass) -> Self {
        self.rs3_class = class;
        self
    }

    /// Sets the execution cost in cycles.
    #[must_use]
    pub const fn cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Sets the semantic routine.
    #[must_use]
    pub const fn semantic(mut self, semantic: Semantic) -> Self {
        self.semantic = Some(semantic);
        self
    }

    /// Validates the collected fields and produces the entry.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::MissingMnemonic`] or [`EntryError::MissingSemantic`] when
    /// either was never supplied, and [`EntryError::FieldOutOfRange`] when a field does
    /// not fit the width its format gives it.
    pub fn build(self) -> Result<InstEntry, EntryError> {
        let mnemonic = self.mnemonic.ok_or(EntryError::MissingMnemonic)?;
        let semantic = self
            .semantic
            .ok_or(EntryError::MissingSemantic { mnemonic })?;
        let key = self.key;

        check_width(mnemonic, "opcode", key.opcode, key.format.opcode_bits())?;
        if let Funct3::Fixed(funct3) = key.funct3 {
            let bits = if key.format.has_funct3() { FUNCT3_BITS } else { 0 };
            check_width(mnemonic, "funct3", funct3, bits)?;
        }
        check_width(mnemonic, "funct7", key.funct7, key.format.secondary_bits())?;
        match key.rs2 {
            Some(Rs2Op::Fixed(rs2)) => {
                let bits = if key.format.has_rs2() { REG_INDEX_BITS } else { 0 };
                check_width(mnemonic, "rs2", rs2, bits)?;
            }
            Some(Rs2Op::NonZero) if !key.format.has_rs2() => {
                return Err(EntryError::FieldOutOfRange {
                    mnemonic,
                    field: "rs2",
                    value: 0,
                    bits: 0,
                });
            }
            _ => {}
        }
        if let Some(imm12) = key.imm12 {
            let bits = if key.format.has_imm12() { IMM12_BITS } else { 0 };
            check_width(mnemonic, "imm12", imm12, bits)?;
        }
        if let Some(funct2) = key.funct2 {
            let bits = if key.format.has_cb_funct2() { FUNCT2_BITS } else { 0 };
            check_width(mnemonic, "funct2", funct2, bits)?;
        }

        Ok(InstEntry {
            mnemonic,
            key,
            rd_class: self.rd_class,
            rs1_class: self.rs1_class,
            rs2_class: self.rs2_class,
            rs3_class: self.rs3_class,
            cost: self.cost,
            semantic,
        })
    }
}

/// Rejects `value` when it needs more than `bits` bits.
fn check_width(
    mnemonic: &'static str,
    field: &'static str,
    value: impl Into<u32>,
    bits: u32,
) -> Result<(), EntryError> {
    let value = value.into();
    if value >> bits == 0 {
        Ok(())
    } else {
        Err(EntryError::FieldOutOfRange {
            mnemonic,
            field,
            value,
            bits,
        })
    }
}
