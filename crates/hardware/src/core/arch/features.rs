//! Hart feature descriptor.
//!
//! This module describes the ISA profile a hart was configured with. It provides:
//! 1. **XLEN:** The native integer register width (32 or 64 bits).
//! 2. **Extension Queries:** Which single-letter standard extensions are enabled.
//! 3. **ISA Strings:** Parsing and rendering of strings such as `RV64IMAFDC` or `rv64gc_zicsr`.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::constants::XLEN32_MASK;
use crate::common::error::ConfigError;

/// Native integer register width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum Xlen {
    /// 32-bit registers.
    #[serde(alias = "32", alias = "rv32")]
    Rv32,
    /// 64-bit registers.
    #[default]
    #[serde(alias = "64", alias = "rv64")]
    Rv64,
}

impl Xlen {
    /// Register width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Rv32 => 32,
            Self::Rv64 => 64,
        }
    }

    /// Mask selecting the bits of a 64-bit slot that belong to a native register.
    pub const fn mask(self) -> u64 {
        match self {
            Self::Rv32 => XLEN32_MASK,
            Self::Rv64 => u64::MAX,
        }
    }
}

/// Single-letter standard extensions understood by the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IsaExt {
    /// Base integer instruction set.
    I = 0,
    /// Integer multiplication and division.
    M = 1,
    /// Atomic instructions.
    A = 2,
    /// Single-precision floating point.
    F = 3,
    /// Double-precision floating point.
    D = 4,
    /// Compressed instructions.
    C = 5,
}

impl IsaExt {
    /// Every extension in canonical ISA-string order.
    pub const ALL: [Self; 6] = [Self::I, Self::M, Self::A, Self::F, Self::D, Self::C];

    /// Extensions implied by the `G` shorthand.
    pub const GENERAL: [Self; 5] = [Self::I, Self::M, Self::A, Self::F, Self::D];

    const fn bit(self) -> u32 {
        1 << self as u32
    }

    /// Upper-case ISA-string letter.
    pub const fn letter(self) -> char {
        match self {
            Self::I => 'I',
            Self::M => 'M',
            Self::A => 'A',
            Self::F => 'F',
            Self::D => 'D',
            Self::C => 'C',
        }
    }

    /// Looks up an extension by its (case-insensitive) letter.
    pub const fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(Self::I),
            'M' => Some(Self::M),
            'A' => Some(Self::A),
            'F' => Some(Self::F),
            'D' => Some(Self::D),
            'C' => Some(Self::C),
            _ => None,
        }
    }
}

/// Feature descriptor handed to every semantic routine.
///
/// Immutable once a hart is configured. Cheap to clone; each hart owns its copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Features {
    xlen: Xlen,
    extensions: u32,
    hart_id: u32,
}

impl Features {
    /// Creates a descriptor for the given width and extension set.
    pub fn new(xlen: Xlen, extensions: &[IsaExt]) -> Self {
        let extensions = extensions.iter().fold(0, |acc, ext| acc | ext.bit());
        Self {
            xlen,
            extensions,
            hart_id: 0,
        }
    }

    /// Parses an ISA string such as `RV64IMAFDC`, `rv64gc` or `rv32imf_zicsr`.
    ///
    /// Multi-letter `Z*`/`X*`/`S*` extensions are accepted and ignored. `D`
    /// without `F` is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIsa`] when the prefix, width, base or any
    /// single-letter extension is not recognised.
    pub fn parse(isa: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidIsa {
            isa: isa.to_string(),
            reason: reason.to_string(),
        };

        let lower = isa.trim().to_ascii_lowercase();
        let rest = lower
            .strip_prefix("rv")
            .ok_or_else(|| invalid("missing `rv` prefix"))?;
        let (xlen, rest) = if let Some(rest) = rest.strip_prefix("64") {
            (Xlen::Rv64, rest)
        } else if let Some(rest) = rest.strip_prefix("32") {
            (Xlen::Rv32, rest)
        } else {
            return Err(invalid("XLEN must be 32 or 64"));
        };

        let base = rest.split('_').next().unwrap_or_default();
        let mut letters = base.chars();
        let mut extensions = match letters.next() {
            Some('i') => IsaExt::I.bit(),
            Some('g') => IsaExt::GENERAL.iter().fold(0, |acc, ext| acc | ext.bit()),
            _ => return Err(invalid("base ISA must be `i` or `g`")),
        };

        for c in letters {
            if matches!(c, 'z' | 'x' | 's') {
                break;
            }
            if c == 'g' {
                extensions |= IsaExt::GENERAL.iter().fold(0, |acc, ext| acc | ext.bit());
                continue;
            }
            match IsaExt::from_letter(c) {
                Some(ext) => extensions |= ext.bit(),
                None => return Err(invalid(&format!("unsupported extension `{c}`"))),
            }
        }

        let features = Self {
            xlen,
            extensions,
            hart_id: 0,
        };
        if features.has(IsaExt::D) && !features.has(IsaExt::F) {
            return Err(invalid("`d` requires `f`"));
        }
        Ok(features)
    }

    /// Returns a copy tagged with the given hart identifier.
    #[must_use]
    pub const fn with_hart_id(mut self, hart_id: u32) -> Self {
        self.hart_id = hart_id;
        self
    }

    /// Native register width.
    pub const fn xlen(&self) -> Xlen {
        self.xlen
    }

    /// True for 64-bit harts.
    pub const fn is_rv64(&self) -> bool {
        matches!(self.xlen, Xlen::Rv64)
    }

    /// True for 32-bit harts.
    pub const fn is_rv32(&self) -> bool {
        matches!(self.xlen, Xlen::Rv32)
    }

    /// True when `ext` is enabled.
    pub const fn has(&self, ext: IsaExt) -> bool {
        self.extensions & ext.bit() != 0
    }

    /// Identifier of the hart owning this descriptor.
    pub const fn hart_id(&self) -> u32 {
        self.hart_id
    }

    /// Canonical upper-case ISA string, e.g. `RV64IMAFDC`.
    pub fn isa_string(&self) -> String {
        let mut isa = format!("RV{}", self.xlen.bits());
        isa.extend(
            IsaExt::ALL
                .iter()
                .filter(|ext| self.has(**ext))
                .map(|ext| ext.letter()),
        );
        isa
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::new(Xlen::Rv64, &IsaExt::ALL)
    }
}

impl FromStr for Features {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.isa_string())
    }
}
