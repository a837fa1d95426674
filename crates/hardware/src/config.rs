//! Configuration for the extension core.
//!
//! This module defines the configuration structures used to set up harts and their
//! decode registry. It provides:
//! 1. **Defaults:** Baseline values (reset PC, ISA string, hart count).
//! 2. **Structures:** General hart settings and the ISA selection.
//! 3. **Loading:** JSON parsing from a string or a file, and conversion to [`Features`].
//!
//! Every field is optional in the JSON document; missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::core::arch::features::Features;

/// Default configuration constants.
mod defaults {
    /// Reset program counter (base of main RAM on the reference platform).
    pub const START_PC: u64 = 0x8000_0000;

    /// ISA string used when none is configured.
    pub const ISA: &str = "RV64GC";

    /// Number of harts.
    pub const HARTS: usize = 1;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rvsim_ext::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "isa": { "isa": "rv64imafd", "harts": 2 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.start_pc, 0x8000_0000);
/// assert_eq!(config.isa.harts, 2);
/// assert_eq!(config.features().unwrap().isa_string(), "RV64IMAFD");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General hart settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// ISA selection
    #[serde(default)]
    pub isa: IsaConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Feature descriptor for the configured ISA string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIsa`] when the ISA string is not recognised.
    pub fn features(&self) -> Result<Features, ConfigError> {
        Features::parse(&self.isa.isa)
    }
}

/// General hart settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Log every executed instruction at `trace` level
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial PC value (defaults to RAM base)
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u64,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    const fn default_start_pc() -> u64 {
        defaults::START_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::START_PC,
        }
    }
}

/// ISA selection.
#[derive(Debug, Clone, Deserialize)]
pub struct IsaConfig {
    /// ISA string, e.g. `RV64GC` or `rv64imafd_zicsr`
    #[serde(default = "IsaConfig::default_isa")]
    pub isa: String,

    /// Number of harts sharing the registry and memory
    #[serde(default = "IsaConfig::default_harts")]
    pub harts: usize,
}

impl IsaConfig {
    fn default_isa() -> String {
        defaults::ISA.to_string()
    }

    const fn default_harts() -> usize {
        defaults::HARTS
    }
}

impl Default for IsaConfig {
    fn default() -> Self {
        Self {
            isa: Self::default_isa(),
            harts: defaults::HARTS,
        }
    }
}
