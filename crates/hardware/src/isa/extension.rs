//! ISA extension modules.
//!
//! An extension module is a named, self-contained table of instruction entries. Modules
//! carry no state: their semantic routines receive every handle they touch (features,
//! register file, memory) at execution time, so one module value can serve any number
//! of harts and registries.

use std::fmt;

use crate::common::error::EntryError;
use crate::core::arch::features::Features;
use crate::isa::entry::InstEntry;
use crate::isa::rv64d::Rv64D;
use crate::isa::rv64f::Rv64F;

/// One ISA extension's instruction table.
pub trait Extension: Send + Sync + fmt::Debug {
    /// Extension name, unique within a registry (e.g. `"RV64D"`).
    fn name(&self) -> &'static str;

    /// Builds the extension's entries in registration order.
    ///
    /// # Errors
    ///
    /// Propagates the first [`EntryError`] raised by the entry builder.
    fn table(&self) -> Result<Vec<InstEntry>, EntryError>;

    /// Whether a hart with `features` can use this extension.
    fn is_supported(&self, _features: &Features) -> bool {
        true
    }
}

/// Every extension module shipped with the core, in registration order.
pub fn builtin_extensions() -> Vec<Box<dyn Extension>> {
    vec![Box::new(Rv64F), Box::new(Rv64D)]
}

/// The builtin modules a hart with `features` supports.
pub fn enabled_extensions(features: &Features) -> Vec<Box<dyn Extension>> {
    builtin_extensions()
        .into_iter()
        .filter(|ext| ext.is_supported(features))
        .collect()
}
