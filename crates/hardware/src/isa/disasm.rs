//! Mnemonic template rendering.
//!
//! Each entry carries a template such as `"fcvt.d.l %rd, %rs1"`. Rendering replaces
//! the operand placeholders with the decoded values, picking integer or
//! floating-point ABI names from the entry's register classes.
//!
//! | Placeholder | Replaced by |
//! |-------------|-------------|
//! | `%rd`, `%rs1`, `%rs2`, `%rs3` | ABI register name (`a0`, `fa0`, or `x5` when the class is unknown) |
//! | `%imm` | signed decimal immediate |
//! | `%rm` | rounding mode spelling (`rne`, `rtz`, ..., `dyn`) |
//!
//! # Usage
//!
//! ```ignore
//! let text = inst.disassemble(); // "fcvt.d.l fa0, a0"
//! ```

use std::fmt::Write as _;

use crate::core::units::fpu::rounding_modes::RoundingMode;
use crate::isa::abi::{freg, xreg};
use crate::isa::entry::RegClass;
use crate::isa::instruction::Inst;

/// Placeholders in match order; `%rs1` must precede `%rs` prefixes of other names.
const PLACEHOLDERS: [&str; 6] = ["%rd", "%rs1", "%rs2", "%rs3", "%imm", "%rm"];

/// Renders `inst`'s mnemonic template with its operands.
pub fn render(inst: &Inst<'_>) -> String {
    let entry = inst.entry;
    let mut template = entry.mnemonic();
    let mut out = String::with_capacity(template.len() + 8);

    while let Some(pos) = template.find('%') {
        out.push_str(&template[..pos]);
        let rest = &template[pos..];
        let Some(placeholder) = PLACEHOLDERS.iter().find(|p| rest.starts_with(**p)) else {
            out.push('%');
            template = &rest[1..];
            continue;
        };

        match *placeholder {
            "%rd" => push_reg(&mut out, entry.rd_class(), inst.rd),
            "%rs1" => push_reg(&mut out, entry.rs1_class(), inst.rs1),
            "%rs2" => push_reg(&mut out, entry.rs2_class(), inst.rs2),
            "%rs3" => push_reg(&mut out, entry.rs3_class(), inst.rs3),
            "%imm" => {
                let _ = write!(out, "{}", inst.imm);
            }
            _ => out.push_str(RoundingMode::field_name(inst.rm())),
        }
        template = &rest[placeholder.len()..];
    }

    out.push_str(template);
    out
}

fn push_reg(out: &mut String, class: RegClass, idx: usize) {
    match class {
        RegClass::Integer => out.push_str(xreg(idx)),
        RegClass::FloatingPoint => out.push_str(freg(idx)),
        RegClass::Unknown => {
            let _ = write!(out, "x{idx}");
        }
    }
}
