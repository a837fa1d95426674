//! Decode Registry Tests.
//!
//! Verifies that registration rejects every pair of entries that could claim the
//! same word (naming both sides), and that decode resolves words through the
//! opcode bucket and the format-aware field match.

use pretty_assertions::assert_eq;
use rvsim_ext::common::{EntryError, RegisterFile};
use rvsim_ext::core::units::fpu::exception_flags::FpFlags;
use rvsim_ext::isa::abi::REG_A0;
use rvsim_ext::isa::entry::{Funct3, InstDefaults, InstEntry, InstFormat, RegClass, Rs2Op};
use rvsim_ext::isa::fcvt::fcvt_fp_to_int;
use rvsim_ext::isa::instruction::Inst;
use rvsim_ext::isa::rv64d::funct7::{FCVT_D_INT, FCVT_INT_D};
use rvsim_ext::isa::rv64d::{Rv64D, Rv64DDefaults};
use rvsim_ext::isa::rv64f::Rv64F;
use rvsim_ext::isa::rv64f::rs2::{CVT_L, CVT_W, CVT_WU};
use rvsim_ext::{ConfigError, Extension, Features, Memory, Registry, Trap};

use crate::common::builder::instruction::{InstructionBuilder, RNE, RTZ, ci_type, r_type};
use crate::common::extensions::{C_LI_FUNCT3, C_LI_QUADRANT, XTest};
use crate::common::harness::{TestContext, init_tracing};
use crate::common::mocks::memory::MockMemoryPort;

fn nop(_: &Features, regs: &mut RegisterFile, _: &dyn Memory, inst: &Inst<'_>) -> bool {
    regs.advance_pc(inst.inst_size);
    true
}

/// Extension whose table is produced by a closure, so each test can shape it.
#[derive(Debug)]
struct Probe {
    name: &'static str,
    table: fn() -> Result<Vec<InstEntry>, EntryError>,
}

impl Extension for Probe {
    fn name(&self) -> &'static str {
        self.name
    }

    fn table(&self) -> Result<Vec<InstEntry>, EntryError> {
        (self.table)()
    }
}

fn with_rv64d(table: fn() -> Result<Vec<InstEntry>, EntryError>) -> Result<Registry, ConfigError> {
    init_tracing();
    let extensions: Vec<Box<dyn Extension>> = vec![
        Box::new(Rv64D),
        Box::new(Probe {
            name: "XPROBE",
            table,
        }),
    ];
    Registry::build(&extensions)
}

#[test]
fn duplicate_encoding_names_both_sides() {
    let err = with_rv64d(|| {
        Ok(vec![
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("x.cvt %rd, %rs1")
                .funct7(FCVT_INT_D)
                .rs2_op(CVT_L)
                .semantic(nop)
                .build()?,
        ])
    })
    .unwrap_err();

    match err {
        ConfigError::DuplicateEncoding {
            ref first,
            ref first_ext,
            ref second,
            ref second_ext,
            key,
        } => {
            assert_eq!(*first, "fcvt.l.d %rd, %rs1");
            assert_eq!(first_ext, "RV64D");
            assert_eq!(*second, "x.cvt %rd, %rs1");
            assert_eq!(second_ext, "XPROBE");
            assert_eq!(key.rs2, Some(Rs2Op::Fixed(CVT_L)));
        }
        ref other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("fcvt.l.d"));
    assert!(message.contains("RV64D"));
    assert!(message.contains("XPROBE"));
}

#[test]
fn missing_rs2_selector_claims_every_selector() {
    let err = with_rv64d(|| {
        Ok(vec![
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("x.any %rd, %rs1")
                .funct7(FCVT_D_INT)
                .semantic(nop)
                .build()?,
        ])
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::DuplicateEncoding { first: "fcvt.d.l %rd, %rs1", .. }
    ));
}

#[test]
fn fixed_funct3_collides_with_rounding_mode() {
    let err = with_rv64d(|| {
        Ok(vec![
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("x.rtz %rd, %rs1")
                .funct3(RTZ as u8)
                .funct7(FCVT_INT_D)
                .rs2_op(CVT_L)
                .semantic(nop)
                .build()?,
        ])
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateEncoding { .. }));
}

#[test]
fn mixed_formats_in_one_bucket_must_be_distinguishable() {
    let err = with_rv64d(|| {
        Ok(vec![
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("x.imm %rd, %rs1, %imm")
                .format(InstFormat::I)
                .funct3(0)
                .semantic(nop)
                .build()?,
        ])
    })
    .unwrap_err();

    match err {
        ConfigError::FormatConflict {
            first,
            first_format,
            second,
            ..
        } => {
            assert_eq!(first, "fcvt.l.d %rd, %rs1");
            assert_eq!(first_format, InstFormat::R);
            assert_eq!(second, "x.imm %rd, %rs1, %imm");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_table_names_the_extension() {
    let err = with_rv64d(|| {
        Ok(vec![
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("x.broken")
                .build()?,
        ])
    })
    .unwrap_err();

    match err {
        ConfigError::InvalidEntry { extension, source } => {
            assert_eq!(extension, "XPROBE");
            assert_eq!(
                source,
                EntryError::MissingSemantic {
                    mnemonic: "x.broken"
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn distinct_selector_is_accepted_and_decoded() {
    let registry = with_rv64d(|| {
        Ok(vec![
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("fcvt.w.d %rd, %rs1")
                .funct7(FCVT_INT_D)
                .rs2_op(CVT_W)
                .rs1(RegClass::FloatingPoint)
                .semantic(fcvt_fp_to_int::<f64, i32>)
                .build()?,
            InstEntry::builder::<Rv64DDefaults>()
                .mnemonic("fcvt.wu.d %rd, %rs1")
                .funct7(FCVT_INT_D)
                .rs2_op(CVT_WU)
                .rs1(RegClass::FloatingPoint)
                .semantic(fcvt_fp_to_int::<f64, u32>)
                .build()?,
        ])
    })
    .unwrap();
    assert_eq!(registry.len(), 8);
    assert_eq!(registry.extensions(), ["RV64D", "XPROBE"]);

    let raw = r_type(0b101_0011, 10, RTZ, 1, u32::from(CVT_W), u32::from(FCVT_INT_D));
    let features = Features::parse("rv64gc").unwrap();
    let mut regs = RegisterFile::new(features.xlen());
    regs.set_fp64(1, -3e10);
    let mem = MockMemoryPort::new();

    let inst = registry.step(&features, &mut regs, &mem, raw, 4).unwrap();

    assert_eq!(inst.mnemonic(), "fcvt.w.d %rd, %rs1");
    assert_eq!(regs.get_x::<i64>(REG_A0), i64::from(i32::MIN));
    assert_eq!(regs.fcsr().fflags(), FpFlags::NV);

    let raw = r_type(0b101_0011, 10, RTZ, 1, u32::from(CVT_WU), u32::from(FCVT_INT_D));
    let inst = registry.step(&features, &mut regs, &mem, raw, 4).unwrap();
    assert_eq!(inst.mnemonic(), "fcvt.wu.d %rd, %rs1");
    assert_eq!(regs.read(REG_A0), 0);
}

#[test]
fn every_builtin_pair_registers() {
    init_tracing();
    let extensions: Vec<Box<dyn Extension>> = vec![Box::new(Rv64F), Box::new(Rv64D)];
    let registry = Registry::build(&extensions).unwrap();
    assert_eq!(registry.len(), 10);

    let names: Vec<_> = registry.entries().iter().map(InstEntry::name).collect();
    assert_eq!(
        names,
        [
            "fcvt.l.s", "fcvt.lu.s", "fcvt.s.l", "fcvt.s.lu", "fcvt.l.d", "fcvt.lu.d",
            "fcvt.d.l", "fcvt.d.lu", "fmv.x.d", "fmv.d.x",
        ]
    );
}

#[test]
fn find_by_name() {
    let ctx = TestContext::new();
    let entry = ctx.registry.find("fmv.d.x").unwrap();
    assert_eq!(entry.funct3(), Funct3::Fixed(0));
    assert_eq!(entry.rd_class(), RegClass::FloatingPoint);
    assert_eq!(entry.rs1_class(), RegClass::Integer);
    assert!(ctx.registry.find("fmv.d").is_none());
}

#[test]
fn word_without_bucket_is_illegal() {
    let ctx = TestContext::new();
    assert_eq!(
        ctx.registry.decode(0xFFFF_FFFF, 4).unwrap_err(),
        Trap::IllegalInstruction(0xFFFF_FFFF)
    );
}

#[test]
fn unknown_funct7_is_illegal() {
    let ctx = TestContext::new();
    let fadd_d = r_type(0b101_0011, 1, RNE, 2, 3, 0b000_0001);
    assert_eq!(
        ctx.registry.decode(fadd_d, 4).unwrap_err(),
        Trap::IllegalInstruction(fadd_d)
    );
}

#[test]
fn unknown_rs2_selector_is_illegal() {
    let ctx = TestContext::new();
    let raw = InstructionBuilder::new().fcvt_l_d(10, 1, RNE).rs2(7).build();
    assert!(ctx.registry.decode(raw, 4).is_err());
}

#[test]
fn fetched_length_must_match_entry() {
    let ctx = TestContext::new();
    let raw = InstructionBuilder::new().fcvt_d_l(1, 10, RNE).build();
    assert_eq!(
        ctx.registry.decode(raw, 2).unwrap_err(),
        Trap::IllegalInstruction(raw)
    );
}

#[test]
fn decode_extracts_operands() {
    let ctx = TestContext::new();
    let raw = InstructionBuilder::new().fcvt_l_d(10, 11, RTZ).build();

    let inst = ctx.registry.decode(raw, 4).unwrap();

    assert_eq!(inst.raw, raw);
    assert_eq!(inst.mnemonic(), "fcvt.l.d %rd, %rs1");
    assert_eq!(inst.rd, 10);
    assert_eq!(inst.rs1, 11);
    assert_eq!(inst.rs2, usize::from(CVT_L));
    assert_eq!(inst.rm(), RTZ as u8);
    assert_eq!(inst.inst_size, 4);
}

#[test]
fn compressed_word_decodes_in_its_quadrant() {
    let extensions: Vec<Box<dyn Extension>> = vec![Box::new(XTest), Box::new(Rv64D)];
    let ctx = TestContext::with_extensions("rv64gc", extensions);
    let c_li = ci_type(C_LI_QUADRANT, C_LI_FUNCT3, 10, -1);
    assert_eq!(c_li, 0x557D);

    let inst = ctx.registry.decode(0xABCD_0000 | c_li, 2).unwrap();

    assert_eq!(inst.raw, 0x557D);
    assert_eq!(inst.entry.format(), InstFormat::CI);
    assert_eq!(inst.rd, 10);
    assert_eq!(inst.imm, -1);
    assert_eq!(inst.inst_size, 2);
}

#[test]
fn compressed_word_with_wrong_funct3_is_illegal() {
    let extensions: Vec<Box<dyn Extension>> = vec![Box::new(XTest)];
    let ctx = TestContext::with_extensions("rv64gc", extensions);
    let c_addi = ci_type(C_LI_QUADRANT, 0b000, 10, 1);
    assert_eq!(
        ctx.registry.decode(c_addi, 2).unwrap_err(),
        Trap::IllegalInstruction(c_addi)
    );
}

#[test]
fn conversions_do_not_touch_memory() {
    let ctx = TestContext::new();
    let features = Features::parse("rv64gc").unwrap();
    let mut regs = RegisterFile::new(features.xlen());
    let mem = MockMemoryPort::new();

    let _ = ctx
        .registry
        .step(
            &features,
            &mut regs,
            &mem,
            InstructionBuilder::new().fmv_d_x(1, 10).build(),
            4,
        )
        .unwrap();
    let _ = ctx
        .registry
        .step(
            &features,
            &mut regs,
            &mem,
            InstructionBuilder::new().fcvt_l_d(10, 1, RNE).build(),
            4,
        )
        .unwrap();
}

#[test]
fn registry_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();
}

fn only(
    name: &'static str,
    table: fn() -> Result<Vec<InstEntry>, EntryError>,
) -> Result<Registry, ConfigError> {
    init_tracing();
    let extensions: Vec<Box<dyn Extension>> = vec![Box::new(Probe { name, table })];
    Registry::build(&extensions)
}

struct SystemDefaults;

impl InstDefaults for SystemDefaults {
    const OPCODE: u8 = 0b111_0011;
    const FORMAT: InstFormat = InstFormat::I;
    const RD_CLASS: RegClass = RegClass::Unknown;
    const RS1_CLASS: RegClass = RegClass::Unknown;
    const RS2_CLASS: RegClass = RegClass::Unknown;
}

#[test]
fn system_instructions_split_on_immediate() {
    let registry = only("XSYS", || {
        Ok(vec![
            InstEntry::builder::<SystemDefaults>()
                .mnemonic("ecall")
                .imm12(0)
                .semantic(nop)
                .build()?,
            InstEntry::builder::<SystemDefaults>()
                .mnemonic("ebreak")
                .imm12(1)
                .semantic(nop)
                .build()?,
            InstEntry::builder::<SystemDefaults>()
                .mnemonic("csrrw %rd, %rs1, %imm")
                .funct3(0b001)
                .semantic(nop)
                .build()?,
        ])
    })
    .unwrap();

    assert_eq!(registry.decode(0x0000_0073, 4).unwrap().mnemonic(), "ecall");
    assert_eq!(registry.decode(0x0010_0073, 4).unwrap().mnemonic(), "ebreak");
    assert_eq!(registry.decode(0x3412_9073, 4).unwrap().entry.name(), "csrrw");
    assert_eq!(
        registry.decode(0x0020_0073, 4).unwrap_err(),
        Trap::IllegalInstruction(0x0020_0073)
    );
}

#[test]
fn same_immediate_selector_is_duplicate() {
    let err = only("XSYS", || {
        Ok(vec![
            InstEntry::builder::<SystemDefaults>()
                .mnemonic("ecall")
                .imm12(0)
                .semantic(nop)
                .build()?,
            InstEntry::builder::<SystemDefaults>()
                .mnemonic("x.trap")
                .imm12(0)
                .semantic(nop)
                .build()?,
        ])
    })
    .unwrap_err();

    match err {
        ConfigError::DuplicateEncoding { first, second, key, .. } => {
            assert_eq!(first, "ecall");
            assert_eq!(second, "x.trap");
            assert_eq!(key.imm12, Some(0));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn entry_without_immediate_selector_claims_every_immediate() {
    let err = only("XSYS", || {
        Ok(vec![
            InstEntry::builder::<SystemDefaults>()
                .mnemonic("ecall")
                .imm12(0)
                .semantic(nop)
                .build()?,
            InstEntry::builder::<SystemDefaults>()
                .mnemonic("x.any %imm")
                .semantic(nop)
                .build()?,
        ])
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::DuplicateEncoding { first: "ecall", second: "x.any %imm", .. }
    ));
}

struct QuadrantOne;

impl InstDefaults for QuadrantOne {
    const OPCODE: u8 = 0b01;
    const FORMAT: InstFormat = InstFormat::CB;
    const RD_CLASS: RegClass = RegClass::Integer;
    const RS2_CLASS: RegClass = RegClass::Unknown;
}

fn quadrant_one() -> Result<Vec<InstEntry>, EntryError> {
    Ok(vec![
        InstEntry::builder::<QuadrantOne>()
            .mnemonic("c.srli %rs1, %imm")
            .funct3(0b100)
            .funct2(0b00)
            .semantic(nop)
            .build()?,
        InstEntry::builder::<QuadrantOne>()
            .mnemonic("c.srai %rs1, %imm")
            .funct3(0b100)
            .funct2(0b01)
            .semantic(nop)
            .build()?,
        InstEntry::builder::<QuadrantOne>()
            .mnemonic("c.andi %rs1, %imm")
            .funct3(0b100)
            .funct2(0b10)
            .semantic(nop)
            .build()?,
        InstEntry::builder::<QuadrantOne>()
            .mnemonic("c.sub %rd, %rs2")
            .format(InstFormat::CA)
            .funct3(0)
            .funct7(0b1000_1100)
            .rs2(RegClass::Integer)
            .semantic(nop)
            .build()?,
        InstEntry::builder::<QuadrantOne>()
            .mnemonic("c.beqz %rs1, %imm")
            .funct3(0b110)
            .semantic(nop)
            .build()?,
    ])
}

#[test]
fn compressed_alu_block_splits_on_funct2() {
    let registry = only("XC", quadrant_one).unwrap();
    assert_eq!(registry.len(), 5);

    let srli = registry.decode(0x917D, 2).unwrap();
    assert_eq!(srli.entry.name(), "c.srli");
    assert_eq!(srli.rs1, 10);
    assert_eq!(srli.imm as u64 & 0x3F, 63);

    assert_eq!(registry.decode(0x957D, 2).unwrap().entry.name(), "c.srai");

    let andi = registry.decode(0x997D, 2).unwrap();
    assert_eq!(andi.entry.name(), "c.andi");
    assert_eq!(andi.imm, -1);

    let sub = registry.decode(0x8C05, 2).unwrap();
    assert_eq!(sub.entry.name(), "c.sub");
    assert_eq!(sub.entry.format(), InstFormat::CA);

    // c.xor shares funct6 with c.sub but is not registered.
    assert_eq!(
        registry.decode(0x8C25, 2).unwrap_err(),
        Trap::IllegalInstruction(0x8C25)
    );
}

#[test]
fn branch_offset_bits_do_not_select() {
    let registry = only("XC", quadrant_one).unwrap();

    let beqz = registry.decode(0xCD01, 2).unwrap();
    assert_eq!(beqz.entry.name(), "c.beqz");
    assert_eq!(beqz.rs1, 10);
    assert_eq!(beqz.imm, 24);
}

#[test]
fn compressed_shift_without_funct2_conflicts_with_arithmetic() {
    let err = only("XC", || {
        Ok(vec![
            InstEntry::builder::<QuadrantOne>()
                .mnemonic("c.sub %rd, %rs2")
                .format(InstFormat::CA)
                .funct3(0)
                .funct7(0b1000_1100)
                .semantic(nop)
                .build()?,
            InstEntry::builder::<QuadrantOne>()
                .mnemonic("c.srli %rs1, %imm")
                .funct3(0b100)
                .semantic(nop)
                .build()?,
        ])
    })
    .unwrap_err();

    match err {
        ConfigError::FormatConflict {
            first,
            first_format,
            second,
            ..
        } => {
            assert_eq!(first, "c.sub %rd, %rs2");
            assert_eq!(first_format, InstFormat::CA);
            assert_eq!(second, "c.srli %rs1, %imm");
        }
        other => panic!("unexpected error: {other}"),
    }
}

struct QuadrantTwo;

impl InstDefaults for QuadrantTwo {
    const OPCODE: u8 = 0b10;
    const FORMAT: InstFormat = InstFormat::CR;
    const FUNCT3: Funct3 = Funct3::Fixed(0);
}

#[test]
fn register_moves_split_on_nonzero_rs2() {
    let registry = only("XC", || {
        Ok(vec![
            InstEntry::builder::<QuadrantTwo>()
                .mnemonic("c.jr %rs1")
                .funct7(0b1000)
                .rs2_op(0)
                .semantic(nop)
                .build()?,
            InstEntry::builder::<QuadrantTwo>()
                .mnemonic("c.mv %rd, %rs2")
                .funct7(0b1000)
                .rs2_nonzero()
                .semantic(nop)
                .build()?,
            InstEntry::builder::<QuadrantTwo>()
                .mnemonic("c.add %rd, %rs2")
                .funct7(0b1001)
                .rs2_nonzero()
                .semantic(nop)
                .build()?,
        ])
    })
    .unwrap();

    let jr = registry.decode(0x8082, 2).unwrap();
    assert_eq!(jr.entry.name(), "c.jr");
    assert_eq!(jr.rs1, 1);

    let mv = registry.decode(0x852E, 2).unwrap();
    assert_eq!(mv.entry.name(), "c.mv");
    assert_eq!((mv.rd, mv.rs2), (10, 11));

    assert_eq!(registry.decode(0x952E, 2).unwrap().entry.name(), "c.add");
    assert_eq!(
        registry.decode(0x9082, 2).unwrap_err(),
        Trap::IllegalInstruction(0x9082)
    );
}

#[test]
fn nonzero_rs2_overlaps_fixed_nonzero_selector() {
    let err = only("XC", || {
        Ok(vec![
            InstEntry::builder::<QuadrantTwo>()
                .mnemonic("c.mv %rd, %rs2")
                .funct7(0b1000)
                .rs2_nonzero()
                .semantic(nop)
                .build()?,
            InstEntry::builder::<QuadrantTwo>()
                .mnemonic("x.mv5 %rd")
                .funct7(0b1000)
                .rs2_op(5)
                .semantic(nop)
                .build()?,
        ])
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::DuplicateEncoding { first: "c.mv %rd, %rs2", .. }
    ));
}
