//! RV64F Extension Tests.

use pretty_assertions::assert_eq;
use rvsim_ext::core::units::fpu::exception_flags::FpFlags;
use rvsim_ext::isa::abi::REG_A0;
use rvsim_ext::isa::rv64f::Rv64F;
use rvsim_ext::{Extension, Features, Trap};

use crate::common::builder::instruction::{InstructionBuilder, RNE, RTZ};
use crate::common::harness::{START_PC, TestContext};

#[test]
fn fcvt_s_l_writes_boxed_single() {
    let mut ctx = TestContext::new();
    ctx.hart.regs.set_x(REG_A0, -7i64);

    ctx.exec(InstructionBuilder::new().fcvt_s_l(1, 10, RNE).build())
        .unwrap();

    assert_eq!(
        ctx.hart.regs.read_f(1),
        0xFFFF_FFFF_0000_0000 | u64::from((-7.0f32).to_bits())
    );
    assert_eq!(ctx.pc(), START_PC + 4);
}

#[test]
fn fcvt_s_lu_rounds_large_values() {
    let mut ctx = TestContext::new();
    ctx.hart.regs.set_x(REG_A0, (1u64 << 40) + 1);

    ctx.exec(InstructionBuilder::new().fcvt_s_lu(1, 10, RNE).build())
        .unwrap();

    assert_eq!(ctx.hart.regs.get_fp32(1), 1_099_511_627_776.0);
    assert_eq!(ctx.hart.regs.fcsr().fflags(), FpFlags::NX);
}

#[test]
fn fcvt_l_s_reads_unboxed_slot_as_nan() {
    let mut ctx = TestContext::new();
    ctx.hart.regs.write_f(1, 0x0000_0000_4000_0000);

    ctx.exec(InstructionBuilder::new().fcvt_l_s(10, 1, RTZ).build())
        .unwrap();

    assert_eq!(ctx.hart.regs.get_x::<i64>(REG_A0), i64::MAX);
    assert_eq!(ctx.hart.regs.fcsr().fflags(), FpFlags::NV);
}

#[test]
fn fcvt_l_s_truncates_boxed_value() {
    let mut ctx = TestContext::new();
    ctx.hart.regs.set_fp32(1, -2.5);

    ctx.exec(InstructionBuilder::new().fcvt_l_s(10, 1, RTZ).build())
        .unwrap();

    assert_eq!(ctx.hart.regs.get_x::<i64>(REG_A0), -2);
    assert_eq!(ctx.hart.regs.fcsr().fflags(), FpFlags::NX);
}

#[test]
fn fcvt_lu_s_clamps_negative_to_zero() {
    let mut ctx = TestContext::new();
    ctx.hart.regs.set_fp32(1, -3.0);
    ctx.hart.regs.set_x(REG_A0, 99i64);

    ctx.exec(InstructionBuilder::new().fcvt_lu_s(10, 1, RTZ).build())
        .unwrap();

    assert_eq!(ctx.hart.regs.read(REG_A0), 0);
    assert_eq!(ctx.hart.regs.fcsr().fflags(), FpFlags::NV);
}

#[test]
fn single_only_hart_registers_rv64f_alone() {
    let ctx = TestContext::with_isa("rv64imaf");
    assert_eq!(ctx.registry.extensions(), ["RV64F"]);
    assert_eq!(ctx.registry.len(), 4);

    let raw = InstructionBuilder::new().fcvt_d_l(1, 10, RNE).build();
    assert_eq!(
        ctx.registry.decode(raw, 4).unwrap_err(),
        Trap::IllegalInstruction(raw)
    );
}

#[test]
fn support_requires_rv64_and_f() {
    assert!(Rv64F.is_supported(&Features::parse("rv64if").unwrap()));
    assert!(!Rv64F.is_supported(&Features::parse("rv32if").unwrap()));
    assert!(!Rv64F.is_supported(&Features::parse("rv64imac").unwrap()));
}
