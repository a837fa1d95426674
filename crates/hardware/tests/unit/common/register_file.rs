//! Register File Access Tests.
//!
//! Verifies width-aware integer writes (sign/zero extension, RV32 truncation),
//! the hardwired `x0`, NaN-boxed single-precision slots and PC wrap-around.

use pretty_assertions::assert_eq;
use rvsim_ext::core::units::fpu::nan_handling::CANONICAL_NAN_F32;
use rvsim_ext::isa::abi::{REG_A0, REG_A1, REG_ZERO};
use rvsim_ext::{RegisterFile, Xlen};

#[test]
fn i32_write_sign_extends_on_rv64() {
    let mut regs = RegisterFile::new(Xlen::Rv64);
    regs.set_x(REG_A0, -1i32);
    assert_eq!(regs.read(REG_A0), u64::MAX);
    assert_eq!(regs.get_x::<i64>(REG_A0), -1);
}

#[test]
fn u32_write_zero_extends_on_rv64() {
    let mut regs = RegisterFile::new(Xlen::Rv64);
    regs.set_x(REG_A0, u32::MAX);
    assert_eq!(regs.read(REG_A0), 0x0000_0000_FFFF_FFFF);
}

#[test]
fn rv32_truncates_wide_writes() {
    let mut regs = RegisterFile::new(Xlen::Rv32);
    regs.set_x(REG_A0, -1i64);
    assert_eq!(regs.read(REG_A0), 0xFFFF_FFFF);
    assert_eq!(regs.get_x::<i64>(REG_A0), -1);
    assert_eq!(regs.get_x::<u64>(REG_A0), 0xFFFF_FFFF);

    regs.write(REG_A1, 0x1234_5678_9ABC_DEF0);
    assert_eq!(regs.read(REG_A1), 0x9ABC_DEF0);
}

#[test]
fn narrow_reads_take_the_low_word() {
    let mut regs = RegisterFile::new(Xlen::Rv64);
    regs.set_x(REG_A0, 0xDEAD_BEEF_8000_0001u64);
    assert_eq!(regs.get_x::<u32>(REG_A0), 0x8000_0001);
    assert_eq!(regs.get_x::<i32>(REG_A0), i32::MIN + 1);
}

#[test]
fn x0_is_hardwired() {
    let mut regs = RegisterFile::new(Xlen::Rv64);
    regs.set_x(REG_ZERO, 42u64);
    regs.write(REG_ZERO, 7);
    assert_eq!(regs.read(REG_ZERO), 0);
}

#[test]
fn fp64_slots_keep_exact_bits() {
    let mut regs = RegisterFile::new(Xlen::Rv64);
    let snan = 0x7FF0_0000_0000_0001;
    regs.write_f(3, snan);
    assert_eq!(regs.read_f(3), snan);
    assert_eq!(regs.get_fp64(3).to_bits(), snan);

    regs.set_fp64(4, -0.0);
    assert_eq!(regs.read_f(4), 0x8000_0000_0000_0000);
}

#[test]
fn fp32_writes_are_nan_boxed() {
    let mut regs = RegisterFile::new(Xlen::Rv64);
    regs.set_fp32(1, 1.5);
    assert_eq!(regs.read_f(1), 0xFFFF_FFFF_3FC0_0000);
    assert_eq!(regs.get_fp32(1).to_bits(), 1.5f32.to_bits());
}

#[test]
fn improperly_boxed_single_reads_as_canonical_nan() {
    let mut regs = RegisterFile::new(Xlen::Rv64);
    regs.write_f(1, 0x0000_0000_3FC0_0000);
    assert_eq!(regs.get_fp32(1).to_bits(), CANONICAL_NAN_F32);
}

#[test]
fn pc_wraps_at_native_width() {
    let mut regs = RegisterFile::new(Xlen::Rv32);
    regs.set_pc(0xFFFF_FFFE);
    regs.advance_pc(4);
    assert_eq!(regs.pc(), 0x2);

    let mut regs = RegisterFile::new(Xlen::Rv64);
    regs.set_pc(0x1_0000_0000);
    regs.advance_pc(2);
    assert_eq!(regs.pc(), 0x1_0000_0002);
}

#[test]
fn fcsr_packs_frm_and_flags() {
    let mut regs = RegisterFile::new(Xlen::Rv64);
    regs.fcsr_mut().write(0b101_10001);
    assert_eq!(regs.fcsr().frm(), 0b101);
    assert_eq!(regs.fcsr().read(), 0b101_10001);
    regs.fcsr_mut().clear_flags();
    assert_eq!(regs.fcsr().read(), 0b101_00000);
}
