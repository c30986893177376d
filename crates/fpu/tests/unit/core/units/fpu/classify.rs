//! Classification instruction tests.
//!
//! Each value belongs to exactly one of the ten classes, so the tests
//! sweep one representative per class and check the result is the
//! lone matching bit.

use mipsfpu_core::core::arch::fcr;
use mipsfpu_core::Trap;
use rstest::rstest;

use crate::common::harness::{PC, QNAN_F32, QNAN_F64, SNAN_F32, SNAN_F64};
use crate::common::TestFpu;

#[rstest]
#[case(SNAN_F32, 0x001)]
#[case(QNAN_F32, 0x002)]
#[case(f32::NEG_INFINITY.to_bits(), 0x004)]
#[case((-1.5f32).to_bits(), 0x008)]
#[case(0x8000_0001, 0x010)]
#[case((-0.0f32).to_bits(), 0x020)]
#[case(f32::INFINITY.to_bits(), 0x040)]
#[case(1.5f32.to_bits(), 0x080)]
#[case(0x0000_0001, 0x100)]
#[case(0.0f32.to_bits(), 0x200)]
fn test_class_single(#[case] value: u32, #[case] expected: u32) {
    let t = TestFpu::release6();
    let class = t.fpu.class_s(PC, value).unwrap();
    assert_eq!(class, expected, "value {value:#010x}");
}

#[rstest]
#[case(SNAN_F64, 0x001)]
#[case(QNAN_F64, 0x002)]
#[case(f64::NEG_INFINITY.to_bits(), 0x004)]
#[case((-1.5f64).to_bits(), 0x008)]
#[case(0x8000_0000_0000_0001, 0x010)]
#[case((-0.0f64).to_bits(), 0x020)]
#[case(f64::INFINITY.to_bits(), 0x040)]
#[case(1.5f64.to_bits(), 0x080)]
#[case(0x0000_0000_0000_0001, 0x100)]
#[case(0.0f64.to_bits(), 0x200)]
fn test_class_double(#[case] value: u64, #[case] expected: u64) {
    let t = TestFpu::release6();
    let class = t.fpu.class_d(PC, value).unwrap();
    assert_eq!(class, expected, "value {value:#018x}");
}

#[test]
fn test_class_rejected_on_legacy() {
    let t = TestFpu::legacy();
    assert_eq!(t.fpu.class_s(PC, 0), Err(Trap::ReservedInstruction(PC)));
    assert_eq!(t.fpu.class_d(PC, 0), Err(Trap::ReservedInstruction(PC)));
}

#[test]
fn test_class_never_touches_the_control_register() {
    let mut t = TestFpu::release6();
    // Park a stale cause bit, then classify a signalling NaN.
    let seeded = t.read_ctl(31).unwrap() | fcr::FP_INEXACT << fcr::FCR31_CAUSE_SHIFT;
    t.write_ctl(31, seeded).unwrap();
    let before = t.read_ctl(31).unwrap();

    let class = t.fpu.class_s(PC, SNAN_F32).unwrap();
    assert_eq!(class, 0x001);
    assert_eq!(t.read_ctl(31).unwrap(), before);
}
