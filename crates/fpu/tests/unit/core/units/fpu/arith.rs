//! Arithmetic instruction tests.
//!
//! Exact results use host floating point as the reference: both sides
//! are correctly rounded IEEE 754, so for add/sub/mul/div/sqrt they
//! agree bit for bit. Flag and trap behavior is asserted against the
//! `FCR31` fields the operations leave behind.

use mipsfpu_core::config::{Config, FeatureSupport, FormatSupport};
use mipsfpu_core::core::arch::fcr;
use mipsfpu_core::{ArithOp, FusedOp, MaddOp, MinMaxOp, RoundingMode, Trap};
use proptest::prelude::*;

use crate::common::harness::{ps, ps_parts, PC, QNAN_F32, SNAN_F32};
use crate::common::TestFpu;

// ── Basic operations ────────────────────────────────────────────────

#[test]
fn test_add_exact() {
    let mut t = TestFpu::legacy();
    let bits = t
        .fpu
        .arith_s(PC, ArithOp::Add, 1.5f32.to_bits(), 2.25f32.to_bits())
        .unwrap();
    assert_eq!(bits, 3.75f32.to_bits());
    assert_eq!(t.cause(), 0);
    assert_eq!(t.flags(), 0);
}

#[test]
fn test_sub_mul_double() {
    let mut t = TestFpu::legacy();
    let diff = t
        .fpu
        .arith_d(PC, ArithOp::Sub, 5.0f64.to_bits(), 3.0f64.to_bits())
        .unwrap();
    assert_eq!(diff, 2.0f64.to_bits());

    let product = t
        .fpu
        .arith_d(PC, ArithOp::Mul, 3.0f64.to_bits(), 4.0f64.to_bits())
        .unwrap();
    assert_eq!(product, 12.0f64.to_bits());
    assert_eq!(t.flags(), 0);
}

#[test]
fn test_div_inexact_sets_cause_and_sticky_flag() {
    let mut t = TestFpu::legacy();
    let bits = t
        .fpu
        .arith_s(PC, ArithOp::Div, 1.0f32.to_bits(), 3.0f32.to_bits())
        .unwrap();
    assert_eq!(bits, 0x3eaa_aaab);
    assert_eq!(t.cause(), fcr::FP_INEXACT);
    assert_eq!(t.flags(), fcr::FP_INEXACT);

    let bits = t
        .fpu
        .arith_d(PC, ArithOp::Div, 1.0f64.to_bits(), 3.0f64.to_bits())
        .unwrap();
    assert_eq!(bits, (1.0f64 / 3.0).to_bits());
}

#[test]
fn test_div_by_zero() {
    let mut t = TestFpu::legacy();
    let bits = t
        .fpu
        .arith_s(PC, ArithOp::Div, 1.0f32.to_bits(), 0.0f32.to_bits())
        .unwrap();
    assert_eq!(bits, f32::INFINITY.to_bits());
    assert_eq!(t.cause(), fcr::FP_DIV0);
    assert_eq!(t.flags(), fcr::FP_DIV0);
}

#[test]
fn test_zero_over_zero_is_invalid_not_div0() {
    let mut t = TestFpu::legacy();
    let bits = t
        .fpu
        .arith_s(PC, ArithOp::Div, 0.0f32.to_bits(), 0.0f32.to_bits())
        .unwrap();
    assert!(f32::from_bits(bits).is_nan());
    assert_eq!(t.cause(), fcr::FP_INVALID);
}

#[test]
fn test_overflow_to_infinity() {
    let mut t = TestFpu::legacy();
    let bits = t
        .fpu
        .arith_s(PC, ArithOp::Mul, f32::MAX.to_bits(), 2.0f32.to_bits())
        .unwrap();
    assert_eq!(bits, f32::INFINITY.to_bits());
    assert_eq!(t.cause(), fcr::FP_OVERFLOW | fcr::FP_INEXACT);
}

#[test]
fn test_overflow_rounds_to_max_finite_toward_zero() {
    let mut t = TestFpu::legacy().with_rounding(RoundingMode::Rz);
    let bits = t
        .fpu
        .arith_s(PC, ArithOp::Mul, f32::MAX.to_bits(), 2.0f32.to_bits())
        .unwrap();
    assert_eq!(bits, f32::MAX.to_bits());
    assert_eq!(t.cause(), fcr::FP_OVERFLOW | fcr::FP_INEXACT);
    assert_eq!(t.flags(), fcr::FP_OVERFLOW | fcr::FP_INEXACT);
}

#[test]
fn test_enabled_overflow_traps_when_clamped_to_max_finite() {
    let mut t = TestFpu::legacy()
        .with_rounding(RoundingMode::Rz)
        .with_enables(fcr::FP_OVERFLOW);
    let result = t
        .fpu
        .arith_s(PC, ArithOp::Mul, f32::MAX.to_bits(), 2.0f32.to_bits());
    assert_eq!(result, Err(Trap::FloatingPointException(PC)));
    assert_eq!(t.cause(), fcr::FP_OVERFLOW | fcr::FP_INEXACT);
    assert_eq!(t.flags(), 0, "the trapped condition never becomes sticky");
}

#[test]
fn test_directed_overflow_clamps_on_the_non_rounding_side() {
    // Rp sends positive overflow to infinity but keeps negative
    // overflow at the most negative finite value.
    let mut t = TestFpu::legacy().with_rounding(RoundingMode::Rp);
    let bits = t
        .fpu
        .arith_s(PC, ArithOp::Mul, (-f32::MAX).to_bits(), 2.0f32.to_bits())
        .unwrap();
    assert_eq!(bits, (-f32::MAX).to_bits());
    assert_eq!(t.cause(), fcr::FP_OVERFLOW | fcr::FP_INEXACT);

    let bits = t
        .fpu
        .arith_s(PC, ArithOp::Mul, f32::MAX.to_bits(), 2.0f32.to_bits())
        .unwrap();
    assert_eq!(bits, f32::INFINITY.to_bits());
    assert_eq!(t.cause(), fcr::FP_OVERFLOW | fcr::FP_INEXACT);
}

#[test]
fn test_rounding_up_to_max_finite_is_not_an_overflow() {
    // An in-range sum that lands on the largest finite value keeps
    // plain inexact accounting.
    let mut t = TestFpu::legacy().with_rounding(RoundingMode::Rp);
    let below_max = f32::MAX.to_bits() - 1;
    let bits = t
        .fpu
        .arith_s(PC, ArithOp::Add, below_max, 1.0f32.to_bits())
        .unwrap();
    assert_eq!(bits, f32::MAX.to_bits());
    assert_eq!(t.cause(), fcr::FP_INEXACT);
    assert_eq!(t.flags(), fcr::FP_INEXACT);
}

#[test]
fn test_signalling_nan_operand_raises_invalid() {
    let mut t = TestFpu::legacy();
    let bits = t
        .fpu
        .arith_s(PC, ArithOp::Add, SNAN_F32, 1.0f32.to_bits())
        .unwrap();
    assert!(f32::from_bits(bits).is_nan());
    assert_eq!(t.cause(), fcr::FP_INVALID);
}

#[test]
fn test_cause_is_replaced_but_flags_accrue() {
    let mut t = TestFpu::legacy();
    let _ = t
        .fpu
        .arith_s(PC, ArithOp::Div, 1.0f32.to_bits(), 3.0f32.to_bits())
        .unwrap();
    assert_eq!(t.cause(), fcr::FP_INEXACT);

    // An exact operation wipes the cause field; the sticky flag stays.
    let _ = t
        .fpu
        .arith_s(PC, ArithOp::Add, 1.0f32.to_bits(), 2.0f32.to_bits())
        .unwrap();
    assert_eq!(t.cause(), 0);
    assert_eq!(t.flags(), fcr::FP_INEXACT);

    // Later conditions join the accumulated set.
    let _ = t
        .fpu
        .arith_s(PC, ArithOp::Div, 1.0f32.to_bits(), 0.0f32.to_bits())
        .unwrap();
    assert_eq!(t.flags(), fcr::FP_INEXACT | fcr::FP_DIV0);
}

#[test]
fn test_enabled_exception_traps_without_touching_sticky_flags() {
    let mut t = TestFpu::legacy().with_enables(fcr::FP_DIV0);
    let _ = t
        .fpu
        .arith_s(PC, ArithOp::Div, 1.0f32.to_bits(), 3.0f32.to_bits())
        .unwrap();
    assert_eq!(t.flags(), fcr::FP_INEXACT, "inexact is not enabled");

    let result = t
        .fpu
        .arith_s(PC, ArithOp::Div, 1.0f32.to_bits(), 0.0f32.to_bits());
    assert_eq!(result, Err(Trap::FloatingPointException(PC)));
    assert_eq!(t.cause(), fcr::FP_DIV0, "cause identifies the condition");
    assert_eq!(t.flags(), fcr::FP_INEXACT, "the trapped condition never becomes sticky");
}

// ── Paired single ───────────────────────────────────────────────────

#[test]
fn test_paired_add_keeps_lanes_apart() {
    let mut t = TestFpu::legacy();
    let packed = t
        .fpu
        .arith_ps(PC, ArithOp::Add, ps(1.0, 2.0), ps(10.0, 20.0))
        .unwrap();
    assert_eq!(ps_parts(packed), (11.0, 22.0));
    assert_eq!(t.flags(), 0);
}

#[test]
fn test_paired_lanes_share_one_flag_translation() {
    let mut t = TestFpu::legacy();
    // High lane divides by zero, low lane rounds; both conditions land
    // in one cause field.
    let packed = t
        .fpu
        .arith_ps(PC, ArithOp::Div, ps(1.0, 1.0), ps(0.0, 3.0))
        .unwrap();
    let (high, low) = ps_parts(packed);
    assert!(high.is_infinite());
    assert_eq!(low.to_bits(), 0x3eaa_aaab);
    assert_eq!(t.cause(), fcr::FP_DIV0 | fcr::FP_INEXACT);
}

#[test]
fn test_paired_requires_the_format() {
    let mut t = TestFpu::release6();
    assert_eq!(
        t.fpu.arith_ps(PC, ArithOp::Add, 0, 0),
        Err(Trap::ReservedInstruction(PC))
    );
}

proptest! {
    #[test]
    fn prop_paired_lanes_match_scalar_operations(
        low_a in any::<u32>(),
        high_a in any::<u32>(),
        low_b in any::<u32>(),
        high_b in any::<u32>(),
    ) {
        for op in [ArithOp::Add, ArithOp::Sub, ArithOp::Mul, ArithOp::Div] {
            let mut paired = TestFpu::legacy();
            let mut scalar_low = TestFpu::legacy();
            let mut scalar_high = TestFpu::legacy();

            let fs = (u64::from(high_a) << 32) | u64::from(low_a);
            let ft = (u64::from(high_b) << 32) | u64::from(low_b);
            let packed = paired.fpu.arith_ps(PC, op, fs, ft).unwrap();
            let low = scalar_low.fpu.arith_s(PC, op, low_a, low_b).unwrap();
            let high = scalar_high.fpu.arith_s(PC, op, high_a, high_b).unwrap();

            prop_assert_eq!(packed, (u64::from(high) << 32) | u64::from(low));
            prop_assert_eq!(paired.cause(), scalar_low.cause() | scalar_high.cause());
            prop_assert_eq!(paired.flags(), scalar_low.flags() | scalar_high.flags());
        }
    }
}

// ── Square root ─────────────────────────────────────────────────────

#[test]
fn test_sqrt_exact_and_inexact() {
    let mut t = TestFpu::legacy();
    let bits = t.fpu.sqrt_s(PC, 4.0f32.to_bits()).unwrap();
    assert_eq!(bits, 2.0f32.to_bits());
    assert_eq!(t.flags(), 0);

    let bits = t.fpu.sqrt_d(PC, 2.0f64.to_bits()).unwrap();
    assert_eq!(bits, 2.0f64.sqrt().to_bits());
    assert_eq!(t.cause(), fcr::FP_INEXACT);
}

#[test]
fn test_sqrt_of_negative_is_invalid() {
    let mut t = TestFpu::legacy();
    let bits = t.fpu.sqrt_s(PC, (-1.0f32).to_bits()).unwrap();
    assert!(f32::from_bits(bits).is_nan());
    assert_eq!(t.cause(), fcr::FP_INVALID);
}

#[test]
fn test_sqrt_of_negative_zero_is_negative_zero() {
    let mut t = TestFpu::legacy();
    let bits = t.fpu.sqrt_s(PC, (-0.0f32).to_bits()).unwrap();
    assert_eq!(bits, (-0.0f32).to_bits());
    assert_eq!(t.cause(), 0);
}

// ── Sign-bit operations ─────────────────────────────────────────────

#[test]
fn test_abs_and_neg_touch_only_the_sign_bit() {
    let t = TestFpu::legacy();
    assert_eq!(t.fpu.abs_s((-3.5f32).to_bits()), 3.5f32.to_bits());
    assert_eq!(t.fpu.neg_s((-0.0f32).to_bits()), 0.0f32.to_bits());
    assert_eq!(t.fpu.neg_d(1.5f64.to_bits()), (-1.5f64).to_bits());

    // NaNs pass through unquieted and raise nothing.
    assert_eq!(t.fpu.abs_s(SNAN_F32 | 0x8000_0000), SNAN_F32);
    assert_eq!(t.fpu.neg_s(QNAN_F32), QNAN_F32 | 0x8000_0000);
    assert_eq!(t.cause(), 0);
}

#[test]
fn test_paired_sign_operations() {
    let t = TestFpu::legacy();
    let packed = t.fpu.neg_ps(PC, ps(1.5, -2.5)).unwrap();
    assert_eq!(ps_parts(packed), (-1.5, 2.5));

    let packed = t.fpu.abs_ps(PC, ps(-4.0, -0.5)).unwrap();
    assert_eq!(ps_parts(packed), (4.0, 0.5));

    let t = TestFpu::release6();
    assert_eq!(t.fpu.abs_ps(PC, 0), Err(Trap::ReservedInstruction(PC)));
}

// ── Reciprocal and reciprocal square root ───────────────────────────

#[test]
fn test_recip() {
    let mut t = TestFpu::legacy();
    assert_eq!(
        t.fpu.recip_s(PC, 2.0f32.to_bits()).unwrap(),
        0.5f32.to_bits()
    );
    assert_eq!(
        t.fpu.recip_d(PC, 2.0f64.to_bits()).unwrap(),
        0.5f64.to_bits()
    );
    assert_eq!(t.flags(), 0);

    let bits = t.fpu.recip_s(PC, 0.0f32.to_bits()).unwrap();
    assert_eq!(bits, f32::INFINITY.to_bits());
    assert_eq!(t.cause(), fcr::FP_DIV0);
}

#[test]
fn test_rsqrt_divides_after_rooting() {
    let mut t = TestFpu::legacy();
    assert_eq!(
        t.fpu.rsqrt_s(PC, 4.0f32.to_bits()).unwrap(),
        0.5f32.to_bits()
    );

    // Two roundings: the root first, then the divide.
    let bits = t.fpu.rsqrt_s(PC, 2.0f32.to_bits()).unwrap();
    assert_eq!(bits, (1.0f32 / 2.0f32.sqrt()).to_bits());
    assert_eq!(t.cause(), fcr::FP_INEXACT);

    let bits = t.fpu.rsqrt_d(PC, 0.0f64.to_bits()).unwrap();
    assert_eq!(bits, f64::INFINITY.to_bits());
    assert_eq!(t.cause(), fcr::FP_DIV0);

    let bits = t.fpu.rsqrt_s(PC, (-4.0f32).to_bits()).unwrap();
    assert!(f32::from_bits(bits).is_nan());
    assert_eq!(t.cause(), fcr::FP_INVALID);
}

#[test]
fn test_reduced_precision_estimates() {
    let mut t = TestFpu::legacy();
    assert_eq!(
        t.fpu.recip1_s(PC, 2.0f32.to_bits()).unwrap(),
        0.5f32.to_bits()
    );
    assert_eq!(
        t.fpu.rsqrt1_d(PC, 4.0f64.to_bits()).unwrap(),
        0.5f64.to_bits()
    );
}

#[test]
fn test_refinement_steps() {
    let mut t = TestFpu::legacy();
    // recip2 forms -(fs * ft - 1.0) for the Newton iteration.
    let bits = t
        .fpu
        .recip2_s(PC, 0.25f32.to_bits(), 2.0f32.to_bits())
        .unwrap();
    assert_eq!(bits, 0.5f32.to_bits());

    // rsqrt2 halves the residual: -((fs * ft - 1.0) / 2.0).
    let bits = t
        .fpu
        .rsqrt2_s(PC, 0.5f32.to_bits(), 0.5f32.to_bits())
        .unwrap();
    assert_eq!(bits, 0.375f32.to_bits());

    let packed = t
        .fpu
        .recip2_ps(PC, ps(0.25, 0.125), ps(2.0, 4.0))
        .unwrap();
    assert_eq!(ps_parts(packed), (0.5, 0.5));
}

#[test]
fn test_estimates_require_mips3d() {
    let config = Config {
        features: FeatureSupport {
            mips_3d: false,
            ..FeatureSupport::default()
        },
        ..Config::default()
    };
    let mut t = TestFpu::new(&config);
    assert_eq!(
        t.fpu.recip1_s(PC, 0),
        Err(Trap::ReservedInstruction(PC)),
        "capability bit absent"
    );

    let mut t = TestFpu::release6();
    assert_eq!(t.fpu.rsqrt2_d(PC, 0, 0), Err(Trap::ReservedInstruction(PC)));

    // The full-precision forms carry no gate.
    let mut t = TestFpu::release6();
    assert_eq!(
        t.fpu.recip_s(PC, 2.0f32.to_bits()).unwrap(),
        0.5f32.to_bits()
    );
}

#[test]
fn test_paired_estimates_need_the_paired_format_too() {
    // A model may implement the approximation steps without the
    // paired-single format; only the scalar forms remain usable.
    let config = Config {
        formats: FormatSupport {
            paired_single: false,
            ..FormatSupport::default()
        },
        ..Config::default()
    };
    let mut t = TestFpu::new(&config);
    assert_eq!(
        t.fpu.recip1_s(PC, 2.0f32.to_bits()).unwrap(),
        0.5f32.to_bits(),
        "scalar steps stay available"
    );

    let rejected = Err(Trap::ReservedInstruction(PC));
    assert_eq!(t.fpu.recip1_ps(PC, 0), rejected);
    assert_eq!(t.fpu.rsqrt1_ps(PC, 0), rejected);
    assert_eq!(t.fpu.recip2_ps(PC, 0, 0), rejected);
    assert_eq!(t.fpu.rsqrt2_ps(PC, 0, 0), rejected);
    assert_eq!(t.fpu.addr_ps(PC, 0, 0), rejected);
    assert_eq!(t.fpu.mulr_ps(PC, 0, 0), rejected);
}

#[test]
fn test_reduction_sums_within_each_source() {
    let mut t = TestFpu::legacy();
    // The low result reduces fs, the high result reduces ft.
    let packed = t.fpu.addr_ps(PC, ps(3.0, 1.0), ps(8.0, 2.0)).unwrap();
    assert_eq!(ps_parts(packed), (10.0, 4.0));

    let packed = t.fpu.mulr_ps(PC, ps(3.0, 2.0), ps(5.0, 4.0)).unwrap();
    assert_eq!(ps_parts(packed), (20.0, 6.0));
}

// ── Legacy multiply-add (two roundings) ─────────────────────────────

#[test]
fn test_madd_family_values() {
    let mut t = TestFpu::legacy();
    let two = 2.0f32.to_bits();
    let three = 3.0f32.to_bits();
    let four = 4.0f32.to_bits();

    let madd = t.fpu.madd_s(PC, MaddOp::Madd, two, three, four).unwrap();
    assert_eq!(madd, 10.0f32.to_bits());
    let msub = t.fpu.madd_s(PC, MaddOp::Msub, two, three, four).unwrap();
    assert_eq!(msub, 2.0f32.to_bits());
    let nmadd = t.fpu.madd_s(PC, MaddOp::Nmadd, two, three, four).unwrap();
    assert_eq!(nmadd, (-10.0f32).to_bits());
    let nmsub = t.fpu.madd_s(PC, MaddOp::Nmsub, two, three, four).unwrap();
    assert_eq!(nmsub, (-2.0f32).to_bits());
}

#[test]
fn test_madd_rounds_the_product_first() {
    let mut t = TestFpu::legacy();
    // (1 + 2^-23) * (1 - 2^-23) = 1 - 2^-46, which rounds to exactly
    // 1.0 in single precision; the subtraction then cancels to zero.
    let msub = t
        .fpu
        .madd_s(PC, MaddOp::Msub, 0x3f80_0001, 0x3f7f_fffe, 1.0f32.to_bits())
        .unwrap();
    assert_eq!(msub, 0.0f32.to_bits());
    assert_eq!(t.cause(), fcr::FP_INEXACT);
}

#[test]
fn test_madd_paired_and_gating() {
    let mut t = TestFpu::legacy();
    let packed = t
        .fpu
        .madd_ps(PC, MaddOp::Madd, ps(2.0, 1.0), ps(3.0, 5.0), ps(1.0, 2.0))
        .unwrap();
    assert_eq!(ps_parts(packed), (7.0, 7.0));

    let mut t = TestFpu::release6();
    assert_eq!(
        t.fpu.madd_s(PC, MaddOp::Madd, 0, 0, 0),
        Err(Trap::ReservedInstruction(PC))
    );
}

// ── Fused multiply-add (release 6, one rounding) ────────────────────

#[test]
fn test_fused_values() {
    let mut t = TestFpu::release6();
    let maddf = t
        .fpu
        .maddf_s(
            PC,
            FusedOp::Maddf,
            3.0f32.to_bits(),
            4.0f32.to_bits(),
            10.0f32.to_bits(),
        )
        .unwrap();
    assert_eq!(maddf, 22.0f32.to_bits());

    let msubf = t
        .fpu
        .maddf_s(
            PC,
            FusedOp::Msubf,
            3.0f32.to_bits(),
            4.0f32.to_bits(),
            10.0f32.to_bits(),
        )
        .unwrap();
    assert_eq!(msubf, (-2.0f32).to_bits());
}

#[test]
fn test_fused_keeps_the_exact_product() {
    let mut t = TestFpu::release6();
    // Same operands as the unfused cancellation test: with a single
    // rounding the 2^-46 residue survives, and the result is exact.
    let msubf = t
        .fpu
        .maddf_s(PC, FusedOp::Msubf, 0x3f80_0001, 0x3f7f_fffe, 1.0f32.to_bits())
        .unwrap();
    assert_eq!(msubf, 0x2880_0000, "2^-46 exactly");
    assert_eq!(t.cause(), 0);
}

#[test]
fn test_fused_requires_release6() {
    let mut t = TestFpu::legacy();
    assert_eq!(
        t.fpu.maddf_d(PC, FusedOp::Maddf, 0, 0, 0),
        Err(Trap::ReservedInstruction(PC))
    );
}

// ── Min/max (release 6) ─────────────────────────────────────────────

#[test]
fn test_min_max_values() {
    let mut t = TestFpu::release6();
    let three = 3.0f32.to_bits();
    let five = 5.0f32.to_bits();
    assert_eq!(t.fpu.min_max_s(PC, MinMaxOp::Min, three, five).unwrap(), three);
    assert_eq!(t.fpu.min_max_s(PC, MinMaxOp::Max, three, five).unwrap(), five);
    assert_eq!(
        t.fpu
            .min_max_d(PC, MinMaxOp::Min, (-1.0f64).to_bits(), 2.0f64.to_bits())
            .unwrap(),
        (-1.0f64).to_bits()
    );
}

#[test]
fn test_min_max_orders_signed_zeros() {
    let mut t = TestFpu::release6();
    let pz = 0.0f32.to_bits();
    let nz = (-0.0f32).to_bits();
    assert_eq!(t.fpu.min_max_s(PC, MinMaxOp::Min, pz, nz).unwrap(), nz);
    assert_eq!(t.fpu.min_max_s(PC, MinMaxOp::Max, nz, pz).unwrap(), pz);
}

#[test]
fn test_min_max_prefers_the_number_over_quiet_nan() {
    let mut t = TestFpu::release6();
    let two = 2.0f32.to_bits();
    assert_eq!(t.fpu.min_max_s(PC, MinMaxOp::Min, QNAN_F32, two).unwrap(), two);
    assert_eq!(t.fpu.min_max_s(PC, MinMaxOp::Max, two, QNAN_F32).unwrap(), two);
    assert_eq!(t.cause(), 0, "quiet NaN raises nothing here");

    let bits = t
        .fpu
        .min_max_s(PC, MinMaxOp::Min, QNAN_F32, QNAN_F32)
        .unwrap();
    assert_eq!(bits, QNAN_F32, "both NaN propagates a quiet NaN");
}

#[test]
fn test_min_max_signalling_nan_raises_invalid() {
    let mut t = TestFpu::release6();
    let bits = t
        .fpu
        .min_max_s(PC, MinMaxOp::Min, SNAN_F32, 2.0f32.to_bits())
        .unwrap();
    assert_eq!(bits, SNAN_F32 | 0x0040_0000, "propagated and quieted");
    assert_eq!(t.cause(), fcr::FP_INVALID);
}

#[test]
fn test_min_max_by_magnitude() {
    let mut t = TestFpu::release6();
    let neg_three = (-3.0f32).to_bits();
    let two = 2.0f32.to_bits();
    assert_eq!(
        t.fpu.min_max_s(PC, MinMaxOp::Mina, neg_three, two).unwrap(),
        two
    );
    assert_eq!(
        t.fpu.min_max_s(PC, MinMaxOp::Maxa, neg_three, two).unwrap(),
        neg_three
    );

    // Equal magnitudes fall back to the signed order.
    let neg_two = (-2.0f32).to_bits();
    assert_eq!(
        t.fpu.min_max_s(PC, MinMaxOp::Maxa, neg_two, two).unwrap(),
        two
    );
    assert_eq!(
        t.fpu.min_max_s(PC, MinMaxOp::Mina, neg_two, two).unwrap(),
        neg_two
    );
}

#[test]
fn test_min_max_requires_release6() {
    let mut t = TestFpu::legacy();
    assert_eq!(
        t.fpu.min_max_s(PC, MinMaxOp::Min, 0, 0),
        Err(Trap::ReservedInstruction(PC))
    );
}

// ── Round to integral (release 6) ───────────────────────────────────

#[test]
fn test_rint_follows_the_register_mode() {
    let mut t = TestFpu::release6();
    assert_eq!(
        t.fpu.rint_s(PC, 2.5f32.to_bits()).unwrap(),
        2.0f32.to_bits(),
        "ties to even"
    );
    assert_eq!(
        t.fpu.rint_s(PC, 3.5f32.to_bits()).unwrap(),
        4.0f32.to_bits()
    );

    let mut t = TestFpu::release6().with_rounding(RoundingMode::Rp);
    assert_eq!(
        t.fpu.rint_s(PC, 2.1f32.to_bits()).unwrap(),
        3.0f32.to_bits()
    );

    let mut t = TestFpu::release6().with_rounding(RoundingMode::Rm);
    assert_eq!(
        t.fpu.rint_d(PC, (-2.1f64).to_bits()).unwrap(),
        (-3.0f64).to_bits()
    );
}

#[test]
fn test_rint_preserves_the_sign_of_a_rounded_away_half() {
    let mut t = TestFpu::release6();
    let bits = t.fpu.rint_d(PC, (-0.5f64).to_bits()).unwrap();
    assert_eq!(bits, (-0.0f64).to_bits());
}

#[test]
fn test_rint_signalling_nan_and_gate() {
    let mut t = TestFpu::release6();
    let bits = t.fpu.rint_s(PC, SNAN_F32).unwrap();
    assert!(f32::from_bits(bits).is_nan());
    assert_eq!(t.cause(), fcr::FP_INVALID);

    let mut t = TestFpu::legacy();
    assert_eq!(t.fpu.rint_s(PC, 0), Err(Trap::ReservedInstruction(PC)));
}
