//! Property-based tests for the mix design calculator.
//!
//! Uses proptest to generate valid input sets across the table domains, then
//! verifies the structural invariants of every result.

use mix_core::tables::{AGGREGATE_SIZES_IN, ACI_211_1};
use mix_core::{compute, ConcreteType, ExposureCondition, MixInputs};
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_concrete_type() -> impl Strategy<Value = ConcreteType> {
    prop_oneof![Just(ConcreteType::NonAirEntrained), Just(ConcreteType::AirEntrained)]
}

fn arb_exposure() -> impl Strategy<Value = ExposureCondition> {
    prop_oneof![
        Just(ExposureCondition::Mild),
        Just(ExposureCondition::Moderate),
        Just(ExposureCondition::Severe),
    ]
}

/// Aggregate sizes below 6 in have a water entry in every slump row.
fn arb_size() -> impl Strategy<Value = f64> {
    (0..AGGREGATE_SIZES_IN.len() - 1).prop_map(|i| AGGREGATE_SIZES_IN[i])
}

/// Valid inputs. Air-entrained strength stays within the tabulated 6000 psi.
fn arb_inputs() -> impl Strategy<Value = MixInputs> {
    (
        arb_concrete_type(),
        arb_exposure(),
        1000.0..6000.0f64,
        (0.0..2.0f64, 1.0..7.0f64),
        arb_size(),
        (2.5..2.9f64, 0.0..3.0f64, 80.0..115.0f64, -0.2..4.0f64),
        (2.5..2.8f64, 0.0..3.0f64, 2.4..=3.0f64, 0.0..8.0f64),
    )
        .prop_map(
            |(concrete_type, exposure, strength_psi, (slump_min_in, slump_span), max_agg_size_in, ca, fa)| {
                MixInputs {
                    strength_psi,
                    concrete_type,
                    exposure,
                    slump_min_in,
                    slump_max_in: slump_min_in + slump_span,
                    max_agg_size_in,
                    cement_sg: 3.15,
                    ca_sg: ca.0,
                    ca_absorption_pct: ca.1,
                    ca_druw_pcf: ca.2,
                    ca_moisture_pct: ca.3.max(-ca.1),
                    fa_sg: fa.0,
                    fa_absorption_pct: fa.1,
                    fa_fineness_modulus: fa.2,
                    fa_moisture_pct: fa.3,
                    batch_volume_yd3: 1.0,
                }
            },
        )
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn nine_steps_in_order(inputs in arb_inputs()) {
        let result = compute(&inputs).unwrap();
        let ids: Vec<u8> = result.steps.iter().map(|s| s.id).collect();
        prop_assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn unit_weight_identity(inputs in arb_inputs()) {
        let r = compute(&inputs).unwrap();
        let expected = (r.water_lb + r.cement_lb + r.coarse_agg_lb + r.fine_agg_lb) / 27.0;
        prop_assert!((r.unit_weight_pcf - expected).abs() < 1e-9);
    }

    #[test]
    fn idempotent(inputs in arb_inputs()) {
        prop_assert_eq!(compute(&inputs).unwrap(), compute(&inputs).unwrap());
    }

    #[test]
    fn severe_exposure_caps_wc(inputs in arb_inputs()) {
        let inputs = MixInputs { exposure: ExposureCondition::Severe, ..inputs };
        let r = compute(&inputs).unwrap();
        prop_assert!(r.water_cement_ratio <= 0.45);
    }

    #[test]
    fn wc_non_increasing_with_strength(
        inputs in arb_inputs(),
        low in 1000.0..6000.0f64,
        delta in 0.0..1000.0f64,
    ) {
        let high = (low + delta).min(6000.0);
        let at = |strength_psi: f64| {
            compute(&MixInputs { strength_psi, ..inputs.clone() }).unwrap().water_cement_ratio
        };
        prop_assert!(at(high) <= at(low) + 1e-12);
    }

    #[test]
    fn strength_ratio_clamps_below_lowest(strength in 1.0..=2000.0f64) {
        let wc = &ACI_211_1.water_cement;
        prop_assert_eq!(wc.strength_wc_ratio(ConcreteType::NonAirEntrained, strength).unwrap(), 0.82);
        prop_assert_eq!(wc.strength_wc_ratio(ConcreteType::AirEntrained, strength).unwrap(), 0.74);
    }

    #[test]
    fn strength_ratio_clamps_above_highest(strength in 7000.0..20000.0f64) {
        let wc = &ACI_211_1.water_cement;
        prop_assert_eq!(wc.strength_wc_ratio(ConcreteType::NonAirEntrained, strength).unwrap(), 0.33);
        // The highest air-entrained entry is not tabulated
        prop_assert!(wc.strength_wc_ratio(ConcreteType::AirEntrained, strength).is_err());
    }

    #[test]
    fn stockpile_never_below_oven_dry(inputs in arb_inputs()) {
        // Total moisture is kept non-negative by the generator
        let r = compute(&inputs).unwrap();
        let ca_od: f64 = r.step(6).unwrap().value.trim_end_matches(" lb/yd³").parse().unwrap();
        prop_assert!(r.coarse_agg_lb + 0.05 >= ca_od);
    }
}
