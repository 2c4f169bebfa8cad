//! # Proportioning Formulas
//!
//! Arithmetic of the ACI 211.1 absolute-volume method. Every function works
//! per cubic yard of concrete.
//!
//! ## Notation
//!
//! - `W` = weight (lb/yd³)
//! - `SG` = bulk specific gravity (oven-dry basis for aggregates)
//! - `γw` = unit weight of water, 62.4 pcf
//! - `V` = absolute volume (ft³ per yd³ of concrete)
//!
//! ## References
//!
//! - ACI 211.1-91 Section 6.3 (Procedure) and Appendix 1 (Example 1)

use crate::units::{Percent, CUBIC_FEET_PER_CUBIC_YARD, UNIT_WEIGHT_WATER_PCF};

/// Cement content from design water and water-cement ratio
///
/// # Formula
/// W_c = W_w / (w/c)
///
/// # Example
/// ```rust
/// use mix_core::equations::proportioning::cement_content_lb;
///
/// let cement = cement_content_lb(315.0, 0.57);
/// assert!((cement - 552.6).abs() < 0.1);
/// ```
#[inline]
pub fn cement_content_lb(water_lb: f64, wc_ratio: f64) -> f64 {
    water_lb / wc_ratio
}

/// Oven-dry coarse aggregate weight from its bulk volume fraction
///
/// # Formula
/// W_ca = b/b₀ × 27 × DRUW
///
/// where b/b₀ is the dry-rodded volume of coarse aggregate per unit volume
/// of concrete.
#[inline]
pub fn coarse_aggregate_od_lb(bulk_volume_fraction: f64, druw_pcf: f64) -> f64 {
    bulk_volume_fraction * CUBIC_FEET_PER_CUBIC_YARD * druw_pcf
}

/// Absolute (solid) volume occupied by a weight of material
///
/// # Formula
/// V = W / (SG × γw)
///
/// Water itself uses SG = 1.0.
#[inline]
pub fn absolute_volume_ft3(weight_lb: f64, specific_gravity: f64) -> f64 {
    weight_lb / (specific_gravity * UNIT_WEIGHT_WATER_PCF)
}

/// Volume of entrained/entrapped air in one cubic yard
///
/// # Formula
/// V_air = 27 × air%/100
#[inline]
pub fn air_volume_ft3(air: Percent) -> f64 {
    CUBIC_FEET_PER_CUBIC_YARD * air.fraction()
}

/// Volume left for fine aggregate after the other four components
///
/// # Formula
/// V_fa = 27 − (V_w + V_c + V_air + V_ca)
///
/// # Example
/// ```rust
/// use mix_core::equations::proportioning::remaining_volume_ft3;
///
/// let v_fa = remaining_volume_ft3(&[5.05, 2.81, 0.54, 10.01]);
/// assert!((v_fa - 8.59).abs() < 1e-9);
/// ```
pub fn remaining_volume_ft3(component_volumes_ft3: &[f64]) -> f64 {
    CUBIC_FEET_PER_CUBIC_YARD - component_volumes_ft3.iter().sum::<f64>()
}

/// Weight of a material filling an absolute volume
///
/// # Formula
/// W = V × SG × γw
#[inline]
pub fn weight_from_volume_lb(volume_ft3: f64, specific_gravity: f64) -> f64 {
    volume_ft3 * (specific_gravity * UNIT_WEIGHT_WATER_PCF)
}

/// Total moisture content (absorbed plus surface) of an aggregate
#[inline]
pub fn total_moisture(absorption: Percent, surface_moisture: Percent) -> Percent {
    absorption + surface_moisture
}

/// Stockpile (wet) weight of an aggregate from its oven-dry weight
///
/// # Formula
/// W_stock = W_od × (1 + MC_total)
#[inline]
pub fn stockpile_weight_lb(od_weight_lb: f64, total_moisture: Percent) -> f64 {
    od_weight_lb * (1.0 + total_moisture.fraction())
}

/// Free water an aggregate brings to the batch
///
/// Only surface moisture counts; absorbed water is held inside the particles.
///
/// # Formula
/// W_free = W_od × MC_surface
#[inline]
pub fn free_water_lb(od_weight_lb: f64, surface_moisture: Percent) -> f64 {
    od_weight_lb * surface_moisture.fraction()
}

/// Unit weight of fresh concrete from the batch weights of one cubic yard
///
/// # Formula
/// γ = ΣW / 27
#[inline]
pub fn unit_weight_pcf(total_weight_lb: f64) -> f64 {
    total_weight_lb / CUBIC_FEET_PER_CUBIC_YARD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coarse_aggregate_od() {
        // 0.62 yd³/yd³ of 100 pcf rodded stone
        let w = coarse_aggregate_od_lb(0.62, 100.0);
        assert!((w - 1674.0).abs() < 1e-9);
    }

    #[test]
    fn test_absolute_volume() {
        let v_water = absolute_volume_ft3(315.0, 1.0);
        assert!((v_water - 5.048).abs() < 0.001);

        let v_cement = absolute_volume_ft3(552.63, 3.15);
        assert!((v_cement - 2.8115).abs() < 0.0001);
    }

    #[test]
    fn test_air_volume() {
        assert!((air_volume_ft3(Percent(2.0)) - 0.54).abs() < 1e-12);
    }

    #[test]
    fn test_volume_weight_inverse() {
        let v = absolute_volume_ft3(1415.0, 2.64);
        let w = weight_from_volume_lb(v, 2.64);
        assert!((w - 1415.0).abs() < 1e-9);
    }

    #[test]
    fn test_stockpile_and_free_water() {
        let mc = total_moisture(Percent(0.5), Percent(2.0));
        assert!((stockpile_weight_lb(1674.0, mc) - 1715.85).abs() < 1e-9);
        assert!((free_water_lb(1674.0, Percent(2.0)) - 33.48).abs() < 1e-9);
    }

    #[test]
    fn test_negative_surface_moisture_absorbs_water() {
        // Aggregate drier than SSD pulls water out of the mix
        assert!(free_water_lb(1500.0, Percent(-0.5)) < 0.0);
    }

    #[test]
    fn test_unit_weight() {
        assert!((unit_weight_pcf(3975.0) - 147.222).abs() < 0.001);
    }
}
