//! Water-Cement Ratio vs. Compressive Strength (ACI 211.1 Table 6.3.4(a))
//!
//! 28-day strength (psi) against w/c by weight, one curve per concrete type.
//! The 7000 psi air-entrained entry is not tabulated and is stored as `None`.

use crate::concrete::ConcreteType;
use crate::equations::{bracket, linear_interpolate, Bracket};
use crate::errors::{CalcError, CalcResult};

pub const STRENGTH_POINT_COUNT: usize = 6;

/// Water-cement ratio curves
#[derive(Debug, Clone, PartialEq)]
pub struct WaterCementTable {
    pub strength_psi: [f64; STRENGTH_POINT_COUNT],
    pub non_air_entrained: [Option<f64>; STRENGTH_POINT_COUNT],
    pub air_entrained: [Option<f64>; STRENGTH_POINT_COUNT],
}

impl WaterCementTable {
    pub fn curve(&self, concrete_type: ConcreteType) -> &[Option<f64>; STRENGTH_POINT_COUNT] {
        match concrete_type {
            ConcreteType::NonAirEntrained => &self.non_air_entrained,
            ConcreteType::AirEntrained => &self.air_entrained,
        }
    }

    /// Strength-governed w/c.
    ///
    /// Clamps to the first ratio at or below the lowest tabulated strength and
    /// to the last ratio at or above the highest; interpolates linearly between.
    ///
    /// # Errors
    ///
    /// `UnsupportedCombination` when the result depends on an untabulated
    /// entry (air-entrained concrete above 6000 psi).
    pub fn strength_wc_ratio(&self, concrete_type: ConcreteType, strength_psi: f64) -> CalcResult<f64> {
        let ratios = self.curve(concrete_type);
        let psi = &self.strength_psi;
        let last = STRENGTH_POINT_COUNT - 1;

        let not_tabulated = || {
            CalcError::unsupported(
                "water-cement ratio",
                format!(
                    "{} psi is beyond the tabulated range for {} concrete",
                    strength_psi, concrete_type
                ),
            )
        };

        match bracket(psi, strength_psi) {
            Bracket::Below => ratios[0].ok_or_else(not_tabulated),
            Bracket::Above => ratios[last].ok_or_else(not_tabulated),
            Bracket::Exact(i) => ratios[i].ok_or_else(not_tabulated),
            Bracket::Between(i) => {
                let y0 = ratios[i].ok_or_else(not_tabulated)?;
                let y1 = ratios[i + 1].ok_or_else(not_tabulated)?;
                Ok(linear_interpolate(strength_psi, psi[i], psi[i + 1], y0, y1))
            }
        }
    }
}

/// ACI 211.1 Table 6.3.4(a) values
pub const WATER_CEMENT_TABLE: WaterCementTable = WaterCementTable {
    strength_psi: [2000.0, 3000.0, 4000.0, 5000.0, 6000.0, 7000.0],
    non_air_entrained: [Some(0.82), Some(0.68), Some(0.57), Some(0.48), Some(0.41), Some(0.33)],
    air_entrained: [Some(0.74), Some(0.59), Some(0.48), Some(0.40), Some(0.32), None],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabulated_points() {
        let t = &WATER_CEMENT_TABLE;
        assert_eq!(t.strength_wc_ratio(ConcreteType::NonAirEntrained, 4000.0).unwrap(), 0.57);
        assert_eq!(t.strength_wc_ratio(ConcreteType::AirEntrained, 6000.0).unwrap(), 0.32);
    }

    #[test]
    fn test_interpolation() {
        let wc = WATER_CEMENT_TABLE
            .strength_wc_ratio(ConcreteType::NonAirEntrained, 4500.0)
            .unwrap();
        assert!((wc - 0.525).abs() < 1e-9);

        let wc = WATER_CEMENT_TABLE
            .strength_wc_ratio(ConcreteType::AirEntrained, 3500.0)
            .unwrap();
        assert!((wc - 0.535).abs() < 1e-9);
    }

    #[test]
    fn test_clamping() {
        let t = &WATER_CEMENT_TABLE;
        assert_eq!(t.strength_wc_ratio(ConcreteType::NonAirEntrained, 1500.0).unwrap(), 0.82);
        assert_eq!(t.strength_wc_ratio(ConcreteType::AirEntrained, 500.0).unwrap(), 0.74);
        assert_eq!(t.strength_wc_ratio(ConcreteType::NonAirEntrained, 9000.0).unwrap(), 0.33);
    }

    #[test]
    fn test_air_entrained_high_strength_not_tabulated() {
        let t = &WATER_CEMENT_TABLE;
        for psi in [6500.0, 7000.0, 8000.0] {
            let err = t.strength_wc_ratio(ConcreteType::AirEntrained, psi).unwrap_err();
            assert_eq!(err.error_code(), "UNSUPPORTED_COMBINATION");
        }
    }
}
