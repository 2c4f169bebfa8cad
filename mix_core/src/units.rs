//! # Unit Types
//!
//! Lightweight wrappers and constants for the fixed imperial unit set used by
//! the ACI 211.1 tables. Quantities on `MixInputs`/`MixResult` stay plain
//! `f64` (suffixes like `_lb`, `_pcf`, `_pct` carry the unit) so JSON stays
//! clean; the wrappers below are for the handful of conversions the
//! calculator performs.
//!
//! ## Units in use
//!
//! - Weight: pounds (lb), per cubic yard of concrete (lb/yd³)
//! - Density: pounds per cubic foot (pcf)
//! - Volume: cubic yards (yd³), cubic feet (ft³)
//! - Strength: pounds per square inch (psi)
//! - Slump and aggregate size: inches (in)
//!
//! ## Example
//!
//! ```rust
//! use mix_core::units::{CubicFeet, CubicYards, Percent};
//!
//! let batch = CubicYards(2.0);
//! let ft3: CubicFeet = batch.into();
//! assert_eq!(ft3.0, 54.0);
//!
//! assert_eq!(Percent(5.0).fraction(), 0.05);
//! ```

use serde::{Deserialize, Serialize};

/// Unit weight of water (pcf), used to turn specific gravity into density
pub const UNIT_WEIGHT_WATER_PCF: f64 = 62.4;

/// Cubic feet in one cubic yard
pub const CUBIC_FEET_PER_CUBIC_YARD: f64 = 27.0;

/// Volume in cubic yards
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicYards(pub f64);

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicFeet(pub f64);

impl From<CubicYards> for CubicFeet {
    fn from(yd3: CubicYards) -> Self {
        CubicFeet(yd3.0 * CUBIC_FEET_PER_CUBIC_YARD)
    }
}

impl From<CubicFeet> for CubicYards {
    fn from(ft3: CubicFeet) -> Self {
        CubicYards(ft3.0 / CUBIC_FEET_PER_CUBIC_YARD)
    }
}

/// A percentage as entered by the user (5.0 means 5 %)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Decimal fraction (5 % -> 0.05)
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl std::ops::Add for Percent {
    type Output = Percent;

    fn add(self, rhs: Percent) -> Percent {
        Percent(self.0 + rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_conversions() {
        let ft3: CubicFeet = CubicYards(1.0).into();
        assert_eq!(ft3.0, 27.0);

        let yd3: CubicYards = CubicFeet(13.5).into();
        assert!((yd3.0 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_percent() {
        let total = Percent(0.7) + Percent(5.0);
        assert!((total.0 - 5.7).abs() < 1e-12);
        assert!((total.fraction() - 0.057).abs() < 1e-12);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&CubicYards(3.5)).unwrap();
        assert_eq!(json, "3.5");
    }
}
