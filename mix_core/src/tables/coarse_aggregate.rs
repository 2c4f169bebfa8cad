//! Volume of Coarse Aggregate per Unit Volume of Concrete (ACI 211.1 Table 6.3.6)
//!
//! Dry-rodded bulk volume of coarse aggregate (yd³ per yd³ of concrete) by
//! nominal maximum aggregate size (rows) and fine-aggregate fineness modulus
//! (columns).

use crate::equations::{bracket, linear_interpolate, Bracket};
use crate::errors::{CalcError, CalcResult};

use super::AGGREGATE_SIZE_COUNT;

pub const FINENESS_MODULUS_COUNT: usize = 4;

/// Coarse aggregate bulk volume table
#[derive(Debug, Clone, PartialEq)]
pub struct CoarseAggregateTable {
    pub fineness_modulus: [f64; FINENESS_MODULUS_COUNT],
    pub bulk_volume: [[f64; FINENESS_MODULUS_COUNT]; AGGREGATE_SIZE_COUNT],
}

impl CoarseAggregateTable {
    /// Smallest and largest tabulated fineness modulus
    pub fn fineness_modulus_range(&self) -> (f64, f64) {
        (self.fineness_modulus[0], self.fineness_modulus[FINENESS_MODULUS_COUNT - 1])
    }

    /// Bulk volume fraction for a size index and fineness modulus.
    ///
    /// A fineness modulus on a tabulated column is read directly; anything
    /// between two columns is interpolated linearly.
    pub fn bulk_volume_fraction(&self, size_index: usize, fineness_modulus: f64) -> CalcResult<f64> {
        let row = self.bulk_volume.get(size_index).ok_or_else(|| CalcError::Internal {
            message: format!("Aggregate size index {} outside coarse aggregate table", size_index),
        })?;
        let fm = &self.fineness_modulus;

        match bracket(fm, fineness_modulus) {
            Bracket::Exact(i) => Ok(row[i]),
            Bracket::Between(i) => Ok(linear_interpolate(fineness_modulus, fm[i], fm[i + 1], row[i], row[i + 1])),
            Bracket::Below | Bracket::Above => {
                let (min, max) = self.fineness_modulus_range();
                Err(CalcError::invalid_input(
                    "fa_fineness_modulus",
                    fineness_modulus.to_string(),
                    format!("Fineness modulus must be between {} and {}", min, max),
                ))
            }
        }
    }
}

/// ACI 211.1 Table 6.3.6 values
pub const COARSE_AGGREGATE_TABLE: CoarseAggregateTable = CoarseAggregateTable {
    fineness_modulus: [2.4, 2.6, 2.8, 3.0],
    bulk_volume: [
        [0.50, 0.48, 0.46, 0.44],
        [0.59, 0.57, 0.55, 0.53],
        [0.66, 0.64, 0.62, 0.60],
        [0.71, 0.69, 0.67, 0.65],
        [0.75, 0.73, 0.71, 0.69],
        [0.78, 0.76, 0.74, 0.72],
        [0.82, 0.80, 0.78, 0.76],
        [0.87, 0.85, 0.83, 0.81],
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_values() {
        let t = &COARSE_AGGREGATE_TABLE;
        assert_eq!(t.bulk_volume_fraction(2, 2.8).unwrap(), 0.62);
        assert_eq!(t.bulk_volume_fraction(0, 2.4).unwrap(), 0.50);
        assert_eq!(t.bulk_volume_fraction(7, 3.0).unwrap(), 0.81);
    }

    #[test]
    fn test_interpolated_value() {
        let v = COARSE_AGGREGATE_TABLE.bulk_volume_fraction(2, 2.7).unwrap();
        assert!((v - 0.63).abs() < 1e-9);
    }

    #[test]
    fn test_fineness_modulus_outside_table() {
        let err = COARSE_AGGREGATE_TABLE.bulk_volume_fraction(2, 3.3).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(COARSE_AGGREGATE_TABLE.bulk_volume_fraction(2, 2.2).is_err());
    }
}
