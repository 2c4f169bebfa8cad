//! # Reference Tables
//!
//! Static ACI 211.1 lookup data used by the mix design calculator. The tables
//! are plain immutable values; [`ACI_211_1`] bundles the published values and
//! is what [`compute`](crate::calculations::mix_design::compute) uses.
//! Alternate tables can be passed by reference to
//! [`compute_with_tables`](crate::calculations::mix_design::compute_with_tables).
//!
//! ## Tables
//!
//! - [`slump`] - Recommended slumps by construction type (Table 6.3.1)
//! - [`water_air`] - Mixing water and air content (Table 6.3.3)
//! - [`water_cement`] - Water-cement ratio vs. strength (Table 6.3.4(a))
//! - [`coarse_aggregate`] - Coarse aggregate bulk volume (Table 6.3.6)
//!
//! ## Example
//!
//! ```rust
//! use mix_core::tables::ACI_211_1;
//!
//! let idx = ACI_211_1.size_index(0.75).unwrap();
//! assert_eq!(idx, 2);
//! assert!(ACI_211_1.size_index(0.8).is_err());
//! ```

pub mod coarse_aggregate;
pub mod slump;
pub mod water_air;
pub mod water_cement;

pub use coarse_aggregate::{CoarseAggregateTable, COARSE_AGGREGATE_TABLE};
pub use slump::{recommended_slump, RecommendedSlump, RECOMMENDED_SLUMPS};
pub use water_air::{AirByExposure, SlumpRange, WaterAirTable, WaterRows, WATER_AIR_TABLE};
pub use water_cement::{WaterCementTable, WATER_CEMENT_TABLE};

use crate::errors::{CalcError, CalcResult};

pub const AGGREGATE_SIZE_COUNT: usize = 8;

/// Nominal maximum aggregate sizes (in): 3/8, 1/2, 3/4, 1, 1-1/2, 2, 3, 6
pub const AGGREGATE_SIZES_IN: [f64; AGGREGATE_SIZE_COUNT] = [0.375, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 6.0];

/// Complete set of lookup tables for one calculation
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    /// Column headings shared by the water/air and coarse aggregate tables
    pub aggregate_sizes_in: [f64; AGGREGATE_SIZE_COUNT],
    pub water_air: WaterAirTable,
    pub water_cement: WaterCementTable,
    pub coarse_aggregate: CoarseAggregateTable,
}

/// Published ACI 211.1 values
pub static ACI_211_1: ReferenceTables = ReferenceTables {
    aggregate_sizes_in: AGGREGATE_SIZES_IN,
    water_air: WATER_AIR_TABLE,
    water_cement: WATER_CEMENT_TABLE,
    coarse_aggregate: COARSE_AGGREGATE_TABLE,
};

impl ReferenceTables {
    /// Column index of a nominal maximum aggregate size.
    ///
    /// The size must match a tabulated size exactly; sizes are never
    /// interpolated.
    pub fn size_index(&self, max_agg_size_in: f64) -> CalcResult<usize> {
        self.aggregate_sizes_in
            .iter()
            .position(|&s| s == max_agg_size_in)
            .ok_or_else(|| {
                let sizes: Vec<String> = self.aggregate_sizes_in.iter().map(|s| s.to_string()).collect();
                CalcError::invalid_input(
                    "max_agg_size_in",
                    max_agg_size_in.to_string(),
                    format!("Aggregate size must be one of: {} in", sizes.join(", ")),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_size_has_an_index() {
        for (i, size) in AGGREGATE_SIZES_IN.iter().enumerate() {
            assert_eq!(ACI_211_1.size_index(*size).unwrap(), i);
        }
    }

    #[test]
    fn test_untabulated_size_rejected() {
        let err = ACI_211_1.size_index(1.25).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "max_agg_size_in"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(ACI_211_1.size_index(f64::NAN).is_err());
    }
}
