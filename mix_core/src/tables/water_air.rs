//! Mixing Water and Air Content (ACI 211.1 Table 6.3.3)
//!
//! Approximate mixing water (lb/yd³) and air content (%) for each slump range
//! and nominal maximum aggregate size. Columns follow
//! [`AGGREGATE_SIZES_IN`](super::AGGREGATE_SIZES_IN). `None` marks a
//! combination the table does not recommend.

use serde::{Deserialize, Serialize};

use crate::concrete::{ConcreteType, ExposureCondition};
use crate::errors::{CalcError, CalcResult};

use super::AGGREGATE_SIZE_COUNT;

/// Slump bucket selecting a row of the water table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlumpRange {
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-4")]
    ThreeToFour,
    #[serde(rename = "6-7")]
    SixToSeven,
}

impl SlumpRange {
    /// Bucket a slump by its upper bound: ≤ 2 in, ≤ 4 in, else 6-7 in
    pub fn from_slump_max(slump_max_in: f64) -> Self {
        if slump_max_in <= 2.0 {
            SlumpRange::OneToTwo
        } else if slump_max_in <= 4.0 {
            SlumpRange::ThreeToFour
        } else {
            SlumpRange::SixToSeven
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlumpRange::OneToTwo => "1-2",
            SlumpRange::ThreeToFour => "3-4",
            SlumpRange::SixToSeven => "6-7",
        }
    }
}

impl std::fmt::Display for SlumpRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of water values (lb/yd³), one entry per aggregate size
pub type WaterRow = [Option<f64>; AGGREGATE_SIZE_COUNT];

/// Water rows for one concrete type
#[derive(Debug, Clone, PartialEq)]
pub struct WaterRows {
    pub slump_1_2: WaterRow,
    pub slump_3_4: WaterRow,
    pub slump_6_7: WaterRow,
}

impl WaterRows {
    fn row(&self, slump: SlumpRange) -> &WaterRow {
        match slump {
            SlumpRange::OneToTwo => &self.slump_1_2,
            SlumpRange::ThreeToFour => &self.slump_3_4,
            SlumpRange::SixToSeven => &self.slump_6_7,
        }
    }
}

/// Recommended air content (%) for air-entrained concrete by exposure
#[derive(Debug, Clone, PartialEq)]
pub struct AirByExposure {
    pub mild: [f64; AGGREGATE_SIZE_COUNT],
    pub moderate: [f64; AGGREGATE_SIZE_COUNT],
    pub severe: [f64; AGGREGATE_SIZE_COUNT],
}

/// Mixing water and air content table
#[derive(Debug, Clone, PartialEq)]
pub struct WaterAirTable {
    pub non_air_entrained: WaterRows,
    pub air_entrained: WaterRows,
    /// Entrapped air (%) in non-air-entrained concrete
    pub entrapped_air_pct: [f64; AGGREGATE_SIZE_COUNT],
    pub entrained_air_pct: AirByExposure,
}

impl WaterAirTable {
    /// Design mixing water (lb/yd³) for a concrete type, slump bucket and size index.
    ///
    /// # Errors
    ///
    /// `UnsupportedCombination` when the entry is not recommended (e.g. 6-7 in
    /// slump with 6 in aggregate).
    pub fn design_water_lb(
        &self,
        concrete_type: ConcreteType,
        slump: SlumpRange,
        size_index: usize,
    ) -> CalcResult<f64> {
        let rows = match concrete_type {
            ConcreteType::NonAirEntrained => &self.non_air_entrained,
            ConcreteType::AirEntrained => &self.air_entrained,
        };

        let entry = rows.row(slump).get(size_index).ok_or_else(|| CalcError::Internal {
            message: format!("Aggregate size index {} outside water table", size_index),
        })?;

        entry.ok_or_else(|| {
            CalcError::unsupported(
                "mixing water",
                format!(
                    "{} concrete with {} in slump is not recommended for aggregate size index {}",
                    concrete_type, slump, size_index
                ),
            )
        })
    }

    /// Target air content (%).
    ///
    /// Non-air-entrained concrete uses entrapped air by size only; air-entrained
    /// concrete also depends on exposure.
    pub fn air_content_pct(
        &self,
        concrete_type: ConcreteType,
        exposure: ExposureCondition,
        size_index: usize,
    ) -> CalcResult<f64> {
        let row = match concrete_type {
            ConcreteType::NonAirEntrained => &self.entrapped_air_pct,
            ConcreteType::AirEntrained => match exposure {
                ExposureCondition::Mild => &self.entrained_air_pct.mild,
                ExposureCondition::Moderate => &self.entrained_air_pct.moderate,
                ExposureCondition::Severe => &self.entrained_air_pct.severe,
            },
        };

        row.get(size_index).copied().ok_or_else(|| CalcError::Internal {
            message: format!("Aggregate size index {} outside air table", size_index),
        })
    }
}

/// ACI 211.1 Table 6.3.3 values
pub const WATER_AIR_TABLE: WaterAirTable = WaterAirTable {
    non_air_entrained: WaterRows {
        slump_1_2: [Some(350.0), Some(335.0), Some(315.0), Some(300.0), Some(275.0), Some(260.0), Some(220.0), Some(190.0)],
        slump_3_4: [Some(385.0), Some(365.0), Some(340.0), Some(325.0), Some(300.0), Some(285.0), Some(245.0), Some(210.0)],
        slump_6_7: [Some(410.0), Some(385.0), Some(360.0), Some(340.0), Some(315.0), Some(300.0), Some(270.0), None],
    },
    air_entrained: WaterRows {
        slump_1_2: [Some(305.0), Some(295.0), Some(280.0), Some(270.0), Some(250.0), Some(240.0), Some(225.0), Some(180.0)],
        slump_3_4: [Some(340.0), Some(325.0), Some(305.0), Some(295.0), Some(275.0), Some(265.0), Some(250.0), Some(200.0)],
        slump_6_7: [Some(365.0), Some(345.0), Some(325.0), Some(310.0), Some(290.0), Some(280.0), Some(270.0), None],
    },
    entrapped_air_pct: [3.0, 2.5, 2.0, 1.5, 1.0, 0.5, 0.3, 0.2],
    entrained_air_pct: AirByExposure {
        mild: [4.5, 4.0, 3.5, 3.0, 2.5, 2.0, 1.5, 1.0],
        moderate: [6.0, 5.5, 5.0, 4.5, 4.5, 4.0, 3.5, 3.0],
        severe: [7.5, 7.0, 6.0, 6.0, 5.5, 5.0, 4.5, 4.0],
    },
};
