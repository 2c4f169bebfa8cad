//! Recommended Slumps for Various Types of Construction (ACI 211.1 Table 6.3.1)
//!
//! Informational only: the calculator takes whatever slump range it is
//! given and never checks it against this table.

use serde::Serialize;

/// A recommended slump range for one type of construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendedSlump {
    pub construction: &'static str,
    pub min_in: f64,
    pub max_in: f64,
}

impl RecommendedSlump {
    /// Whether a slump range lies entirely within the recommendation
    pub fn admits(&self, slump_min_in: f64, slump_max_in: f64) -> bool {
        slump_min_in >= self.min_in && slump_max_in <= self.max_in
    }
}

pub const RECOMMENDED_SLUMPS: [RecommendedSlump; 6] = [
    RecommendedSlump { construction: "Reinforced foundation walls and footings", min_in: 1.0, max_in: 3.0 },
    RecommendedSlump { construction: "Plain footings, caissons, and substructure walls", min_in: 1.0, max_in: 3.0 },
    RecommendedSlump { construction: "Beams and reinforced walls", min_in: 1.0, max_in: 4.0 },
    RecommendedSlump { construction: "Building columns", min_in: 1.0, max_in: 4.0 },
    RecommendedSlump { construction: "Pavements and slabs", min_in: 1.0, max_in: 3.0 },
    RecommendedSlump { construction: "Mass concrete", min_in: 1.0, max_in: 3.0 },
];

/// Look up the recommendation for a construction type (case-insensitive)
pub fn recommended_slump(construction: &str) -> Option<&'static RecommendedSlump> {
    RECOMMENDED_SLUMPS
        .iter()
        .find(|s| s.construction.eq_ignore_ascii_case(construction.trim()))
}
