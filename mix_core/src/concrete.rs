//! Concrete Classification
//!
//! Closed enumerations for the two categorical mix inputs: whether air is
//! intentionally entrained, and the exposure class the concrete will see in
//! service. Table lookups dispatch on these with exhaustive `match`.

use serde::{Deserialize, Serialize};

/// Air-entrainment category (selects the ACI 211.1 water, air and w/c tables)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConcreteType {
    /// No intentionally entrained air
    #[default]
    #[serde(rename = "Non-Air-Entrained")]
    NonAirEntrained,
    /// Intentionally entrained air for freeze-thaw durability
    #[serde(rename = "Air-Entrained")]
    AirEntrained,
}

impl ConcreteType {
    /// All concrete types for UI selection
    pub const ALL: [ConcreteType; 2] = [ConcreteType::NonAirEntrained, ConcreteType::AirEntrained];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConcreteType::NonAirEntrained => "Non-Air-Entrained",
            ConcreteType::AirEntrained => "Air-Entrained",
        }
    }

    pub fn is_air_entrained(&self) -> bool {
        matches!(self, ConcreteType::AirEntrained)
    }
}

impl std::fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Exposure class
///
/// Drives the air content for air-entrained concrete and the maximum
/// water-cement ratio permitted for durability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExposureCondition {
    #[default]
    Mild,
    Moderate,
    Severe,
}

impl ExposureCondition {
    /// All exposure classes for UI selection
    pub const ALL: [ExposureCondition; 3] = [
        ExposureCondition::Mild,
        ExposureCondition::Moderate,
        ExposureCondition::Severe,
    ];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ExposureCondition::Mild => "Mild",
            ExposureCondition::Moderate => "Moderate",
            ExposureCondition::Severe => "Severe",
        }
    }

    /// Maximum water-cement ratio allowed for durability.
    ///
    /// Mild exposure has no ceiling; 1.0 never governs over the strength curve.
    pub fn durability_wc_limit(&self) -> f64 {
        match self {
            ExposureCondition::Mild => 1.0,
            ExposureCondition::Moderate => 0.50,
            ExposureCondition::Severe => 0.45,
        }
    }
}

impl std::fmt::Display for ExposureCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_names() {
        assert_eq!(
            serde_json::to_string(&ConcreteType::NonAirEntrained).unwrap(),
            "\"Non-Air-Entrained\""
        );
        let ae: ConcreteType = serde_json::from_str("\"Air-Entrained\"").unwrap();
        assert!(ae.is_air_entrained());

        let exposure: ExposureCondition = serde_json::from_str("\"Severe\"").unwrap();
        assert_eq!(exposure, ExposureCondition::Severe);
    }

    #[test]
    fn test_durability_limits() {
        assert_eq!(ExposureCondition::Severe.durability_wc_limit(), 0.45);
        assert_eq!(ExposureCondition::Moderate.durability_wc_limit(), 0.50);
        assert_eq!(ExposureCondition::Mild.durability_wc_limit(), 1.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(ConcreteType::AirEntrained.to_string(), "Air-Entrained");
        assert_eq!(ExposureCondition::Moderate.to_string(), "Moderate");
    }
}
