//! # Mix Design Equations
//!
//! All arithmetic used by the mix design calculator lives here, in one place
//! for verification against ACI 211.1. The calculator only sequences these
//! functions and formats their results.
//!
//! ## Modules
//!
//! - [`interpolation`] - Linear interpolation and grid bracketing for table lookups
//! - [`proportioning`] - Absolute-volume method (volumes, weights, moisture)
//!
//! ## Conventions
//!
//! - Weights are per cubic yard of concrete (lb/yd³)
//! - Volumes are absolute volumes in ft³ per yd³ of concrete
//! - Moisture and air are percentages as entered (5.0 = 5 %)
//!
//! ## References
//!
//! - ACI 211.1-91: Standard Practice for Selecting Proportions for Normal,
//!   Heavyweight, and Mass Concrete

pub mod interpolation;
pub mod proportioning;

pub use interpolation::{bracket, linear_interpolate, Bracket, GRID_TOLERANCE};

pub use proportioning::{
    absolute_volume_ft3,
    air_volume_ft3,
    cement_content_lb,
    coarse_aggregate_od_lb,
    free_water_lb,
    remaining_volume_ft3,
    stockpile_weight_lb,
    total_moisture,
    unit_weight_pcf,
    weight_from_volume_lb,
};
