//! # Mix Design Calculation
//!
//! Proportions one cubic yard of concrete by the ACI 211.1 absolute-volume
//! method and records every step of the derivation.
//!
//! ## Procedure
//!
//! 1. Choice of slump (input)
//! 2. Maximum aggregate size (input)
//! 3. Mixing water and air content (Table 6.3.3)
//! 4. Water-cement ratio: strength curve (Table 6.3.4(a)), capped for durability
//! 5. Cement content
//! 6. Coarse aggregate content, oven dry (Table 6.3.6)
//! 7. Fine aggregate content, oven dry, by absolute volume
//! 8. Stockpile (wet) aggregate weights
//! 9. Batch water adjusted for aggregate surface moisture
//!
//! ## Assumptions
//!
//! - Fine aggregate volume is balanced on oven-dry coarse aggregate with no
//!   absorption correction
//! - Adjusted batch water is reported as computed, even when wet aggregates
//!   drive it below zero
//!
//! ## Example
//!
//! ```rust
//! use mix_core::calculations::mix_design::{compute, MixInputs};
//!
//! let inputs = MixInputs {
//!     slump_max_in: 2.0,
//!     ..MixInputs::default()
//! };
//!
//! let result = compute(&inputs).unwrap();
//! assert_eq!(result.steps.len(), 9);
//! assert!((result.cement_lb - 552.6).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::concrete::{ConcreteType, ExposureCondition};
use crate::equations::{
    absolute_volume_ft3, air_volume_ft3, cement_content_lb, coarse_aggregate_od_lb, free_water_lb,
    remaining_volume_ft3, stockpile_weight_lb, total_moisture, unit_weight_pcf, weight_from_volume_lb,
};
use crate::errors::{CalcError, CalcResult};
use crate::tables::{ReferenceTables, SlumpRange, ACI_211_1};
use crate::units::{CubicYards, Percent, UNIT_WEIGHT_WATER_PCF};

/// Number of steps in every calculation trail
pub const STEP_COUNT: usize = 9;

/// Input parameters for a mix design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "strength_psi": 4000.0,
///   "concrete_type": "Non-Air-Entrained",
///   "exposure": "Mild",
///   "slump_min_in": 1.0,
///   "slump_max_in": 4.0,
///   "max_agg_size_in": 0.75,
///   "cement_sg": 3.15,
///   "ca_sg": 2.68,
///   "ca_absorption_pct": 0.5,
///   "ca_druw_pcf": 100.0,
///   "ca_moisture_pct": 2.0,
///   "fa_sg": 2.64,
///   "fa_absorption_pct": 0.7,
///   "fa_fineness_modulus": 2.8,
///   "fa_moisture_pct": 5.0,
///   "batch_volume_yd3": 1.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixInputs {
    /// Required average compressive strength f'cr (psi)
    pub strength_psi: f64,

    pub concrete_type: ConcreteType,

    pub exposure: ExposureCondition,

    /// Lower bound of the slump range (in)
    pub slump_min_in: f64,

    /// Upper bound of the slump range (in), selects the water table row
    pub slump_max_in: f64,

    /// Nominal maximum aggregate size (in), one of the tabulated sizes
    pub max_agg_size_in: f64,

    /// Specific gravity of cement (typically 3.15)
    pub cement_sg: f64,

    /// Coarse aggregate bulk specific gravity (oven dry)
    pub ca_sg: f64,

    /// Coarse aggregate absorption (%)
    pub ca_absorption_pct: f64,

    /// Coarse aggregate dry-rodded unit weight (pcf)
    pub ca_druw_pcf: f64,

    /// Coarse aggregate surface moisture (%)
    pub ca_moisture_pct: f64,

    /// Fine aggregate bulk specific gravity (oven dry)
    pub fa_sg: f64,

    /// Fine aggregate absorption (%)
    pub fa_absorption_pct: f64,

    /// Fine aggregate fineness modulus
    pub fa_fineness_modulus: f64,

    /// Fine aggregate surface moisture (%)
    pub fa_moisture_pct: f64,

    /// Volume to batch (yd³); the result itself is always per cubic yard
    pub batch_volume_yd3: f64,
}

impl Default for MixInputs {
    fn default() -> Self {
        MixInputs {
            strength_psi: 4000.0,
            concrete_type: ConcreteType::NonAirEntrained,
            exposure: ExposureCondition::Mild,
            slump_min_in: 1.0,
            slump_max_in: 4.0,
            max_agg_size_in: 0.75,
            cement_sg: 3.15,
            ca_sg: 2.68,
            ca_absorption_pct: 0.5,
            ca_druw_pcf: 100.0,
            ca_moisture_pct: 2.0,
            fa_sg: 2.64,
            fa_absorption_pct: 0.7,
            fa_fineness_modulus: 2.8,
            fa_moisture_pct: 5.0,
            batch_volume_yd3: 1.0,
        }
    }
}

fn require_finite(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(())
}

impl MixInputs {
    /// Validate input parameters.
    ///
    /// Only checks what the tables and formulas need: finite numbers,
    /// positive densities and volumes, an ordered slump range. Table domains
    /// (aggregate size, fineness modulus) are checked during lookup.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("strength_psi", self.strength_psi)?;

        require_non_negative("slump_min_in", self.slump_min_in)?;
        require_positive("slump_max_in", self.slump_max_in)?;
        if self.slump_min_in > self.slump_max_in {
            return Err(CalcError::invalid_input(
                "slump_min_in",
                self.slump_min_in.to_string(),
                format!("Minimum slump exceeds maximum slump ({} in)", self.slump_max_in),
            ));
        }

        require_finite("max_agg_size_in", self.max_agg_size_in)?;
        require_positive("cement_sg", self.cement_sg)?;

        require_positive("ca_sg", self.ca_sg)?;
        require_non_negative("ca_absorption_pct", self.ca_absorption_pct)?;
        require_positive("ca_druw_pcf", self.ca_druw_pcf)?;
        require_finite("ca_moisture_pct", self.ca_moisture_pct)?;
        if self.ca_absorption_pct + self.ca_moisture_pct < 0.0 {
            return Err(CalcError::invalid_input(
                "ca_moisture_pct",
                self.ca_moisture_pct.to_string(),
                "Total moisture (absorption + surface) cannot be below oven dry",
            ));
        }

        require_positive("fa_sg", self.fa_sg)?;
        require_non_negative("fa_absorption_pct", self.fa_absorption_pct)?;
        require_finite("fa_fineness_modulus", self.fa_fineness_modulus)?;
        require_finite("fa_moisture_pct", self.fa_moisture_pct)?;
        if self.fa_absorption_pct + self.fa_moisture_pct < 0.0 {
            return Err(CalcError::invalid_input(
                "fa_moisture_pct",
                self.fa_moisture_pct.to_string(),
                "Total moisture (absorption + surface) cannot be below oven dry",
            ));
        }

        require_positive("batch_volume_yd3", self.batch_volume_yd3)?;
        Ok(())
    }
}

/// One recorded step of the derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixStep {
    /// Sequence number, 1 through 9
    pub id: u8,
    pub title: String,
    /// Display value with units (e.g. "552.6 lb/yd³")
    pub value: String,
    /// Plain-text arithmetic, one line per sub-calculation
    pub calculation: String,
}

impl MixStep {
    fn new(id: u8, title: &str, value: String, calculation: String) -> Self {
        MixStep {
            id,
            title: title.to_string(),
            value,
            calculation,
        }
    }
}

/// Results of a mix design, per cubic yard of concrete.
///
/// ## JSON Example
///
/// ```json
/// {
///   "water_lb": 210.8,
///   "cement_lb": 552.6,
///   "coarse_agg_lb": 1715.9,
///   "fine_agg_lb": 1495.8,
///   "air_content_pct": 2.0,
///   "water_cement_ratio": 0.57,
///   "unit_weight_pcf": 147.2,
///   "steps": [ { "id": 1, "title": "Choice of Slump", "value": "1-2 in", "calculation": "..." } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixResult {
    /// Batch water adjusted for aggregate surface moisture (lb/yd³), may be negative
    pub water_lb: f64,

    /// Cement (lb/yd³)
    pub cement_lb: f64,

    /// Coarse aggregate, stockpile weight (lb/yd³)
    pub coarse_agg_lb: f64,

    /// Fine aggregate, stockpile weight (lb/yd³)
    pub fine_agg_lb: f64,

    /// Design air content (%)
    pub air_content_pct: f64,

    /// Governing water-cement ratio
    pub water_cement_ratio: f64,

    /// Fresh unit weight (pcf)
    pub unit_weight_pcf: f64,

    /// The nine derivation steps, in order
    pub steps: Vec<MixStep>,
}

impl MixResult {
    /// Get a step by its sequence number
    pub fn step(&self, id: u8) -> Option<&MixStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Total batch weight of one cubic yard (lb)
    pub fn total_weight_lb(&self) -> f64 {
        self.water_lb + self.cement_lb + self.coarse_agg_lb + self.fine_agg_lb
    }

    /// True when wet aggregates supply more water than the design calls for
    pub fn has_negative_batch_water(&self) -> bool {
        self.water_lb < 0.0
    }

    /// Scale the per-cubic-yard weights to a batch volume
    pub fn batch_quantities(&self, volume: CubicYards) -> BatchQuantities {
        BatchQuantities {
            volume_yd3: volume.0,
            water_lb: self.water_lb * volume.0,
            cement_lb: self.cement_lb * volume.0,
            coarse_agg_lb: self.coarse_agg_lb * volume.0,
            fine_agg_lb: self.fine_agg_lb * volume.0,
        }
    }
}

/// Weights for a whole batch rather than one cubic yard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchQuantities {
    pub volume_yd3: f64,
    pub water_lb: f64,
    pub cement_lb: f64,
    pub coarse_agg_lb: f64,
    pub fine_agg_lb: f64,
}

impl BatchQuantities {
    pub fn total_lb(&self) -> f64 {
        self.water_lb + self.cement_lb + self.coarse_agg_lb + self.fine_agg_lb
    }
}

/// Every intermediate quantity of the procedure, resolved before any step text is built.
#[derive(Debug, Clone)]
struct Proportions {
    slump_range: SlumpRange,
    design_water_lb: f64,
    air_pct: f64,
    wc_strength: f64,
    wc_limit: f64,
    wc_final: f64,
    cement_lb: f64,
    bulk_volume_fraction: f64,
    ca_od_lb: f64,
    water_volume_ft3: f64,
    cement_volume_ft3: f64,
    air_volume_ft3: f64,
    ca_volume_ft3: f64,
    fa_volume_ft3: f64,
    fa_od_lb: f64,
    fa_total_moisture: Percent,
    ca_total_moisture: Percent,
    fa_stockpile_lb: f64,
    ca_stockpile_lb: f64,
    fa_free_water_lb: f64,
    ca_free_water_lb: f64,
    final_water_lb: f64,
}

fn proportion(tables: &ReferenceTables, inputs: &MixInputs) -> CalcResult<Proportions> {
    let size_index = tables.size_index(inputs.max_agg_size_in)?;

    // Step 3
    let slump_range = SlumpRange::from_slump_max(inputs.slump_max_in);
    let design_water_lb = tables
        .water_air
        .design_water_lb(inputs.concrete_type, slump_range, size_index)?;
    let air_pct = tables
        .water_air
        .air_content_pct(inputs.concrete_type, inputs.exposure, size_index)?;

    // Step 4
    let wc_strength = tables
        .water_cement
        .strength_wc_ratio(inputs.concrete_type, inputs.strength_psi)?;
    let wc_limit = inputs.exposure.durability_wc_limit();
    let wc_final = wc_strength.min(wc_limit);

    // Step 5
    let cement_lb = cement_content_lb(design_water_lb, wc_final);

    // Step 6
    let bulk_volume_fraction = tables
        .coarse_aggregate
        .bulk_volume_fraction(size_index, inputs.fa_fineness_modulus)?;
    let ca_od_lb = coarse_aggregate_od_lb(bulk_volume_fraction, inputs.ca_druw_pcf);

    // Step 7
    let water_volume_ft3 = absolute_volume_ft3(design_water_lb, 1.0);
    let cement_volume_ft3 = absolute_volume_ft3(cement_lb, inputs.cement_sg);
    let air_volume = air_volume_ft3(Percent(air_pct));
    let ca_volume_ft3 = absolute_volume_ft3(ca_od_lb, inputs.ca_sg);
    let fa_volume_ft3 = remaining_volume_ft3(&[water_volume_ft3, cement_volume_ft3, air_volume, ca_volume_ft3]);
    let fa_od_lb = weight_from_volume_lb(fa_volume_ft3, inputs.fa_sg);

    // Step 8
    let fa_total_moisture = total_moisture(Percent(inputs.fa_absorption_pct), Percent(inputs.fa_moisture_pct));
    let ca_total_moisture = total_moisture(Percent(inputs.ca_absorption_pct), Percent(inputs.ca_moisture_pct));
    let fa_stockpile_lb = stockpile_weight_lb(fa_od_lb, fa_total_moisture);
    let ca_stockpile_lb = stockpile_weight_lb(ca_od_lb, ca_total_moisture);

    // Step 9
    let fa_free_water_lb = free_water_lb(fa_od_lb, Percent(inputs.fa_moisture_pct));
    let ca_free_water_lb = free_water_lb(ca_od_lb, Percent(inputs.ca_moisture_pct));
    let final_water_lb = design_water_lb - (fa_free_water_lb + ca_free_water_lb);

    Ok(Proportions {
        slump_range,
        design_water_lb,
        air_pct,
        wc_strength,
        wc_limit,
        wc_final,
        cement_lb,
        bulk_volume_fraction,
        ca_od_lb,
        water_volume_ft3,
        cement_volume_ft3,
        air_volume_ft3: air_volume,
        ca_volume_ft3,
        fa_volume_ft3,
        fa_od_lb,
        fa_total_moisture,
        ca_total_moisture,
        fa_stockpile_lb,
        ca_stockpile_lb,
        fa_free_water_lb,
        ca_free_water_lb,
        final_water_lb,
    })
}

fn build_steps(inputs: &MixInputs, p: &Proportions) -> Vec<MixStep> {
    let air_source = match inputs.concrete_type {
        ConcreteType::NonAirEntrained => format!("{} concrete: entrapped air {}%", inputs.concrete_type, p.air_pct),
        ConcreteType::AirEntrained => format!(
            "{} concrete, {} exposure: entrained air {}%",
            inputs.concrete_type, inputs.exposure, p.air_pct
        ),
    };

    vec![
        MixStep::new(
            1,
            "Choice of Slump",
            format!("{}-{} in", inputs.slump_min_in, inputs.slump_max_in),
            format!("Manual Input: {}-{} in", inputs.slump_min_in, inputs.slump_max_in),
        ),
        MixStep::new(
            2,
            "Maximum Aggregate Size",
            format!("{} in", inputs.max_agg_size_in),
            format!("Manual Input: {} in", inputs.max_agg_size_in),
        ),
        MixStep::new(
            3,
            "Mixing Water and Air Content",
            format!("Water: {} lb/yd³, Air: {}%", p.design_water_lb, p.air_pct),
            format!(
                "From ACI Table 6.3.3 based on {}\" agg and {}\" slump.\n{}",
                inputs.max_agg_size_in, p.slump_range, air_source
            ),
        ),
        MixStep::new(
            4,
            "Water-Cement Ratio",
            format!("w/c = {:.2}", p.wc_final),
            format!(
                "Strength req: {:.2} ({} psi, {})\nDurability limit: {:.2} ({} exposure)\nSelected lower: w/c = {:.2}",
                p.wc_strength, inputs.strength_psi, inputs.concrete_type, p.wc_limit, inputs.exposure, p.wc_final
            ),
        ),
        MixStep::new(
            5,
            "Cement Content",
            format!("{:.1} lb/yd³", p.cement_lb),
            format!(
                "Cement = Water / (w/c) = {} / {:.2} = {:.1} lb/yd³",
                p.design_water_lb, p.wc_final, p.cement_lb
            ),
        ),
        MixStep::new(
            6,
            "Coarse Aggregate Content (Oven Dry)",
            format!("{:.1} lb/yd³", p.ca_od_lb),
            format!(
                "Volume Bulk = {:.2} yd³/yd³ (FM {}, {}\" agg)\nWeight OD = {:.2} * 27 * {} lb/ft³",
                p.bulk_volume_fraction,
                inputs.fa_fineness_modulus,
                inputs.max_agg_size_in,
                p.bulk_volume_fraction,
                inputs.ca_druw_pcf
            ),
        ),
        MixStep::new(
            7,
            "Fine Aggregate Content (Oven Dry)",
            format!("{:.1} lb/yd³", p.fa_od_lb),
            format!(
                "Absolute Volume Method: 27 - ({:.2} + {:.2} + {:.2} + {:.2}) = {:.2} ft³\nWeight OD = {:.2} * {} * {}",
                p.water_volume_ft3,
                p.cement_volume_ft3,
                p.air_volume_ft3,
                p.ca_volume_ft3,
                p.fa_volume_ft3,
                p.fa_volume_ft3,
                inputs.fa_sg,
                UNIT_WEIGHT_WATER_PCF
            ),
        ),
        MixStep::new(
            8,
            "Stockpile Weight Calculation",
            format!("FA: {:.1} lb, CA: {:.1} lb", p.fa_stockpile_lb, p.ca_stockpile_lb),
            format!(
                "Total MC_FA = {}% + {}% = {:.1}%\n\
                 FA Stockpile = FA_OD × (1 + Total MC_FA) = {:.1} × (1 + {:.3}) = {:.1} lb\n\
                 Total MC_CA = {}% + {}% = {:.1}%\n\
                 CA Stockpile = CA_OD × (1 + Total MC_CA) = {:.1} × (1 + {:.3}) = {:.1} lb",
                inputs.fa_absorption_pct,
                inputs.fa_moisture_pct,
                p.fa_total_moisture.0,
                p.fa_od_lb,
                p.fa_total_moisture.fraction(),
                p.fa_stockpile_lb,
                inputs.ca_absorption_pct,
                inputs.ca_moisture_pct,
                p.ca_total_moisture.0,
                p.ca_od_lb,
                p.ca_total_moisture.fraction(),
                p.ca_stockpile_lb
            ),
        ),
        MixStep::new(
            9,
            "Adjusted Batch Water",
            format!("Final Batch Water: {:.1} lb/yd³", p.final_water_lb),
            format!(
                "Design Water: {} lb\n\
                 Free Water (FA) = {:.1} lb × {:.3} = {:.1} lb\n\
                 Free Water (CA) = {:.1} lb × {:.3} = {:.1} lb\n\
                 Final Water = {} - ({:.1} + {:.1}) = {:.1} lb/yd³",
                p.design_water_lb,
                p.fa_od_lb,
                Percent(inputs.fa_moisture_pct).fraction(),
                p.fa_free_water_lb,
                p.ca_od_lb,
                Percent(inputs.ca_moisture_pct).fraction(),
                p.ca_free_water_lb,
                p.design_water_lb,
                p.fa_free_water_lb,
                p.ca_free_water_lb,
                p.final_water_lb
            ),
        ),
    ]
}

/// Compute a mix design with the published ACI 211.1 tables.
///
/// # Arguments
///
/// * `inputs` - Strength, exposure, workability and material properties
///
/// # Returns
///
/// * `Ok(MixResult)` - Quantities per cubic yard plus the nine-step trail
/// * `Err(CalcError::InvalidInput)` - Malformed input or untabulated aggregate size
/// * `Err(CalcError::UnsupportedCombination)` - A lookup hit a not-recommended entry
pub fn compute(inputs: &MixInputs) -> CalcResult<MixResult> {
    compute_with_tables(&ACI_211_1, inputs)
}

/// Compute a mix design against a caller-supplied set of tables.
///
/// All validation and lookups complete before any step is built, so an
/// error never comes with a partial trail.
pub fn compute_with_tables(tables: &ReferenceTables, inputs: &MixInputs) -> CalcResult<MixResult> {
    inputs.validate()?;

    let p = proportion(tables, inputs)?;
    debug!(
        slump_range = %p.slump_range,
        design_water_lb = p.design_water_lb,
        air_pct = p.air_pct,
        wc_strength = p.wc_strength,
        wc_final = p.wc_final,
        bulk_volume_fraction = p.bulk_volume_fraction,
        "resolved table values"
    );

    let steps = build_steps(inputs, &p);
    let unit_weight = unit_weight_pcf(p.final_water_lb + p.cement_lb + p.ca_stockpile_lb + p.fa_stockpile_lb);

    debug!(
        water_lb = p.final_water_lb,
        cement_lb = p.cement_lb,
        coarse_agg_lb = p.ca_stockpile_lb,
        fine_agg_lb = p.fa_stockpile_lb,
        unit_weight_pcf = unit_weight,
        "mix design computed"
    );

    Ok(MixResult {
        water_lb: p.final_water_lb,
        cement_lb: p.cement_lb,
        coarse_agg_lb: p.ca_stockpile_lb,
        fine_agg_lb: p.fa_stockpile_lb,
        air_content_pct: p.air_pct,
        water_cement_ratio: p.wc_final,
        unit_weight_pcf: unit_weight,
        steps,
    })
}
