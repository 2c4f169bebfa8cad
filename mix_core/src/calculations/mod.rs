//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Inputs` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `compute(inputs) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`mix_design`] - ACI 211.1 absolute-volume mix proportioning

pub mod mix_design;

// Re-export commonly used types
pub use mix_design::{
    compute, compute_with_tables, BatchQuantities, MixInputs, MixResult, MixStep, STEP_COUNT,
};
