//! # mix_core - Concrete Mix Design Engine
//!
//! `mix_core` proportions normal-weight concrete by the ACI 211.1
//! absolute-volume method. One call turns strength, exposure, workability and
//! aggregate properties into batch weights per cubic yard, together with a
//! nine-step calculation trail suitable for review or printing.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `compute` is a pure function of its inputs and the tables
//! - **JSON-First**: All inputs, results and errors implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the offending field or table
//! - **Auditable**: Every result carries the arithmetic that produced it
//!
//! ## Quick Start
//!
//! ```rust
//! use mix_core::{compute, MixInputs};
//!
//! let result = compute(&MixInputs::default()).unwrap();
//! for step in &result.steps {
//!     println!("{}. {}: {}", step.id, step.title, step.value);
//! }
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The mix design calculator
//! - [`tables`] - ACI 211.1 reference tables
//! - [`equations`] - Interpolation and absolute-volume formulas
//! - [`concrete`] - Concrete type and exposure class
//! - [`units`] - Unit constants and wrappers
//! - [`errors`] - Structured error types
//! - [`pdf`] - PDF report export

pub mod calculations;
pub mod concrete;
pub mod equations;
pub mod errors;
pub mod pdf;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute, compute_with_tables, BatchQuantities, MixInputs, MixResult, MixStep};
pub use concrete::{ConcreteType, ExposureCondition};
pub use errors::{CalcError, CalcResult};
pub use tables::{ReferenceTables, ACI_211_1};
