//! # carbon_core - Embodied Carbon Calculation Engine
//!
//! `carbon_core` computes the embodied carbon of a building model: it takes
//! the model's exported material takeoff, resolves every material against
//! published emission factor databases, and produces a per-element and
//! whole-model carbon report. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Batch-Tolerant**: One bad element never aborts a run; failures are
//!   collected and reported, not thrown
//! - **JSON-First**: Model, config and report all round-trip through serde
//! - **Rich Errors**: Structured error types, not just strings
//! - **Deterministic Reports**: Sorted maps everywhere a report is built
//!
//! ## Quick Start
//!
//! ```rust
//! use carbon_core::analysis::ModelAnalyzer;
//! use carbon_core::config::CalculatorConfig;
//! use carbon_core::takeoff::ModelRoot;
//!
//! let model: ModelRoot = serde_json::from_str(
//!     r#"{"name": "Demo", "elements": []}"#,
//! ).unwrap();
//!
//! let mut analyzer = ModelAnalyzer::new(CalculatorConfig::default());
//! let summary = analyzer.analyze(&model);
//! assert_eq!(summary.element_count(), 0);
//! ```
//!
//! ## Modules
//!
//! - [`takeoff`] - Typed intake of the exported model tree
//! - [`element`] - Building elements, materials, structural categories
//! - [`factors`] - Emission factor databases, alias normalization, registry
//! - [`reinforcement`] - Concrete reinforcement rates per element type
//! - [`calculation`] - The carbon calculator and its result types
//! - [`analysis`] - Whole-model batch runs and the report summary
//! - [`aggregator`] - Mass totals grouped by level and type
//! - [`config`] - Run configuration
//! - [`logging`] - Categorized per-object run log
//! - [`errors`] - Structured error types
//! - [`file_io`] - Model/config loading and atomic report saves

pub mod aggregator;
pub mod analysis;
pub mod calculation;
pub mod config;
pub mod element;
pub mod errors;
pub mod factors;
pub mod file_io;
pub mod logging;
pub mod reinforcement;
pub mod takeoff;

// Re-export commonly used types at crate root for convenience
pub use analysis::{AnalysisSummary, ModelAnalyzer};
pub use calculation::CarbonCalculator;
pub use config::CalculatorConfig;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_config, load_model, save_report};
