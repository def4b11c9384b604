//! # Carbon Calculation
//!
//! Per-material carbon computation and its result types.
//!
//! ## Formulas
//!
//! ```text
//! Wood:     total = volume × factor                      (factor kgCO₂e/m³)
//! Metal:    total = mass × factor                        (factor kgCO₂e/kg)
//! Concrete: concrete_carbon      = volume × factor
//!           reinforcement_mass   = volume × rate / 1000  (rate kg/m³)
//!           reinforcement_carbon = reinforcement_mass × rebar_factor
//!           total                = concrete_carbon + reinforcement_carbon
//! ```
//!
//! Concrete is the composite case: every pour carries an implied mass of
//! reinforcing steel, priced from the steel database's "Rebar" entry, and
//! the result records both sub-totals plus the rate and factor used so the
//! breakdown can be audited.
//!
//! ## Submodules
//!
//! - [`strength`] - country strength normalization and grade snapping
//! - [`calculator`] - the per-element dispatch engine

pub mod calculator;
pub mod strength;

pub use calculator::{CarbonCalculator, MissingFactors};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CalcError;

/// Carbon result for one material, tagged by material family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum CarbonResult {
    /// Volume-based timber result
    Wood {
        /// Matched emission factor, kgCO₂e/m³
        factor: f64,
        /// Material volume, m³
        volume_m3: f64,
        /// Source database display name
        database: String,
        /// Embodied carbon, kgCO₂e
        total_carbon: f64,
    },

    /// Mass-based steel result
    Metal {
        /// Matched emission factor, kgCO₂e/kg
        factor: f64,
        /// Material mass, kg
        mass_kg: f64,
        /// Source database display name
        database: String,
        /// Embodied carbon, kgCO₂e
        total_carbon: f64,
    },

    /// Composite concrete + reinforcement result
    Concrete {
        /// Matched concrete emission factor, kgCO₂e/m³
        factor: f64,
        /// Concrete volume, m³
        concrete_volume_m3: f64,
        /// Source database display name
        database: String,
        /// Carbon from the concrete itself, kgCO₂e
        concrete_carbon: f64,
        /// Reinforcement rate applied, kg/m³
        reinforcement_rate_kg_m3: f64,
        /// Derived reinforcement mass, kg
        reinforcement_mass_kg: f64,
        /// Rebar emission factor, kgCO₂e/kg
        reinforcement_factor: f64,
        /// Carbon from the reinforcement, kgCO₂e
        reinforcement_carbon: f64,
        /// concrete_carbon + reinforcement_carbon, kgCO₂e
        total_carbon: f64,
    },
}

impl CarbonResult {
    /// Total embodied carbon for the material, kgCO₂e
    pub fn total_carbon(&self) -> f64 {
        match self {
            CarbonResult::Wood { total_carbon, .. }
            | CarbonResult::Metal { total_carbon, .. }
            | CarbonResult::Concrete { total_carbon, .. } => *total_carbon,
        }
    }

    /// The matched emission factor value
    pub fn factor(&self) -> f64 {
        match self {
            CarbonResult::Wood { factor, .. }
            | CarbonResult::Metal { factor, .. }
            | CarbonResult::Concrete { factor, .. } => *factor,
        }
    }

    /// The quantity the factor multiplied: volume (m³) for wood and
    /// concrete, mass (kg) for metal
    pub fn quantity(&self) -> f64 {
        match self {
            CarbonResult::Wood { volume_m3, .. } => *volume_m3,
            CarbonResult::Metal { mass_kg, .. } => *mass_kg,
            CarbonResult::Concrete {
                concrete_volume_m3, ..
            } => *concrete_volume_m3,
        }
    }

    /// Display name of the database the factor came from
    pub fn database(&self) -> &str {
        match self {
            CarbonResult::Wood { database, .. }
            | CarbonResult::Metal { database, .. }
            | CarbonResult::Concrete { database, .. } => database,
        }
    }

    /// Material family label
    pub fn category(&self) -> &'static str {
        match self {
            CarbonResult::Wood { .. } => "Wood",
            CarbonResult::Metal { .. } => "Metal",
            CarbonResult::Concrete { .. } => "Concrete",
        }
    }
}

/// A material that produced no result, with the error that stopped it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialFailure {
    /// Material name as it appeared on the element
    pub material: String,
    /// What went wrong
    pub error: CalcError,
}

/// All carbon results for one building element.
///
/// Results are keyed by material name in a `BTreeMap` so per-element
/// reporting is deterministic. Failures ride alongside; a failed material
/// never removes the results of its siblings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementCarbon {
    /// Material name → result
    pub results: BTreeMap<String, CarbonResult>,
    /// Materials that failed, with reasons
    pub failures: Vec<MaterialFailure>,
}

impl ElementCarbon {
    /// Sum of all material totals, kgCO₂e
    pub fn total_carbon(&self) -> f64 {
        self.results.values().map(CarbonResult::total_carbon).sum()
    }

    /// Whether at least one material produced a result
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}
