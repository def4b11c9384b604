//! # Mass Aggregation
//!
//! Cumulative mass bookkeeping for a run, grouped level → type group →
//! material. Useful as a sanity check against the carbon numbers: a level
//! whose mass looks wrong usually has a bad export behind it.
//!
//! [`MassAggregator`] accumulates; [`MassTotals`] is the typed, serializable
//! snapshot that lands in the report as `mass_totals`. All grouping maps are
//! `BTreeMap`s so report output is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Contributions at or below this mass (kg) are noise and are dropped
pub const MIN_MASS_KG: f64 = 1e-6;

/// Accumulates per-material masses, grouped by level and type group
#[derive(Debug, Clone, Default)]
pub struct MassAggregator {
    totals: BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>,
}

impl MassAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one material's mass under `level` / `type_group` / `material`.
    /// Contributions ≤ [`MIN_MASS_KG`] are ignored.
    pub fn add_mass(&mut self, mass_kg: f64, level: &str, type_group: &str, material: &str) {
        if mass_kg <= MIN_MASS_KG {
            return;
        }
        *self
            .totals
            .entry(level.to_string())
            .or_default()
            .entry(type_group.to_string())
            .or_default()
            .entry(material.to_string())
            .or_default() += mass_kg;
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Snapshot of the accumulated masses with rolled-up totals
    pub fn totals(&self) -> MassTotals {
        let by_level = self
            .totals
            .iter()
            .map(|(level, types)| {
                let by_type: BTreeMap<String, TypeMass> = types
                    .iter()
                    .map(|(type_name, materials)| {
                        let total = materials.values().sum();
                        (
                            type_name.clone(),
                            TypeMass {
                                total,
                                by_material: materials.clone(),
                            },
                        )
                    })
                    .collect();
                let total = by_type.values().map(|t| t.total).sum();
                (level.clone(), LevelMass { total, by_type })
            })
            .collect();
        MassTotals { by_level }
    }
}

/// Nested mass totals: level → type group → material
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MassTotals {
    pub by_level: BTreeMap<String, LevelMass>,
}

impl MassTotals {
    /// Sum over every level
    pub fn grand_total(&self) -> f64 {
        self.by_level.values().map(|level| level.total).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelMass {
    pub total: f64,
    pub by_type: BTreeMap<String, TypeMass>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeMass {
    pub total: f64,
    pub by_material: BTreeMap<String, f64>,
}
