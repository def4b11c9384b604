//! # Emission Factor Registry
//!
//! Lookup entry point over the factor databases. The registry builds each
//! database's [`FactorTable`] lazily on first use and keeps it for the
//! registry's lifetime, so a model run touching one timber database never
//! pays for the other eight.
//!
//! Lookup policy per family:
//!
//! - **timber / steel**: direct key probe first, then one retry with the
//!   alias-normalized key. A second miss returns `None`; a missing factor
//!   is data quality, not an error.
//! - **concrete**: composite `"{strength}_{elementType}"` key, no alias
//!   fallback (concrete has no name vocabulary to normalize).
//!
//! Unknown database *names* never reach this module: they fail loudly in
//! `from_name` when configuration is parsed.
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::factors::{EmissionFactorRegistry, TimberDatabase};
//!
//! let mut registry = EmissionFactorRegistry::new();
//! let factor = registry
//!     .timber_factor("FE_CLT Floor Panel (1)", TimberDatabase::Athena2021)
//!     .unwrap();
//! assert_eq!(factor.value, 69.0);
//! ```

use std::collections::HashMap;

use super::alias::{normalize_material_key, MaterialFamily};
use super::concrete::{concrete_key, ConcreteDatabase};
use super::steel::SteelDatabase;
use super::timber::TimberDatabase;
use super::{EmissionFactor, FactorTable};

/// Caches factor tables per database and resolves lookups
#[derive(Debug)]
pub struct EmissionFactorRegistry {
    timber_tables: HashMap<TimberDatabase, FactorTable>,
    steel_tables: HashMap<SteelDatabase, FactorTable>,
    concrete_tables: HashMap<ConcreteDatabase, FactorTable>,
}

impl EmissionFactorRegistry {
    /// Create a registry with no tables built yet
    pub fn new() -> Self {
        Self {
            timber_tables: HashMap::new(),
            steel_tables: HashMap::new(),
            concrete_tables: HashMap::new(),
        }
    }

    /// Look up a timber factor by material name.
    ///
    /// Tries the raw name, then the alias-normalized name. Returns an owned
    /// factor so the caller is not tied to the registry's borrow.
    pub fn timber_factor(
        &mut self,
        material_name: &str,
        database: TimberDatabase,
    ) -> Option<EmissionFactor> {
        let table = self
            .timber_tables
            .entry(database)
            .or_insert_with(|| database.build_table());

        if let Some(factor) = table.get(material_name) {
            return Some(factor.clone());
        }
        let normalized = normalize_material_key(material_name, MaterialFamily::Timber);
        table.get(&normalized).cloned()
    }

    /// Look up a steel factor by grade or product name.
    ///
    /// Grade codes ("350W", "default_steel") normalize to "Hot Rolled"
    /// before the retry probe.
    pub fn steel_factor(
        &mut self,
        grade_or_name: &str,
        database: SteelDatabase,
    ) -> Option<EmissionFactor> {
        let table = self
            .steel_tables
            .entry(database)
            .or_insert_with(|| database.build_table());

        if let Some(factor) = table.get(grade_or_name) {
            return Some(factor.clone());
        }
        let normalized = normalize_material_key(grade_or_name, MaterialFamily::Steel);
        table.get(&normalized).cloned()
    }

    /// Look up a concrete factor by strength grade and element type
    pub fn concrete_factor(
        &mut self,
        strength: u32,
        element_type: &str,
        database: ConcreteDatabase,
    ) -> Option<EmissionFactor> {
        let table = self
            .concrete_tables
            .entry(database)
            .or_insert_with(|| database.build_table());

        table.get(&concrete_key(strength, element_type)).cloned()
    }
}

impl Default for EmissionFactorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
