//! # Emission Factors
//!
//! Embodied-carbon emission factors and the tables that hold them.
//!
//! ## Overview
//!
//! An [`EmissionFactor`] is a single published coefficient (kgCO₂e per unit
//! of material) together with its provenance: source database, EPD number,
//! and validity window. Factors are grouped into [`FactorTable`]s, one per
//! database, keyed by material name.
//!
//! Lookups are case-insensitive. Table keys are lowercased at insert time
//! and queries are lowercased before the probe, so `"CLT"`, `"clt"` and
//! `"Clt"` all resolve to the same entry.
//!
//! ## Submodules
//!
//! | Module     | Contents                                         |
//! |------------|--------------------------------------------------|
//! | `timber`   | Timber databases (per-m³ factors)                |
//! | `steel`    | Steel databases (per-kg factors)                 |
//! | `concrete` | Concrete mix databases (strength × element type) |
//! | `alias`    | Material name normalization                      |
//! | `registry` | Lazily built table cache and lookup entry point  |
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::factors::{EmissionFactor, FactorTable, UNIT_PER_M3};
//!
//! let mut table = FactorTable::new("Example DB");
//! table.insert("CLT", EmissionFactor::new(137.0, UNIT_PER_M3, "Example DB"));
//!
//! assert_eq!(table.get("clt").unwrap().value, 137.0);
//! assert!(table.get("unobtainium").is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod alias;
pub mod concrete;
pub mod registry;
pub mod steel;
pub mod timber;

pub use alias::{normalize_material_key, MaterialFamily};
pub use concrete::ConcreteDatabase;
pub use registry::EmissionFactorRegistry;
pub use steel::SteelDatabase;
pub use timber::TimberDatabase;

/// Unit string for volume-based factors (timber, concrete)
pub const UNIT_PER_M3: &str = "kgCO₂e/m³";

/// Unit string for mass-based factors (steel)
pub const UNIT_PER_KG: &str = "kgCO₂e/kg";

/// A single embodied-carbon emission factor with provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// Factor value in kgCO₂e per unit
    pub value: f64,
    /// Unit the value is expressed in, e.g. "kgCO₂e/m³"
    pub unit: String,
    /// Display name of the source database
    pub database: String,
    /// EPD (Environmental Product Declaration) number, if published
    pub epd_number: Option<String>,
    /// Publication date of the source EPD (ISO 8601 date string)
    pub publication_date: Option<String>,
    /// Expiry date of the source EPD (ISO 8601 date string)
    pub valid_until: Option<String>,
    /// Manufacturer, for manufacturer-specific EPDs
    pub manufacturer: Option<String>,
    /// Production plant location, for plant-specific EPDs
    pub plant_location: Option<String>,
}

impl EmissionFactor {
    /// Create a factor with no provenance details
    pub fn new(value: f64, unit: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            database: database.into(),
            epd_number: None,
            publication_date: None,
            valid_until: None,
            manufacturer: None,
            plant_location: None,
        }
    }

    /// Attach EPD provenance: declaration number and validity window
    pub fn with_epd(
        mut self,
        epd_number: impl Into<String>,
        publication_date: impl Into<String>,
        valid_until: impl Into<String>,
    ) -> Self {
        self.epd_number = Some(epd_number.into());
        self.publication_date = Some(publication_date.into());
        self.valid_until = Some(valid_until.into());
        self
    }

    /// Attach manufacturer and plant location
    pub fn with_manufacturer(
        mut self,
        manufacturer: impl Into<String>,
        plant_location: impl Into<String>,
    ) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self.plant_location = Some(plant_location.into());
        self
    }
}

/// A named, case-insensitive table of emission factors
///
/// Keys are lowercased on insert and on lookup. Original key casing is not
/// preserved; the factor itself carries the display-cased database name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorTable {
    database_name: String,
    factors: HashMap<String, EmissionFactor>,
}

impl FactorTable {
    /// Create an empty table for the given database
    pub fn new(database_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            factors: HashMap::new(),
        }
    }

    /// Display name of the database this table belongs to
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Insert a factor under a material key (lowercased)
    pub fn insert(&mut self, key: impl Into<String>, factor: EmissionFactor) {
        self.factors.insert(key.into().to_lowercase(), factor);
    }

    /// Look up a factor by material key, ignoring case
    pub fn get(&self, key: &str) -> Option<&EmissionFactor> {
        self.factors.get(&key.to_lowercase())
    }

    /// Whether the table contains a factor for the key, ignoring case
    pub fn contains(&self, key: &str) -> bool {
        self.factors.contains_key(&key.to_lowercase())
    }

    /// Number of factors in the table
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Whether the table holds no factors
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// All keys in the table, sorted for stable iteration
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.factors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> FactorTable {
        let mut table = FactorTable::new("Test DB");
        table.insert(
            "Glulam",
            EmissionFactor::new(107.0, UNIT_PER_M3, "Test DB").with_epd(
                "TEST-GL",
                "2021-01-01",
                "2026-01-01",
            ),
        );
        table.insert("Hot Rolled", EmissionFactor::new(1.22, UNIT_PER_KG, "Test DB"));
        table
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = sample_table();
        assert_eq!(table.get("glulam").unwrap().value, 107.0);
        assert_eq!(table.get("GLULAM").unwrap().value, 107.0);
        assert_eq!(table.get("Hot rolled").unwrap().value, 1.22);
    }

    #[test]
    fn test_missing_key_returns_none() {
        let table = sample_table();
        assert!(table.get("unobtainium").is_none());
        // No trimming on direct lookup; stray whitespace is a miss
        assert!(table.get(" glulam ").is_none());
    }

    #[test]
    fn test_keys_are_sorted_and_lowercased() {
        let table = sample_table();
        assert_eq!(table.keys(), vec!["glulam", "hot rolled"]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_factor_provenance_builder() {
        let factor = EmissionFactor::new(0.854, UNIT_PER_KG, "Type 350 MPa")
            .with_epd("STEEL-350-RB", "2024-01-01", "2029-01-01")
            .with_manufacturer("Example Mills", "Hamilton, ON");

        assert_eq!(factor.epd_number.as_deref(), Some("STEEL-350-RB"));
        assert_eq!(factor.valid_until.as_deref(), Some("2029-01-01"));
        assert_eq!(factor.manufacturer.as_deref(), Some("Example Mills"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let table = sample_table();
        let json = serde_json::to_string(&table).unwrap();
        let parsed: FactorTable = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.database_name(), "Test DB");
        assert_eq!(parsed.get("glulam"), table.get("glulam"));
    }
}
