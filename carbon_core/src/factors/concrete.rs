//! # Concrete Databases
//!
//! Embodied-carbon factors for ready-mix concrete, expressed per cubic
//! metre of placed concrete. Unlike timber and steel, concrete factors are
//! not keyed by material name: the key is a composite of compressive
//! strength grade and structural element type,
//! `"{strength}_{elementType}"` (e.g. `"30_Column"`).
//!
//! ## Databases
//!
//! Four cement-mix / air-entrainment variants:
//!
//! | Database     | Cement        | Air entrainment |
//! |--------------|---------------|-----------------|
//! | GUL Low Air  | General Use Limestone | low     |
//! | GUL High Air | General Use Limestone | high    |
//! | GU Low Air   | General Use   | low             |
//! | GU High Air  | General Use   | high            |
//!
//! Each spans strength grades {25, 30, 35, 40, 45, 50} MPa across seven
//! element types. Published figures distinguish three mix families per
//! grade: a beam mix, a slab mix (shared by "Slab" and "Slab on Grade"),
//! and a foundation mix (shared by "Foundation", "Column", "Wall" and
//! "Wall Foundation").
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::factors::{concrete::concrete_key, ConcreteDatabase};
//!
//! let table = ConcreteDatabase::GulLowAir.build_table();
//! let factor = table.get(&concrete_key(30, "Column")).unwrap();
//! assert_eq!(factor.value, 176.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

use super::{EmissionFactor, FactorTable, UNIT_PER_M3};

/// Element types the concrete matrix is published for
pub const CONCRETE_ELEMENT_TYPES: [&str; 7] = [
    "Beam",
    "Slab",
    "Slab on Grade",
    "Foundation",
    "Column",
    "Wall",
    "Wall Foundation",
];

/// Compose the matrix lookup key for a strength grade and element type
pub fn concrete_key(strength: u32, element_type: &str) -> String {
    format!("{}_{}", strength, element_type)
}

/// Concrete emission factor databases (cement mix × air entrainment)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConcreteDatabase {
    /// General Use Limestone cement, low air entrainment
    #[default]
    #[serde(rename = "GUL Low Air")]
    GulLowAir,

    /// General Use Limestone cement, high air entrainment
    #[serde(rename = "GUL High Air")]
    GulHighAir,

    /// General Use cement, low air entrainment
    #[serde(rename = "GU Low Air")]
    GuLowAir,

    /// General Use cement, high air entrainment
    #[serde(rename = "GU High Air")]
    GuHighAir,
}

impl ConcreteDatabase {
    /// All concrete databases, in display order
    pub const ALL: [ConcreteDatabase; 4] = [
        ConcreteDatabase::GulLowAir,
        ConcreteDatabase::GulHighAir,
        ConcreteDatabase::GuLowAir,
        ConcreteDatabase::GuHighAir,
    ];

    /// Display name, as used in configs and reports
    pub fn name(&self) -> &'static str {
        match self {
            ConcreteDatabase::GulLowAir => "GUL Low Air",
            ConcreteDatabase::GulHighAir => "GUL High Air",
            ConcreteDatabase::GuLowAir => "GU Low Air",
            ConcreteDatabase::GuHighAir => "GU High Air",
        }
    }

    /// Display names of all concrete databases
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|db| db.name()).collect()
    }

    /// Parse a database from its display name, ignoring case and
    /// surrounding whitespace
    pub fn from_name(name: &str) -> CalcResult<Self> {
        let trimmed = name.trim();
        Self::ALL
            .iter()
            .find(|db| db.name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| CalcError::unknown_database("concrete", trimmed, &Self::names()))
    }

    /// Build the full strength × element-type factor table
    pub fn build_table(&self) -> FactorTable {
        // (strength, beam mix, slab mix, foundation mix) in kgCO₂e/m³
        let rows: &[(u32, f64, f64, f64)] = match self {
            ConcreteDatabase::GulLowAir => &[
                (25, 188.0, 188.0, 151.0),
                (30, 220.0, 220.0, 176.0),
                (35, 250.0, 250.0, 200.0),
                (40, 280.0, 280.0, 224.0),
                (45, 298.0, 298.0, 238.0),
                (50, 320.0, 320.0, 256.0),
            ],
            ConcreteDatabase::GulHighAir => &[
                (25, 201.0, 197.0, 157.0),
                (30, 236.0, 230.0, 184.0),
                (35, 268.0, 264.0, 211.0),
                (40, 292.0, 292.0, 234.0),
                (45, 316.0, 316.0, 254.0),
                (50, 343.0, 322.0, 257.0),
            ],
            ConcreteDatabase::GuLowAir => &[
                (25, 201.0, 201.0, 161.0),
                (30, 236.0, 236.0, 189.0),
                (35, 268.0, 268.0, 214.0),
                (40, 300.0, 300.0, 240.0),
                (45, 319.0, 319.0, 256.0),
                (50, 343.0, 343.0, 274.0),
            ],
            ConcreteDatabase::GuHighAir => &[
                (25, 210.0, 210.0, 168.0),
                (30, 246.0, 246.0, 197.0),
                (35, 283.0, 283.0, 227.0),
                (40, 313.0, 313.0, 251.0),
                (45, 339.0, 339.0, 271.0),
                (50, 345.0, 345.0, 276.0),
            ],
        };

        let mut table = FactorTable::new(self.name());
        for &(strength, beam, slab, foundation) in rows {
            let spread = [
                ("Beam", beam),
                ("Slab", slab),
                ("Slab on Grade", slab),
                ("Foundation", foundation),
                ("Column", foundation),
                ("Wall", foundation),
                ("Wall Foundation", foundation),
            ];
            for (element, value) in spread {
                table.insert(
                    concrete_key(strength, element),
                    EmissionFactor::new(value, UNIT_PER_M3, self.name()).with_epd(
                        format!("CONCRETE-{}-{}-{}", self.name(), strength, element),
                        "2024-01-01",
                        "2029-01-01",
                    ),
                );
            }
        }
        table
    }
}

impl std::fmt::Display for ConcreteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_gul_low_air() {
        assert_eq!(ConcreteDatabase::default(), ConcreteDatabase::GulLowAir);
    }

    #[test]
    fn test_key_composition() {
        assert_eq!(concrete_key(30, "Column"), "30_Column");
        assert_eq!(concrete_key(25, "Slab on Grade"), "25_Slab on Grade");
    }

    #[test]
    fn test_full_matrix_is_built() {
        for db in ConcreteDatabase::ALL {
            let table = db.build_table();
            // 6 strength grades × 7 element types
            assert_eq!(table.len(), 42, "{} table incomplete", db);
        }
    }

    #[test]
    fn test_gul_low_air_values() {
        let table = ConcreteDatabase::GulLowAir.build_table();
        assert_eq!(table.get("30_Column").unwrap().value, 176.0);
        assert_eq!(table.get("30_Beam").unwrap().value, 220.0);
        assert_eq!(table.get("50_Wall Foundation").unwrap().value, 256.0);
        assert_eq!(table.get("25_Slab").unwrap().value, 188.0);
    }

    #[test]
    fn test_mix_families_share_values() {
        // GUL High Air at 50 MPa: beam, slab and foundation mixes differ
        let table = ConcreteDatabase::GulHighAir.build_table();
        assert_eq!(table.get("50_Beam").unwrap().value, 343.0);
        assert_eq!(table.get("50_Slab").unwrap().value, 322.0);
        assert_eq!(table.get("50_Slab on Grade").unwrap().value, 322.0);
        assert_eq!(table.get("50_Foundation").unwrap().value, 257.0);
        assert_eq!(table.get("50_Column").unwrap().value, 257.0);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = ConcreteDatabase::GuHighAir.build_table();
        assert_eq!(table.get("35_column").unwrap().value, 227.0);
        assert_eq!(table.get("35_COLUMN").unwrap().value, 227.0);
    }

    #[test]
    fn test_epd_provenance() {
        let table = ConcreteDatabase::GulLowAir.build_table();
        let factor = table.get("30_Column").unwrap();
        assert_eq!(
            factor.epd_number.as_deref(),
            Some("CONCRETE-GUL Low Air-30-Column")
        );
        assert_eq!(factor.unit, "kgCO₂e/m³");
        assert_eq!(factor.publication_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_from_name_unknown_lists_available() {
        let err = ConcreteDatabase::from_name("GUL Medium Air").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Unknown concrete database: 'GUL Medium Air'"));
        assert!(message.contains("GUL Low Air, GUL High Air, GU Low Air, GU High Air"));
    }

    #[test]
    fn test_missing_combination_is_none() {
        let table = ConcreteDatabase::GulLowAir.build_table();
        // 55 MPa is outside the published grade set
        assert!(table.get("55_Column").is_none());
    }
}
