//! # Steel Databases
//!
//! Embodied-carbon factors for structural steel products, expressed per
//! kilogram of steel. Metal quantities are mass-based, unlike timber and
//! concrete which are volume-based.
//!
//! The single published grade table, "Type 350 MPa", covers the common
//! product forms: hot rolled sections, HSS, plate, rebar, open web steel
//! joists, fasteners and metal deck. Reinforcing steel inside concrete is
//! priced from this table's "Rebar" entry, never from a concrete database.
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::factors::SteelDatabase;
//!
//! let table = SteelDatabase::Type350MPa.build_table();
//! assert_eq!(table.get("Rebar").unwrap().value, 0.854);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

use super::{EmissionFactor, FactorTable, UNIT_PER_KG};

/// Steel emission factor databases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SteelDatabase {
    /// CSA G40.21 350 MPa grade structural steel (7 product forms)
    #[default]
    #[serde(rename = "Type 350 MPa")]
    Type350MPa,
}

impl SteelDatabase {
    /// All steel databases, in display order
    pub const ALL: [SteelDatabase; 1] = [SteelDatabase::Type350MPa];

    /// Display name, as used in configs and reports
    pub fn name(&self) -> &'static str {
        match self {
            SteelDatabase::Type350MPa => "Type 350 MPa",
        }
    }

    /// Display names of all steel databases
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
            .ok_or_else(|| CalcError::unknown_database("steel", trimmed, &Self::names()))
    }

    /// Build the factor table for this database
    pub fn build_table(&self) -> FactorTable {
        // (product form, kgCO₂e/kg, EPD number)
        let rows: &[(&str, f64, &str)] = match self {
            SteelDatabase::Type350MPa => &[
                ("Hot Rolled", 1.22, "STEEL-350-HR"),
                ("HSS", 1.99, "STEEL-350-HSS"),
                ("Plate", 1.73, "STEEL-350-PL"),
                ("Rebar", 0.854, "STEEL-350-RB"),
                ("OWSJ", 1.38, "STEEL-350-OWSJ"),
                ("Fasteners", 1.73, "STEEL-350-FST"),
                ("Metal Deck", 2.37, "STEEL-350-MD"),
            ],
        };

        let mut table = FactorTable::new(self.name());
        for &(key, value, epd) in rows {
            table.insert(
                key,
                EmissionFactor::new(value, UNIT_PER_KG, self.name()).with_epd(
                    epd,
                    "2024-01-01",
                    "2029-01-01",
                ),
            );
        }
        table
    }
}

impl std::fmt::Display for SteelDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_350_factors() {
        let table = SteelDatabase::Type350MPa.build_table();
        assert_eq!(table.len(), 7);
        assert_eq!(table.get("Hot Rolled").unwrap().value, 1.22);
        assert_eq!(table.get("hss").unwrap().value, 1.99);
        assert_eq!(table.get("REBAR").unwrap().value, 0.854);
        assert_eq!(table.get("Metal Deck").unwrap().value, 2.37);
    }

    #[test]
    fn test_factors_are_mass_based() {
        let table = SteelDatabase::Type350MPa.build_table();
        let rebar = table.get("Rebar").unwrap();
        assert_eq!(rebar.unit, "kgCO₂e/kg");
        assert_eq!(rebar.epd_number.as_deref(), Some("STEEL-350-RB"));
        assert_eq!(rebar.database, "Type 350 MPa");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            SteelDatabase::from_name("type 350 mpa").unwrap(),
            SteelDatabase::Type350MPa
        );

        let err = SteelDatabase::from_name("Type 500").unwrap_err();
        assert!(err
            .to_string()
            .contains("Unknown steel database: 'Type 500'. Available databases: Type 350 MPa"));
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&SteelDatabase::Type350MPa).unwrap();
        assert_eq!(json, "\"Type 350 MPa\"");
    }
}
