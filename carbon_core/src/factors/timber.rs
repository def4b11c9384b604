//! # Timber Databases
//!
//! Published embodied-carbon factors for engineered and sawn wood products,
//! expressed per cubic metre of product.
//!
//! ## Coverage
//!
//! | Database                | Products | Vintage |
//! |-------------------------|----------|---------|
//! | ATHENA 2021             | 6        | 2021    |
//! | Structurlam, 2020       | 2        | 2020    |
//! | AWC, CWC, 2018          | 7        | 2018    |
//! | Katerra, 2020           | 1        | 2020    |
//! | Nordic Structures, 2018 | 2        | 2018    |
//! | Binderholz, 2019        | 2        | 2019    |
//! | Structuralam Abbotsford | 1        | 2020    |
//! | CLF Baseline Document   | 2        | 2020    |
//! | INDUSTRY AVERAGE        | 9        | 2020    |
//!
//! Not every database carries every product. A material that resolves to a
//! product the selected database lacks is reported as a missing factor, not
//! silently substituted from another database.
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::factors::TimberDatabase;
//!
//! let table = TimberDatabase::Athena2021.build_table();
//! assert_eq!(table.get("CLT").unwrap().value, 69.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

use super::{EmissionFactor, FactorTable, UNIT_PER_M3};

/// Timber emission factor databases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimberDatabase {
    /// Athena Sustainable Materials Institute, 2021 (6 products)
    #[serde(rename = "ATHENA 2021")]
    Athena2021,

    /// Structurlam manufacturer EPDs, 2020 (Glulam, CLT)
    #[serde(rename = "Structurlam, 2020")]
    Structurlam2020,

    /// American Wood Council / Canadian Wood Council, 2018 (7 products)
    #[serde(rename = "AWC, CWC, 2018")]
    AwcCwc2018,

    /// Katerra plant-specific CLT EPD, 2020
    #[serde(rename = "Katerra, 2020")]
    Katerra2020,

    /// Nordic Structures manufacturer EPDs, 2018 (Glulam, CLT)
    #[serde(rename = "Nordic Structures, 2018")]
    NordicStructures2018,

    /// Binderholz manufacturer EPDs, 2019 (Glulam, CLT)
    #[default]
    #[serde(rename = "Binderholz, 2019")]
    Binderholz2019,

    /// Structurlam Abbotsford plant Glulam EPD
    #[serde(rename = "Structuralam Abbotsford")]
    StructuralamAbbotsford,

    /// Carbon Leadership Forum baseline figures (CLT, GLT/NLT/DLT)
    #[serde(rename = "CLF Baseline Document")]
    ClfBaselineDocument,

    /// Industry-average figures across North American producers (9 products)
    #[serde(rename = "INDUSTRY AVERAGE")]
    IndustryAverage,
}

impl TimberDatabase {
    /// All timber databases, in display order
    pub const ALL: [TimberDatabase; 9] = [
        TimberDatabase::Athena2021,
        TimberDatabase::Structurlam2020,
        TimberDatabase::AwcCwc2018,
        TimberDatabase::Katerra2020,
        TimberDatabase::NordicStructures2018,
        TimberDatabase::Binderholz2019,
        TimberDatabase::StructuralamAbbotsford,
        TimberDatabase::ClfBaselineDocument,
        TimberDatabase::IndustryAverage,
    ];

    /// Display name, as used in configs and reports
    pub fn name(&self) -> &'static str {
        match self {
            TimberDatabase::Athena2021 => "ATHENA 2021",
            TimberDatabase::Structurlam2020 => "Structurlam, 2020",
            TimberDatabase::AwcCwc2018 => "AWC, CWC, 2018",
            TimberDatabase::Katerra2020 => "Katerra, 2020",
            TimberDatabase::NordicStructures2018 => "Nordic Structures, 2018",
            TimberDatabase::Binderholz2019 => "Binderholz, 2019",
            TimberDatabase::StructuralamAbbotsford => "Structuralam Abbotsford",
            TimberDatabase::ClfBaselineDocument => "CLF Baseline Document",
            TimberDatabase::IndustryAverage => "INDUSTRY AVERAGE",
        }
    }

    /// Display names of all timber databases
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
            .ok_or_else(|| CalcError::unknown_database("timber", trimmed, &Self::names()))
    }

    /// Build the factor table for this database
    pub fn build_table(&self) -> FactorTable {
        // (material key, kgCO₂e/m³, EPD number)
        let (rows, published, valid_until): (&[(&str, f64, &str)], &str, &str) = match self {
            TimberDatabase::Athena2021 => (
                &[
                    ("Glulam", 107.0, "ATHENA-2021-GL"),
                    ("CLT", 69.0, "ATHENA-2021-CLT"),
                    ("LVL", 169.0, "ATHENA-2021-LVL"),
                    ("Softwood Lumber", 48.0, "ATHENA-2021-SWL"),
                    ("Softwood Plywood", 65.0, "ATHENA-2021-SWP"),
                    ("Oriented Strand Board", 182.0, "ATHENA-2021-OSB"),
                ],
                "2021-01-01",
                "2026-01-01",
            ),
            TimberDatabase::Structurlam2020 => (
                &[
                    ("Glulam", 115.0, "STR-2020-GL"),
                    ("CLT", 124.0, "STR-2020-CLT"),
                ],
                "2020-01-01",
                "2025-01-01",
            ),
            TimberDatabase::AwcCwc2018 => (
                &[
                    ("Glulam", 137.0, "AWC-2018-GL"),
                    ("LVL", 361.0, "AWC-2018-LVL"),
                    ("Softwood Lumber", 63.0, "AWC-2018-SWL"),
                    ("Softwood Plywood", 219.0, "AWC-2018-SWP"),
                    ("Wood Joists", 2.0, "AWC-2018-WJ"),
                    ("Redwood Lumber", 38.0, "AWC-2018-RWL"),
                    ("Oriented Strand Board", 243.0, "AWC-2018-OSB"),
                ],
                "2018-01-01",
                "2023-01-01",
            ),
            TimberDatabase::Katerra2020 => (
                &[("CLT", 158.0, "KAT-2020-CLT")],
                "2020-01-01",
                "2025-01-01",
            ),
            TimberDatabase::NordicStructures2018 => (
                &[
                    ("Glulam", 100.0, "NS-2018-GL"),
                    ("CLT", 122.0, "NS-2018-CLT"),
                ],
                "2018-01-01",
                "2023-01-01",
            ),
            TimberDatabase::Binderholz2019 => (
                &[
                    ("Glulam", 118.0, "BH-2019-GL"),
                    ("CLT", 200.0, "BH-2019-CLT"),
                ],
                "2019-01-01",
                "2024-01-01",
            ),
            TimberDatabase::StructuralamAbbotsford => (
                &[("Glulam", 103.0, "SA-GL")],
                "2020-01-01",
                "2025-01-01",
            ),
            TimberDatabase::ClfBaselineDocument => (
                &[
                    ("CLT", 137.0, "CLF-CLT"),
                    ("GLT/NLT/DLT", 109.0, "CLF-GLT"),
                ],
                "2020-01-01",
                "2025-01-01",
            ),
            TimberDatabase::IndustryAverage => (
                &[
                    ("Glulam", 113.0, "IA-GL"),
                    ("CLT", 135.0, "IA-CLT"),
                    ("LVL", 265.0, "IA-LVL"),
                    ("Softwood Lumber", 56.0, "IA-SWL"),
                    ("Softwood Plywood", 142.0, "IA-SWP"),
                    ("Wood Joists", 2.0, "IA-WJ"),
                    ("Redwood Lumber", 38.0, "IA-RWL"),
                    ("Oriented Strand Board", 212.0, "IA-OSB"),
                    ("GLT/NLT/DLT", 123.0, "IA-GLT"),
                ],
                "2020-01-01",
                "2025-01-01",
            ),
        };

        let mut table = FactorTable::new(self.name());
        for &(key, value, epd) in rows {
            table.insert(
                key,
                EmissionFactor::new(value, UNIT_PER_M3, self.name()).with_epd(
                    epd,
                    published,
                    valid_until,
                ),
            );
        }
        table
    }
}

impl std::fmt::Display for TimberDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_binderholz() {
        assert_eq!(TimberDatabase::default(), TimberDatabase::Binderholz2019);
    }

    #[test]
    fn test_from_name_is_flexible() {
        assert_eq!(
            TimberDatabase::from_name("athena 2021").unwrap(),
            TimberDatabase::Athena2021
        );
        assert_eq!(
            TimberDatabase::from_name("  Binderholz, 2019  ").unwrap(),
            TimberDatabase::Binderholz2019
        );
        assert_eq!(
            TimberDatabase::from_name("industry average").unwrap(),
            TimberDatabase::IndustryAverage
        );
    }

    #[test]
    fn test_from_name_unknown_lists_available() {
        let err = TimberDatabase::from_name("Bogus DB").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Unknown timber database: 'Bogus DB'"));
        assert!(message.contains("ATHENA 2021"));
        assert!(message.contains("INDUSTRY AVERAGE"));
    }

    #[test]
    fn test_athena_factors() {
        let table = TimberDatabase::Athena2021.build_table();
        assert_eq!(table.len(), 6);
        assert_eq!(table.get("Glulam").unwrap().value, 107.0);
        assert_eq!(table.get("clt").unwrap().value, 69.0);

        let clt = table.get("CLT").unwrap();
        assert_eq!(clt.epd_number.as_deref(), Some("ATHENA-2021-CLT"));
        assert_eq!(clt.publication_date.as_deref(), Some("2021-01-01"));
        assert_eq!(clt.valid_until.as_deref(), Some("2026-01-01"));
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(TimberDatabase::AwcCwc2018.build_table().len(), 7);
        assert_eq!(TimberDatabase::Katerra2020.build_table().len(), 1);
        assert_eq!(TimberDatabase::IndustryAverage.build_table().len(), 9);
    }

    #[test]
    fn test_sparse_coverage() {
        // Katerra publishes only CLT; Glulam is a genuine miss there
        let table = TimberDatabase::Katerra2020.build_table();
        assert!(table.get("CLT").is_some());
        assert!(table.get("Glulam").is_none());
    }

    #[test]
    fn test_factor_carries_database_name() {
        let table = TimberDatabase::ClfBaselineDocument.build_table();
        let glt = table.get("GLT/NLT/DLT").unwrap();
        assert_eq!(glt.database, "CLF Baseline Document");
        assert_eq!(glt.unit, "kgCO₂e/m³");
        assert_eq!(glt.value, 109.0);
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&TimberDatabase::Athena2021).unwrap();
        assert_eq!(json, "\"ATHENA 2021\"");

        let parsed: TimberDatabase = serde_json::from_str("\"Nordic Structures, 2018\"").unwrap();
        assert_eq!(parsed, TimberDatabase::NordicStructures2018);
    }
}
