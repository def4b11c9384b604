//! # Concrete Strength Handling
//!
//! Country-aware unit normalization and grade snapping for concrete
//! compressive strength.
//!
//! Canadian models report strength in MPa. US models report PSI, but the
//! field itself carries no unit, so a heuristic decides: a US value above
//! 100 is treated as PSI and divided by 145.038. The heuristic misreads
//! nothing in practice (4000 PSI ≈ 27.6 MPa is the low end of structural
//! concrete) but an ultra-high-strength PSI value under 100 would pass
//! through untouched. Documented, not silently corrected.
//!
//! Normalized strengths snap to the nearest published grade
//! {25, 30, 35, 40, 45, 50} MPa; ties go to the lower grade.
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::calculation::strength::{normalize_strength, snap_to_grade, Country};
//!
//! let mpa = normalize_strength(4350.0, Country::UnitedStates);
//! assert_eq!(snap_to_grade(mpa), 30);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// PSI per MPa divisor for US strength values
pub const PSI_TO_MPA: f64 = 145.038;

/// Concrete strength grades the factor matrices are published for, MPa
pub const STRENGTH_GRADES_MPA: [u32; 6] = [25, 30, 35, 40, 45, 50];

/// Country of origin for the building model; decides the strength unit
/// convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Country {
    /// Strength values in MPa
    #[default]
    #[serde(rename = "CAN")]
    Canada,

    /// Strength values in PSI (above the 100 heuristic threshold)
    #[serde(rename = "USA")]
    UnitedStates,
}

impl Country {
    /// All supported countries
    pub const ALL: [Country; 2] = [Country::Canada, Country::UnitedStates];

    /// Three-letter code used in configs and reports
    pub fn code(&self) -> &'static str {
        match self {
            Country::Canada => "CAN",
            Country::UnitedStates => "USA",
        }
    }

    /// Parse a country from a code or common name, ignoring case
    pub fn from_code(code: &str) -> CalcResult<Self> {
        match code.trim().to_uppercase().as_str() {
            "CAN" | "CANADA" => Ok(Country::Canada),
            "USA" | "US" | "UNITED STATES" => Ok(Country::UnitedStates),
            other => Err(CalcError::invalid_input(
                "country",
                other,
                "expected CAN or USA",
            )),
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Normalize a raw compressive strength to MPa.
///
/// US values above 100 are assumed to be PSI and divided by
/// [`PSI_TO_MPA`]; everything else passes through unchanged.
pub fn normalize_strength(raw: f64, country: Country) -> f64 {
    match country {
        Country::UnitedStates if raw > 100.0 => raw / PSI_TO_MPA,
        _ => raw,
    }
}

/// Snap a strength in MPa to the nearest published grade.
///
/// Ascending scan with strict improvement, so an exact midpoint keeps the
/// lower grade: 37.5 snaps to 35, not 40.
pub fn snap_to_grade(strength_mpa: f64) -> u32 {
    let mut best = STRENGTH_GRADES_MPA[0];
    let mut best_distance = (strength_mpa - best as f64).abs();
    for &grade in &STRENGTH_GRADES_MPA[1..] {
        let distance = (strength_mpa - grade as f64).abs();
        if distance < best_distance {
            best = grade;
            best_distance = distance;
        }
    }
    best
}
