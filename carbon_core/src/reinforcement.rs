//! # Reinforcement Rates
//!
//! Reinforcing-steel density per concrete element type, in kg of rebar per
//! m³ of placed concrete. The calculator multiplies these rates against
//! concrete volume to derive the reinforcement contribution of a pour.
//!
//! ## Default rates
//!
//! | Element type          | kg/m³ |
//! |-----------------------|-------|
//! | Grade Beam            | 100   |
//! | Slab on Grade         | 85    |
//! | Pad Footing           | 100   |
//! | Pile                  | 100   |
//! | Strip Footing         | 100   |
//! | Pile Cap              | 100   |
//! | Walls - wind/gravity  | 150   |
//! | Column                | 450   |
//! | Shear Walls           | 150   |
//! | Concrete Slabs        | 120   |
//! | Beams                 | 220   |
//! | Topping Slabs         | 85    |
//!
//! Rates are caller-configurable per project; anything unmatched falls back
//! to [`DEFAULT_REINFORCEMENT_RATE`]. The fallback is a conservative
//! placeholder, so an unmatched type is worth treating as a data-quality
//! signal rather than a validated rate.
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::reinforcement::ReinforcementRates;
//!
//! let rates = ReinforcementRates::default();
//! assert_eq!(rates.rate("Column"), 450.0);
//! assert_eq!(rates.rate("W24 transfer beam"), 220.0);
//! assert_eq!(rates.rate("spandrel"), 100.0);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rate applied when no element type matches, kg/m³
pub const DEFAULT_REINFORCEMENT_RATE: f64 = 100.0;

/// Concrete element types with published reinforcement rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteElementType {
    #[serde(rename = "Grade Beam")]
    GradeBeam,
    #[serde(rename = "Slab on Grade")]
    SlabOnGrade,
    #[serde(rename = "Pad Footing")]
    PadFooting,
    #[serde(rename = "Pile")]
    Pile,
    #[serde(rename = "Strip Footing")]
    StripFooting,
    #[serde(rename = "Pile Cap")]
    PileCap,
    #[serde(rename = "Walls - wind/gravity")]
    GravityWall,
    #[serde(rename = "Column")]
    Column,
    #[serde(rename = "Shear Walls")]
    ShearWall,
    #[serde(rename = "Concrete Slabs")]
    ConcreteSlab,
    #[serde(rename = "Beams")]
    Beam,
    #[serde(rename = "Topping Slabs")]
    ToppingSlab,
}

impl ConcreteElementType {
    /// All element types, in display order
    pub const ALL: [ConcreteElementType; 12] = [
        ConcreteElementType::GradeBeam,
        ConcreteElementType::SlabOnGrade,
        ConcreteElementType::PadFooting,
        ConcreteElementType::Pile,
        ConcreteElementType::StripFooting,
        ConcreteElementType::PileCap,
        ConcreteElementType::GravityWall,
        ConcreteElementType::Column,
        ConcreteElementType::ShearWall,
        ConcreteElementType::ConcreteSlab,
        ConcreteElementType::Beam,
        ConcreteElementType::ToppingSlab,
    ];

    /// Display label, as used in configs and drawings
    pub fn label(&self) -> &'static str {
        match self {
            ConcreteElementType::GradeBeam => "Grade Beam",
            ConcreteElementType::SlabOnGrade => "Slab on Grade",
            ConcreteElementType::PadFooting => "Pad Footing",
            ConcreteElementType::Pile => "Pile",
            ConcreteElementType::StripFooting => "Strip Footing",
            ConcreteElementType::PileCap => "Pile Cap",
            ConcreteElementType::GravityWall => "Walls - wind/gravity",
            ConcreteElementType::Column => "Column",
            ConcreteElementType::ShearWall => "Shear Walls",
            ConcreteElementType::ConcreteSlab => "Concrete Slabs",
            ConcreteElementType::Beam => "Beams",
            ConcreteElementType::ToppingSlab => "Topping Slabs",
        }
    }

    /// Documented default rate in kg/m³
    pub fn default_rate(&self) -> f64 {
        match self {
            ConcreteElementType::GradeBeam => 100.0,
            ConcreteElementType::SlabOnGrade => 85.0,
            ConcreteElementType::PadFooting => 100.0,
            ConcreteElementType::Pile => 100.0,
            ConcreteElementType::StripFooting => 100.0,
            ConcreteElementType::PileCap => 100.0,
            ConcreteElementType::GravityWall => 150.0,
            ConcreteElementType::Column => 450.0,
            ConcreteElementType::ShearWall => 150.0,
            ConcreteElementType::ConcreteSlab => 120.0,
            ConcreteElementType::Beam => 220.0,
            ConcreteElementType::ToppingSlab => 85.0,
        }
    }
}

impl std::fmt::Display for ConcreteElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-project reinforcement rates keyed by element-type label.
///
/// Serializes as a flat map so a config file can supply any subset of
/// types. A type absent from the map resolves to
/// [`DEFAULT_REINFORCEMENT_RATE`], including enum types the config dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReinforcementRates {
    rates: BTreeMap<String, f64>,
}

impl Default for ReinforcementRates {
    fn default() -> Self {
        let rates = ConcreteElementType::ALL
            .iter()
            .map(|ty| (ty.label().to_string(), ty.default_rate()))
            .collect();
        Self { rates }
    }
}

impl ReinforcementRates {
    /// Create from an explicit label → rate map
    pub fn new(rates: BTreeMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Set the rate for one element type
    pub fn set(&mut self, element_type: ConcreteElementType, rate: f64) {
        self.rates.insert(element_type.label().to_string(), rate);
    }

    /// Rate for a known element type; 100.0 when the map lacks it
    pub fn rate_for(&self, element_type: ConcreteElementType) -> f64 {
        let label = element_type.label();
        self.rates
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(label))
            .map(|(_, rate)| *rate)
            .unwrap_or(DEFAULT_REINFORCEMENT_RATE)
    }

    /// Resolve a free-text element-type string to a rate.
    ///
    /// Exact label match first (case-insensitive), then keyword fallback
    /// with compound cues checked before plain ones so "grade beam" is not
    /// swallowed by "beam". Unmatched strings return
    /// [`DEFAULT_REINFORCEMENT_RATE`]; this never errors.
    pub fn rate(&self, element_type: &str) -> f64 {
        let trimmed = element_type.trim();
        for ty in ConcreteElementType::ALL {
            if ty.label().eq_ignore_ascii_case(trimmed) {
                return self.rate_for(ty);
            }
        }

        let lower = trimmed.to_lowercase();
        let matched = if lower.contains("beam") && lower.contains("grade") {
            Some(ConcreteElementType::GradeBeam)
        } else if lower.contains("slab") && lower.contains("grade") {
            Some(ConcreteElementType::SlabOnGrade)
        } else if lower.contains("slab") && lower.contains("topping") {
            Some(ConcreteElementType::ToppingSlab)
        } else if lower.contains("wall") && lower.contains("shear") {
            Some(ConcreteElementType::ShearWall)
        } else if lower.contains("footing") && lower.contains("pad") {
            Some(ConcreteElementType::PadFooting)
        } else if lower.contains("footing") && lower.contains("strip") {
            Some(ConcreteElementType::StripFooting)
        } else if lower.contains("pile") && lower.contains("cap") {
            Some(ConcreteElementType::PileCap)
        } else if lower.contains("beam") {
            Some(ConcreteElementType::Beam)
        } else if lower.contains("slab") {
            Some(ConcreteElementType::ConcreteSlab)
        } else if lower.contains("wall") {
            Some(ConcreteElementType::GravityWall)
        } else if lower.contains("column") {
            Some(ConcreteElementType::Column)
        } else if lower.contains("pile") {
            Some(ConcreteElementType::Pile)
        } else if lower.contains("footing") {
            Some(ConcreteElementType::PadFooting)
        } else {
            None
        };

        match matched {
            Some(ty) => self.rate_for(ty),
            None => DEFAULT_REINFORCEMENT_RATE,
        }
    }
}
