//! # Carbon Calculator
//!
//! The dispatch core of the pipeline. [`CarbonCalculator`] takes a
//! [`BuildingElement`] and prices each of its materials against the
//! configured databases, producing one [`CarbonResult`] per material that
//! resolves and one [`MaterialFailure`] per material that does not.
//!
//! A failed material never aborts the element, and a failed element never
//! aborts the run. Every material key that fails factor lookup is recorded
//! (post-normalization, deduplicated) so the run can report exactly which
//! factors the databases are missing.
//!
//! Factor lookups are cached per raw key for the lifetime of the
//! calculator, so a model with ten thousand "CLT Floor Panel" instances
//! pays for one alias resolution.
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::calculation::CarbonCalculator;
//! use carbon_core::config::CalculatorConfig;
//! use carbon_core::element::{BuildingElement, ElementCategory, Material, MaterialProperties};
//!
//! let mut calculator = CarbonCalculator::new(CalculatorConfig::default());
//! let element = BuildingElement::new("w1", "Roof Beam", "Level 2", ElementCategory::Beam)
//!     .with_material(Material::wood(MaterialProperties::new("Glulam", 2.0)));
//!
//! let outcome = calculator.calculate_element(&element);
//! // Binderholz Glulam is 118 kgCO₂e/m³
//! assert!((outcome.total_carbon() - 236.0).abs() < 1e-9);
//! ```

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::CalculatorConfig;
use crate::element::{BuildingElement, Material, MaterialKind};
use crate::errors::{CalcError, CalcResult};
use crate::factors::alias::{normalize_material_key, MaterialFamily};
use crate::factors::concrete::concrete_key;
use crate::factors::{EmissionFactor, EmissionFactorRegistry};

use super::strength::{normalize_strength, snap_to_grade};
use super::{CarbonResult, ElementCarbon, MaterialFailure};

// ============================================================================
// Missing Factors
// ============================================================================

/// Deduplicated, sorted record of every factor lookup that failed during
/// a run, keyed the way the lookup was attempted (normalized material key
/// for timber and steel, `strength_Type` for concrete).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingFactors {
    pub timber: Vec<String>,
    pub steel: Vec<String>,
    pub concrete: Vec<String>,
}

impl MissingFactors {
    /// True when every family resolved every key it was asked for
    pub fn is_empty(&self) -> bool {
        self.timber.is_empty() && self.steel.is_empty() && self.concrete.is_empty()
    }

    /// Total count of distinct missing keys across all families
    pub fn total(&self) -> usize {
        self.timber.len() + self.steel.len() + self.concrete.len()
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Stateful calculator for one run: configuration, factor registry,
/// per-key lookup caches and the missing-factor record.
#[derive(Debug)]
pub struct CarbonCalculator {
    config: CalculatorConfig,
    registry: EmissionFactorRegistry,
    timber_cache: HashMap<String, Option<EmissionFactor>>,
    steel_cache: HashMap<String, Option<EmissionFactor>>,
    concrete_cache: HashMap<String, Option<EmissionFactor>>,
    missing_timber: BTreeSet<String>,
    missing_steel: BTreeSet<String>,
    missing_concrete: BTreeSet<String>,
}

impl CarbonCalculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            config,
            registry: EmissionFactorRegistry::new(),
            timber_cache: HashMap::new(),
            steel_cache: HashMap::new(),
            concrete_cache: HashMap::new(),
            missing_timber: BTreeSet::new(),
            missing_steel: BTreeSet::new(),
            missing_concrete: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Calculate carbon for every material of one element.
    ///
    /// Materials are processed independently: each either contributes a
    /// result keyed by material name, or a failure carrying the error.
    pub fn calculate_element(&mut self, element: &BuildingElement) -> ElementCarbon {
        let mut outcome = ElementCarbon::default();
        for material in &element.materials {
            match self.calculate_material(element, material) {
                Ok(result) => {
                    outcome.results.insert(material.name().to_string(), result);
                }
                Err(error) => {
                    warn!(
                        element_id = %element.id,
                        material = material.name(),
                        error = %error,
                        "material not calculated"
                    );
                    outcome.failures.push(MaterialFailure {
                        material: material.name().to_string(),
                        error,
                    });
                }
            }
        }
        outcome
    }

    /// Snapshot of every factor lookup that has failed so far
    pub fn missing_factors(&self) -> MissingFactors {
        MissingFactors {
            timber: self.missing_timber.iter().cloned().collect(),
            steel: self.missing_steel.iter().cloned().collect(),
            concrete: self.missing_concrete.iter().cloned().collect(),
        }
    }

    fn calculate_material(
        &mut self,
        element: &BuildingElement,
        material: &Material,
    ) -> CalcResult<CarbonResult> {
        match material.kind {
            MaterialKind::Wood => self.calculate_wood(material),
            MaterialKind::Metal => self.calculate_metal(material),
            MaterialKind::Concrete => self.calculate_concrete(element, material),
        }
    }

    // ------------------------------------------------------------------
    // Wood: volume × factor (kgCO₂e/m³)
    // ------------------------------------------------------------------

    fn calculate_wood(&mut self, material: &Material) -> CalcResult<CarbonResult> {
        let key = material
            .properties
            .structural_asset
            .as_deref()
            .unwrap_or_else(|| material.name());

        let Some(factor) = self.timber_factor_cached(key) else {
            self.missing_timber
                .insert(normalize_material_key(key, MaterialFamily::Timber));
            return Err(CalcError::factor_not_found(
                key,
                self.config.timber_database.name(),
            ));
        };

        let volume = material.properties.volume_m3;
        Ok(CarbonResult::Wood {
            factor: factor.value,
            volume_m3: volume,
            database: factor.database,
            total_carbon: volume * factor.value,
        })
    }

    // ------------------------------------------------------------------
    // Metal: mass × factor (kgCO₂e/kg)
    // ------------------------------------------------------------------

    fn calculate_metal(&mut self, material: &Material) -> CalcResult<CarbonResult> {
        let mass = material
            .mass_kg
            .ok_or_else(|| CalcError::missing_field("mass_kg"))?;

        let key = material
            .grade
            .as_deref()
            .unwrap_or_else(|| material.name());

        let Some(factor) = self.steel_factor_cached(key) else {
            self.missing_steel
                .insert(normalize_material_key(key, MaterialFamily::Steel));
            return Err(CalcError::factor_not_found(
                key,
                self.config.steel_database.name(),
            ));
        };

        Ok(CarbonResult::Metal {
            factor: factor.value,
            mass_kg: mass,
            database: factor.database,
            total_carbon: mass * factor.value,
        })
    }

    // ------------------------------------------------------------------
    // Concrete: mix carbon plus priced-in reinforcement
    // ------------------------------------------------------------------

    fn calculate_concrete(
        &mut self,
        element: &BuildingElement,
        material: &Material,
    ) -> CalcResult<CarbonResult> {
        let raw_strength = material
            .properties
            .compressive_strength
            .ok_or_else(|| CalcError::missing_field("compressive_strength"))?;

        let mpa = normalize_strength(raw_strength, self.config.country);
        let grade = snap_to_grade(mpa);
        let element_type = element.category.concrete_element_type();

        let Some(factor) = self.concrete_factor_cached(grade, element_type) else {
            self.missing_concrete.insert(concrete_key(grade, element_type));
            return Err(CalcError::factor_not_found(
                concrete_key(grade, element_type),
                self.config.concrete_database.name(),
            ));
        };

        let volume = material.properties.volume_m3;
        let concrete_carbon = volume * factor.value;

        let rate = self.config.reinforcement_rates.rate(element_type);
        // rate is kg/m³; published totals scale the product by 1/1000
        let reinforcement_mass = volume * rate / 1000.0;

        let Some(rebar) = self.steel_factor_cached("Rebar") else {
            self.missing_steel
                .insert(normalize_material_key("Rebar", MaterialFamily::Steel));
            return Err(CalcError::factor_not_found(
                "Rebar",
                self.config.steel_database.name(),
            ));
        };
        let reinforcement_carbon = reinforcement_mass * rebar.value;

        Ok(CarbonResult::Concrete {
            factor: factor.value,
            concrete_volume_m3: volume,
            database: factor.database,
            concrete_carbon,
            reinforcement_rate_kg_m3: rate,
            reinforcement_mass_kg: reinforcement_mass,
            reinforcement_factor: rebar.value,
            reinforcement_carbon,
            total_carbon: concrete_carbon + reinforcement_carbon,
        })
    }

    // ------------------------------------------------------------------
    // Lookup caches
    // ------------------------------------------------------------------

    fn timber_factor_cached(&mut self, key: &str) -> Option<EmissionFactor> {
        if let Some(hit) = self.timber_cache.get(key) {
            return hit.clone();
        }
        let resolved = self
            .registry
            .timber_factor(key, self.config.timber_database);
        if resolved.is_none() {
            debug!(key, database = self.config.timber_database.name(), "timber factor miss");
        }
        self.timber_cache.insert(key.to_string(), resolved.clone());
        resolved
    }

    fn steel_factor_cached(&mut self, key: &str) -> Option<EmissionFactor> {
        if let Some(hit) = self.steel_cache.get(key) {
            return hit.clone();
        }
        let resolved = self.registry.steel_factor(key, self.config.steel_database);
        if resolved.is_none() {
            debug!(key, database = self.config.steel_database.name(), "steel factor miss");
        }
        self.steel_cache.insert(key.to_string(), resolved.clone());
        resolved
    }

    fn concrete_factor_cached(&mut self, strength: u32, element_type: &str) -> Option<EmissionFactor> {
        let key = concrete_key(strength, element_type);
        if let Some(hit) = self.concrete_cache.get(&key) {
            return hit.clone();
        }
        let resolved = self.registry.concrete_factor(
            strength,
            element_type,
            self.config.concrete_database,
        );
        if resolved.is_none() {
            debug!(
                key = %key,
                database = self.config.concrete_database.name(),
                "concrete factor miss"
            );
        }
        self.concrete_cache.insert(key, resolved.clone());
        resolved
    }
}
