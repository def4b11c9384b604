//! # Batch Analysis
//!
//! [`ModelAnalyzer`] drives a whole-model run: it walks the takeoff tree
//! level by level, classifies each element's materials, prices them through
//! the calculator and aggregates masses on the side. One element never
//! aborts another; every element ends the run in exactly one bucket:
//!
//! ```text
//! processed  at least one material priced; carries the per-material results
//! skipped    exported geometry (lines, arcs, circles), not building stock
//! warning    nothing to price: no material quantities, or none classifiable
//! error      materials were classifiable but every single one failed
//! ```
//!
//! The run ends in an [`AnalysisSummary`]: a serializable report carrying
//! the per-element records, the issue lists, missing-factor lists, mass
//! totals and run metadata.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::aggregator::{MassAggregator, MassTotals};
use crate::calculation::{CarbonCalculator, CarbonResult, MaterialFailure, MissingFactors};
use crate::config::CalculatorConfig;
use crate::element::{BuildingElement, ElementCategory};
use crate::logging::CategoryLog;
use crate::takeoff::{classify_material, ModelRoot, RawElement};

// ============================================================================
// Summary types
// ============================================================================

/// One successfully processed element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub id: String,
    pub name: String,
    pub level: String,
    pub category: ElementCategory,
    /// Carbon result per material name
    pub results: BTreeMap<String, CarbonResult>,
    /// Materials of this element that did not price
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<MaterialFailure>,
    pub total_carbon_kg: f64,
}

/// An element that ended the run outside the processed bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementIssue {
    pub id: String,
    pub reason: String,
}

/// Full report of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub run_id: Uuid,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub processed: Vec<ElementRecord>,
    pub skipped: Vec<ElementIssue>,
    pub warnings: Vec<ElementIssue>,
    pub errors: Vec<ElementIssue>,
    pub total_carbon_kg: f64,
    pub missing_factors: MissingFactors,
    pub mass_totals: MassTotals,
}

impl AnalysisSummary {
    pub fn element_count(&self) -> usize {
        self.processed.len() + self.skipped.len() + self.warnings.len() + self.errors.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn duration(&self) -> Duration {
        self.finished - self.started
    }

    /// Share of attempted elements that processed, as a percentage.
    /// Skipped geometry is not attempted and does not count against the
    /// rate. An empty run is a clean run.
    pub fn success_rate(&self) -> f64 {
        let attempted = self.processed.len() + self.warnings.len() + self.errors.len();
        if attempted == 0 {
            return 100.0;
        }
        self.processed.len() as f64 / attempted as f64 * 100.0
    }

    /// Human-readable run summary, one fact per line. Missing-factor lists
    /// are truncated to their first five entries.
    pub fn summary_text(&self) -> String {
        let seconds = self.duration().num_milliseconds() as f64 / 1000.0;
        let mut lines = vec![
            format!("Run {} ({:.2} s)", self.run_id, seconds),
            format!(
                "Elements: {} processed, {} skipped, {} warnings, {} errors ({:.1}% success)",
                self.processed.len(),
                self.skipped.len(),
                self.warnings.len(),
                self.errors.len(),
                self.success_rate()
            ),
            format!(
                "Embodied carbon: {:.1} kgCO₂e ({:.2} tCO₂e)",
                self.total_carbon_kg,
                self.total_carbon_kg / 1000.0
            ),
        ];
        let mass = self.mass_totals.grand_total();
        if mass > 0.0 {
            lines.push(format!("Aggregated mass: {:.0} kg", mass));
        }
        push_missing_line(&mut lines, "timber", &self.missing_factors.timber);
        push_missing_line(&mut lines, "steel", &self.missing_factors.steel);
        push_missing_line(&mut lines, "concrete", &self.missing_factors.concrete);
        lines.join("\n")
    }
}

fn push_missing_line(lines: &mut Vec<String>, family: &str, keys: &[String]) {
    if keys.is_empty() {
        return;
    }
    const SHOWN: usize = 5;
    let head = keys
        .iter()
        .take(SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if keys.len() > SHOWN {
        lines.push(format!(
            "Missing {} factors ({}): {} … and {} more",
            family,
            keys.len(),
            head,
            keys.len() - SHOWN
        ));
    } else {
        lines.push(format!("Missing {} factors ({}): {}", family, keys.len(), head));
    }
}

// ============================================================================
// Analyzer
// ============================================================================

enum ElementOutcome {
    Processed(ElementRecord),
    Skipped(ElementIssue),
    Warning(ElementIssue),
    Error(ElementIssue),
}

/// Walks a model tree and produces an [`AnalysisSummary`]
#[derive(Debug)]
pub struct ModelAnalyzer {
    calculator: CarbonCalculator,
    aggregator: MassAggregator,
    log: CategoryLog,
}

impl ModelAnalyzer {
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            calculator: CarbonCalculator::new(config),
            aggregator: MassAggregator::new(),
            log: CategoryLog::new(),
        }
    }

    /// The categorized log of the runs so far
    pub fn log(&self) -> &CategoryLog {
        &self.log
    }

    /// Analyze every element of the model
    pub fn analyze(&mut self, model: &ModelRoot) -> AnalysisSummary {
        let run_id = Uuid::new_v4();
        let started = Utc::now();
        info!(%run_id, elements = model.element_count(), "analysis started");

        let mut processed = Vec::new();
        let mut skipped = Vec::new();
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        for level in &model.elements {
            let level_name = level.display_name();
            for type_group in &level.elements {
                let type_name = type_group.display_name();
                for group in &type_group.elements {
                    for element in &group.elements {
                        match self.analyze_element(element, level_name, type_name) {
                            ElementOutcome::Processed(record) => processed.push(record),
                            ElementOutcome::Skipped(issue) => skipped.push(issue),
                            ElementOutcome::Warning(issue) => warnings.push(issue),
                            ElementOutcome::Error(issue) => errors.push(issue),
                        }
                    }
                }
            }
        }

        let total_carbon_kg = processed.iter().map(|record| record.total_carbon_kg).sum();
        let finished = Utc::now();
        info!(
            %run_id,
            processed = processed.len(),
            errors = errors.len(),
            total_carbon_kg,
            "analysis finished"
        );

        AnalysisSummary {
            run_id,
            started,
            finished,
            processed,
            skipped,
            warnings,
            errors,
            total_carbon_kg,
            missing_factors: self.calculator.missing_factors(),
            mass_totals: self.aggregator.totals(),
        }
    }

    fn analyze_element(
        &mut self,
        raw: &RawElement,
        level: &str,
        type_group: &str,
    ) -> ElementOutcome {
        if raw.is_geometry() {
            let object_type = raw.object_type.as_deref().unwrap_or("geometry");
            self.log
                .info(&raw.id, "Skipped Geometry", "geometry object, not building stock");
            return ElementOutcome::Skipped(ElementIssue {
                id: raw.id.clone(),
                reason: format!("geometry object ({object_type})"),
            });
        }

        if !raw.has_materials() {
            self.log.warn(
                &raw.id,
                "Missing Material Quantities",
                "no material quantities, not a model object",
            );
            return ElementOutcome::Warning(ElementIssue {
                id: raw.id.clone(),
                reason: "no material quantities".to_string(),
            });
        }

        let mut element = BuildingElement::new(&raw.id, raw.display_name(), level, raw.category());
        let mut failures = Vec::new();

        for (key, raw_material) in &raw.properties.material_quantities {
            match classify_material(key, raw_material) {
                Ok(material) => {
                    if let Some(mass) = material.mass_estimate_kg() {
                        let label = material
                            .properties
                            .structural_asset
                            .as_deref()
                            .unwrap_or_else(|| material.name());
                        self.aggregator.add_mass(mass, level, type_group, label);
                    }
                    element = element.with_material(material);
                }
                Err(error) => {
                    self.log
                        .warn(&raw.id, "Material Processing", &error.to_string());
                    failures.push(MaterialFailure {
                        material: raw_material
                            .material_name
                            .clone()
                            .unwrap_or_else(|| key.clone()),
                        error,
                    });
                }
            }
        }

        if element.materials.is_empty() {
            let reason = format!("nothing classifiable: {}", join_failures(&failures));
            self.log.warn(&raw.id, "No Classifiable Materials", &reason);
            return ElementOutcome::Warning(ElementIssue {
                id: raw.id.clone(),
                reason,
            });
        }

        let mut outcome = self.calculator.calculate_element(&element);
        failures.append(&mut outcome.failures);

        if outcome.results.is_empty() {
            let reason = format!("all materials failed: {}", join_failures(&failures));
            self.log.error(&raw.id, "Element Processing", &reason);
            return ElementOutcome::Error(ElementIssue {
                id: raw.id.clone(),
                reason,
            });
        }

        let total_carbon_kg = outcome.total_carbon();
        self.log.success(
            &raw.id,
            "Processed",
            &format!(
                "{} materials, {:.1} kgCO₂e",
                outcome.results.len(),
                total_carbon_kg
            ),
        );

        ElementOutcome::Processed(ElementRecord {
            id: raw.id.clone(),
            name: raw.display_name().to_string(),
            level: level.to_string(),
            category: element.category,
            results: outcome.results,
            failures,
            total_carbon_kg,
        })
    }
}

fn join_failures(failures: &[MaterialFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("{}: {}", failure.material, failure.error))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::TimberDatabase;
    use crate::takeoff::{ElementGroupNode, ElementProperties, LevelNode, Quantity, RawMaterial, TypeGroupNode};

    fn model_with(elements: Vec<RawElement>) -> ModelRoot {
        ModelRoot {
            name: Some("Test Model".to_string()),
            elements: vec![LevelNode {
                name: Some("Level 1".to_string()),
                elements: vec![TypeGroupNode {
                    name: Some("Structural Framing".to_string()),
                    elements: vec![ElementGroupNode {
                        name: None,
                        elements,
                    }],
                }],
            }],
        }
    }

    fn element_with(id: &str, name: &str, materials: Vec<(&str, RawMaterial)>) -> RawElement {
        RawElement {
            id: id.to_string(),
            name: Some(name.to_string()),
            object_type: None,
            properties: ElementProperties {
                material_quantities: materials
                    .into_iter()
                    .map(|(key, raw)| (key.to_string(), raw))
                    .collect(),
            },
        }
    }

    fn wood_material(name: &str, volume: f64) -> RawMaterial {
        RawMaterial {
            material_name: Some(name.to_string()),
            material_type: Some("Wood".to_string()),
            volume: Some(Quantity::new(volume, "m³")),
            ..Default::default()
        }
    }

    fn geometry_element(id: &str) -> RawElement {
        RawElement {
            id: id.to_string(),
            name: None,
            object_type: Some("Objects.Geometry.Line".to_string()),
            properties: ElementProperties::default(),
        }
    }

    fn athena_config() -> CalculatorConfig {
        CalculatorConfig {
            timber_database: TimberDatabase::Athena2021,
            ..Default::default()
        }
    }

    #[test]
    fn test_one_bucket_per_element() {
        let model = model_with(vec![
            element_with(
                "w1",
                "Floor Panel",
                vec![("CLT", wood_material("FE_CLT Floor Panel (1)", 2.0))],
            ),
            geometry_element("g1"),
            element_with("empty", "Annotation", vec![]),
            element_with(
                "u1",
                "Mystery Beam",
                vec![(
                    "Gypsum",
                    RawMaterial {
                        material_name: Some("Gypsum Board".to_string()),
                        volume: Some(Quantity::new(1.0, "m³")),
                        ..Default::default()
                    },
                )],
            ),
        ]);

        let mut analyzer = ModelAnalyzer::new(athena_config());
        let summary = analyzer.analyze(&model);

        assert_eq!(summary.processed_count(), 1);
        assert_eq!(summary.skipped_count(), 1);
        assert_eq!(summary.warning_count(), 2);
        assert_eq!(summary.error_count(), 0);
        assert_eq!(summary.element_count(), 4);

        // ATHENA CLT at 69 kgCO₂e/m³ over 2 m³
        assert!((summary.total_carbon_kg - 138.0).abs() < 1e-9);

        let record = &summary.processed[0];
        assert_eq!(record.id, "w1");
        assert_eq!(record.level, "Level 1");
        assert_eq!(record.category, ElementCategory::Slab);
    }

    #[test]
    fn test_error_bucket_when_every_material_fails() {
        // Concrete without a compressive strength classifies but will not price
        let concrete = RawMaterial {
            material_name: Some("Concrete, Cast-in-Place".to_string()),
            volume: Some(Quantity::new(3.0, "m³")),
            ..Default::default()
        };
        let model = model_with(vec![element_with("c1", "Wall", vec![("Concrete", concrete)])]);

        let mut analyzer = ModelAnalyzer::new(CalculatorConfig::default());
        let summary = analyzer.analyze(&model);

        assert_eq!(summary.error_count(), 1);
        assert_eq!(summary.processed_count(), 0);
        assert!(summary.errors[0].reason.contains("all materials failed"));
        assert_eq!(summary.success_rate(), 0.0);
    }

    #[test]
    fn test_partial_element_still_processes() {
        let model = model_with(vec![element_with(
            "mix1",
            "Hybrid Floor",
            vec![
                ("CLT", wood_material("CLT", 1.0)),
                ("Bamboo", wood_material("Bamboo Timber Panel", 1.0)),
            ],
        )]);

        let mut analyzer = ModelAnalyzer::new(athena_config());
        let summary = analyzer.analyze(&model);

        assert_eq!(summary.processed_count(), 1);
        let record = &summary.processed[0];
        assert_eq!(record.results.len(), 1);
        assert_eq!(record.failures.len(), 1);
        assert!((record.total_carbon_kg - 69.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_factor_reported_once_across_elements() {
        let elements = (0..5)
            .map(|i| {
                element_with(
                    &format!("e{}", i),
                    "Roof Panel",
                    vec![("Panel", wood_material("Unobtainium Panel", 1.0))],
                )
            })
            .collect();

        let mut analyzer = ModelAnalyzer::new(CalculatorConfig::default());
        let summary = analyzer.analyze(&model_with(elements));

        assert_eq!(summary.error_count(), 5);
        assert_eq!(summary.missing_factors.timber, vec!["unobtainium panel".to_string()]);
    }

    #[test]
    fn test_masses_aggregate_by_level_and_type() {
        let steel = RawMaterial {
            material_name: Some("Metal - Steel".to_string()),
            structural_asset: Some("350W".to_string()),
            volume: Some(Quantity::new(0.2, "m³")),
            density: Some(Quantity::new(7850.0, "kg/m³")),
            ..Default::default()
        };
        let model = model_with(vec![element_with("s1", "W310 Beam", vec![("Steel", steel)])]);

        let mut analyzer = ModelAnalyzer::new(CalculatorConfig::default());
        let summary = analyzer.analyze(&model);

        let level = &summary.mass_totals.by_level["Level 1"];
        let by_material = &level.by_type["Structural Framing"].by_material;
        assert!((by_material["350W"] - 1570.0).abs() < 1e-9);
        assert!((summary.mass_totals.grand_total() - 1570.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_model_is_a_clean_run() {
        let mut analyzer = ModelAnalyzer::new(CalculatorConfig::default());
        let summary = analyzer.analyze(&model_with(vec![]));

        assert_eq!(summary.element_count(), 0);
        assert_eq!(summary.success_rate(), 100.0);
        assert_eq!(summary.total_carbon_kg, 0.0);
        assert!(summary.missing_factors.is_empty());
    }

    #[test]
    fn test_summary_text_truncates_missing_lists() {
        let mut analyzer = ModelAnalyzer::new(CalculatorConfig::default());
        let mut summary = analyzer.analyze(&model_with(vec![]));
        summary.missing_factors.timber = (0..7).map(|i| format!("material {}", i)).collect();

        let text = summary.summary_text();
        assert!(text.contains("Missing timber factors (7)"));
        assert!(text.contains("material 4"));
        assert!(!text.contains("material 5"));
        assert!(text.contains("… and 2 more"));
    }

    #[test]
    fn test_summary_roundtrips_as_json() {
        let model = model_with(vec![element_with(
            "w1",
            "Floor",
            vec![("CLT", wood_material("CLT", 2.0))],
        )]);
        let mut analyzer = ModelAnalyzer::new(athena_config());
        let summary = analyzer.analyze(&model);

        let json = serde_json::to_string_pretty(&summary).unwrap();
        assert!(json.contains("\"run_id\""));
        assert!(json.contains("\"mass_totals\""));

        let parsed: AnalysisSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summary);
    }

    #[test]
    fn test_category_log_tracks_run() {
        let model = model_with(vec![
            element_with("w1", "Floor", vec![("CLT", wood_material("CLT", 1.0))]),
            geometry_element("g1"),
        ]);
        let mut analyzer = ModelAnalyzer::new(athena_config());
        analyzer.analyze(&model);

        let log = analyzer.log();
        assert!(log.success_summary()["Processed"].contains("w1"));
        assert!(log.info_summary()["Skipped Geometry"].contains("g1"));
    }
}
