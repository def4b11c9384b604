//! # Model Takeoff
//!
//! Typed intake for the exported model tree. The export is a four-deep
//! traversal hierarchy, each layer a named node holding its children in
//! `elements`:
//!
//! ```text
//! ModelRoot
//! └── LevelNode            ("Level 1", "Level 2", ...)
//!     └── TypeGroupNode    ("Walls", "Structural Framing", ...)
//!         └── ElementGroupNode
//!             └── RawElement
//! ```
//!
//! Leaf elements carry an `id`, an optional `name`, an optional
//! `object_type`, and a `properties` bag whose `"Material Quantities"` map
//! holds one [`RawMaterial`] per physical material. Numeric fields arrive
//! wrapped as `{ "value": ..., "units": ... }`.
//!
//! Structure is enforced by the types at parse time; downstream code never
//! probes string maps. [`classify_material`] converts each raw entry into a
//! calculable [`Material`], deciding the material family from the explicit
//! `materialType` field when present and from name keywords otherwise.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::{ElementCategory, Material, MaterialKind, MaterialProperties};
use crate::errors::{CalcError, CalcResult};

/// Exported geometry primitives carrying no building stock
pub const GEOMETRY_TYPES: [&str; 3] = [
    "Objects.Geometry.Line",
    "Objects.Geometry.Arc",
    "Objects.Geometry.Circle",
];

/// Fallback steel density when the export carries none
pub const DEFAULT_STEEL_DENSITY_KG_M3: f64 = 7851.81483993;

/// Steel grade assumed when a metal has no structural asset
pub const DEFAULT_STEEL_GRADE: &str = "default_steel";

// ============================================================================
// Model tree
// ============================================================================

/// A numeric export field with its unit label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    #[serde(default)]
    pub units: Option<String>,
}

impl Quantity {
    pub fn new(value: f64, units: impl Into<String>) -> Self {
        Self {
            value,
            units: Some(units.into()),
        }
    }
}

/// One material entry under `"Material Quantities"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMaterial {
    pub material_name: Option<String>,
    pub material_type: Option<String>,
    pub structural_asset: Option<String>,
    pub volume: Option<Quantity>,
    pub density: Option<Quantity>,
    pub compressive_strength: Option<Quantity>,
}

/// Property bag of a leaf element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ElementProperties {
    #[serde(rename = "Material Quantities", default)]
    pub material_quantities: BTreeMap<String, RawMaterial>,
}

/// Leaf node of the model tree: one physical building element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub properties: ElementProperties,
}

impl RawElement {
    /// True for exported geometry primitives (lines, arcs, circles)
    pub fn is_geometry(&self) -> bool {
        self.object_type
            .as_deref()
            .is_some_and(|t| GEOMETRY_TYPES.contains(&t))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Structural category, derived from the element name
    pub fn category(&self) -> ElementCategory {
        ElementCategory::from_type_name(self.name.as_deref().unwrap_or(""))
    }

    pub fn has_materials(&self) -> bool {
        !self.properties.material_quantities.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementGroupNode {
    #[serde(default)]
    pub name: Option<String>,
    pub elements: Vec<RawElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeGroupNode {
    #[serde(default)]
    pub name: Option<String>,
    pub elements: Vec<ElementGroupNode>,
}

impl TypeGroupNode {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelNode {
    #[serde(default)]
    pub name: Option<String>,
    pub elements: Vec<TypeGroupNode>,
}

impl LevelNode {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Root of the exported model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRoot {
    #[serde(default)]
    pub name: Option<String>,
    pub elements: Vec<LevelNode>,
}

impl ModelRoot {
    /// Total number of leaf elements across all levels
    pub fn element_count(&self) -> usize {
        self.elements
            .iter()
            .flat_map(|level| &level.elements)
            .flat_map(|type_group| &type_group.elements)
            .map(|group| group.elements.len())
            .sum()
    }
}

// ============================================================================
// Material classification
// ============================================================================

/// Convert one raw export material into a calculable [`Material`].
///
/// `key` is the entry's key in the `"Material Quantities"` map, used as the
/// material name when the entry carries no `materialName` of its own.
///
/// The family comes from the explicit `materialType` field when it names one
/// of Concrete / Metal / Wood; otherwise from keywords in the material name.
/// A material that matches neither is [`CalcError::UnknownMaterial`]; a
/// material without a volume is [`CalcError::MissingField`].
pub fn classify_material(key: &str, raw: &RawMaterial) -> CalcResult<Material> {
    let volume = raw
        .volume
        .as_ref()
        .map(|q| q.value)
        .ok_or_else(|| CalcError::missing_field("volume"))?;

    let name = raw.material_name.as_deref().unwrap_or(key);

    let kind = raw
        .material_type
        .as_deref()
        .and_then(kind_from_type)
        .or_else(|| kind_from_name(name))
        .ok_or_else(|| CalcError::unknown_material(name))?;

    let mut properties = MaterialProperties::new(name, volume);
    if let Some(density) = raw.density.as_ref() {
        properties = properties.with_density(density.value);
    }
    if let Some(asset) = raw.structural_asset.as_deref() {
        properties = properties.with_structural_asset(asset);
    }
    if let Some(strength) = raw.compressive_strength.as_ref() {
        // Raw value; the calculator owns unit normalization
        properties = properties.with_compressive_strength(strength.value);
    }

    Ok(match kind {
        MaterialKind::Wood => Material::wood(properties),
        MaterialKind::Concrete => Material::concrete(properties),
        MaterialKind::Metal => {
            let density = raw
                .density
                .as_ref()
                .map(|q| q.value)
                .unwrap_or(DEFAULT_STEEL_DENSITY_KG_M3);
            let grade = raw
                .structural_asset
                .clone()
                .unwrap_or_else(|| DEFAULT_STEEL_GRADE.to_string());
            Material::metal(properties.with_density(density), volume * density, grade)
        }
    })
}

fn kind_from_type(value: &str) -> Option<MaterialKind> {
    if value.eq_ignore_ascii_case("concrete") {
        Some(MaterialKind::Concrete)
    } else if value.eq_ignore_ascii_case("metal") {
        Some(MaterialKind::Metal)
    } else if value.eq_ignore_ascii_case("wood") {
        Some(MaterialKind::Wood)
    } else {
        None
    }
}

fn kind_from_name(name: &str) -> Option<MaterialKind> {
    let lower = name.to_lowercase();
    if lower.contains("concrete") {
        Some(MaterialKind::Concrete)
    } else if lower.contains("steel") || lower.contains("metal") {
        Some(MaterialKind::Metal)
    } else if ["clt", "timber", "wood", "glulam", "lumber"]
        .iter()
        .any(|keyword| lower.contains(keyword))
    {
        Some(MaterialKind::Wood)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_JSON: &str = r#"{
        "name": "Office Tower",
        "elements": [
            {
                "name": "Level 1",
                "elements": [
                    {
                        "name": "Walls",
                        "elements": [
                            {
                                "name": "Basic Wall",
                                "elements": [
                                    {
                                        "id": "abc123",
                                        "name": "Interior Wall - 200mm",
                                        "properties": {
                                            "Material Quantities": {
                                                "Concrete 30": {
                                                    "materialName": "Concrete, Cast-in-Place",
                                                    "materialType": "Concrete",
                                                    "volume": { "value": 4.2, "units": "m³" },
                                                    "density": { "value": 2400.0, "units": "kg/m³" },
                                                    "compressiveStrength": { "value": 30.0, "units": "MPa" }
                                                }
                                            }
                                        }
                                    },
                                    {
                                        "id": "geo1",
                                        "object_type": "Objects.Geometry.Line",
                                        "properties": {}
                                    }
                                ]
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_model_tree() {
        let model: ModelRoot = serde_json::from_str(MODEL_JSON).unwrap();
        assert_eq!(model.name.as_deref(), Some("Office Tower"));
        assert_eq!(model.elements.len(), 1);
        assert_eq!(model.elements[0].display_name(), "Level 1");
        assert_eq!(model.element_count(), 2);

        let element = &model.elements[0].elements[0].elements[0].elements[0];
        assert_eq!(element.id, "abc123");
        assert_eq!(element.category(), ElementCategory::Wall);
        assert!(element.has_materials());

        let raw = &element.properties.material_quantities["Concrete 30"];
        assert_eq!(raw.volume.as_ref().unwrap().value, 4.2);
        assert_eq!(raw.compressive_strength.as_ref().unwrap().value, 30.0);
    }

    #[test]
    fn test_missing_elements_array_is_a_parse_error() {
        let result = serde_json::from_str::<ModelRoot>("{\"name\": \"odd\"}");
        assert!(result.is_err());
    }

    #[test]
    fn test_geometry_detection() {
        let model: ModelRoot = serde_json::from_str(MODEL_JSON).unwrap();
        let group = &model.elements[0].elements[0].elements[0];
        assert!(!group.elements[0].is_geometry());
        assert!(group.elements[1].is_geometry());
        assert!(!group.elements[1].has_materials());
    }

    #[test]
    fn test_classify_explicit_type_wins_over_name() {
        let raw = RawMaterial {
            material_name: Some("Composite Deck".to_string()),
            material_type: Some("Metal".to_string()),
            volume: Some(Quantity::new(0.5, "m³")),
            ..Default::default()
        };
        let material = classify_material("Composite Deck", &raw).unwrap();
        assert_eq!(material.kind, MaterialKind::Metal);
    }

    #[test]
    fn test_classify_by_name_keywords() {
        let cases = [
            ("Concrete, Cast-in-Place", MaterialKind::Concrete),
            ("Metal - Steel CSA G40", MaterialKind::Metal),
            ("Structural Steel", MaterialKind::Metal),
            ("FE_CLT Floor Panel (1)", MaterialKind::Wood),
            ("Mass Timber Column", MaterialKind::Wood),
            ("Glulam 24f-E", MaterialKind::Wood),
            ("Softwood Lumber", MaterialKind::Wood),
            ("Wood Sheathing", MaterialKind::Wood),
        ];
        for (name, expected) in cases {
            let raw = RawMaterial {
                volume: Some(Quantity::new(1.0, "m³")),
                ..Default::default()
            };
            let material = classify_material(name, &raw).unwrap();
            assert_eq!(material.kind, expected, "{}", name);
        }
    }

    #[test]
    fn test_classify_unknown_material() {
        let raw = RawMaterial {
            material_name: Some("Gypsum Board".to_string()),
            volume: Some(Quantity::new(1.0, "m³")),
            ..Default::default()
        };
        let result = classify_material("Gypsum Board", &raw);
        assert_eq!(
            result.unwrap_err(),
            CalcError::unknown_material("Gypsum Board")
        );
    }

    #[test]
    fn test_classify_requires_volume() {
        let raw = RawMaterial {
            material_name: Some("Concrete".to_string()),
            ..Default::default()
        };
        let result = classify_material("Concrete", &raw);
        assert_eq!(result.unwrap_err(), CalcError::missing_field("volume"));
    }

    #[test]
    fn test_metal_defaults() {
        let raw = RawMaterial {
            material_name: Some("Steel Stud".to_string()),
            volume: Some(Quantity::new(2.0, "m³")),
            ..Default::default()
        };
        let material = classify_material("Steel Stud", &raw).unwrap();
        assert_eq!(material.grade.as_deref(), Some(DEFAULT_STEEL_GRADE));
        let mass = material.mass_kg.unwrap();
        assert!((mass - 2.0 * DEFAULT_STEEL_DENSITY_KG_M3).abs() < 1e-6);
    }

    #[test]
    fn test_metal_uses_export_density_and_asset() {
        let raw = RawMaterial {
            material_name: Some("Metal - Steel".to_string()),
            structural_asset: Some("Steel ASTM A992".to_string()),
            volume: Some(Quantity::new(0.1, "m³")),
            density: Some(Quantity::new(7850.0, "kg/m³")),
            ..Default::default()
        };
        let material = classify_material("Metal - Steel", &raw).unwrap();
        assert_eq!(material.grade.as_deref(), Some("Steel ASTM A992"));
        assert!((material.mass_kg.unwrap() - 785.0).abs() < 1e-9);
        assert_eq!(material.properties.density_kg_m3, Some(7850.0));
    }

    #[test]
    fn test_map_key_is_the_fallback_name() {
        let raw = RawMaterial {
            volume: Some(Quantity::new(1.0, "m³")),
            ..Default::default()
        };
        let material = classify_material("CLT Panel", &raw).unwrap();
        assert_eq!(material.kind, MaterialKind::Wood);
        assert_eq!(material.name(), "CLT Panel");
    }

    #[test]
    fn test_concrete_keeps_raw_strength() {
        let raw = RawMaterial {
            material_name: Some("Concrete".to_string()),
            volume: Some(Quantity::new(1.0, "m³")),
            compressive_strength: Some(Quantity::new(4350.0, "psi")),
            ..Default::default()
        };
        let material = classify_material("Concrete", &raw).unwrap();
        assert_eq!(material.properties.compressive_strength, Some(4350.0));
    }
}
