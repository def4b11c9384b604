//! # Building Elements
//!
//! Domain types for classified building stock: the element, its structural
//! category, and the materials it is built from. These are the calculator's
//! inputs; the `takeoff` module produces them from raw model trees.
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::element::{BuildingElement, ElementCategory, Material, MaterialProperties};
//!
//! let element = BuildingElement::new("3f2a", "CLT Floor Panel", "Level 2", ElementCategory::Slab)
//!     .with_material(Material::wood(MaterialProperties::new("FE_CLT Floor Panel (1)", 2.0)));
//!
//! assert_eq!(element.category.concrete_element_type(), "Slab");
//! assert_eq!(element.materials.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Materials
// ============================================================================

/// Material families the calculator dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    Concrete,
    Metal,
    Wood,
}

impl MaterialKind {
    /// All material kinds
    pub const ALL: [MaterialKind; 3] = [
        MaterialKind::Concrete,
        MaterialKind::Metal,
        MaterialKind::Wood,
    ];

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialKind::Concrete => "Concrete",
            MaterialKind::Metal => "Metal",
            MaterialKind::Wood => "Wood",
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Physical properties shared by all material kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Material name as exported from the model
    pub name: String,
    /// Material volume, m³
    pub volume_m3: f64,
    /// Density, kg/m³, when the model supplies one
    pub density_kg_m3: Option<f64>,
    /// Structural asset name (catalog product or steel grade)
    pub structural_asset: Option<String>,
    /// Compressive strength in the model country's unit convention
    /// (MPa or PSI); only meaningful for concrete
    pub compressive_strength: Option<f64>,
}

impl MaterialProperties {
    /// Create properties with just a name and volume
    pub fn new(name: impl Into<String>, volume_m3: f64) -> Self {
        Self {
            name: name.into(),
            volume_m3,
            density_kg_m3: None,
            structural_asset: None,
            compressive_strength: None,
        }
    }

    /// Set the density
    pub fn with_density(mut self, density_kg_m3: f64) -> Self {
        self.density_kg_m3 = Some(density_kg_m3);
        self
    }

    /// Set the structural asset name
    pub fn with_structural_asset(mut self, asset: impl Into<String>) -> Self {
        self.structural_asset = Some(asset.into());
        self
    }

    /// Set the compressive strength
    pub fn with_compressive_strength(mut self, strength: f64) -> Self {
        self.compressive_strength = Some(strength);
        self
    }
}

/// One material on a building element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material family
    pub kind: MaterialKind,
    /// Physical properties
    pub properties: MaterialProperties,
    /// Steel grade or product name; metals only
    pub grade: Option<String>,
    /// Pre-computed mass in kg (volume × density); metals only
    pub mass_kg: Option<f64>,
}

impl Material {
    /// Create a wood material
    pub fn wood(properties: MaterialProperties) -> Self {
        Self {
            kind: MaterialKind::Wood,
            properties,
            grade: None,
            mass_kg: None,
        }
    }

    /// Create a metal material with its derived mass and grade
    pub fn metal(properties: MaterialProperties, mass_kg: f64, grade: impl Into<String>) -> Self {
        Self {
            kind: MaterialKind::Metal,
            properties,
            grade: Some(grade.into()),
            mass_kg: Some(mass_kg),
        }
    }

    /// Create a concrete material
    pub fn concrete(properties: MaterialProperties) -> Self {
        Self {
            kind: MaterialKind::Concrete,
            properties,
            grade: None,
            mass_kg: None,
        }
    }

    /// Material name as exported from the model
    pub fn name(&self) -> &str {
        &self.properties.name
    }

    /// Mass for aggregation: the derived mass when one was set, otherwise
    /// volume × density when the density is known
    pub fn mass_estimate_kg(&self) -> Option<f64> {
        self.mass_kg.or_else(|| {
            self.properties
                .density_kg_m3
                .map(|density| self.properties.volume_m3 * density)
        })
    }
}

// ============================================================================
// Elements
// ============================================================================

/// Structural category of a building element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ElementCategory {
    Slab,
    Wall,
    Column,
    /// Default category when no keyword matches a type name
    #[default]
    Beam,
    Foundation,
}

impl ElementCategory {
    /// All element categories
    pub const ALL: [ElementCategory; 5] = [
        ElementCategory::Slab,
        ElementCategory::Wall,
        ElementCategory::Column,
        ElementCategory::Beam,
        ElementCategory::Foundation,
    ];

    /// Plural display label for grouped reporting
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementCategory::Slab => "Slabs",
            ElementCategory::Wall => "Walls",
            ElementCategory::Column => "Columns",
            ElementCategory::Beam => "Beams",
            ElementCategory::Foundation => "Foundations",
        }
    }

    /// The concrete factor matrix's element-type vocabulary for this
    /// category
    pub fn concrete_element_type(&self) -> &'static str {
        match self {
            ElementCategory::Slab => "Slab",
            ElementCategory::Wall => "Wall",
            ElementCategory::Column => "Column",
            ElementCategory::Beam => "Beam",
            ElementCategory::Foundation => "Foundation",
        }
    }

    /// Derive a category from an element type name by keyword.
    ///
    /// Checked in order: floor/stair/slab → Slab, wall → Wall,
    /// column → Column, beam/framing → Beam, foundation → Foundation.
    /// Anything else defaults to Beam.
    pub fn from_type_name(type_name: &str) -> Self {
        let lower = type_name.to_lowercase();
        let mapping = [
            ("floor", ElementCategory::Slab),
            ("stair", ElementCategory::Slab),
            ("slab", ElementCategory::Slab),
            ("wall", ElementCategory::Wall),
            ("column", ElementCategory::Column),
            ("beam", ElementCategory::Beam),
            ("framing", ElementCategory::Beam),
            ("foundation", ElementCategory::Foundation),
        ];
        for (keyword, category) in mapping {
            if lower.contains(keyword) {
                return category;
            }
        }
        ElementCategory::Beam
    }
}

impl std::fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One structural object extracted from the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingElement {
    /// Stable element id from the source model
    pub id: String,
    /// Element type name ("Basic Wall Interior", "W24x55", …)
    pub name: String,
    /// Level the element belongs to
    pub level: String,
    /// Structural category
    pub category: ElementCategory,
    /// Materials the element is built from, in model order
    pub materials: Vec<Material>,
}

impl BuildingElement {
    /// Create an element with no materials yet
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: impl Into<String>,
        category: ElementCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level: level.into(),
            category,
            materials: Vec::new(),
        }
    }

    /// Append a material
    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.push(material);
        self
    }
}
