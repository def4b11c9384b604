//! # Material Name Normalization
//!
//! Maps noisy real-world material names onto canonical database keys.
//! Model exports rarely use catalog vocabulary: the same cross-laminated
//! timber panel arrives as "CLT", "Cross-Laminated Timber",
//! "FE_CLT Floor Panel (1)" or a vendor string, and steel grades arrive as
//! strength codes ("350W", "345 MPa") rather than product names.
//!
//! ## Matching ladder
//!
//! For a raw name and a material family, in order:
//!
//! 1. lowercase and trim the input;
//! 2. steel-grade override: input containing a known strength-code marker
//!    resolves to "Hot Rolled" immediately;
//! 3. exact match against a canonical key;
//! 4. canonical key contained anywhere in the input;
//! 5. registered alias equal to or contained in the input;
//! 6. no match: the lowercased input is returned unchanged (the factor
//!    lookup will then miss and report it).
//!
//! Tables are ordered and the first match wins. Exact matches are tried
//! before substring matches so short canonical keys ("CLT") cannot shadow
//! an exact longer name. Canonical keys are returned in display case, which
//! makes normalization idempotent.
//!
//! The concrete table is empty: concrete resolves by strength grade and
//! element type, never by material name.
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::factors::{normalize_material_key, MaterialFamily};
//!
//! assert_eq!(
//!     normalize_material_key("FE_CLT Floor Panel (1)", MaterialFamily::Timber),
//!     "CLT"
//! );
//! assert_eq!(
//!     normalize_material_key("default_steel", MaterialFamily::Steel),
//!     "Hot Rolled"
//! );
//! ```

use once_cell::sync::Lazy;

/// Material families with distinct alias vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialFamily {
    Timber,
    Steel,
    Concrete,
}

/// Strength-code markers that always resolve to hot rolled steel. Upstream
/// models encode the steel grade where a product name belongs.
const STEEL_GRADE_MARKERS: [&str; 6] = [
    "345 mpa",
    "350w",
    "steel 345",
    "default_steel",
    "csa g40",
    "steel astm a500b-42",
];

/// (canonical key, alias spellings), in match priority order
const TIMBER_ALIASES: &[(&str, &[&str])] = &[
    ("CLT", &["cross laminated timber", "cross-laminated timber"]),
    (
        "Glulam",
        &["glue laminated timber", "glued laminated timber", "glulam beam"],
    ),
    ("LVL", &["laminated veneer lumber"]),
    (
        "Softwood Lumber",
        &["dimensional lumber", "sawn lumber", "softwood"],
    ),
    ("Softwood Plywood", &["plywood", "softwood ply"]),
    ("Oriented Strand Board", &["osb", "osb board"]),
    (
        "GLT/NLT/DLT",
        &["glt", "nlt", "dlt", "nail laminated timber", "dowel laminated timber"],
    ),
];

const STEEL_ALIASES: &[(&str, &[&str])] = &[
    (
        "Hot Rolled",
        &[
            "hot-rolled",
            "hot_rolled",
            "hotrolled",
            "345 mpa",
            "350w",
            "350w(1)",
            "steel astm a500b-42",
        ],
    ),
    ("HSS", &["hollow structural section", "hollow section", "tube"]),
    ("Plate", &["flat plate"]),
    ("Rebar", &["reinforcing bar", "reinforcement"]),
    ("OWSJ", &["open web steel joist", "steel joist"]),
    ("Fasteners", &["bolts", "screws", "nails", "rivets"]),
    ("Metal Deck", &["deck", "decking"]),
];

const CONCRETE_ALIASES: &[(&str, &[&str])] = &[];

struct AliasEntry {
    canonical: &'static str,
    canonical_lower: String,
    aliases_lower: Vec<String>,
}

fn build_entries(raw: &'static [(&'static str, &'static [&'static str])]) -> Vec<AliasEntry> {
    raw.iter()
        .map(|&(canonical, aliases)| AliasEntry {
            canonical,
            canonical_lower: canonical.to_lowercase(),
            aliases_lower: aliases.iter().map(|alias| alias.to_lowercase()).collect(),
        })
        .collect()
}

static TIMBER_TABLE: Lazy<Vec<AliasEntry>> = Lazy::new(|| build_entries(TIMBER_ALIASES));
static STEEL_TABLE: Lazy<Vec<AliasEntry>> = Lazy::new(|| build_entries(STEEL_ALIASES));
static CONCRETE_TABLE: Lazy<Vec<AliasEntry>> = Lazy::new(|| build_entries(CONCRETE_ALIASES));

impl MaterialFamily {
    fn table(&self) -> &'static [AliasEntry] {
        match self {
            MaterialFamily::Timber => TIMBER_TABLE.as_slice(),
            MaterialFamily::Steel => STEEL_TABLE.as_slice(),
            MaterialFamily::Concrete => CONCRETE_TABLE.as_slice(),
        }
    }
}

/// Resolve a raw material name to its canonical database key.
///
/// Returns the canonical key in display case on a match, otherwise the
/// lowercased, trimmed input unchanged. Idempotent:
/// `normalize_material_key(normalize_material_key(x, f), f)` equals
/// `normalize_material_key(x, f)`.
pub fn normalize_material_key(raw: &str, family: MaterialFamily) -> String {
    let needle = raw.trim().to_lowercase();

    // Grade codes show up in every family's name fields, so this override
    // runs before any family table.
    if STEEL_GRADE_MARKERS
        .iter()
        .any(|marker| needle.contains(marker))
    {
        return "Hot Rolled".to_string();
    }

    let table = family.table();

    for entry in table {
        if entry.canonical_lower == needle {
            return entry.canonical.to_string();
        }
    }

    for entry in table {
        if needle.contains(entry.canonical_lower.as_str()) {
            return entry.canonical.to_string();
        }
    }

    for entry in table {
        for alias in &entry.aliases_lower {
            if *alias == needle || needle.contains(alias.as_str()) {
                return entry.canonical.to_string();
            }
        }
    }

    needle
}
