//! # Run Logging
//!
//! [`CategoryLog`] records per-object log entries for one run, grouped by
//! category, while emitting each entry through `tracing` at the matching
//! level. The grouped view feeds the run summary ("which objects were
//! skipped as geometry", "which objects had no material quantities");
//! the `tracing` events feed whatever subscriber the host installed.
//!
//! The library never installs a subscriber. Binaries do that once, first
//! thing in `main`.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{error, info, warn};

/// Per-run log, grouped category → object ids
#[derive(Debug, Clone, Default)]
pub struct CategoryLog {
    errors: BTreeMap<String, BTreeSet<String>>,
    warnings: BTreeMap<String, BTreeSet<String>>,
    infos: BTreeMap<String, BTreeSet<String>>,
    successes: BTreeMap<String, BTreeSet<String>>,
}

impl CategoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, object_id: &str, category: &str, message: &str) {
        error!(object_id, category, "{message}");
        file_under(&mut self.errors, category, object_id);
    }

    pub fn warn(&mut self, object_id: &str, category: &str, message: &str) {
        warn!(object_id, category, "{message}");
        file_under(&mut self.warnings, category, object_id);
    }

    pub fn info(&mut self, object_id: &str, category: &str, message: &str) {
        info!(object_id, category, "{message}");
        file_under(&mut self.infos, category, object_id);
    }

    pub fn success(&mut self, object_id: &str, category: &str, message: &str) {
        info!(object_id, category, "{message}");
        file_under(&mut self.successes, category, object_id);
    }

    // Sets iterate sorted, so each summary is category → ordered ids.

    pub fn error_summary(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.errors
    }

    pub fn warning_summary(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.warnings
    }

    pub fn info_summary(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.infos
    }

    pub fn success_summary(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.successes
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
            && self.warnings.is_empty()
            && self.infos.is_empty()
            && self.successes.is_empty()
    }
}

fn file_under(map: &mut BTreeMap<String, BTreeSet<String>>, category: &str, object_id: &str) {
    map.entry(category.to_string())
        .or_default()
        .insert(object_id.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_grouped_by_category() {
        let mut log = CategoryLog::new();
        log.warn("e1", "Missing Material Quantities", "non model-object");
        log.warn("e2", "Missing Material Quantities", "non model-object");
        log.warn("e3", "Material Processing", "unknown material");
        log.error("e4", "Element Processing", "all materials failed");

        let warnings = log.warning_summary();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings["Missing Material Quantities"].len(), 2);
        assert_eq!(warnings["Material Processing"].len(), 1);
        assert_eq!(log.error_summary()["Element Processing"].len(), 1);
    }

    #[test]
    fn test_ids_deduplicated_and_sorted() {
        let mut log = CategoryLog::new();
        log.info("b", "Skipped Geometry", "skipped");
        log.info("a", "Skipped Geometry", "skipped");
        log.info("b", "Skipped Geometry", "skipped");

        let ids: Vec<&String> = log.info_summary()["Skipped Geometry"].iter().collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_success_tracked_separately() {
        let mut log = CategoryLog::new();
        assert!(log.is_empty());

        log.success("e1", "Processed", "2 materials");
        assert!(!log.is_empty());
        assert!(log.success_summary().contains_key("Processed"));
        assert!(log.error_summary().is_empty());
    }
}
