//! # File I/O Module
//!
//! Model, config and report files are all JSON.
//!
//! Report writes are atomic: write to a `.tmp` sibling, sync, rename. An
//! interrupted run leaves either the previous report or none, never a
//! half-written one.
//!
//! Errors split by boundary: I/O problems are [`CalcError::FileError`], a
//! file that is not a valid model tree is [`CalcError::InvalidModel`], and
//! a config that does not parse is [`CalcError::SerializationError`].

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::analysis::AnalysisSummary;
use crate::config::CalculatorConfig;
use crate::errors::{CalcError, CalcResult};
use crate::takeoff::ModelRoot;

/// Load an exported model tree from a JSON file
pub fn load_model(path: &Path) -> CalcResult<ModelRoot> {
    let contents = read_file(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| CalcError::invalid_model(format!("{}: {}", path.display(), e)))
}

/// Load a calculator config from a JSON file. Missing fields keep their
/// defaults.
pub fn load_config(path: &Path) -> CalcResult<CalculatorConfig> {
    let contents = read_file(path)?;
    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid config in {}: {}", path.display(), e),
    })
}

/// Save an analysis report as pretty-printed JSON with atomic write
/// semantics: serialize, write to `.tmp`, sync, rename over the target.
pub fn save_report(summary: &AnalysisSummary, path: &Path) -> CalcResult<()> {
    let json =
        serde_json::to_string_pretty(summary).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Sibling `.tmp` path, appended after any existing extension
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn read_file(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    Ok(contents)
}
