use crate::report::output::{ReportError, TraversalOutput};
use log::{debug, info};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const COMBINED_FILE: &str = "combined_outputs.json";

/// Merge every `<out>/<season>/<season>_traversal_output.json` into
/// `<out>/combined_outputs.json`, keyed by season in ascending order.
///
/// Per-game detail is dropped from each cycle record; the individual files
/// keep it. Directories that are not season numbers, or that hold no output,
/// are skipped.
pub fn combine_outputs(out_dir: &Path) -> Result<PathBuf, ReportError> {
    let mut seasons = Vec::new();
    for entry in fs::read_dir(out_dir).map_err(|e| ReportError::io(out_dir, e))? {
        let entry = entry.map_err(|e| ReportError::io(out_dir, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        if let Some(season) = entry.file_name().to_str().and_then(|n| n.parse::<u32>().ok()) {
            seasons.push(season);
        }
    }
    seasons.sort_unstable();

    let mut combined = Map::new();
    for season in seasons {
        let path = TraversalOutput::path_in(out_dir, season);
        if !path.is_file() {
            debug!("no output for season {} under {}", season, out_dir.display());
            continue;
        }
        let content = fs::read_to_string(&path).map_err(|e| ReportError::io(&path, e))?;
        let mut value: Value =
            serde_json::from_str(&content).map_err(|e| ReportError::json(&path, e))?;
        if let Some(cycle) = value
            .get_mut("first_hamiltonian_cycle")
            .and_then(Value::as_object_mut)
        {
            cycle.remove("games");
        }
        combined.insert(season.to_string(), value);
    }

    let path = out_dir.join(COMBINED_FILE);
    let json = serde_json::to_string_pretty(&Value::Object(combined))
        .map_err(|e| ReportError::json(&path, e))?;
    fs::write(&path, json).map_err(|e| ReportError::io(&path, e))?;
    info!("combined outputs written to {}", path.display());
    Ok(path)
}
