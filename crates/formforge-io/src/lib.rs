//! Loaders for the four beta-test input tables.
//!
//! Every table is comma-delimited with one header row, which is skipped.
//! Columns are read by position, so header names are free-form:
//!
//! | table      | columns                          |
//! |------------|----------------------------------|
//! | responses  | candidate id, item id, response  |
//! | blueprint  | domain, min, max                 |
//! | keys       | item id, credited response       |
//! | domains    | item id, domain                  |
//!
//! Fields are taken verbatim: `"A "` is not the key `"A"` and a
//! whitespace-only response is an answer, not an omission. Only the
//! blueprint bounds tolerate padding.
//!
//! Any malformed row aborts loading with [`FormForgeError::Input`], naming
//! the file and the line.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use formforge_config::InputConfig;
use formforge_core::{
    Blueprint, DomainBounds, DomainMap, FormForgeError, FormProblem, KeyMap, ResponseGrid,
    ResponseGridBuilder, Result,
};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};


#[derive(Debug, Deserialize)]
struct ResponseRow {
    candidate: String,
    item: String,
    // missing and empty both mean an omission
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlueprintRow {
    domain: String,
    #[serde(deserialize_with = "padded_count")]
    min: usize,
    #[serde(deserialize_with = "padded_count")]
    max: usize,
}

// Bounds may carry surrounding spaces; ids and responses are kept verbatim.
fn padded_count<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse()
        .map_err(|e| de::Error::custom(format!("invalid item count {raw:?}: {e}")))
}

#[derive(Debug, Deserialize)]
struct KeyRow {
    item: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct DomainRow {
    item: String,
    domain: String,
}

/// Reads every data row of `path` and hands it to `visit` with its line.
fn read_rows<T, F>(path: &Path, mut visit: F) -> Result<usize>
where
    T: DeserializeOwned,
    F: FnMut(T, u64) -> Result<()>,
{
    let display = path.display().to_string();
    let file = File::open(path).map_err(|e| FormForgeError::input(&display, e.to_string()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut record = StringRecord::new();
    let mut rows = 0;
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|e| FormForgeError::input(&display, e.to_string()))?;
        if !more {
            break;
        }
        let line = record.position().map_or(0, |p| p.line());
        if record.iter().all(str::is_empty) {
            continue;
        }
        let row: T = record
            .deserialize(None)
            .map_err(|e| FormForgeError::input(&display, format!("line {line}: {e}")))?;
        visit(row, line)?;
        rows += 1;
    }
    Ok(rows)
}

/// Loads the answer keys.
pub fn load_keys(path: impl AsRef<Path>) -> Result<KeyMap> {
    let path = path.as_ref();
    let mut keys = KeyMap::new();
    let rows = read_rows(path, |row: KeyRow, _| {
        keys.insert(row.item, row.key);
        Ok(())
    })?;
    debug!(event = "table_loaded", table = "keys", rows = rows as u64);
    Ok(keys)
}

/// Loads the item → domain map.
pub fn load_domains(path: impl AsRef<Path>) -> Result<DomainMap> {
    let path = path.as_ref();
    let mut domains = DomainMap::new();
    let rows = read_rows(path, |row: DomainRow, _| {
        domains.insert(row.item, row.domain);
        Ok(())
    })?;
    debug!(event = "table_loaded", table = "domains", rows = rows as u64);
    Ok(domains)
}

/// Loads the blueprint, keeping domains in file order.
pub fn load_blueprint(path: impl AsRef<Path>) -> Result<Blueprint> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let mut blueprint = Blueprint::new();
    let rows = read_rows(path, |row: BlueprintRow, line| {
        if row.min > row.max {
            return Err(FormForgeError::input(
                &display,
                format!(
                    "line {line}: domain {} has minimum {} above maximum {}",
                    row.domain, row.min, row.max
                ),
            ));
        }
        blueprint.insert(row.domain, DomainBounds::new(row.min, row.max));
        Ok(())
    })?;
    debug!(event = "table_loaded", table = "blueprint", rows = rows as u64);
    Ok(blueprint)
}

/// Loads and scores the response log.
///
/// Each response is scored against `keys`: empty is omitted, equal to the
/// key is correct, anything else is incorrect. Candidates and items keep
/// the order of their first appearance in the log.
pub fn load_responses(path: impl AsRef<Path>, keys: &KeyMap) -> Result<ResponseGrid> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let mut builder = ResponseGridBuilder::new();
    let rows = read_rows(path, |row: ResponseRow, line| {
        let response = row.response.unwrap_or_default();
        let score = keys.score(&row.item, &response).ok_or_else(|| {
            FormForgeError::input(&display, format!("line {line}: item {} has no key", row.item))
        })?;
        builder
            .record(&row.candidate, &row.item, score)
            .map_err(|e| FormForgeError::input(&display, format!("line {line}: {e}")))
    })?;
    if rows == 0 {
        return Err(FormForgeError::input(&display, "response log has no rows"));
    }
    debug!(
        event = "table_loaded",
        table = "responses",
        rows = rows as u64,
        candidates = builder.candidate_count() as u64,
        items = builder.item_count() as u64,
    );
    Ok(builder.build())
}

/// Loads all four tables and validates them into a [`FormProblem`].
pub fn load_problem(inputs: &InputConfig) -> Result<FormProblem> {
    let keys = load_keys(&inputs.keys)?;
    let domains = load_domains(&inputs.domains)?;
    let blueprint = load_blueprint(&inputs.blueprint)?;
    let grid = load_responses(&inputs.responses, &keys)?;

    info!(
        event = "problem_loaded",
        candidates = grid.candidate_count() as u64,
        items = grid.item_count() as u64,
        domains = blueprint.len() as u64,
    );
    FormProblem::new(grid, &domains, &blueprint)
}
