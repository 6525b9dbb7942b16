//! Catalog input: CSV with one row per galaxy, reduced to distinct frames.
//!
//! Only the `run`, `rerun`, `camcol` and `field` columns are read; header
//! names match case-insensitively. Many galaxies share a frame, so keys are
//! deduplicated in first-seen order before anything is downloaded.

use crate::key::ObservationKey;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

const COLUMNS: [&str; 4] = ["run", "rerun", "camcol", "field"];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot open catalog {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog has no `{0}` column")]
    MissingColumn(&'static str),
    #[error("line {line}: `{column}` value {value:?} is not a non-negative integer")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Distinct frames of a catalog plus the number of rows they came from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Data rows read (one per galaxy).
    pub rows: usize,
    /// Distinct keys in order of first appearance.
    pub keys: Vec<ObservationKey>,
}

/// Reads and deduplicates the catalog at `path`.
pub fn read_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let file = std::fs::File::open(path).map_err(|source| CatalogError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_catalog_from(file)
}

/// Same as [`read_catalog`] for any reader (used by tests).
pub fn read_catalog_from<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut idx = [0usize; 4];
    for (slot, name) in idx.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(CatalogError::MissingColumn(name))?;
    }

    let mut rows = 0usize;
    let mut all = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let mut vals = [0u32; 4];
        for ((val, &col), name) in vals.iter_mut().zip(idx.iter()).zip(COLUMNS) {
            let raw = record.get(col).unwrap_or("");
            *val = parse_id(raw).ok_or_else(|| CatalogError::InvalidValue {
                line,
                column: name,
                value: raw.to_string(),
            })?;
        }
        rows += 1;
        all.push(ObservationKey::new(vals[0], vals[1], vals[2], vals[3]));
    }

    let keys = unique_keys(all);
    tracing::debug!(rows, distinct = keys.len(), "catalog loaded");
    Ok(Catalog { rows, keys })
}

/// Drops repeated keys, keeping the first occurrence of each.
pub fn unique_keys<I>(keys: I) -> Vec<ObservationKey>
where
    I: IntoIterator<Item = ObservationKey>,
{
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(*k)).collect()
}

/// Accepts plain integers and integral floats (`94.0`), which dataframe
/// exports emit for integer columns.
fn parse_id(raw: &str) -> Option<u32> {
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}
