//! Tab-delimited point and flow readers.
//!
//! Files have no header. Points are `id<TAB>longitude<TAB>latitude`, flows
//! are `origin<TAB>destination<TAB>value`. Blank lines and lines starting
//! with `#` are skipped; surrounding whitespace is trimmed.

use std::io::Read;
use std::path::Path;

use gravity_core::network::{FlowRecord, Point};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{CliError, Result};

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All);
    builder
}

fn read_records<T, R>(reader: R, path: &Path) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    reader_builder()
        .from_reader(reader)
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|e| CliError::input(path, e))
}

fn open(path: &Path) -> Result<std::fs::File> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::File::open(path)?)
}

/// Read points from a tab-delimited file.
pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    let points: Vec<Point> = read_records(open(path)?, path)?;
    debug!(path = %path.display(), count = points.len(), "Points loaded");
    Ok(points)
}

/// Read flow records from a tab-delimited file.
pub fn read_flows(path: &Path) -> Result<Vec<FlowRecord>> {
    let flows: Vec<FlowRecord> = read_records(open(path)?, path)?;
    debug!(path = %path.display(), count = flows.len(), "Flows loaded");
    Ok(flows)
}

/// Parse points from in-memory text. `source` names the data in errors.
pub fn parse_points(text: &str, source: &Path) -> Result<Vec<Point>> {
    read_records(text.as_bytes(), source)
}

/// Parse flow records from in-memory text. `source` names the data in errors.
pub fn parse_flows(text: &str, source: &Path) -> Result<Vec<FlowRecord>> {
    read_records(text.as_bytes(), source)
}
