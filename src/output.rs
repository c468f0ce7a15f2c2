//! Persistence for the enriched table and logging of analysis results.
//!
//! Supports JSON logging, CSV write and CSV read-back.

use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::records::EnrichedVehicle;

/// Logs any serializable result as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    debug!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Creates the directory that will hold `path`, if any.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Writes the enriched table to a CSV file at `path`, replacing any existing file.
///
/// Infinite and NaN ratios are written as `inf` and `NaN`.
#[tracing::instrument(skip(table), fields(path = %path.display(), rows = table.len()))]
pub fn write_table(path: &Path, table: &[EnrichedVehicle]) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    for row in table {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.len(), "Enriched table saved");
    Ok(())
}

/// Reads back a table produced by [`write_table`].
pub fn read_enriched_table(path: &Path) -> Result<Vec<EnrichedVehicle>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let record: EnrichedVehicle = result?;
        rows.push(record);
    }

    debug!(rows = rows.len(), "Enriched table read");
    Ok(rows)
}
