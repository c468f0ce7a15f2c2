//! CSV loader for the vehicle dataset.

use anyhow::Result;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{error, info};

use crate::records::RawVehicle;

/// Reads the vehicle table from a CSV file at `path`.
///
/// Returns `Ok(None)` when the file does not exist, so the caller can stop
/// cleanly.
///
/// # Errors
///
/// Any other I/O failure, and any row that does not deserialize into a
/// [`RawVehicle`], is returned as an error.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<Option<Vec<RawVehicle>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!(path = %path.display(), "Input file not found");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let mut rdr = csv::Reader::from_reader(file);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let record: RawVehicle = result?;
        rows.push(record);
    }

    info!(rows = rows.len(), "Input file loaded");
    Ok(Some(rows))
}
