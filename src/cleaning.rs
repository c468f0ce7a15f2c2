//! Horsepower coercion and mean imputation.

use tracing::{info, warn};

use crate::analysis::utility::mean;
use crate::records::{RawVehicle, Vehicle};

/// Parses a cell as a finite number. Anything else counts as missing.
pub fn coerce_numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns a cleaned copy of `table` with every horsepower cell numeric.
///
/// Missing cells are replaced by the mean of the present ones. When no cell is
/// present the mean is NaN and every row receives NaN.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn clean_table(table: &[RawVehicle]) -> Vec<Vehicle> {
    let coerced: Vec<Option<f64>> = table.iter().map(|r| coerce_numeric(&r.horsepower)).collect();

    let present: Vec<f64> = coerced.iter().flatten().copied().collect();
    let missing = coerced.len() - present.len();
    let fill = mean(&present);

    if missing > 0 {
        info!(missing, fill, "Imputing missing horsepower values with column mean");
    }
    if present.is_empty() && !table.is_empty() {
        warn!("No horsepower value could be parsed; imputed values are NaN");
    }

    table
        .iter()
        .zip(coerced)
        .map(|(raw, horsepower)| Vehicle {
            name: raw.name.clone(),
            mpg: raw.mpg,
            cylinders: raw.cylinders,
            displacement: raw.displacement,
            horsepower: horsepower.unwrap_or(fill),
            weight: raw.weight,
            acceleration: raw.acceleration,
            model_year: raw.model_year,
            origin: raw.origin.clone(),
        })
        .collect()
}
