use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::analysis::types::{ColumnSummary, DescriptiveStats};
use crate::analysis::utility::{mean, quantile_sorted, sorted, stddev};
use crate::records::{EnrichedVehicle, NumericColumn};

/// Default rank used by [`percentile`] callers.
pub const DEFAULT_PERCENTILE: f64 = 95.0;

/// Summarises a slice of values. NaN cells are left out of every statistic.
pub fn summarize(values: &[f64]) -> ColumnSummary {
    let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let ordered = sorted(&present);
    let avg = mean(&present);

    ColumnSummary {
        count: present.len(),
        mean: avg,
        std: stddev(&present, avg),
        min: ordered.first().copied().unwrap_or(f64::NAN),
        q25: quantile_sorted(&ordered, 0.25),
        q50: quantile_sorted(&ordered, 0.50),
        q75: quantile_sorted(&ordered, 0.75),
        max: ordered.last().copied().unwrap_or(f64::NAN),
    }
}

/// Count, mean, std, min, quartiles and max for each of `columns`.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn descriptive_stats(table: &[EnrichedVehicle], columns: &[NumericColumn]) -> DescriptiveStats {
    let stats = DescriptiveStats {
        columns: columns
            .iter()
            .map(|c| (c.name().to_string(), summarize(&c.values(table))))
            .collect(),
    };

    info!("Descriptive statistics computed");
    debug!("\n{}", stats);
    stats
}

/// Value at percentile `p` (0 to 100) of `column`, linearly interpolated
/// between the closest order statistics.
///
/// # Errors
///
/// Fails when `p` is outside `[0, 100]` or the column holds no values.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn percentile(table: &[EnrichedVehicle], column: NumericColumn, p: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&p) {
        bail!("percentile must be within [0, 100], got {}", p);
    }
    if table.is_empty() {
        bail!("cannot compute a percentile of an empty '{}' column", column);
    }

    let value = quantile_sorted(&sorted(&column.values(table)), p / 100.0);
    info!(column = %column, p, value, "Percentile computed");
    Ok(value)
}
