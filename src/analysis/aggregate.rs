use anyhow::{Result, bail};
use std::collections::HashSet;
use tracing::info;

use crate::analysis::types::{AdvancedAggregates, ExtremeRow};
use crate::analysis::utility::median;
use crate::records::{CategoryColumn, EnrichedVehicle, NumericColumn};

/// Median mpg, number of distinct origins and the best and worst mpg rows.
///
/// # Errors
///
/// Fails on an empty table, or when every mpg value is NaN, since there is no
/// maximum or minimum row to report.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn advanced_aggregates(table: &[EnrichedVehicle]) -> Result<AdvancedAggregates> {
    if table.is_empty() {
        bail!("cannot compute aggregates of an empty table: max and min are undefined");
    }

    let metric = NumericColumn::Mpg;
    let median_mpg = median(&metric.values(table));
    let unique_origins = distinct_count(table, CategoryColumn::Origin);

    let Some(best) = extreme_row(table, metric, |candidate, current| candidate > current) else {
        bail!("no '{}' value to rank", metric);
    };
    let Some(worst) = extreme_row(table, metric, |candidate, current| candidate < current) else {
        bail!("no '{}' value to rank", metric);
    };

    info!(median_mpg, unique_origins, "Advanced aggregates computed");
    info!(name = %best.row.name, mpg = best.value, "Best fuel economy");
    info!(name = %worst.row.name, mpg = worst.value, "Worst fuel economy");

    Ok(AdvancedAggregates {
        median_mpg,
        unique_origins,
        best,
        worst,
    })
}

/// Number of distinct values in a categorical column.
pub fn distinct_count(table: &[EnrichedVehicle], column: CategoryColumn) -> usize {
    table.iter().map(|row| column.value(row)).collect::<HashSet<_>>().len()
}

/// First row whose `column` value beats every earlier one under `better`.
/// NaN cells are skipped.
fn extreme_row(
    table: &[EnrichedVehicle],
    column: NumericColumn,
    better: impl Fn(f64, f64) -> bool,
) -> Option<ExtremeRow> {
    let mut found: Option<(usize, f64)> = None;

    for (index, row) in table.iter().enumerate() {
        let value = column.value(row);
        if value.is_nan() {
            continue;
        }
        match found {
            Some((_, current)) if !better(value, current) => {}
            _ => found = Some((index, value)),
        }
    }

    found.map(|(index, value)| ExtremeRow {
        index,
        value,
        row: table[index].clone(),
    })
}
