//! Result types produced by the analysis functions.
//!
//! Each type renders itself as fixed-width text through [`Display`], which is
//! what the report embeds.

use serde::Serialize;
use std::fmt::{self, Display};

use crate::records::{CategoryColumn, EnrichedVehicle, NumericColumn};

/// Count, mean, spread and quartiles of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

/// Statistic labels in display order.
pub const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

impl ColumnSummary {
    /// Values in the order of [`STAT_LABELS`].
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

/// Descriptive statistics table: one row per statistic, one column per input column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub columns: Vec<(String, ColumnSummary)>,
}

impl DescriptiveStats {
    pub fn get(&self, column: NumericColumn) -> Option<&ColumnSummary> {
        self.columns
            .iter()
            .find(|(name, _)| name == column.name())
            .map(|(_, summary)| summary)
    }
}

impl Display for DescriptiveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|(name, _)| name.len().max(10))
            .collect();

        write!(f, "{:<6}", "")?;
        for ((name, _), width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", name, width = width)?;
        }
        writeln!(f)?;

        for (stat, label) in STAT_LABELS.iter().enumerate() {
            write!(f, "{:<6}", label)?;
            for ((_, summary), width) in self.columns.iter().zip(&widths) {
                write!(f, "  {:>width$.2}", summary.values()[stat], width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Mean of the target column for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStat {
    pub key: String,
    pub mean: f64,
    pub count: usize,
}

/// Per-group means, sorted by mean descending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedMean {
    pub group_by: String,
    pub target: String,
    pub groups: Vec<GroupStat>,
}

impl GroupedMean {
    pub fn new(group_by: CategoryColumn, target: NumericColumn, groups: Vec<GroupStat>) -> Self {
        Self {
            group_by: group_by.name().to_string(),
            target: target.name().to_string(),
            groups,
        }
    }
}

impl Display for GroupedMean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .groups
            .iter()
            .map(|g| g.key.len())
            .chain(std::iter::once(self.group_by.len()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{}", self.group_by)?;
        for group in &self.groups {
            writeln!(f, "{:<width$}  {:>8.4}", group.key, group.mean, width = width)?;
        }
        write!(f, "Name: {}", self.target)
    }
}

/// Symmetric Pearson correlation matrix over a column subset.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: NumericColumn, b: NumericColumn) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == a)?;
        let j = self.columns.iter().position(|c| *c == b)?;
        Some(self.values[i][j])
    }

    /// Correlations of every column with `primary`, strongest positive first.
    pub fn column_ranking(&self, primary: NumericColumn) -> Option<CorrelationRanking> {
        let i = self.columns.iter().position(|c| *c == primary)?;
        let mut entries: Vec<(NumericColumn, f64)> = self
            .columns
            .iter()
            .copied()
            .zip(self.values[i].iter().copied())
            .collect();
        entries.sort_by(|a, b| super::utility::descending_nan_last(a.1, b.1));

        Some(CorrelationRanking { primary, entries })
    }
}

impl Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<14}", "")?;
        for column in &self.columns {
            write!(f, "{:>14}", column.name())?;
        }
        writeln!(f)?;
        for (column, row) in self.columns.iter().zip(&self.values) {
            write!(f, "{:<14}", column.name())?;
            for value in row {
                write!(f, "{:>14.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One row of the correlation matrix sorted descending.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationRanking {
    pub primary: NumericColumn,
    pub entries: Vec<(NumericColumn, f64)>,
}

impl Display for CorrelationRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (column, value) in &self.entries {
            writeln!(f, "{:<14}  {:>9.6}", column.name(), value)?;
        }
        write!(f, "Name: {}", self.primary)
    }
}

/// A full row holding an extremal value of the primary metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeRow {
    pub index: usize,
    pub value: f64,
    pub row: EnrichedVehicle,
}

/// Scalar aggregates computed once per run for the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedAggregates {
    pub median_mpg: f64,
    pub unique_origins: usize,
    pub best: ExtremeRow,
    pub worst: ExtremeRow,
}
