//! PDF report assembly.
//!
//! [`assemble_report`] turns analysis results into a [`Report`] of four
//! sections, [`layout`] paginates it, and [`write_pdf`] renders the pages.

pub mod document;
pub mod layout;
pub mod pdf;

use anyhow::Result;
use chrono::Local;
use std::path::Path;
use tracing::info;

use crate::analysis::types::{AdvancedAggregates, CorrelationRanking, DescriptiveStats, GroupedMean};
use crate::records::NumericColumn;

pub use document::{Block, Report, Section};
pub use layout::{Page, layout};
pub use pdf::write_pdf;

pub const REPORT_TITLE: &str = "Automobile Analysis Report";

/// Everything the report shows, borrowed from the analysis stage.
pub struct ReportInputs<'a> {
    pub stats: &'a DescriptiveStats,
    pub grouped: &'a GroupedMean,
    pub correlation: &'a CorrelationRanking,
    pub percentile_column: NumericColumn,
    pub percentile_rank: f64,
    pub percentile_value: f64,
    pub aggregates: &'a AdvancedAggregates,
    pub scatter_chart: &'a Path,
    pub bar_chart: &'a Path,
}

/// Builds the four report sections: descriptive statistics, specific
/// analyses, advanced aggregates and visualizations.
pub fn assemble_report(inputs: &ReportInputs<'_>) -> Report {
    let aggs = inputs.aggregates;

    let sections = vec![
        Section {
            title: "1. Key descriptive statistics".to_string(),
            blocks: vec![Block::Table(inputs.stats.to_string())],
        },
        Section {
            title: "2. Specific analyses".to_string(),
            blocks: vec![
                Block::Text(format!(
                    "Average {} by {}:\n{}",
                    inputs.grouped.target, inputs.grouped.group_by, inputs.grouped
                )),
                Block::Text(format!(
                    "Correlation with '{}':\n{}",
                    inputs.correlation.primary, inputs.correlation
                )),
                Block::KeyValues(vec![(
                    format!(
                        "{}th percentile ({})",
                        inputs.percentile_rank, inputs.percentile_column
                    ),
                    format!("{:.2}", inputs.percentile_value),
                )]),
            ],
        },
        Section {
            title: "3. Advanced aggregates".to_string(),
            blocks: vec![Block::KeyValues(vec![
                ("Median fuel economy (MPG)".to_string(), format!("{:.2}", aggs.median_mpg)),
                ("Number of unique origins".to_string(), aggs.unique_origins.to_string()),
                (
                    "Best fuel economy".to_string(),
                    format!("{} ({:.1} MPG)", aggs.best.row.name, aggs.best.value),
                ),
                (
                    "Worst fuel economy".to_string(),
                    format!("{} ({:.1} MPG)", aggs.worst.row.name, aggs.worst.value),
                ),
            ])],
        },
        Section {
            title: "4. Visualizations".to_string(),
            blocks: vec![
                Block::Image(inputs.scatter_chart.to_path_buf()),
                Block::Image(inputs.bar_chart.to_path_buf()),
            ],
        },
    ];

    Report {
        title: REPORT_TITLE.to_string(),
        generated_at: Local::now(),
        sections,
    }
}

/// Assembles, paginates and writes the report to `path`.
#[tracing::instrument(skip(inputs), fields(path = %path.display()))]
pub fn generate_report(inputs: &ReportInputs<'_>, path: &Path) -> Result<()> {
    let report = assemble_report(inputs);
    let pages = layout(&report);
    info!(pages = pages.len(), "Report laid out");
    write_pdf(&pages, &report.title, path)
}
