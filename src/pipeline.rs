//! Runs every stage in order: load, clean, enrich, analyze, chart, save, report.

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::analysis::{
    advanced_aggregates, correlation_matrix, descriptive_stats, grouped_mean, percentile,
};
use crate::charts::{ScatterSpec, render_bar_chart, render_scatter};
use crate::cleaning::clean_table;
use crate::config::PipelineConfig;
use crate::features::build_features;
use crate::loader::load_table;
use crate::output::{print_json, write_table};
use crate::report::{ReportInputs, generate_report};

/// What a completed run left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub rows: usize,
    pub csv_saved: bool,
    pub report_saved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The input file does not exist; nothing was written.
    InputMissing,
    Completed(Artifacts),
}

/// Runs the full pipeline against `config`.
///
/// A missing input file stops the run before any output is produced. Failures
/// while saving the CSV or the PDF are logged and reported in the outcome
/// without aborting. Every other failure is returned.
#[tracing::instrument(skip(config), fields(input = %config.input_path.display()))]
pub fn run(config: &PipelineConfig) -> Result<PipelineOutcome> {
    info!("Starting automobile analysis");

    let Some(raw) = load_table(&config.input_path)? else {
        error!(
            path = %config.input_path.display(),
            "Could not load input data, stopping. Make sure the file exists"
        );
        return Ok(PipelineOutcome::InputMissing);
    };

    let cleaned = clean_table(&raw);
    let enriched = build_features(&cleaned);

    info!("Running analysis");
    let opts = &config.analysis;
    let stats = descriptive_stats(&enriched, &opts.stats_columns);
    let grouped = grouped_mean(&enriched, opts.group_by, opts.primary_metric);
    let correlation = correlation_matrix(&enriched, &opts.correlation_columns)
        .column_ranking(opts.primary_metric)
        .with_context(|| {
            format!(
                "primary metric '{}' is not one of the correlation columns",
                opts.primary_metric
            )
        })?;
    let percentile_value = percentile(&enriched, opts.percentile_column, opts.percentile_rank)?;
    let aggregates = advanced_aggregates(&enriched)?;
    print_json(&aggregates)?;
    info!("Analysis finished");

    info!("Rendering charts");
    render_scatter(&enriched, &ScatterSpec::default(), &config.scatter_chart_path)?;
    render_bar_chart(&grouped, &config.bar_chart_path)?;
    info!("Charts finished");

    let csv_saved = match write_table(&config.output_csv_path, &enriched) {
        Ok(()) => true,
        Err(e) => {
            error!(path = %config.output_csv_path.display(), error = %e, "Failed to save enriched table");
            false
        }
    };

    let inputs = ReportInputs {
        stats: &stats,
        grouped: &grouped,
        correlation: &correlation,
        percentile_column: opts.percentile_column,
        percentile_rank: opts.percentile_rank,
        percentile_value,
        aggregates: &aggregates,
        scatter_chart: &config.scatter_chart_path,
        bar_chart: &config.bar_chart_path,
    };
    let report_saved = match generate_report(&inputs, &config.report_path) {
        Ok(()) => true,
        Err(e) => {
            error!(path = %config.report_path.display(), error = %e, "Failed to generate PDF report");
            false
        }
    };

    info!(rows = enriched.len(), csv_saved, report_saved, "Automobile analysis finished");
    Ok(PipelineOutcome::Completed(Artifacts {
        rows: enriched.len(),
        csv_saved,
        report_saved,
    }))
}
