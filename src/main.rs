//! CLI entry point for the automobile analysis report.
//!
//! Loads the vehicle dataset, cleans and enriches it, computes statistics,
//! renders two charts and writes the enriched CSV and a PDF report.

use anyhow::Result;
use auto_report::analysis::DEFAULT_PERCENTILE;
use auto_report::config::{
    AnalysisConfig, DEFAULT_BAR_CHART_PATH, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_CSV_PATH,
    DEFAULT_REPORT_PATH, DEFAULT_SCATTER_CHART_PATH, PipelineConfig,
};
use auto_report::pipeline::{PipelineOutcome, run};
use auto_report::records::NumericColumn;
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "auto_report")]
#[command(about = "Analyze a vehicle dataset and build a PDF report", long_about = None)]
struct Cli {
    /// CSV file with the raw vehicle records
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Where to write the enriched table
    #[arg(short, long, default_value = DEFAULT_OUTPUT_CSV_PATH)]
    output: PathBuf,

    /// PNG path for the mpg vs horsepower scatter plot
    #[arg(long, default_value = DEFAULT_SCATTER_CHART_PATH)]
    scatter_chart: PathBuf,

    /// PNG path for the average mpg by origin bar chart
    #[arg(long, default_value = DEFAULT_BAR_CHART_PATH)]
    bar_chart: PathBuf,

    /// Where to write the PDF report
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
    report: PathBuf,

    /// Columns summarised in the descriptive statistics table
    #[arg(long, value_delimiter = ',', default_value = "mpg,horsepower,weight")]
    stats_columns: Vec<NumericColumn>,

    /// Columns included in the correlation matrix
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "mpg,cylinders,horsepower,weight,acceleration"
    )]
    correlation_columns: Vec<NumericColumn>,

    /// Column the percentile is computed on
    #[arg(long, default_value = "acceleration")]
    percentile_column: NumericColumn,

    /// Percentile rank, between 0 and 100
    #[arg(short, long, default_value_t = DEFAULT_PERCENTILE)]
    percentile: f64,
}

impl Cli {
    fn into_config(self) -> PipelineConfig {
        PipelineConfig {
            input_path: self.input,
            output_csv_path: self.output,
            scatter_chart_path: self.scatter_chart,
            bar_chart_path: self.bar_chart,
            report_path: self.report,
            analysis: AnalysisConfig {
                stats_columns: self.stats_columns,
                correlation_columns: self.correlation_columns,
                percentile_column: self.percentile_column,
                percentile_rank: self.percentile,
                ..AnalysisConfig::default()
            },
        }
    }
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/auto_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("auto_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let config = Cli::parse().into_config();

    match run(&config)? {
        PipelineOutcome::InputMissing => {
            error!(path = %config.input_path.display(), "No input data, nothing was produced");
            Ok(ExitCode::FAILURE)
        }
        PipelineOutcome::Completed(artifacts) => {
            if !artifacts.csv_saved {
                warn!(path = %config.output_csv_path.display(), "Enriched CSV was not written");
            }
            if !artifacts.report_saved {
                warn!(path = %config.report_path.display(), "PDF report was not written");
            }
            info!(rows = artifacts.rows, "Done");
            Ok(ExitCode::SUCCESS)
        }
    }
}
