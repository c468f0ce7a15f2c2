//! Paths and analysis options for one pipeline run.

use std::path::PathBuf;

use crate::analysis::DEFAULT_PERCENTILE;
use crate::records::{CategoryColumn, NumericColumn};

pub const DEFAULT_INPUT_PATH: &str = "data/Automobile.csv";
pub const DEFAULT_OUTPUT_CSV_PATH: &str = "data/Automobile_analysis_complete.csv";
pub const DEFAULT_SCATTER_CHART_PATH: &str = "img/mpg_vs_horsepower.png";
pub const DEFAULT_BAR_CHART_PATH: &str = "img/avg_mpg_by_origin.png";
pub const DEFAULT_REPORT_PATH: &str = "pdf/Automobile_Analysis_Report.pdf";

/// Which columns each analysis looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub stats_columns: Vec<NumericColumn>,
    pub correlation_columns: Vec<NumericColumn>,
    pub primary_metric: NumericColumn,
    pub group_by: CategoryColumn,
    pub percentile_column: NumericColumn,
    pub percentile_rank: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stats_columns: vec![NumericColumn::Mpg, NumericColumn::Horsepower, NumericColumn::Weight],
            correlation_columns: vec![
                NumericColumn::Mpg,
                NumericColumn::Cylinders,
                NumericColumn::Horsepower,
                NumericColumn::Weight,
                NumericColumn::Acceleration,
            ],
            primary_metric: NumericColumn::Mpg,
            group_by: CategoryColumn::Origin,
            percentile_column: NumericColumn::Acceleration,
            percentile_rank: DEFAULT_PERCENTILE,
        }
    }
}

/// Input and output locations plus analysis options.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_csv_path: PathBuf,
    pub scatter_chart_path: PathBuf,
    pub bar_chart_path: PathBuf,
    pub report_path: PathBuf,
    pub analysis: AnalysisConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_csv_path: PathBuf::from(DEFAULT_OUTPUT_CSV_PATH),
            scatter_chart_path: PathBuf::from(DEFAULT_SCATTER_CHART_PATH),
            bar_chart_path: PathBuf::from(DEFAULT_BAR_CHART_PATH),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            analysis: AnalysisConfig::default(),
        }
    }
}
