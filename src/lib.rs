//! Vehicle dataset analysis: cleaning, feature derivation, statistics, charts and a PDF report.

pub mod analysis;
pub mod charts;
pub mod cleaning;
pub mod config;
pub mod features;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod report;
