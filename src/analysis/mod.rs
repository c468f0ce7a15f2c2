//! Read-only statistics over the enriched vehicle table.
//!
//! Every function here borrows the table and returns a fresh result, so the
//! computations can run in any order.

pub mod aggregate;
pub mod correlation;
pub mod descriptive;
pub mod grouping;
pub mod types;
pub mod utility;

pub use aggregate::advanced_aggregates;
pub use correlation::correlation_matrix;
pub use descriptive::{DEFAULT_PERCENTILE, descriptive_stats, percentile};
pub use grouping::grouped_mean;
