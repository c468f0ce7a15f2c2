//! Derived columns: full model year, weight-to-power ratio and mpg bucket.

use tracing::info;

use crate::records::{EnrichedVehicle, Efficiency, Vehicle};

/// Converts an mpg value into an efficiency bucket.
///
/// | Range            | Bucket  |
/// |------------------|---------|
/// | <= 15            | low     |
/// | > 15 and <= 25   | medium  |
/// | > 25             | high    |
/// | NaN              | unknown |
pub fn efficiency(mpg: f64) -> Efficiency {
    match mpg {
        m if m <= 15.0 => Efficiency::Low,
        m if m > 15.0 && m <= 25.0 => Efficiency::Medium,
        m if m > 25.0 => Efficiency::High,
        _ => Efficiency::Unknown,
    }
}

/// Returns a copy of `table` with `full_model_year`, `weight_per_hp` and
/// `efficacite_mpg` appended to every row.
///
/// A zero horsepower yields an infinite or NaN ratio.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn build_features(table: &[Vehicle]) -> Vec<EnrichedVehicle> {
    let enriched: Vec<EnrichedVehicle> = table
        .iter()
        .map(|v| EnrichedVehicle {
            name: v.name.clone(),
            mpg: v.mpg,
            cylinders: v.cylinders,
            displacement: v.displacement,
            horsepower: v.horsepower,
            weight: v.weight,
            acceleration: v.acceleration,
            model_year: v.model_year,
            origin: v.origin.clone(),
            full_model_year: v.model_year + 1900.0,
            weight_per_hp: v.weight / v.horsepower,
            efficacite_mpg: efficiency(v.mpg),
        })
        .collect();

    info!(
        columns = "full_model_year, weight_per_hp, efficacite_mpg",
        "Derived columns created"
    );
    enriched
}
