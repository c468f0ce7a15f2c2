//! Row types for each pipeline stage and the column addressing enums.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A vehicle row as read from the source CSV.
///
/// `horsepower` stays as raw text: the source marks unknown values with `?`
/// or leaves the cell empty.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawVehicle {
    pub name: String,
    pub mpg: f64,
    pub cylinders: f64,
    pub displacement: f64,
    pub horsepower: String,
    pub weight: f64,
    pub acceleration: f64,
    pub model_year: f64,
    pub origin: String,
}

/// A vehicle row after horsepower coercion and imputation.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub name: String,
    pub mpg: f64,
    pub cylinders: f64,
    pub displacement: f64,
    pub horsepower: f64,
    pub weight: f64,
    pub acceleration: f64,
    pub model_year: f64,
    pub origin: String,
}

/// Fuel-efficiency bucket derived from mpg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Efficiency {
    Low,
    Medium,
    High,
    Unknown,
}

impl Efficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Efficiency::Low => "low",
            Efficiency::Medium => "medium",
            Efficiency::High => "high",
            Efficiency::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Efficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cleaned vehicle row with the three derived columns appended.
///
/// Field order is the column order of the output CSV.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnrichedVehicle {
    pub name: String,
    pub mpg: f64,
    pub cylinders: f64,
    pub displacement: f64,
    pub horsepower: f64,
    pub weight: f64,
    pub acceleration: f64,
    pub model_year: f64,
    pub origin: String,
    pub full_model_year: f64,
    pub weight_per_hp: f64,
    pub efficacite_mpg: Efficiency,
}

/// Numeric columns of the enriched table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    Mpg,
    Cylinders,
    Displacement,
    Horsepower,
    Weight,
    Acceleration,
    ModelYear,
    FullModelYear,
    WeightPerHp,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 9] = [
        NumericColumn::Mpg,
        NumericColumn::Cylinders,
        NumericColumn::Displacement,
        NumericColumn::Horsepower,
        NumericColumn::Weight,
        NumericColumn::Acceleration,
        NumericColumn::ModelYear,
        NumericColumn::FullModelYear,
        NumericColumn::WeightPerHp,
    ];

    /// CSV header name of the column.
    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::Mpg => "mpg",
            NumericColumn::Cylinders => "cylinders",
            NumericColumn::Displacement => "displacement",
            NumericColumn::Horsepower => "horsepower",
            NumericColumn::Weight => "weight",
            NumericColumn::Acceleration => "acceleration",
            NumericColumn::ModelYear => "model_year",
            NumericColumn::FullModelYear => "full_model_year",
            NumericColumn::WeightPerHp => "weight_per_hp",
        }
    }

    pub fn value(&self, row: &EnrichedVehicle) -> f64 {
        match self {
            NumericColumn::Mpg => row.mpg,
            NumericColumn::Cylinders => row.cylinders,
            NumericColumn::Displacement => row.displacement,
            NumericColumn::Horsepower => row.horsepower,
            NumericColumn::Weight => row.weight,
            NumericColumn::Acceleration => row.acceleration,
            NumericColumn::ModelYear => row.model_year,
            NumericColumn::FullModelYear => row.full_model_year,
            NumericColumn::WeightPerHp => row.weight_per_hp,
        }
    }

    /// Extracts the whole column in row order.
    pub fn values(&self, table: &[EnrichedVehicle]) -> Vec<f64> {
        table.iter().map(|row| self.value(row)).collect()
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericColumn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match NumericColumn::ALL.iter().find(|c| c.name() == s.trim()) {
            Some(column) => Ok(*column),
            None => bail!("unknown numeric column '{}'", s),
        }
    }
}

/// Categorical columns usable as grouping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryColumn {
    Origin,
    Efficiency,
    Name,
}

impl CategoryColumn {
    pub fn name(&self) -> &'static str {
        match self {
            CategoryColumn::Origin => "origin",
            CategoryColumn::Efficiency => "efficacite_mpg",
            CategoryColumn::Name => "name",
        }
    }

    pub fn value<'a>(&self, row: &'a EnrichedVehicle) -> &'a str {
        match self {
            CategoryColumn::Origin => &row.origin,
            CategoryColumn::Efficiency => row.efficacite_mpg.as_str(),
            CategoryColumn::Name => &row.name,
        }
    }
}

impl fmt::Display for CategoryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoryColumn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "origin" => Ok(CategoryColumn::Origin),
            "efficacite_mpg" => Ok(CategoryColumn::Efficiency),
            "name" => Ok(CategoryColumn::Name),
            other => bail!("unknown categorical column '{}'", other),
        }
    }
}
