use tracing::{debug, info};

use crate::analysis::types::CorrelationMatrix;
use crate::analysis::utility::pearson;
use crate::records::{EnrichedVehicle, NumericColumn};

/// Pairwise Pearson correlation across `columns`.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn correlation_matrix(table: &[EnrichedVehicle], columns: &[NumericColumn]) -> CorrelationMatrix {
    let series: Vec<Vec<f64>> = columns.iter().map(|c| c.values(table)).collect();

    let values = series
        .iter()
        .enumerate()
        .map(|(i, xs)| {
            series
                .iter()
                .enumerate()
                .map(|(j, ys)| if i == j { self_correlation(xs) } else { pearson(xs, ys) })
                .collect()
        })
        .collect();

    let matrix = CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    };
    info!(columns = columns.len(), "Correlation matrix computed");
    debug!("\n{}", matrix);
    matrix
}

/// 1.0 for a column that varies, NaN for a constant or all-missing one.
fn self_correlation(xs: &[f64]) -> f64 {
    if pearson(xs, xs).is_nan() { f64::NAN } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::table_from;

    fn sample() -> Vec<EnrichedVehicle> {
        table_from(&[
            (18.0, 130.0, "usa"),
            (15.0, 165.0, "usa"),
            (24.0, 95.0, "japan"),
            (26.0, 97.0, "europe"),
            (32.0, 65.0, "japan"),
        ])
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let columns = [NumericColumn::Mpg, NumericColumn::Horsepower, NumericColumn::Weight];
        let matrix = correlation_matrix(&sample(), &columns);

        for a in columns {
            assert_eq!(matrix.get(a, a), Some(1.0));
            for b in columns {
                let ab = matrix.get(a, b).unwrap();
                let ba = matrix.get(b, a).unwrap();
                assert!((ab - ba).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_ranking_sorted_descending_with_primary_first() {
        let columns = [NumericColumn::Mpg, NumericColumn::Horsepower, NumericColumn::Acceleration];
        let ranking = correlation_matrix(&sample(), &columns)
            .column_ranking(NumericColumn::Mpg)
            .unwrap();

        assert_eq!(ranking.entries.len(), 3);
        assert_eq!(ranking.entries[0], (NumericColumn::Mpg, 1.0));
        for pair in ranking.entries.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        // Horsepower falls as mpg rises in the sample.
        assert!(matrix_value(&ranking.entries, NumericColumn::Horsepower) < 0.0);
    }

    #[test]
    fn test_diagonal_is_nan_for_missing_column() {
        let table = table_from(&[
            (18.0, f64::NAN, "usa"),
            (24.0, f64::NAN, "japan"),
            (30.0, f64::NAN, "europe"),
        ]);
        let matrix = correlation_matrix(&table, &[NumericColumn::Mpg, NumericColumn::Horsepower]);

        assert_eq!(matrix.get(NumericColumn::Mpg, NumericColumn::Mpg), Some(1.0));
        let hp = NumericColumn::Horsepower;
        assert!(matrix.get(hp, hp).unwrap().is_nan());
        assert!(matrix.get(NumericColumn::Mpg, NumericColumn::Horsepower).unwrap().is_nan());
    }

    #[test]
    fn test_ranking_for_unknown_column_is_none() {
        let matrix = correlation_matrix(&sample(), &[NumericColumn::Mpg]);
        assert!(matrix.column_ranking(NumericColumn::Weight).is_none());
    }

    fn matrix_value(entries: &[(NumericColumn, f64)], column: NumericColumn) -> f64 {
        entries.iter().find(|(c, _)| *c == column).unwrap().1
    }
}
