use std::collections::HashMap;
use tracing::{debug, info};

use crate::analysis::types::{GroupStat, GroupedMean};
use crate::analysis::utility::{descending_nan_last, mean};
use crate::records::{CategoryColumn, EnrichedVehicle, NumericColumn};

/// Mean of `target` for every distinct value of `group_by`, highest mean first.
///
/// Groups with equal means keep the order in which they first appear.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn grouped_mean(
    table: &[EnrichedVehicle],
    group_by: CategoryColumn,
    target: NumericColumn,
) -> GroupedMean {
    let mut order: Vec<&str> = Vec::new();
    let mut series: HashMap<&str, Vec<f64>> = HashMap::new();

    for row in table {
        let key = group_by.value(row);
        series
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(target.value(row));
    }

    let mut groups: Vec<GroupStat> = order
        .into_iter()
        .map(|key| {
            let values = &series[key];
            GroupStat {
                key: key.to_string(),
                mean: mean(values),
                count: values.len(),
            }
        })
        .collect();
    groups.sort_by(|a, b| descending_nan_last(a.mean, b.mean));

    let result = GroupedMean::new(group_by, target, groups);
    info!(groups = result.groups.len(), "Grouped mean computed");
    debug!("\n{}", result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::table_from;

    #[test]
    fn test_grouped_mean_sorted_descending() {
        let table = table_from(&[
            (18.0, 130.0, "usa"),
            (16.0, 150.0, "usa"),
            (31.0, 65.0, "japan"),
            (27.0, 88.0, "japan"),
            (26.0, 46.0, "europe"),
        ]);
        let result = grouped_mean(&table, CategoryColumn::Origin, NumericColumn::Mpg);

        let keys: Vec<_> = result.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["japan", "europe", "usa"]);
        assert_eq!(result.groups[0].mean, 29.0);
        assert_eq!(result.groups[2].mean, 17.0);

        for pair in result.groups.windows(2) {
            assert!(pair[0].mean >= pair[1].mean);
        }
        let total: usize = result.groups.iter().map(|g| g.count).sum();
        assert_eq!(total, table.len());
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let table = table_from(&[(20.0, 100.0, "b"), (20.0, 100.0, "a")]);
        let result = grouped_mean(&table, CategoryColumn::Origin, NumericColumn::Mpg);
        assert_eq!(result.groups[0].key, "b");
        assert_eq!(result.groups[1].key, "a");
    }

    #[test]
    fn test_grouped_mean_text_lists_every_group() {
        let table = table_from(&[(18.0, 130.0, "usa"), (31.0, 65.0, "japan")]);
        let text = grouped_mean(&table, CategoryColumn::Origin, NumericColumn::Mpg).to_string();
        assert!(text.starts_with("origin"));
        assert!(text.contains("japan"));
        assert!(text.contains("usa"));
        assert!(text.ends_with("Name: mpg"));
    }
}
