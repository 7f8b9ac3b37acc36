use std::collections::HashMap;

use super::model::{CityCount, CleanedTable, Record};

/// Records whose magnitude is at or above `min_magnitude`.
pub fn at_or_above(table: &CleanedTable, min_magnitude: f64) -> impl Iterator<Item = &Record> {
    table
        .records()
        .iter()
        .filter(move |r| r.magnitude >= min_magnitude)
}

/// Count events per city for every record with `magnitude >= min_magnitude`.
///
/// The result is ranked by count, highest first.  Cities with equal counts
/// keep the order in which they first appear in the table.  Nothing is
/// truncated; use [`top_n`] for a display prefix.
pub fn count_by_city(table: &CleanedTable, min_magnitude: f64) -> Vec<CityCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CityCount> = Vec::new();

    for record in at_or_above(table, min_magnitude) {
        let slot = *slots.entry(record.city.as_str()).or_insert_with(|| {
            counts.push(CityCount {
                city: record.city.clone(),
                count: 0,
            });
            counts.len() - 1
        });
        counts[slot].count += 1;
    }

    // Stable: ties stay in first-appearance order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The first `n` entries of a ranked sequence.
pub fn top_n(mut counts: Vec<CityCount>, n: usize) -> Vec<CityCount> {
    counts.truncate(n);
    counts
}
