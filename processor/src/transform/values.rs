//! Valuation history: ordering and per-player maxima.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::CsvResult;
use crate::models::{PlayerId, Table, PLAYER_ID, VALUE};

/// Order a table by a numeric column, highest first.
///
/// The sort is stable, so equal values keep their input order. Missing values
/// go last.
pub fn sort_by_numeric_desc(table: &Table, column: &str) -> CsvResult<Table> {
    let keys = table.numeric_column(column)?;

    let mut order: Vec<usize> = (0..table.len()).collect();
    order.sort_by(|&a, &b| compare_desc(keys[a], keys[b]));

    let rows = order.into_iter().map(|i| table.rows[i].clone()).collect();
    Ok(table.with_rows(rows))
}

/// Sort the valuation history by `value`, descending.
pub fn sort_market_values(values: &Table) -> CsvResult<Table> {
    sort_by_numeric_desc(values, VALUE)
}

/// Descending order for optional numbers, `None` last.
pub fn compare_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Maximum `value` per player over the first `limit` rows (all rows when `None`).
///
/// A player whose only values are missing maps to `None`. Rows without a
/// player id are ignored.
pub fn max_value_by_player(
    values: &Table,
    limit: Option<usize>,
) -> CsvResult<HashMap<PlayerId, Option<f64>>> {
    let id_col = values.column(PLAYER_ID)?;
    let parsed = values.numeric_column(VALUE)?;
    let take = limit.unwrap_or(values.len()).min(values.len());

    let mut max: HashMap<PlayerId, Option<f64>> = HashMap::new();
    for (row, value) in values.rows[..take].iter().zip(parsed) {
        let Some(id) = row.get(id_col).filter(|id| !id.is_empty()) else {
            continue;
        };
        let entry = max.entry(id.clone()).or_insert(None);
        if let Some(v) = value {
            *entry = Some(entry.map_or(v, |current| current.max(v)));
        }
    }

    Ok(max)
}
