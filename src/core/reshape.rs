//! Row-array to keyed-object mapping for the Deals and StoreLocations ranges.

use crate::domain::model::{Deal, SheetRows, StoreLocation};
use std::collections::HashMap;

/// Derives a stable field key from a column title.
///
/// Trims, lowercases (full Unicode), then keeps only ASCII `a-z` and `0-9`.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Keys in the order the site sees them, each with the column that supplies its value.
///
/// A duplicated key keeps its first position but reads from its last column.
/// Keys that look like array indices (`"0"`, `"2024"`) sort first in ascending
/// numeric order, as JavaScript object keys do.
fn deal_columns(header_row: &[String]) -> Vec<(String, usize)> {
    let mut columns: Vec<(String, usize)> = Vec::with_capacity(header_row.len());
    let mut slots: HashMap<String, usize> = HashMap::new();

    for (col, header) in header_row.iter().enumerate() {
        let key = normalize_header(header);
        match slots.get(&key).copied() {
            Some(slot) => columns[slot].1 = col,
            None => {
                slots.insert(key.clone(), columns.len());
                columns.push((key, col));
            }
        }
    }

    // 穩定排序，非整數鍵維持欄位順序
    columns.sort_by_key(|(key, _)| match array_index(key) {
        Some(n) => (0, n),
        None => (1, 0),
    });
    columns
}

/// `Some(n)` when `key` is the canonical form of an integer in `0..2^32 - 1`.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|n| *n != u32::MAX)
}

/// First row is the header row; every following row becomes one [`Deal`].
///
/// A key whose column lies past the end of a short row is left out of that
/// deal, even when an earlier column shares the key. Cells past the last
/// header are dropped.
pub fn rows_to_deals(rows: &SheetRows) -> Vec<Deal> {
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Vec::new();
    };

    let columns = deal_columns(header_row);

    data_rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .filter_map(|(key, col)| row.get(*col).map(|cell| (key.as_str(), cell.as_str())))
                .collect()
        })
        .collect()
}

/// Skips the header row and maps columns 0..3 to store, latitude, longitude.
pub fn rows_to_store_locations(rows: &SheetRows) -> Vec<StoreLocation> {
    rows.iter()
        .skip(1)
        .map(|row| StoreLocation {
            store: row.first().cloned(),
            latitude: row.get(1).cloned(),
            longitude: row.get(2).cloned(),
        })
        .collect()
}
