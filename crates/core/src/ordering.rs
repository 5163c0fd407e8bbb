//! Dense display ordering for landing rows.
//!
//! After every mutation the collection is sorted by `order` and renumbered
//! so that `order == index`. Callers can therefore check the invariant by
//! comparing each row's `order` with its position.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::error::{CoreError, ErrorCode};
use crate::model::Row;
use crate::types::{RowId, Timestamp};

/// Sort by current `order` (stable) and assign `order = index`.
pub fn renumber(rows: &mut [Row]) {
    rows.sort_by_key(|row| row.order);
    assign_dense(rows);
}

/// Renumber after moving row `id` towards `target`.
///
/// `target` acts as the row's sort key for this pass only. When it ties
/// with another row's order, the moved row goes in front of that row if it
/// is moving up and behind it if it is moving down, so an in-range integer
/// lands the row exactly at that index. Non-finite targets are ignored.
pub fn renumber_with_hint(rows: &mut [Row], id: &str, target: f64) {
    if !target.is_finite() {
        renumber(rows);
        return;
    }

    let key = |row: &Row| -> (f64, i8) {
        if row.id != id {
            return (f64::from(row.order), 0);
        }
        let current = f64::from(row.order);
        let tie_break = match target.total_cmp(&current) {
            Ordering::Less => -1,
            Ordering::Greater => 1,
            Ordering::Equal => 0,
        };
        (target, tie_break)
    };

    rows.sort_by(|a, b| {
        let (ka, ta) = key(a);
        let (kb, tb) = key(b);
        ka.total_cmp(&kb).then(ta.cmp(&tb))
    });
    assign_dense(rows);
}

/// Build the collection in exactly the order given by `ids`.
///
/// `ids` must be a permutation of the current id set. Every row gets
/// `order = index` and `updated_at = now`, moved or not.
pub fn apply_reorder(
    rows: Vec<Row>,
    ids: Option<&[RowId]>,
    now: Timestamp,
) -> Result<Vec<Row>, CoreError> {
    let ids = match ids {
        Some(ids) if !ids.is_empty() => ids,
        _ => {
            return Err(CoreError::rejected(
                ErrorCode::ReorderPayloadInvalid,
                "Reorder payload must be a non-empty list of row ids",
            ))
        }
    };

    let distinct: HashSet<&str> = ids.iter().map(String::as_str).collect();
    if ids.len() != rows.len() || distinct.len() != ids.len() {
        return Err(CoreError::rejected(
            ErrorCode::ReorderIdsMismatch,
            format!(
                "Reorder must list each of the {} existing rows exactly once",
                rows.len()
            ),
        ));
    }

    let mut by_id: HashMap<RowId, Row> = rows
        .into_iter()
        .map(|row| (row.id.clone(), row))
        .collect();

    ids.iter()
        .enumerate()
        .map(|(index, id)| -> Result<Row, CoreError> {
            let mut row = by_id
                .remove(id)
                .ok_or_else(|| CoreError::row_not_found(id))?;
            row.order = dense_position(index);
            row.updated_at = now;
            Ok(row)
        })
        .collect()
}

/// True when `rows` is in ascending order with `order == index`.
pub fn is_dense(rows: &[Row]) -> bool {
    rows.iter()
        .enumerate()
        .all(|(index, row)| row.order == dense_position(index))
}

fn assign_dense(rows: &mut [Row]) {
    for (index, row) in rows.iter_mut().enumerate() {
        row.order = dense_position(index);
    }
}

fn dense_position(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
