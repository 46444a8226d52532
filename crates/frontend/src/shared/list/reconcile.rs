//! Reconciling the local row set with a confirmed mutation.

use contracts::shared::record_id::RowId;

use super::row::ListRow;

fn position<R: ListRow>(rows: &[R], id: &RowId) -> Option<usize> {
    rows.iter().position(|r| r.row_id().as_ref() == Some(id))
}

/// Replace the row with the same id in place, otherwise prepend.
/// Returns true when the row was new.
pub fn upsert_front<R: ListRow>(rows: &mut Vec<R>, row: R) -> bool {
    if let Some(idx) = row.row_id().and_then(|id| position(rows, &id)) {
        rows[idx] = row;
        return false;
    }
    rows.insert(0, row);
    true
}

/// Replace the row with the same id in place, otherwise append.
/// Returns true when the row was appended.
pub fn replace_or_append<R: ListRow>(rows: &mut Vec<R>, row: R) -> bool {
    if let Some(idx) = row.row_id().and_then(|id| position(rows, &id)) {
        rows[idx] = row;
        return false;
    }
    rows.push(row);
    true
}

/// Удаляет строку с таким id; true если она была
pub fn remove_by_id<R: ListRow>(rows: &mut Vec<R>, id: &RowId) -> bool {
    match position(rows, id) {
        Some(idx) => {
            rows.remove(idx);
            true
        }
        None => false,
    }
}

pub fn decrement_total(total: Option<u64>) -> Option<u64> {
    total.map(|t| t.saturating_sub(1))
}
