//! Tolerant unwrap of list responses.
//!
//! Rows are looked up in a fixed priority order: `data`, then `items`, then the
//! body itself, falling back to an empty list. `total` is taken from the body
//! when it is a non-negative integer.

use serde_json::Value;

use super::row::ListRow;

/// Откуда были взяты строки ответа
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    Data,
    Items,
    Body,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<R> {
    pub rows: Vec<R>,
    /// Rows the server sent, including ones that failed to decode.
    pub returned: usize,
    /// `None` when the server did not report a total.
    pub total: Option<u64>,
    /// Inferred: the server paged/filtered when it reports more rows than it sent.
    pub server_filtered: bool,
}

pub fn row_values(body: &Value) -> (RowSource, &[Value]) {
    if let Some(rows) = body.get("data").and_then(Value::as_array) {
        return (RowSource::Data, rows);
    }
    if let Some(rows) = body.get("items").and_then(Value::as_array) {
        return (RowSource::Items, rows);
    }
    if let Some(rows) = body.as_array() {
        return (RowSource::Body, rows);
    }
    (RowSource::Empty, &[])
}

pub fn reported_total(body: &Value) -> Option<u64> {
    match body.get("total")? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decode a list response. Rows that do not fit `R` are skipped with a warning.
pub fn unwrap_list<R: ListRow>(body: &Value) -> FetchResult<R> {
    let (source, values) = row_values(body);
    let mut rows = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate() {
        match serde_json::from_value::<R>(value.clone()) {
            Ok(row) => rows.push(row),
            Err(e) => log::warn!("Skipping row {} from {:?}: {}", idx, source, e),
        }
    }

    let total = reported_total(body);
    // сравниваем с тем, что прислал сервер, а не с тем, что удалось разобрать
    let server_filtered = total.is_some_and(|t| t > values.len() as u64);

    FetchResult {
        rows,
        returned: values.len(),
        total,
        server_filtered,
    }
}

/// Single record from a mutation response: `data` when it is an object,
/// otherwise the body itself. Acknowledgements that do not decode into a row
/// carrying an id yield `None`.
pub fn unwrap_record<R: ListRow>(body: &Value) -> Option<R> {
    let candidate = match body.get("data") {
        Some(data) if data.is_object() => data,
        _ => body,
    };
    if !candidate.is_object() {
        return None;
    }
    serde_json::from_value::<R>(candidate.clone())
        .ok()
        .filter(|row| row.row_id().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::record_id::RowId;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, Deserialize)]
    struct Guest {
        id: i64,
        name: String,
    }

    impl ListRow for Guest {
        fn row_id(&self) -> Option<RowId> {
            Some(RowId::plain(self.id.to_string()))
        }

        fn field_text(&self, field: &str) -> Option<String> {
            (field == "name").then(|| self.name.clone())
        }
    }

    #[test]
    fn test_data_wins_over_items() {
        let body = json!({"data": [{"id": 1}], "items": [{"id": 2}, {"id": 3}]});
        let (source, rows) = row_values(&body);
        assert_eq!(source, RowSource::Data);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_items_branch() {
        let body = json!({"items": [{"id": 2}], "total": 7});
        let result: FetchResult<Value> = unwrap_list(&body);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.total, Some(7));
        assert!(result.server_filtered);
    }

    #[test]
    fn test_bare_array_branch() {
        let body = json!([{"id": 1}, {"id": 2}]);
        let (source, _) = row_values(&body);
        assert_eq!(source, RowSource::Body);
        let result: FetchResult<Value> = unwrap_list(&body);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.total, None);
        assert!(!result.server_filtered);
    }

    #[test]
    fn test_non_array_data_falls_through() {
        let body = json!({"data": {"id": 1}, "items": [{"id": 9}]});
        assert_eq!(row_values(&body).0, RowSource::Items);
    }

    #[test]
    fn test_unrecognised_body_is_empty() {
        let body = json!({"message": "ok"});
        let (source, rows) = row_values(&body);
        assert_eq!(source, RowSource::Empty);
        assert!(rows.is_empty());
        assert_eq!(row_values(&Value::Null).0, RowSource::Empty);
    }

    #[test]
    fn test_total_parsing() {
        assert_eq!(reported_total(&json!({"total": 45})), Some(45));
        assert_eq!(reported_total(&json!({"total": "12"})), Some(12));
        assert_eq!(reported_total(&json!({"total": 3.0})), Some(3));
        assert_eq!(reported_total(&json!({"total": -1})), None);
        assert_eq!(reported_total(&json!({"total": null})), None);
        assert_eq!(reported_total(&json!([1, 2])), None);
    }

    #[test]
    fn test_total_not_above_rows_is_client_filterable() {
        let body = json!({"data": [{"id": 1}, {"id": 2}], "total": 2});
        let result: FetchResult<Value> = unwrap_list(&body);
        assert!(!result.server_filtered);
    }

    #[test]
    fn test_bad_row_still_counts_as_returned() {
        let body = json!({
            "data": [{"id": 1, "name": "A"}, {"id": 2}, {"id": 3, "name": "C"}],
            "total": 3
        });
        let result: FetchResult<Guest> = unwrap_list(&body);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.returned, 3);
        assert!(!result.server_filtered);
    }

    #[test]
    fn test_unwrap_record() {
        let row: Option<Value> = unwrap_record(&json!({"data": {"id": 5}}));
        assert_eq!(row, Some(json!({"id": 5})));
        let row: Option<Value> = unwrap_record(&json!({"id": 6, "name": "x"}));
        assert_eq!(row, Some(json!({"id": 6, "name": "x"})));
        let row: Option<Value> = unwrap_record(&Value::Null);
        assert_eq!(row, None);
        let row: Option<Value> = unwrap_record(&json!({"ok": true}));
        assert_eq!(row, None);
    }
}
