use super::row::ListRow;

/// Клиентский поиск, когда сервер явно не отфильтровал ответ
///
/// Keeps the server's order and only drops rows in which none of `fields`
/// contains `term` (case-insensitive). A blank term or an empty field list
/// keeps every row.
pub fn apply_search_fallback<R: ListRow>(rows: &[R], term: &str, fields: &[String]) -> Vec<R> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() || fields.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| matches_search(*row, &needle, fields))
        .cloned()
        .collect()
}

/// `needle` must already be lowercased.
pub fn matches_search<R: ListRow>(row: &R, needle: &str, fields: &[String]) -> bool {
    fields.iter().any(|field| {
        row.field_text(field)
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn rows() -> Vec<Value> {
        vec![
            json!({"id": 1, "guest_name": "John Smith", "room_no": "101"}),
            json!({"id": 2, "guest_name": "Ann Jones", "room_no": "205"}),
            json!({"id": 3, "guest_name": "Blacksmith Ltd", "room_no": null}),
        ]
    }

    fn fields() -> Vec<String> {
        vec!["guest_name".to_string(), "room_no".to_string()]
    }

    #[test]
    fn test_case_insensitive_and_order_preserving() {
        let out = apply_search_fallback(&rows(), "SMITH", &fields());
        let ids: Vec<i64> = out.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_matches_any_field() {
        let out = apply_search_fallback(&rows(), "205", &fields());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["id"], 2);
    }

    #[test]
    fn test_idempotent() {
        let once = apply_search_fallback(&rows(), "smith", &fields());
        let twice = apply_search_fallback(&once, "smith", &fields());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_blank_term_keeps_everything() {
        assert_eq!(apply_search_fallback(&rows(), "  ", &fields()).len(), 3);
        assert_eq!(apply_search_fallback(&rows(), "smith", &[]).len(), 3);
    }
}
