use contracts::shared::record_id::RowId;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Строка списка: всё, что контроллеру нужно знать о записи сервера
///
/// Field names are the server's wire names; typed DTOs map them by hand,
/// opaque JSON rows look them up directly.
pub trait ListRow: Clone + DeserializeOwned + 'static {
    /// Canonical id, alias-qualified.
    fn row_id(&self) -> Option<RowId>;

    /// Text value of a field, used by the search fallback and CSV/KPI helpers.
    fn field_text(&self, field: &str) -> Option<String>;

    fn field_number(&self, field: &str) -> Option<f64> {
        self.field_text(field)
            .and_then(|s| s.trim().parse::<f64>().ok())
    }
}

impl ListRow for Value {
    fn row_id(&self) -> Option<RowId> {
        RowId::from_json(self)
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn field_number(&self, field: &str) -> Option<f64> {
        match self.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_fields() {
        let row = json!({"_id": "r1", "guest": "Smith", "amount": 12.5, "vip": true, "tags": []});
        assert_eq!(row.row_id(), Some(RowId::underscore("r1")));
        assert_eq!(row.field_text("guest").as_deref(), Some("Smith"));
        assert_eq!(row.field_text("amount").as_deref(), Some("12.5"));
        assert_eq!(row.field_text("vip").as_deref(), Some("true"));
        assert_eq!(row.field_text("tags"), None);
        assert_eq!(row.field_number("amount"), Some(12.5));
        assert_eq!(row.field_number("guest"), None);
    }

    #[test]
    fn test_numeric_strings_are_numbers() {
        let row = json!({"amount": " 40 "});
        assert_eq!(row.field_number("amount"), Some(40.0));
    }
}
