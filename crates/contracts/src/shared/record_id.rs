use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Id value
// ============================================================================

/// Значение идентификатора записи: сервер отдаёт либо строку, либо целое число
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    /// Каноническое строковое представление (числа и строки с теми же цифрами совпадают)
    pub fn as_string(&self) -> String {
        match self {
            IdValue::Number(n) => n.to_string(),
            IdValue::Text(s) => s.clone(),
        }
    }

    /// Read an id out of an arbitrary JSON value. Blank strings are not ids.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(IdValue::Text(s.clone())),
            serde_json::Value::Number(n) => n.as_i64().map(IdValue::Number),
            _ => None,
        }
    }
}

impl From<&str> for IdValue {
    fn from(value: &str) -> Self {
        IdValue::Text(value.to_string())
    }
}

impl From<String> for IdValue {
    fn from(value: String) -> Self {
        IdValue::Text(value)
    }
}

impl From<i64> for IdValue {
    fn from(value: i64) -> Self {
        IdValue::Number(value)
    }
}

// ============================================================================
// Canonical row id
// ============================================================================

/// Под каким полем сервер прислал идентификатор
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdAlias {
    /// `_id`
    Underscore,
    /// `id`
    Plain,
}

impl IdAlias {
    pub fn field_name(&self) -> &'static str {
        match self {
            IdAlias::Underscore => "_id",
            IdAlias::Plain => "id",
        }
    }
}

/// Canonical row identity.
///
/// Two ids are equal only when both the alias and the value agree, so a row
/// keyed by `_id: "7"` never matches a row keyed by `id: "7"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId {
    pub alias: IdAlias,
    pub value: String,
}

impl RowId {
    pub fn new(alias: IdAlias, value: impl Into<String>) -> Self {
        Self {
            alias,
            value: value.into(),
        }
    }

    pub fn underscore(value: impl Into<String>) -> Self {
        Self::new(IdAlias::Underscore, value)
    }

    pub fn plain(value: impl Into<String>) -> Self {
        Self::new(IdAlias::Plain, value)
    }

    /// Resolve the id of an opaque JSON record, preferring `_id` over `id`.
    pub fn from_json(record: &serde_json::Value) -> Option<Self> {
        let object = record.as_object()?;
        if let Some(v) = object.get("_id").and_then(IdValue::from_json) {
            return Some(Self::underscore(v.as_string()));
        }
        object
            .get("id")
            .and_then(IdValue::from_json)
            .map(|v| Self::plain(v.as_string()))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

// ============================================================================
// Alias pair embedded into DTOs
// ============================================================================

/// Пара идентификаторов `_id` / `id`, встраивается в DTO через `#[serde(flatten)]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordIds {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub underscore_id: Option<IdValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IdValue>,
}

impl RecordIds {
    pub fn plain(value: impl Into<IdValue>) -> Self {
        Self {
            underscore_id: None,
            id: Some(value.into()),
        }
    }

    pub fn underscore(value: impl Into<IdValue>) -> Self {
        Self {
            underscore_id: Some(value.into()),
            id: None,
        }
    }

    /// `_id` wins when the server sends both.
    pub fn row_id(&self) -> Option<RowId> {
        if let Some(v) = &self.underscore_id {
            return Some(RowId::underscore(v.as_string()));
        }
        self.id.as_ref().map(|v| RowId::plain(v.as_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_id_prefers_underscore() {
        let id = RowId::from_json(&json!({"_id": "a1", "id": 5})).unwrap();
        assert_eq!(id, RowId::underscore("a1"));
    }

    #[test]
    fn test_row_id_aliases_do_not_collide() {
        let a = RowId::from_json(&json!({"_id": "7"})).unwrap();
        let b = RowId::from_json(&json!({"id": "7"})).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_numeric_and_text_ids_normalize() {
        let a = RowId::from_json(&json!({"id": 42})).unwrap();
        let b = RowId::from_json(&json!({"id": "42"})).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "42");
    }

    #[test]
    fn test_blank_and_missing_ids() {
        assert!(RowId::from_json(&json!({"id": ""})).is_none());
        assert!(RowId::from_json(&json!({"name": "x"})).is_none());
        assert!(RowId::from_json(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_record_ids_flatten() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(flatten)]
            ids: RecordIds,
            #[allow(dead_code)]
            name: String,
        }

        let row: Row = serde_json::from_value(json!({"_id": 9, "name": "x"})).unwrap();
        assert_eq!(row.ids.row_id(), Some(RowId::underscore("9")));

        let row: Row = serde_json::from_value(json!({"id": "r-1", "name": "x"})).unwrap();
        assert_eq!(row.ids.row_id(), Some(RowId::plain("r-1")));
    }
}
