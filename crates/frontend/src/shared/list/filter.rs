//! Схема фильтров и их сериализация в query
//!
//! Only non-empty values that pass their field's rule are serialized; an empty
//! string, `Null` or an unparsable date never reaches the server.

use chrono::{DateTime, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub enum FilterRule {
    /// Sent trimmed if non-blank.
    Text,
    /// Sent as `YYYY-MM-DD`.
    IsoDate,
    /// Sent only when the value is one of the codes.
    OneOf(Vec<String>),
    /// Sent in canonical numeric form.
    Number,
}

impl FilterRule {
    pub fn one_of<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterRule::OneOf(codes.into_iter().map(Into::into).collect())
    }

    /// Query value for `value` under this rule, `None` when it must be omitted.
    pub fn serialize(&self, value: &FilterValue) -> Option<String> {
        if value.is_empty() {
            return None;
        }
        match (self, value) {
            (FilterRule::Text, v) => v.as_text(),
            (FilterRule::IsoDate, FilterValue::Date(d)) => Some(d.format("%Y-%m-%d").to_string()),
            (FilterRule::IsoDate, FilterValue::Text(s)) => {
                parse_date(s).map(|d| d.format("%Y-%m-%d").to_string())
            }
            (FilterRule::IsoDate, _) => None,
            (FilterRule::OneOf(codes), v) => {
                let text = v.as_text()?;
                codes.iter().any(|c| *c == text).then_some(text)
            }
            (FilterRule::Number, FilterValue::Number(n)) => format_number(*n),
            (FilterRule::Number, FilterValue::Text(s)) => {
                s.trim().parse::<f64>().ok().and_then(format_number)
            }
            (FilterRule::Number, _) => None,
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

fn format_number(n: f64) -> Option<String> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        Some(format!("{}", n as i64))
    } else {
        Some(n.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterValue {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl FilterValue {
    /// `Null` and blank text count as "no filter".
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Null => true,
            FilterValue::Text(s) => s.trim().is_empty(),
            FilterValue::Number(n) => !n.is_finite(),
            FilterValue::Date(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            FilterValue::Null => None,
            FilterValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            FilterValue::Number(n) => format_number(*n),
            FilterValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value as f64)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Number(value as f64)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        FilterValue::Date(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FilterValue::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterField {
    pub key: String,
    pub rule: FilterRule,
}

/// Ordered list of the filter keys a list view recognises.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSchema {
    fields: Vec<FilterField>,
}

impl FilterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Повторное объявление ключа заменяет правило, порядок сохраняется
    pub fn add(&mut self, key: impl Into<String>, rule: FilterRule) {
        let key = key.into();
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => field.rule = rule,
            None => self.fields.push(FilterField { key, rule }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FilterField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }
}

/// Current filter values, kept in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    values: Vec<(String, FilterValue)>,
}

impl FilterSet {
    pub fn new(schema: &FilterSchema) -> Self {
        Self {
            values: schema
                .fields()
                .iter()
                .map(|f| (f.key.clone(), FilterValue::Null))
                .collect(),
        }
    }

    /// Returns false (and changes nothing) for a key outside the schema.
    pub fn set(&mut self, key: &str, value: FilterValue) -> bool {
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Сериализация по схеме: пустые и невалидные значения пропускаются
    pub fn to_query(&self, schema: &FilterSchema) -> Vec<(String, String)> {
        let mut query = Vec::new();
        for (key, value) in &self.values {
            let Some(field) = schema.get(key) else {
                continue;
            };
            match field.rule.serialize(value) {
                Some(text) => query.push((key.clone(), text)),
                None if !value.is_empty() => {
                    log::warn!("Filter '{}' dropped: {:?} does not fit {:?}", key, value, field.rule);
                }
                None => {}
            }
        }
        query
    }
}
