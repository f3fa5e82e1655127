use chrono::NaiveDate;

/// A comparable cell value resolved from a row for a named column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl Value {
    /// Parses `YYYY-MM-DD` (optionally followed by a time part) as a date,
    /// keeps anything else as text. Blank input is `Null`.
    pub fn date_or_text(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            Ok(date) => Value::Date(date),
            Err(_) => Value::Text(trimmed.to_string()),
        }
    }

    /// The text used for exact-match categorical filtering.
    pub fn key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(v) => Some(v.to_string()),
            Value::Number(v) => Some(v.to_string()),
            Value::Date(v) => Some(v.format("%Y-%m-%d").to_string()),
            Value::Text(v) => Some(v.clone()),
        }
    }

    pub fn matches(&self, selected: &str) -> bool {
        match self {
            Value::Text(v) => v == selected,
            other => other.key().is_some_and(|key| key == selected),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Binds a concrete record type to the view engine.
///
/// Unknown columns must resolve to [`Value::Null`] instead of failing, so
/// callers can evolve their column sets without touching the engine.
pub trait TableRow: Clone {
    /// Names of the categorical dimensions this row can be filtered on.
    fn dimensions() -> &'static [&'static str] {
        &[]
    }

    fn value(&self, column: &str) -> Value;

    /// Fields scanned by the free-text search. `None` entries are skipped.
    fn search_fields(&self) -> Vec<Option<&str>> {
        Vec::new()
    }
}
