//! Wire format of the stats API: named result sets of positional rows.

use std::str::FromStr;

use courtside_core::SourceError;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// Top-level response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsPayload {
    /// Result sets in response order.
    #[serde(rename = "resultSets", default)]
    pub result_sets: Vec<ResultSet>,
}

/// One table: column headers and positional rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    /// Table name (e.g. `"PlayerStats"`).
    pub name: String,
    /// Column names.
    pub headers: Vec<String>,
    /// Rows; each value lines up with `headers`.
    #[serde(rename = "rowSet", default)]
    pub row_set: Vec<Vec<Value>>,
}

impl StatsPayload {
    /// Look up a result set by name.
    ///
    /// # Errors
    /// Returns `MalformedResponse` when the set is missing.
    pub fn result_set(&self, name: &str) -> Result<&ResultSet, SourceError> {
        self.result_sets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SourceError::malformed(format!("missing result set {name}")))
    }
}

impl ResultSet {
    /// Rows with header-name access.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.row_set.iter().map(move |values| Row { set: self, values })
    }

    fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

/// A row of a [`ResultSet`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    set: &'a ResultSet,
    values: &'a [Value],
}

impl Row<'_> {
    /// Raw value under `header`; JSON `null` and missing columns are `None`.
    #[must_use]
    pub fn value(&self, header: &str) -> Option<&Value> {
        self.set
            .column(header)
            .and_then(|i| self.values.get(i))
            .filter(|v| !v.is_null())
    }

    /// Value as text; numbers are rendered, empty strings are `None`.
    #[must_use]
    pub fn text(&self, header: &str) -> Option<String> {
        match self.value(header)? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Value as a decimal.
    #[must_use]
    pub fn decimal(&self, header: &str) -> Option<Decimal> {
        let text = self.text(header)?;
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }
}
