// src/sheet/types.rs

use serde::Deserialize;
use serde_json::Value;

/// Top level of a visualization query response. Only `table` is read.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub table: RawTable,
}

/// Rows of the sheet as served, untyped.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct RawTable {
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct Row {
    /// Cells in column order; blank cells come through as `null`.
    #[serde(default, deserialize_with = "nullable_vec")]
    pub c: Vec<Option<Cell>>,
}

/// One cell: raw value `v` and, for typed columns, its display string `f`.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct Cell {
    #[serde(default)]
    pub v: Value,
    #[serde(default)]
    pub f: Option<String>,
}

fn nullable_vec<'de, D>(deserializer: D) -> Result<Vec<Option<Cell>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Option<Cell>>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Cell {
    pub fn new(v: impl Into<Value>) -> Self {
        Self {
            v: v.into(),
            f: None,
        }
    }

    pub fn formatted(v: impl Into<Value>, f: impl Into<String>) -> Self {
        Self {
            v: v.into(),
            f: Some(f.into()),
        }
    }

    /// Present and not blank: `null`, `false`, numeric zero and
    /// whitespace-only strings are empty. `"0:00:00"` is a value.
    pub fn is_filled(&self) -> bool {
        match &self.v {
            Value::Null | Value::Bool(false) => false,
            Value::Number(n) => n.as_f64() != Some(0.0),
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        }
    }

    /// The raw value as display text. Strings are trimmed, numbers printed.
    pub fn text(&self) -> Option<String> {
        match &self.v {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Display string, falling back to the raw value when no format was sent.
    pub fn label(&self) -> Option<String> {
        self.f.clone().or_else(|| self.text())
    }
}

impl Row {
    pub fn new(cells: Vec<Option<Cell>>) -> Self {
        Self { c: cells }
    }

    pub fn cell(&self, idx: usize) -> Option<&Cell> {
        self.c.get(idx).and_then(Option::as_ref)
    }

    /// The cell at `idx` if it is filled.
    pub fn filled(&self, idx: usize) -> Option<&Cell> {
        self.cell(idx).filter(|c| c.is_filled())
    }
}

impl RawTable {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}
