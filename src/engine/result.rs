// Row Values
//
// This module defines the runtime-typed values, rows and row sets returned by
// a bounded row fetch.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Possible runtime types of a fetched cell
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Null,
    Integer(i64),
    Float(f64),
    /// Arbitrary-precision number kept in its textual form
    Numeric(String),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Json(serde_json::Value),
    Blob(Vec<u8>),
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => write!(f, "NULL"),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::Numeric(n) => write!(f, "{}", n),
            DataValue::Text(s) => write!(f, "{}", s),
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::Date(d) => write!(f, "{}", d),
            DataValue::Time(t) => write!(f, "{}", t),
            DataValue::Timestamp(ts) => write!(f, "{}", ts),
            DataValue::TimestampTz(ts) => write!(f, "{}", ts),
            DataValue::Json(v) => write!(f, "{}", v),
            DataValue::Blob(b) => write!(f, "BLOB ({} bytes)", b.len()),
        }
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Integer(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

/// Widens through the shortest decimal form, so `0.1f32` stays `0.1`
impl From<f32> for DataValue {
    fn from(value: f32) -> Self {
        let widened = value.to_string().parse::<f64>().unwrap_or(f64::from(value));
        DataValue::Float(widened)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Boolean(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::Text(value)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

/// Represents one fetched row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Values indexed by column name
    values: HashMap<String, DataValue>,
    /// Column order as fetched
    column_order: Vec<String>,
}

impl Row {
    /// Create a new empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from column values
    pub fn from_values(columns: Vec<String>, values: Vec<DataValue>) -> Self {
        let mut row = Row::new();
        for (col, val) in columns.into_iter().zip(values) {
            row.set(col, val);
        }
        row
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&DataValue> {
        self.values.get(column)
    }

    /// Set a value for a column
    pub fn set(&mut self, column: String, value: DataValue) {
        if !self.values.contains_key(&column) {
            self.column_order.push(column.clone());
        }
        self.values.insert(column, value);
    }

    /// Get all columns in the row
    pub fn columns(&self) -> &[String] {
        &self.column_order
    }
}

/// Bounded set of fetched rows with their column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl RowSet {
    /// Create a new empty row set with column names
    pub fn new(columns: Vec<String>) -> Self {
        RowSet {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Keep at most `limit` rows
    pub fn truncate(&mut self, limit: usize) {
        self.rows.truncate(limit);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
