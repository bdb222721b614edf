//! Feature rows as seen by the CQL filter.
//!
//! Rows come from the data layer; the filter only needs to resolve a column by
//! name, learn its declared type, and read the value. [`FeatureRow`] captures
//! exactly that, and [`FeatureTable`] is the in-memory implementation used for
//! fixtures and the command-line checker.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Declared scalar type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Other,
}

impl ColumnType {
    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::String)
    }
}

/// A borrowed cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Integer(i64),
    Float(f64),
    Text(&'a str),
}

impl FieldValue<'_> {
    /// Text form used for string comparisons and IN membership. Null is empty.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Text(s) => (*s).to_string(),
        }
    }

    /// Numeric form used for comparisons on non-string columns.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Null => None,
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Read-only access to one feature's attributes.
pub trait FeatureRow {
    /// Position of the column called `name`, if the schema has one.
    fn column_index(&self, name: &str) -> Option<usize>;

    /// Declared type of the column at `index`.
    fn column_type(&self, index: usize) -> ColumnType;

    /// Value of the column at `index` for this row.
    fn value(&self, index: usize) -> FieldValue<'_>;
}

impl<R: FeatureRow + ?Sized> FeatureRow for &R {
    fn column_index(&self, name: &str) -> Option<usize> {
        (**self).column_index(name)
    }

    fn column_type(&self, index: usize) -> ColumnType {
        (**self).column_type(index)
    }

    fn value(&self, index: usize) -> FieldValue<'_> {
        (**self).value(index)
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Float)
    }
}

/// An owned cell value. Deserializes from plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn as_field(&self) -> FieldValue<'_> {
        match self {
            Value::Null => FieldValue::Null,
            Value::Integer(i) => FieldValue::Integer(*i),
            Value::Float(f) => FieldValue::Float(*f),
            Value::Text(s) => FieldValue::Text(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FeatureTableError {
    #[error("Row {row} has {actual} values, schema has {expected} columns")]
    ArityMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Rows sharing one schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl FeatureTable {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; it must have one value per column.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<(), FeatureTableError> {
        self.check_arity(self.rows.len(), &values)?;
        self.rows.push(values);
        Ok(())
    }

    /// Check every row against the schema, e.g. after deserializing.
    pub fn validate(&self) -> Result<(), FeatureTableError> {
        self.rows
            .iter()
            .enumerate()
            .try_for_each(|(i, values)| self.check_arity(i, values))
    }

    fn check_arity(&self, row: usize, values: &[Value]) -> Result<(), FeatureTableError> {
        if values.len() != self.columns.len() {
            return Err(FeatureTableError::ArityMismatch {
                row,
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<TableRow<'_>> {
        self.rows.get(index).map(|values| TableRow {
            columns: &self.columns,
            values,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = TableRow<'_>> {
        self.rows.iter().map(|values| TableRow {
            columns: &self.columns,
            values,
        })
    }
}

/// One row of a [`FeatureTable`].
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    columns: &'a [Column],
    values: &'a [Value],
}

impl FeatureRow for TableRow<'_> {
    /// Exact name match first, then the first ASCII case-insensitive match.
    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|c| c.name.eq_ignore_ascii_case(name))
            })
    }

    fn column_type(&self, index: usize) -> ColumnType {
        self.columns
            .get(index)
            .map_or(ColumnType::Other, |c| c.column_type)
    }

    fn value(&self, index: usize) -> FieldValue<'_> {
        self.values.get(index).map_or(FieldValue::Null, Value::as_field)
    }
}
