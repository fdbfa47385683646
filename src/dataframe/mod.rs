//! Column-oriented DataFrame used by the aggregation layer
//!
//! Columns are stored by name alongside an explicit column order. Every column
//! holds the same number of rows; this is checked whenever a column is added.

pub mod join;
pub mod transform;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::error::{Error, Result};
use crate::series::Series;

pub use join::JoinType;
pub use transform::MeltOptions;

/// A typed column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Text or categorical values
    Str(Series<String>),
    /// Floating point measurements
    Float(Series<f64>),
    /// Integer counts
    Int(Series<i64>),
}

impl Column {
    /// Number of rows in the column
    pub fn len(&self) -> usize {
        match self {
            Column::Str(s) => s.len(),
            Column::Float(s) => s.len(),
            Column::Int(s) => s.len(),
        }
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the value type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Str(_) => "string",
            Column::Float(_) => "float",
            Column::Int(_) => "int",
        }
    }

    /// Select rows by position
    pub fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Str(s) => Column::Str(s.take(indices)),
            Column::Float(s) => Column::Float(s.take(indices)),
            Column::Int(s) => Column::Int(s.take(indices)),
        }
    }

    /// Display form of one cell
    pub fn display_value(&self, row: usize) -> Option<String> {
        match self {
            Column::Str(s) => s.get(row).cloned(),
            Column::Float(s) => s.get(row).map(|v| v.to_string()),
            Column::Int(s) => s.get(row).map(|v| v.to_string()),
        }
    }

    fn with_name(self, name: &str) -> Column {
        match self {
            Column::Str(s) => Column::Str(s.with_name(name)),
            Column::Float(s) => Column::Float(s.with_name(name)),
            Column::Int(s) => Column::Int(s.with_name(name)),
        }
    }
}

impl From<Series<String>> for Column {
    fn from(series: Series<String>) -> Self {
        Column::Str(series)
    }
}

impl From<Series<f64>> for Column {
    fn from(series: Series<f64>) -> Self {
        Column::Float(series)
    }
}

impl From<Series<i64>> for Column {
    fn from(series: Series<i64>) -> Self {
        Column::Int(series)
    }
}

/// DataFrame: ordered, named, equally long columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    /// Column order
    columns: Vec<String>,
    /// Column data by name
    data: HashMap<String, Column>,
    /// Number of rows shared by every column
    row_count: usize,
}

impl DataFrame {
    /// Create an empty DataFrame
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. The first column fixes the row count.
    pub fn add_column<C: Into<Column>>(&mut self, name: impl Into<String>, column: C) -> Result<()> {
        let name = name.into();
        if self.data.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }

        let column = column.into().with_name(&name);
        if self.columns.is_empty() {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }

        self.columns.push(name.clone());
        self.data.insert(name, column);
        Ok(())
    }

    /// Column names in order
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether a column exists
    pub fn contains_column(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.data
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// String values of a column. Numeric columns are formatted.
    pub fn get_column_string_values(&self, name: &str) -> Result<Vec<String>> {
        match self.column(name)? {
            Column::Str(s) => Ok(s.values().to_vec()),
            Column::Float(s) => Ok(s.values().iter().map(|v| v.to_string()).collect()),
            Column::Int(s) => Ok(s.values().iter().map(|v| v.to_string()).collect()),
        }
    }

    /// Numeric values of a column as f64
    pub fn get_column_numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        match self.column(name)? {
            Column::Float(s) => Ok(s.values().to_vec()),
            Column::Int(s) => Ok(s.values().iter().map(|&v| v as f64).collect()),
            other => Err(Error::ColumnTypeMismatch {
                name: name.to_string(),
                expected: "numeric",
                found: other.type_name(),
            }),
        }
    }

    /// Integer values of a column
    pub fn get_column_int_values(&self, name: &str) -> Result<Vec<i64>> {
        match self.column(name)? {
            Column::Int(s) => Ok(s.values().to_vec()),
            other => Err(Error::ColumnTypeMismatch {
                name: name.to_string(),
                expected: "int",
                found: other.type_name(),
            }),
        }
    }

    /// Display form of one cell
    pub fn value_string(&self, column: &str, row: usize) -> Result<String> {
        self.column(column)?
            .display_value(row)
            .ok_or(Error::IndexOutOfBounds {
                index: row,
                size: self.row_count,
            })
    }

    /// Select rows by position, keeping the given order
    pub fn take(&self, indices: &[usize]) -> Result<DataFrame> {
        let mut result = DataFrame::new();
        for name in &self.columns {
            result.add_column(name.clone(), self.column(name)?.take(indices))?;
        }
        Ok(result)
    }

    /// Rows where a string column equals `value`
    pub fn filter_eq(&self, column: &str, value: &str) -> Result<DataFrame> {
        let keys = self.get_column_string_values(column)?;
        let indices: Vec<usize> = keys
            .iter()
            .enumerate()
            .filter(|(_, key)| key.as_str() == value)
            .map(|(i, _)| i)
            .collect();
        self.take(&indices)
    }

    /// Sorted distinct values of a column
    pub fn unique_sorted(&self, column: &str) -> Result<Vec<String>> {
        let values: BTreeSet<String> = self.get_column_string_values(column)?.into_iter().collect();
        Ok(values.into_iter().collect())
    }

    /// Check that every named column exists
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        for name in names {
            if !self.contains_column(name) {
                return Err(Error::ColumnNotFound(name.to_string()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join("\t"))?;
        for row in 0..self.row_count {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| {
                    self.data
                        .get(c)
                        .and_then(|col| col.display_value(row))
                        .unwrap_or_default()
                })
                .collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}
