//! Lightweight value/column model for joining tabular data.
//!
//! The join engine itself is generic over any element type; this model only
//! backs the row-batch operator and its tests.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::key::{KeyValue, RowKey};
use crate::schema::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
}

impl Scalar {
    /// Logical type of a value; `None` for `Null`, which carries no type.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(_) => Some(DataType::Boolean),
            Scalar::I32(_) => Some(DataType::Int32),
            Scalar::I64(_) => Some(DataType::Int64),
            Scalar::F32(_) => Some(DataType::Float32),
            Scalar::F64(_) => Some(DataType::Float64),
            Scalar::Str(_) => Some(DataType::Utf8),
            Scalar::Bin(_) => Some(DataType::Binary),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::I64(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Scalar>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Scalar>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Column-major batch of rows. All columns have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowBatch {
    pub columns: Vec<Column>,
}

impl RowBatch {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Resolve column names to positions, failing on the first unknown name.
    pub fn column_indices(&self, names: &[String]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                self.columns
                    .iter()
                    .position(|c| &c.name == name)
                    .ok_or_else(|| Error::Schema(format!("column '{name}' not found")))
            })
            .collect()
    }

    /// Build the composite join key of one row from the given column positions.
    pub fn row_key(&self, key_indices: &[usize], row: usize) -> RowKey {
        key_indices
            .iter()
            .map(|&col| KeyValue::from(&self.columns[col].values[row]))
            .collect()
    }

    /// Gather rows by position; `None` produces a row of nulls.
    pub fn gather(&self, rows: &[Option<usize>]) -> RowBatch {
        let columns = self
            .columns
            .iter()
            .map(|col| Column {
                name: col.name.clone(),
                values: rows
                    .iter()
                    .map(|row| match row {
                        Some(idx) => col.values[*idx].clone(),
                        None => Scalar::Null,
                    })
                    .collect(),
            })
            .collect();
        RowBatch { columns }
    }

    /// Concatenate two batches side-by-side (left columns, then right columns).
    ///
    /// Right columns whose names clash with a left column get `right_suffix`.
    pub fn concat(left: &RowBatch, right: &RowBatch, right_suffix: &str) -> Result<RowBatch> {
        if left.num_rows() != right.num_rows() && !left.columns.is_empty() && !right.columns.is_empty()
        {
            return Err(Error::Invariant(format!(
                "cannot concat batches with different row counts: {} vs {}",
                left.num_rows(),
                right.num_rows()
            )));
        }

        let mut columns = Vec::with_capacity(left.columns.len() + right.columns.len());
        columns.extend(left.columns.iter().cloned());

        for col in &right.columns {
            let mut new_col = col.clone();
            if left.columns.iter().any(|c| c.name == col.name) {
                new_col.name = format!("{}{}", col.name, right_suffix);
            }
            columns.push(new_col);
        }

        Ok(RowBatch { columns })
    }
}
