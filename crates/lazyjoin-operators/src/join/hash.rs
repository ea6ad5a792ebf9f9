//! Hash join over row batches.
//!
//! Rows are joined on pairs of key columns, `(left_column, right_column)`.
//! Row positions are driven through the generic engine, so output order and
//! outer-join semantics are identical to [`crate::join::join`]. The side that
//! can be absent is filled with `Scalar::Null`.

use lazyjoin_core::config::JoinConfig;
use lazyjoin_core::join_type::JoinType;
use lazyjoin_core::prelude::Schema;
use lazyjoin_core::schema::Field;
use lazyjoin_core::types::RowBatch;

use crate::error::JoinError;
use crate::join::join;
use crate::plan::{Footprint, OpPlan};
use crate::traits::{OpError, Operator};

#[derive(Debug, Clone, Default)]
pub struct HashJoin {
    /// Key column pairs: (left column, right column).
    pub on: Vec<(String, String)>,
    /// Join type name (`inner`, `left`, `right`, `full`, ...). Empty means
    /// `config.default_join_type`.
    pub join_type: String,
    pub config: JoinConfig,
}

impl HashJoin {
    pub fn new(on: Vec<(String, String)>, join_type: JoinType) -> Self {
        Self {
            on,
            join_type: join_type.as_str().to_string(),
            config: JoinConfig::default(),
        }
    }

    pub fn with_config(mut self, config: JoinConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve and validate construction arguments before any row is read.
    fn resolve(&self) -> Result<(JoinType, Vec<String>, Vec<String>), JoinError> {
        self.config.validate()?;

        let join_type = if self.join_type.trim().is_empty() {
            self.config.default_join_type
        } else {
            self.join_type.parse::<JoinType>()?
        };

        if self.on.is_empty() {
            return Err(JoinError::Construction(
                "hash join requires at least one key column pair".into(),
            ));
        }
        let (left_cols, right_cols) = self.on.iter().cloned().unzip();
        Ok((join_type, left_cols, right_cols))
    }
}

impl Operator for HashJoin {
    fn name(&self) -> &'static str {
        "join_hash"
    }

    fn memory_need(&self, rows: u64) -> Footprint {
        // Index entry per indexed row, plus a key value per key column.
        let key_bytes = 32 * self.on.len() as u64;
        Footprint {
            bytes_per_row: 16 + key_bytes,
            overhead_bytes: 64 * 1024 + rows.saturating_mul(8),
        }
    }

    fn plan(&self, input_schemas: &[Schema]) -> Result<OpPlan, OpError> {
        let [left, right] = input_schemas else {
            return Err(OpError::Plan("hash join expects two inputs".into()));
        };
        let (join_type, left_cols, right_cols) = self.resolve()?;

        left.indices_of(&left_cols)
            .map_err(|e| OpError::Schema(e.to_string()))?;
        right
            .indices_of(&right_cols)
            .map_err(|e| OpError::Schema(e.to_string()))?;

        let mut fields: Vec<Field> = Vec::with_capacity(left.fields.len() + right.fields.len());
        for field in &left.fields {
            fields.push(if join_type.left_may_be_absent() {
                field.as_nullable()
            } else {
                field.clone()
            });
        }
        for field in &right.fields {
            let mut out = if join_type.right_may_be_absent() {
                field.as_nullable()
            } else {
                field.clone()
            };
            if left.index_of(&field.name).is_some() {
                out.name = format!("{}{}", field.name, self.config.right_suffix);
            }
            fields.push(out);
        }

        Ok(OpPlan::new(Schema::new(fields), self.memory_need(0)).with_partitions(left_cols))
    }

    fn eval_block(&self, inputs: &[RowBatch]) -> Result<RowBatch, OpError> {
        let [left, right] = inputs else {
            return Err(OpError::Exec("hash join needs two block inputs".into()));
        };
        let (join_type, left_cols, right_cols) = self.resolve()?;

        let left_idx = left.column_indices(&left_cols).map_err(JoinError::from)?;
        let right_idx = right.column_indices(&right_cols).map_err(JoinError::from)?;

        let results = join(
            0..left.num_rows(),
            |&row| left.row_key(&left_idx, row),
            0..right.num_rows(),
            |&row| right.row_key(&right_idx, row),
            join_type,
        )
        .with_config(self.config.clone());

        let mut left_rows = Vec::new();
        let mut right_rows = Vec::new();
        for result in results {
            let result = result?;
            left_rows.push(result.left().copied());
            right_rows.push(result.right().copied());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            join_type = %join_type,
            left_rows = left.num_rows(),
            right_rows = right.num_rows(),
            output_rows = left_rows.len(),
            "evaluated hash join block"
        );

        RowBatch::concat(
            &left.gather(&left_rows),
            &right.gather(&right_rows),
            &self.config.right_suffix,
        )
        .map_err(|e| OpError::Exec(e.to_string()))
    }
}
