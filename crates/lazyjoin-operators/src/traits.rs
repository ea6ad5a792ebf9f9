//! Operator trait + common interfaces for row-batch operators.
//!
//! `plan(...)` validates input schemas and reports the output schema;
//! `eval_block(...)` runs the operator over one block of rows per input.

use lazyjoin_core::prelude::Schema;
use lazyjoin_core::types::RowBatch;

use crate::error::JoinError;
use crate::plan::{Footprint, OpPlan};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("planning error: {0}")]
    Plan(String),

    #[error("execution error: {0}")]
    Exec(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error(transparent)]
    Join(#[from] JoinError),
}

/// Trait that all row-batch operators implement.
///
/// Invariant: `eval_block` must be deterministic given the same inputs.
pub trait Operator: Send + Sync + 'static {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Rough memory model for a block of `rows` rows.
    fn memory_need(&self, rows: u64) -> Footprint;

    /// Given input schemas, return the output schema and footprint.
    fn plan(&self, input_schemas: &[Schema]) -> Result<OpPlan, OpError>;

    /// Evaluate one block worth of data. Binary operators take two inputs.
    fn eval_block(&self, inputs: &[RowBatch]) -> Result<RowBatch, OpError>;
}
