//! Operator planning surfaces: `Footprint` and `OpPlan`.

use lazyjoin_core::prelude::Schema;
use serde::{Deserialize, Serialize};

/// Coarse memory model for rows flowing through an operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    /// Estimated bytes kept per indexed row (hash index entry plus group slot).
    pub bytes_per_row: u64,
    /// Fixed overhead of the operator's tables.
    pub overhead_bytes: u64,
}

impl Footprint {
    /// Estimate total live bytes when `rows` rows are held by this operator.
    pub fn estimate_live(&self, rows: u64) -> u64 {
        self.overhead_bytes
            .saturating_add(self.bytes_per_row.saturating_mul(rows))
    }
}

/// Operator plan: output schema, key columns, and a cached footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpPlan {
    pub output_schema: Schema,

    /// Columns (by output name) the operator groups or matches on.
    pub partitions: Vec<String>,

    /// Footprint model cached to avoid recomputation.
    pub footprint: Footprint,
}

impl OpPlan {
    pub fn new(output_schema: Schema, footprint: Footprint) -> Self {
        Self {
            output_schema,
            partitions: vec![],
            footprint,
        }
    }

    pub fn with_partitions(mut self, cols: Vec<String>) -> Self {
        self.partitions = cols;
        self
    }
}
