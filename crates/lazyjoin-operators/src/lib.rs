#![forbid(unsafe_code)]
//! lazyjoin-operators: lazy pipelines and pull-based hash joins.
//!
//! Design intent:
//! - Pure and synchronous (no async, no threads).
//! - Everything is pull-driven: nothing is read from a source until the
//!   consumer asks for the first result.
//! - Joins index one side eagerly and stream the other; the index belongs to
//!   one traversal and is dropped with it.

pub mod error;
pub mod plan;
pub mod traits;

pub mod join;
pub mod seq;

pub use error::{JoinError, Side};
pub use join::{
    full_join, inner_join, join, left_join, right_join, try_join, HashJoin, JoinIter,
    JoinResult, JoinSequence, JoinStats,
};
pub use plan::{Footprint, OpPlan};
pub use seq::{Materialized, Pipeline};
pub use traits::{OpError, Operator};
