//! Convenient re-exports for downstream crates.

pub use crate::config::JoinConfig;
pub use crate::error::{Error, Result};
pub use crate::join_type::JoinType;
pub use crate::key::{KeyValue, RowKey};
pub use crate::schema::{DataType, Field, Schema};
pub use crate::types::{Column, RowBatch, Scalar};
