#![forbid(unsafe_code)]
//! lazyjoin-core: pure data shared by the sequence and join crates.
//!
//! - `error`: the core error type.
//! - `config`: `JoinConfig` (serde + env overrides).
//! - `join_type`: the four join strategies as a tagged enum.
//! - `schema`/`types`: a small row-batch value model for column joins.
//! - `key`: hashable key values derived from `Scalar`s.
//!
//! Nothing in here iterates or allocates on behalf of a join; that lives in
//! `lazyjoin-operators`.

pub mod config;
pub mod error;
pub mod join_type;
pub mod key;
pub mod prelude;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
