//! Lazy sequence core.
//!
//! Sequences follow Rust's `Iterator` contract: `next()` either produces the
//! next element or reports exhaustion with `None`, and exhaustion is final.
//! [`Pipeline`] is single-pass; [`Materialized`] is the restartable,
//! buffered form produced by sorts and `materialize()`.

pub mod materialized;
pub mod pipeline;

pub use materialized::Materialized;
pub use pipeline::Pipeline;
