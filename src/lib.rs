#![forbid(unsafe_code)]
//! lazyjoin: composable lazy pipelines and pull-based hash joins.
//!
//! - [`seq`]: `Pipeline` (each/map/filter/slice/reduce/visit) and the
//!   restartable `Materialized` view.
//! - [`join`]: inner/left/right/full hash joins over arbitrary key functions,
//!   plus the row-batch `HashJoin` operator.
//! - [`lazyjoin_core`]: configuration, errors, and the row-batch value model.

pub use lazyjoin_core;
pub use lazyjoin_operators::{join, seq, traits};

pub mod prelude {
    //! Everything needed to build and consume joins.

    pub use lazyjoin_core::config::JoinConfig;
    pub use lazyjoin_core::join_type::JoinType;
    pub use lazyjoin_core::key::{KeyValue, RowKey};
    pub use lazyjoin_core::schema::{DataType, Field, Schema};
    pub use lazyjoin_core::types::{Column, RowBatch, Scalar};
    pub use lazyjoin_operators::join::{Fallible, KeyFn, Pure};
    pub use lazyjoin_operators::{
        full_join, inner_join, join, left_join, right_join, try_join, HashJoin, JoinError,
        JoinIter, JoinResult, JoinSequence, JoinStats, Materialized, OpError, Operator, Pipeline,
        Side,
    };
}
