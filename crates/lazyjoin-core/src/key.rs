//! Hashable join keys derived from `Scalar` values.
//!
//! `Scalar` holds floats, so it is neither `Eq` nor `Hash`. `KeyValue` is the
//! hashable projection used to index rows:
//! - integers of either width compare as `i64`,
//! - floats of either width compare by the bits of their `f64` value, with
//!   `-0.0` folded into `0.0` and every NaN folded into one canonical NaN,
//! - `Null` is an ordinary key: null keys match each other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Scalar;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(String),
    Bin(Vec<u8>),
}

impl KeyValue {
    fn float(v: f64) -> Self {
        let v = if v == 0.0 {
            0.0
        } else if v.is_nan() {
            f64::NAN
        } else {
            v
        };
        KeyValue::Float(v.to_bits())
    }
}

impl From<&Scalar> for KeyValue {
    fn from(s: &Scalar) -> Self {
        match s {
            Scalar::Null => KeyValue::Null,
            Scalar::Bool(b) => KeyValue::Bool(*b),
            Scalar::I32(i) => KeyValue::Int(i64::from(*i)),
            Scalar::I64(i) => KeyValue::Int(*i),
            Scalar::F32(f) => KeyValue::float(f64::from(*f)),
            Scalar::F64(f) => KeyValue::float(*f),
            Scalar::Str(s) => KeyValue::Str(s.clone()),
            Scalar::Bin(b) => KeyValue::Bin(b.clone()),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Null => f.write_str("null"),
            KeyValue::Bool(b) => write!(f, "{b}"),
            KeyValue::Int(i) => write!(f, "{i}"),
            KeyValue::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            KeyValue::Str(s) => write!(f, "{s:?}"),
            KeyValue::Bin(b) => write!(f, "{b:?}"),
        }
    }
}

/// Composite key for multi-column joins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(pub Vec<KeyValue>);

impl RowKey {
    pub fn values(&self) -> &[KeyValue] {
        &self.0
    }

    /// True when every component is `Null`.
    pub fn is_all_null(&self) -> bool {
        self.0.iter().all(|v| matches!(v, KeyValue::Null))
    }
}

impl FromIterator<KeyValue> for RowKey {
    fn from_iter<I: IntoIterator<Item = KeyValue>>(iter: I) -> Self {
        RowKey(iter.into_iter().collect())
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(")")
    }
}
