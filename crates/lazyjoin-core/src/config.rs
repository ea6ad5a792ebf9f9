//! Join configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::join_type::JoinType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    /// Pre-size the hash index for this many distinct keys.
    pub index_capacity_hint: Option<usize>,

    /// Hard cap on indexed-side rows. Joins never spill, so this is the only
    /// guard against indexing an unbounded input.
    pub max_index_rows: Option<usize>,

    /// Suffix appended to right-side column names that clash with the left side.
    pub right_suffix: String,

    /// Join type used by the row-batch operator when none is given.
    pub default_join_type: JoinType,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            index_capacity_hint: None,
            max_index_rows: None,
            right_suffix: "_right".to_string(),
            default_join_type: JoinType::Inner,
        }
    }
}

impl JoinConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYJOIN_INDEX_CAPACITY_HINT`: expected distinct keys on the indexed side
    /// - `LAZYJOIN_MAX_INDEX_ROWS`: indexed-side row cap
    /// - `LAZYJOIN_RIGHT_SUFFIX`: clash suffix for right-side columns
    /// - `LAZYJOIN_DEFAULT_JOIN_TYPE`: `inner`, `left`, `right` or `full`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("LAZYJOIN_INDEX_CAPACITY_HINT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.index_capacity_hint = Some(v);
            }
        }

        if let Ok(s) = std::env::var("LAZYJOIN_MAX_INDEX_ROWS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_index_rows = Some(v);
            }
        }

        if let Ok(s) = std::env::var("LAZYJOIN_RIGHT_SUFFIX") {
            cfg.right_suffix = s;
        }

        if let Ok(s) = std::env::var("LAZYJOIN_DEFAULT_JOIN_TYPE") {
            if let Ok(v) = s.parse::<JoinType>() {
                cfg.default_join_type = v;
            }
        }

        cfg
    }

    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: JoinConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.right_suffix.is_empty() {
            return Err(Error::Config("right_suffix must not be empty".into()));
        }
        if self.max_index_rows == Some(0) {
            return Err(Error::Config(
                "max_index_rows must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }

    pub fn with_max_index_rows(mut self, rows: usize) -> Self {
        self.max_index_rows = Some(rows);
        self
    }

    pub fn with_capacity_hint(mut self, keys: usize) -> Self {
        self.index_capacity_hint = Some(keys);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = JoinConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.right_suffix, "_right");
        assert_eq!(cfg.default_join_type, JoinType::Inner);
        assert!(cfg.max_index_rows.is_none());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let cfg = JoinConfig::from_json(r#"{"max_index_rows": 10, "default_join_type": "full"}"#)
            .unwrap();
        assert_eq!(cfg.max_index_rows, Some(10));
        assert_eq!(cfg.default_join_type, JoinType::Full);
        assert_eq!(cfg.right_suffix, "_right");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cfg = JoinConfig {
            right_suffix: String::new(),
            ..JoinConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));

        let cfg = JoinConfig::default().with_max_index_rows(0);
        assert!(cfg.validate().is_err());

        assert!(JoinConfig::from_json("{not json").is_err());
    }
}
