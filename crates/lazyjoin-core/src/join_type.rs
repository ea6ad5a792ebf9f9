//! Join strategies.
//!
//! All four strategies share one build/probe state machine; the variant only
//! decides which side is indexed and which unmatched rows survive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub const ALL: [JoinType; 4] = [
        JoinType::Inner,
        JoinType::Left,
        JoinType::Right,
        JoinType::Full,
    ];

    /// True when the left input is indexed and the right input drives.
    pub fn indexes_left(self) -> bool {
        matches!(self, JoinType::Right)
    }

    /// Driving rows without a match still produce one result.
    pub fn keeps_unmatched_driver(self) -> bool {
        !matches!(self, JoinType::Inner)
    }

    /// Indexed rows that never matched are emitted after the driving side ends.
    pub fn drains_unmatched_indexed(self) -> bool {
        matches!(self, JoinType::Full)
    }

    /// Whether a result may carry no left value.
    pub fn left_may_be_absent(self) -> bool {
        matches!(self, JoinType::Right | JoinType::Full)
    }

    /// Whether a result may carry no right value.
    pub fn right_may_be_absent(self) -> bool {
        matches!(self, JoinType::Left | JoinType::Full)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JoinType::Inner => "inner",
            JoinType::Left => "left",
            JoinType::Right => "right",
            JoinType::Full => "full",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inner" => Ok(JoinType::Inner),
            "left" | "left_outer" | "left outer" => Ok(JoinType::Left),
            "right" | "right_outer" | "right outer" => Ok(JoinType::Right),
            "full" | "full_outer" | "full outer" | "outer" => Ok(JoinType::Full),
            other => Err(Error::Config(format!("unknown join type '{other}'"))),
        }
    }
}
