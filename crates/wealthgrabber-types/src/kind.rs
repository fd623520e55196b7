use serde::{Deserialize, Serialize};
use std::fmt;

/// The three record kinds the pipeline knows how to fetch and render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Accounts,
    Activities,
    Positions,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Accounts => write!(f, "accounts"),
            RecordKind::Activities => write!(f, "activities"),
            RecordKind::Positions => write!(f, "positions"),
        }
    }
}
