use serde::{Deserialize, Serialize};
use std::fmt;

/// Journal trade lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    /// Position still held
    #[default]
    Open,
    /// Fully exited
    Closed,
    /// Partially exited
    Partial,
}

impl TradeStatus {
    pub const ALL: [TradeStatus; 3] = [TradeStatus::Open, TradeStatus::Closed, TradeStatus::Partial];

    /// Returns true once at least part of the position has been exited
    pub fn has_exit(&self) -> bool {
        matches!(self, TradeStatus::Closed | TradeStatus::Partial)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "open"),
            TradeStatus::Closed => write!(f, "closed"),
            TradeStatus::Partial => write!(f, "partial"),
        }
    }
}

impl TryFrom<&str> for TradeStatus {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "open" => Ok(TradeStatus::Open),
            "closed" => Ok(TradeStatus::Closed),
            "partial" => Ok(TradeStatus::Partial),
            _ => Err("Invalid status: must be open, closed or partial"),
        }
    }
}
