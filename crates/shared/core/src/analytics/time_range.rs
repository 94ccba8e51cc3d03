use chrono::{Days, Months};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::TradeDate;

/// Look-back window for analytics, anchored at "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1w")]
    Week,
    #[serde(rename = "1m")]
    Month,
    #[serde(rename = "3m")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    /// First date included in the window (None = unbounded)
    pub fn start(&self, today: TradeDate) -> Option<TradeDate> {
        match self {
            TimeRange::Week => today.checked_sub_days(Days::new(7)),
            TimeRange::Month => today.checked_sub_months(Months::new(1)),
            TimeRange::Quarter => today.checked_sub_months(Months::new(3)),
            TimeRange::Year => today.checked_sub_months(Months::new(12)),
            TimeRange::All => None,
        }
    }

    pub fn contains(&self, date: TradeDate, today: TradeDate) -> bool {
        match self.start(today) {
            Some(start) => date >= start && date <= today,
            None => true,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeRange::Week => "1w",
            TimeRange::Month => "1m",
            TimeRange::Quarter => "3m",
            TimeRange::Year => "1y",
            TimeRange::All => "all",
        };
        write!(f, "{}", s)
    }
}

impl TryFrom<&str> for TimeRange {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "1w" => Ok(TimeRange::Week),
            "1m" => Ok(TimeRange::Month),
            "3m" => Ok(TimeRange::Quarter),
            "1y" => Ok(TimeRange::Year),
            "all" | "" => Ok(TimeRange::All),
            _ => Err("Invalid range: must be one of 1w, 1m, 3m, 1y, all"),
        }
    }
}
