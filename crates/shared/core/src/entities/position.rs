//! Open holdings marked at a current price.

use serde::{Deserialize, Serialize};

use crate::values::{Money, Price, Quantity, percent_of, round2};

/// Unique identifier for a position
pub type PositionId = String;

/// A holding in the portfolio view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: PositionId,
    pub symbol: String,
    pub asset_class: String,
    /// Position size (always positive)
    pub quantity: Quantity,
    /// Average entry price
    pub entry_price: Price,
    /// Current mark price for P&L calculation
    pub current_price: Price,
    /// Share of the overall book, percent
    pub weight: Money,
}

impl Position {
    /// Market value at the current mark
    pub fn market_value(&self) -> Money {
        self.current_price * self.quantity
    }

    /// Unrealized P&L at the current mark
    pub fn unrealized_pnl(&self) -> Money {
        (self.current_price - self.entry_price) * self.quantity
    }

    /// Unrealized P&L relative to entry price, percent (2 dp)
    pub fn unrealized_pnl_percent(&self) -> Money {
        round2(percent_of(
            self.current_price - self.entry_price,
            self.entry_price,
        ))
    }
}
