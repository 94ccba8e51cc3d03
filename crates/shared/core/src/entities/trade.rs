use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Direction, TradeStatus};
use crate::error::{
    ValidationError, optional_text, require_non_negative, require_positive, require_text,
    require_within,
};
use crate::values::{Money, Price, Quantity, TradeDate};

/// Unique identifier for a journal trade
pub type TradeId = String;

/// A trade recorded in the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: TradeId,
    pub symbol: String,
    /// stock, crypto, forex, options, ...
    pub asset_class: String,
    pub direction: Direction,
    pub quantity: Quantity,
    pub entry_price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<Price>,
    pub entry_date: TradeDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<TradeDate>,
    pub status: TradeStatus,
    pub entry_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub commission: Money,
    pub slippage: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrealized_pnl: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realized_pnl: Option<Money>,
}

impl Trade {
    /// Build a trade from form input, validating it and deriving realized P&L
    /// when the trade has been exited without an explicit figure.
    pub fn from_draft(id: impl Into<TradeId>, draft: TradeDraft) -> Result<Self, ValidationError> {
        let symbol = require_text("symbol", &draft.symbol)?;
        let quantity = require_positive("quantity", draft.quantity)?;
        let entry_price = require_positive("entryPrice", draft.entry_price)?;
        let exit_price = draft
            .exit_price
            .map(|p| require_positive("exitPrice", p))
            .transpose()?;
        let commission = require_non_negative("commission", draft.commission)?;
        let slippage = require_non_negative("slippage", draft.slippage)?;
        let unrealized_pnl = draft
            .unrealized_pnl
            .map(|p| require_within("unrealizedPnl", p))
            .transpose()?;
        let realized_pnl = draft
            .realized_pnl
            .map(|p| require_within("realizedPnl", p))
            .transpose()?;

        if let Some(exit_date) = draft.exit_date {
            if exit_date < draft.entry_date {
                return Err(ValidationError::ExitBeforeEntry);
            }
        }

        let mut trade = Trade {
            id: id.into(),
            symbol,
            asset_class: draft.asset_class.trim().to_string(),
            direction: draft.direction,
            quantity,
            entry_price,
            exit_price,
            entry_date: draft.entry_date,
            exit_date: draft.exit_date,
            status: draft.status,
            entry_reason: draft.entry_reason.trim().to_string(),
            exit_reason: optional_text(draft.exit_reason),
            strategy: optional_text(draft.strategy),
            notes: optional_text(draft.notes),
            commission,
            slippage,
            tags: optional_text(draft.tags),
            unrealized_pnl,
            realized_pnl,
        };

        if trade.realized_pnl.is_none() && trade.status.has_exit() && exit_price.is_some() {
            let derived = trade
                .gross_pnl()
                .ok_or(ValidationError::OutOfRange { field: "realizedPnl" })?;
            trade.realized_pnl = Some(require_within("realizedPnl", derived)?);
        }

        Ok(trade)
    }

    /// Price move times quantity, signed by direction. None until an exit price
    /// exists, or when the product leaves `Decimal`'s range.
    pub fn gross_pnl(&self) -> Option<Money> {
        let exit = self.exit_price?;
        exit.checked_sub(self.entry_price)?
            .checked_mul(self.quantity)?
            .checked_mul(self.direction.sign())
    }

    /// Realized P&L, if the trade has been (partly) exited
    pub fn realized(&self) -> Option<Money> {
        match self.realized_pnl {
            Some(pnl) => Some(pnl),
            None if self.status.has_exit() => self.gross_pnl(),
            None => None,
        }
    }

    /// Realized P&L when available, otherwise the marked unrealized P&L
    pub fn pnl(&self) -> Money {
        self.realized()
            .or(self.unrealized_pnl)
            .unwrap_or(Decimal::ZERO)
    }

    /// Entry notional (price * quantity)
    pub fn notional(&self) -> Money {
        self.entry_price * self.quantity
    }

    /// Case-insensitive match against symbol or strategy
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.symbol.to_lowercase().contains(&term)
            || self
                .strategy
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&term))
    }

    /// Date used to order trades on the equity curve
    pub fn settled_on(&self) -> TradeDate {
        self.exit_date.unwrap_or(self.entry_date)
    }
}

/// Typed form input for recording or editing a trade
#[derive(Debug, Clone, Default)]
pub struct TradeDraft {
    pub symbol: String,
    pub asset_class: String,
    pub direction: Direction,
    pub quantity: Quantity,
    pub entry_price: Price,
    pub exit_price: Option<Price>,
    pub entry_date: TradeDate,
    pub exit_date: Option<TradeDate>,
    pub status: TradeStatus,
    pub entry_reason: String,
    pub exit_reason: Option<String>,
    pub strategy: Option<String>,
    pub notes: Option<String>,
    pub commission: Money,
    pub slippage: Money,
    pub tags: Option<String>,
    pub unrealized_pnl: Option<Money>,
    pub realized_pnl: Option<Money>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::MAX_AMOUNT;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> TradeDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn closed_draft(direction: Direction, entry: Decimal, exit: Decimal) -> TradeDraft {
        TradeDraft {
            symbol: "AAPL".to_string(),
            asset_class: "stock".to_string(),
            direction,
            quantity: dec!(100),
            entry_price: entry,
            exit_price: Some(exit),
            entry_date: date(2024, 1, 15),
            exit_date: Some(date(2024, 1, 16)),
            status: TradeStatus::Closed,
            entry_reason: "technical".to_string(),
            commission: dec!(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_realized_pnl_derived_for_long() {
        let trade = Trade::from_draft("t1", closed_draft(Direction::Buy, dec!(175.50), dec!(178.25)))
            .unwrap();
        assert_eq!(trade.realized_pnl, Some(dec!(275)));
    }

    #[test]
    fn test_realized_pnl_derived_for_short() {
        let mut draft = closed_draft(Direction::Sell, dec!(245), dec!(238.50));
        draft.quantity = dec!(50);
        let trade = Trade::from_draft("t2", draft).unwrap();
        assert_eq!(trade.realized_pnl, Some(dec!(325)));
    }

    #[test]
    fn test_explicit_realized_pnl_kept() {
        let mut draft = closed_draft(Direction::Buy, dec!(10), dec!(12));
        draft.realized_pnl = Some(dec!(150));
        let trade = Trade::from_draft("t3", draft).unwrap();
        assert_eq!(trade.realized(), Some(dec!(150)));
    }

    #[test]
    fn test_open_trade_has_no_realized_pnl() {
        let mut draft = closed_draft(Direction::Buy, dec!(520), dec!(510));
        draft.exit_price = None;
        draft.exit_date = None;
        draft.status = TradeStatus::Open;
        draft.unrealized_pnl = Some(dec!(-1200));
        let trade = Trade::from_draft("t4", draft).unwrap();
        assert_eq!(trade.realized(), None);
        assert_eq!(trade.pnl(), dec!(-1200));
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let mut draft = closed_draft(Direction::Buy, dec!(10), dec!(12));
        draft.symbol = "  ".to_string();
        assert_eq!(
            Trade::from_draft("x", draft).unwrap_err(),
            ValidationError::Required("symbol")
        );

        let mut draft = closed_draft(Direction::Buy, dec!(10), dec!(12));
        draft.quantity = Decimal::ZERO;
        assert!(matches!(
            Trade::from_draft("x", draft),
            Err(ValidationError::NotPositive { field: "quantity" })
        ));

        let mut draft = closed_draft(Direction::Buy, dec!(10), dec!(12));
        draft.exit_date = Some(date(2024, 1, 1));
        assert_eq!(
            Trade::from_draft("x", draft).unwrap_err(),
            ValidationError::ExitBeforeEntry
        );
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        let mut draft = closed_draft(Direction::Buy, dec!(1), Decimal::MAX);
        draft.quantity = dec!(2);
        assert_eq!(
            Trade::from_draft("x", draft).unwrap_err(),
            ValidationError::OutOfRange { field: "exitPrice" }
        );

        let mut draft = closed_draft(Direction::Buy, dec!(10), dec!(12));
        draft.realized_pnl = Some(Decimal::MAX);
        assert_eq!(
            Trade::from_draft("x", draft).unwrap_err(),
            ValidationError::OutOfRange { field: "realizedPnl" }
        );

        let mut draft = closed_draft(Direction::Buy, dec!(10), dec!(12));
        draft.unrealized_pnl = Some(Decimal::MIN);
        assert_eq!(
            Trade::from_draft("x", draft).unwrap_err(),
            ValidationError::OutOfRange { field: "unrealizedPnl" }
        );
    }

    #[test]
    fn test_derived_pnl_beyond_bound_rejected() {
        // Each input is within bounds, the product is not
        let mut draft = closed_draft(Direction::Buy, dec!(1), MAX_AMOUNT);
        draft.quantity = MAX_AMOUNT;
        assert_eq!(
            Trade::from_draft("x", draft).unwrap_err(),
            ValidationError::OutOfRange { field: "realizedPnl" }
        );
    }

    #[test]
    fn test_gross_pnl_overflow_is_none() {
        let mut trade =
            Trade::from_draft("x", closed_draft(Direction::Buy, dec!(1), dec!(2))).unwrap();
        trade.exit_price = Some(Decimal::MAX);
        trade.quantity = dec!(2);
        assert_eq!(trade.gross_pnl(), None);
    }

    #[test]
    fn test_matches_search() {
        let mut draft = closed_draft(Direction::Buy, dec!(10), dec!(12));
        draft.strategy = Some("Momentum Breakout".to_string());
        let trade = Trade::from_draft("x", draft).unwrap();

        assert!(trade.matches_search("aap"));
        assert!(trade.matches_search("momentum"));
        assert!(trade.matches_search(""));
        assert!(!trade.matches_search("tsla"));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let trade = Trade::from_draft("x", closed_draft(Direction::Buy, dec!(10), dec!(12))).unwrap();
        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["entryDate"], "2024-01-15");
        assert_eq!(json["direction"], "buy");
        assert_eq!(json["status"], "closed");
        assert!(json.get("notes").is_none());
    }
}
