use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::entities::Trade;
use crate::values::{Money, percent_of, round2};

/// Label used for trades without a strategy
pub const UNASSIGNED: &str = "Unassigned";

/// Performance of one slice of the journal (an asset class, a strategy, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStats {
    pub name: String,
    pub trades: usize,
    pub closed_trades: usize,
    pub win_rate: Decimal,
    pub realized_pnl: Money,
}

/// Group trades by `key` and summarize each group, ordered by name
pub fn breakdown_by<F>(trades: &[Trade], key: F) -> Vec<SegmentStats>
where
    F: Fn(&Trade) -> String,
{
    let mut groups: BTreeMap<String, Vec<&Trade>> = BTreeMap::new();
    for trade in trades {
        groups.entry(key(trade)).or_default().push(trade);
    }

    groups
        .into_iter()
        .map(|(name, group)| {
            let realized: Vec<Money> = group.iter().filter_map(|t| t.realized()).collect();
            let wins = realized
                .iter()
                .filter(|p| p.is_sign_positive() && !p.is_zero())
                .count();
            SegmentStats {
                name,
                trades: group.len(),
                closed_trades: realized.len(),
                win_rate: round2(percent_of(
                    Decimal::from(wins),
                    Decimal::from(realized.len()),
                )),
                realized_pnl: realized.iter().sum(),
            }
        })
        .collect()
}

pub fn by_asset_class(trades: &[Trade]) -> Vec<SegmentStats> {
    breakdown_by(trades, |t| t.asset_class.to_lowercase())
}

pub fn by_strategy(trades: &[Trade]) -> Vec<SegmentStats> {
    breakdown_by(trades, |t| {
        t.strategy
            .clone()
            .unwrap_or_else(|| UNASSIGNED.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Direction, TradeDraft, TradeStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn trade(asset_class: &str, strategy: Option<&str>, realized: Option<Money>) -> Trade {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        Trade::from_draft(
            "t",
            TradeDraft {
                symbol: "X".to_string(),
                asset_class: asset_class.to_string(),
                direction: Direction::Buy,
                quantity: dec!(1),
                entry_price: dec!(10),
                entry_date: date,
                status: if realized.is_some() {
                    TradeStatus::Closed
                } else {
                    TradeStatus::Open
                },
                strategy: strategy.map(str::to_string),
                realized_pnl: realized,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_by_strategy() {
        let trades = vec![
            trade("stock", Some("Momentum"), Some(dec!(50))),
            trade("stock", Some("Momentum"), Some(dec!(-20))),
            trade("crypto", None, None),
        ];
        let stats = by_strategy(&trades);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Momentum");
        assert_eq!(stats[0].trades, 2);
        assert_eq!(stats[0].win_rate, dec!(50));
        assert_eq!(stats[0].realized_pnl, dec!(30));
        assert_eq!(stats[1].name, UNASSIGNED);
        assert_eq!(stats[1].closed_trades, 0);
        assert_eq!(stats[1].win_rate, Decimal::ZERO);
    }

    #[test]
    fn test_by_asset_class_normalizes_case() {
        let trades = vec![
            trade("Stock", None, Some(dec!(5))),
            trade("stock", None, Some(dec!(5))),
        ];
        let stats = by_asset_class(&trades);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].win_rate, dec!(100));
    }
}
