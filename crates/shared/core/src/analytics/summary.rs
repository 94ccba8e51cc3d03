use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::entities::{Account, Position};
use crate::values::{Money, percent_of, round2};

/// Headline figures for the portfolio page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Sum of current account balances
    pub total_value: Money,
    pub total_initial_balance: Money,
    pub total_unrealized_pnl: Money,
    pub total_return_percent: Decimal,
    pub account_count: usize,
    pub active_position_count: usize,
    pub allocation: Vec<AllocationSlice>,
}

/// Share of position market value held in one asset class
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub asset_class: String,
    pub market_value: Money,
    pub percent: Decimal,
}

pub fn summarize_portfolio(accounts: &[Account], positions: &[Position]) -> PortfolioSummary {
    let total_value: Money = accounts.iter().map(|a| a.current_balance).sum();
    let total_initial: Money = accounts.iter().map(|a| a.initial_balance).sum();

    PortfolioSummary {
        total_value,
        total_initial_balance: total_initial,
        total_unrealized_pnl: positions.iter().map(Position::unrealized_pnl).sum(),
        total_return_percent: round2(percent_of(total_value - total_initial, total_initial)),
        account_count: accounts.len(),
        active_position_count: positions.iter().filter(|p| !p.quantity.is_zero()).count(),
        allocation: allocation(positions),
    }
}

/// Allocation by asset class, largest first
pub fn allocation(positions: &[Position]) -> Vec<AllocationSlice> {
    let mut by_class: BTreeMap<String, Money> = BTreeMap::new();
    for position in positions {
        *by_class
            .entry(position.asset_class.to_lowercase())
            .or_insert(Decimal::ZERO) += position.market_value();
    }
    let total: Money = by_class.values().sum();

    let mut slices: Vec<AllocationSlice> = by_class
        .into_iter()
        .map(|(asset_class, market_value)| AllocationSlice {
            asset_class,
            market_value,
            percent: round2(percent_of(market_value, total)),
        })
        .collect();
    slices.sort_by(|a, b| b.market_value.cmp(&a.market_value));
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AccountDraft;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn account(initial: Money, current: Money) -> Account {
        let mut account = Account::open(
            "a",
            AccountDraft {
                name: "acct".to_string(),
                initial_balance: initial,
                ..Default::default()
            },
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        )
        .unwrap();
        account.current_balance = current;
        account
    }

    fn position(asset_class: &str, quantity: Money, entry: Money, current: Money) -> Position {
        Position {
            id: "p".to_string(),
            symbol: "X".to_string(),
            asset_class: asset_class.to_string(),
            quantity,
            entry_price: entry,
            current_price: current,
            weight: Decimal::ZERO,
        }
    }

    #[test]
    fn test_summary_totals() {
        let accounts = vec![
            account(dec!(100000), dec!(125430.50)),
            account(dec!(25000), dec!(31250.75)),
        ];
        let positions = vec![
            position("stock", dec!(100), dec!(175.50), dec!(182.25)),
            position("stock", dec!(50), dec!(245), dec!(238.50)),
        ];
        let summary = summarize_portfolio(&accounts, &positions);

        assert_eq!(summary.total_value, dec!(156681.25));
        assert_eq!(summary.total_unrealized_pnl, dec!(350));
        assert_eq!(summary.total_return_percent, dec!(25.35));
        assert_eq!(summary.account_count, 2);
        assert_eq!(summary.active_position_count, 2);
    }

    #[test]
    fn test_summary_without_accounts() {
        let summary = summarize_portfolio(&[], &[]);
        assert_eq!(summary.total_return_percent, Decimal::ZERO);
        assert!(summary.allocation.is_empty());
    }

    #[test]
    fn test_allocation_shares() {
        let positions = vec![
            position("stock", dec!(10), dec!(1), dec!(30)),
            position("Crypto", dec!(1), dec!(1), dec!(1000)),
        ];
        let slices = allocation(&positions);

        assert_eq!(slices[0].asset_class, "crypto");
        assert_eq!(slices[0].percent, dec!(76.92));
        assert_eq!(slices[1].percent, dec!(23.08));
    }
}
