//! Demo journal handed to every new user when seeding is enabled.

use chrono::NaiveDate;
use ikigai_core::{Account, Direction, Portfolio, Position, Trade, TradeStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn demo_trades() -> Vec<Trade> {
    vec![
        Trade {
            id: "1".to_string(),
            symbol: "AAPL".to_string(),
            asset_class: "stock".to_string(),
            direction: Direction::Buy,
            quantity: dec!(100),
            entry_price: dec!(175.50),
            exit_price: Some(dec!(178.25)),
            entry_date: date(2024, 1, 15),
            exit_date: Some(date(2024, 1, 16)),
            status: TradeStatus::Closed,
            entry_reason: "technical".to_string(),
            exit_reason: Some("profit_target".to_string()),
            strategy: Some("Momentum Breakout".to_string()),
            notes: Some("Strong breakout above resistance with high volume".to_string()),
            commission: dec!(1.00),
            slippage: dec!(0.25),
            tags: None,
            unrealized_pnl: None,
            realized_pnl: Some(dec!(275.00)),
        },
        Trade {
            id: "2".to_string(),
            symbol: "TSLA".to_string(),
            asset_class: "stock".to_string(),
            direction: Direction::Sell,
            quantity: dec!(50),
            entry_price: dec!(245.00),
            exit_price: Some(dec!(238.50)),
            entry_date: date(2024, 1, 14),
            exit_date: Some(date(2024, 1, 15)),
            status: TradeStatus::Closed,
            entry_reason: "technical".to_string(),
            exit_reason: Some("stop_loss".to_string()),
            strategy: Some("Mean Reversion".to_string()),
            notes: Some("Overbought conditions on RSI".to_string()),
            commission: dec!(0.75),
            slippage: dec!(0.50),
            tags: None,
            unrealized_pnl: None,
            realized_pnl: Some(dec!(325.00)),
        },
        Trade {
            id: "3".to_string(),
            symbol: "NVDA".to_string(),
            asset_class: "stock".to_string(),
            direction: Direction::Buy,
            quantity: dec!(75),
            entry_price: dec!(520.00),
            exit_price: None,
            entry_date: date(2024, 1, 13),
            exit_date: None,
            status: TradeStatus::Open,
            entry_reason: "fundamental".to_string(),
            exit_reason: None,
            strategy: Some("Growth Investing".to_string()),
            notes: Some("Strong earnings report and guidance".to_string()),
            commission: dec!(1.25),
            slippage: dec!(0.75),
            tags: None,
            unrealized_pnl: Some(dec!(-1200.00)),
            realized_pnl: None,
        },
    ]
}

pub fn demo_accounts() -> Vec<Account> {
    vec![
        Account {
            id: "1".to_string(),
            name: "Primary Trading Account".to_string(),
            broker: "Interactive Brokers".to_string(),
            account_type: "margin".to_string(),
            currency: "USD".to_string(),
            initial_balance: dec!(100000),
            current_balance: dec!(125430.50),
            is_active: true,
            created_at: date(2023, 1, 15),
        },
        Account {
            id: "2".to_string(),
            name: "Crypto Trading".to_string(),
            broker: "Binance".to_string(),
            account_type: "cash".to_string(),
            currency: "USD".to_string(),
            initial_balance: dec!(25000),
            current_balance: dec!(31250.75),
            is_active: true,
            created_at: date(2023, 6, 20),
        },
    ]
}

pub fn demo_portfolios() -> Vec<Portfolio> {
    vec![
        Portfolio {
            id: "1".to_string(),
            name: "Growth Portfolio".to_string(),
            description: Some("High-growth stocks and crypto".to_string()),
            initial_value: dec!(75000),
            current_value: dec!(95420.25),
            target_return: Some(dec!(25)),
            max_drawdown: Some(dec!(15)),
            is_active: true,
            created_at: date(2023, 1, 15),
            account_id: Some("1".to_string()),
        },
        Portfolio {
            id: "2".to_string(),
            name: "Conservative Portfolio".to_string(),
            description: Some("Blue-chip stocks and bonds".to_string()),
            initial_value: dec!(50000),
            current_value: dec!(61260.00),
            target_return: Some(dec!(12)),
            max_drawdown: Some(dec!(8)),
            is_active: true,
            created_at: date(2023, 3, 10),
            account_id: None,
        },
    ]
}

pub fn demo_positions() -> Vec<Position> {
    let position = |id: &str,
                    symbol: &str,
                    asset_class: &str,
                    quantity: Decimal,
                    entry: Decimal,
                    current: Decimal,
                    weight: Decimal| {
        Position {
            id: id.to_string(),
            symbol: symbol.to_string(),
            asset_class: asset_class.to_string(),
            quantity,
            entry_price: entry,
            current_price: current,
            weight,
        }
    };

    vec![
        position("1", "AAPL", "stock", dec!(100), dec!(175.50), dec!(182.25), dec!(15.2)),
        position("2", "TSLA", "stock", dec!(50), dec!(245.00), dec!(238.50), dec!(8.7)),
        position("3", "BTC", "crypto", dec!(0.5), dec!(45000), dec!(48250), dec!(22.5)),
        position("4", "NVDA", "stock", dec!(75), dec!(520.00), dec!(545.00), dec!(18.9)),
    ]
}
