//! Ikigai Core Domain
//!
//! Pure domain types for the Ikigai trading journal: trades, accounts,
//! portfolios, positions, and the analytics computed over them.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod analytics;
pub mod entities;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use analytics::{PerformanceReport, PortfolioSummary, SegmentStats, TimeRange};
pub use entities::{
    Account, AccountDraft, AccountId, Direction, Portfolio, PortfolioDraft, PortfolioId,
    Position, PositionId, Trade, TradeDraft, TradeId, TradeStatus,
};
pub use error::ValidationError;
pub use values::{Money, Price, Quantity, TradeDate};
