//! Journal analytics: pure functions over trades, accounts and positions.

mod breakdown;
mod performance;
mod summary;
mod time_range;

pub use breakdown::{SegmentStats, UNASSIGNED, breakdown_by, by_asset_class, by_strategy};
pub use performance::{
    PerformanceReport, max_drawdown, performance_report, realized_series, sharpe_ratio,
};
pub use summary::{AllocationSlice, PortfolioSummary, allocation, summarize_portfolio};
pub use time_range::TimeRange;
