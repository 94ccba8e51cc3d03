use ikigai_core::analytics::performance_report;
use ikigai_core::values::{percent_of, round2};
use ikigai_core::{Money, Trade};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::application::ports::{PortfolioRepository, TradeRepository};
use crate::domain::{Clock, DecodedToken};

/// Number of trades listed under "recent trades"
pub const RECENT_TRADES_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_value: Money,
    /// Realized P&L of trades exited today
    pub daily_pnl: Money,
    pub daily_pnl_percent: Decimal,
    pub total_trades: usize,
    pub win_rate: Decimal,
    pub sharpe_ratio: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct DashboardOverview {
    pub user: DecodedToken,
    pub stats: DashboardStats,
    pub recent_trades: Vec<Trade>,
}

pub struct DashboardUseCase<T, P>
where
    T: TradeRepository + ?Sized,
    P: PortfolioRepository + ?Sized,
{
    trades: Arc<T>,
    portfolio: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<T, P> DashboardUseCase<T, P>
where
    T: TradeRepository + ?Sized,
    P: PortfolioRepository + ?Sized,
{
    pub fn new(trades: Arc<T>, portfolio: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            trades,
            portfolio,
            clock,
        }
    }

    pub async fn overview(&self, user: DecodedToken) -> DashboardOverview {
        let today = self.clock.today();
        let trades = self.trades.list(&user.uid).await;
        let accounts = self.portfolio.accounts(&user.uid).await;

        let total_value: Money = accounts.iter().map(|a| a.current_balance).sum();
        let daily_pnl: Money = trades
            .iter()
            .filter(|t| t.exit_date == Some(today))
            .filter_map(Trade::realized)
            .sum();
        let report = performance_report(&trades);

        let mut recent = trades;
        recent.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
        recent.truncate(RECENT_TRADES_LIMIT);

        DashboardOverview {
            stats: DashboardStats {
                total_value,
                daily_pnl,
                daily_pnl_percent: round2(percent_of(daily_pnl, total_value)),
                total_trades: report.total_trades,
                win_rate: report.win_rate,
                sharpe_ratio: report.sharpe_ratio,
            },
            recent_trades: recent,
            user,
        }
    }
}
