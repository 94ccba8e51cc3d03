use ikigai_core::analytics::{by_asset_class, by_strategy, performance_report};
use ikigai_core::{PerformanceReport, SegmentStats, TimeRange, Trade};
use std::sync::Arc;

use crate::application::ports::TradeRepository;
use crate::domain::Clock;

#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub performance: PerformanceReport,
    pub by_asset_class: Vec<SegmentStats>,
    pub by_strategy: Vec<SegmentStats>,
}

/// Analytics page: metrics computed from the owner's journal
pub struct AnalyticsUseCase<R>
where
    R: TradeRepository + ?Sized,
{
    trades: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AnalyticsUseCase<R>
where
    R: TradeRepository + ?Sized,
{
    pub fn new(trades: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { trades, clock }
    }

    pub async fn report(&self, owner: &str, range: TimeRange) -> AnalyticsReport {
        let today = self.clock.today();
        let trades: Vec<Trade> = self
            .trades
            .list(owner)
            .await
            .into_iter()
            .filter(|t| range.contains(t.entry_date, today))
            .collect();

        AnalyticsReport {
            range,
            performance: performance_report(&trades),
            by_asset_class: by_asset_class(&trades),
            by_strategy: by_strategy(&trades),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{FixedClock, InMemoryTradeRepository};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn use_case() -> AnalyticsUseCase<InMemoryTradeRepository> {
        AnalyticsUseCase::new(
            Arc::new(InMemoryTradeRepository::seeded()),
            Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 1, 21).unwrap())),
        )
    }

    #[tokio::test]
    async fn test_report_over_demo_journal() {
        let report = use_case().report("u1", TimeRange::All).await;
        let perf = &report.performance;

        assert_eq!(perf.total_trades, 3);
        assert_eq!(perf.closed_trades, 2);
        assert_eq!(perf.win_rate, dec!(100));
        assert_eq!(perf.average_trade, Some(dec!(300)));
        assert_eq!(perf.total_realized_pnl, dec!(600));
        assert_eq!(perf.total_unrealized_pnl, dec!(-1200));
        assert_eq!(perf.profit_factor, None);
        assert_eq!(perf.sharpe_ratio, Some(dec!(8.49)));

        assert_eq!(report.by_asset_class.len(), 1);
        assert_eq!(report.by_strategy.len(), 3);
    }

    #[tokio::test]
    async fn test_report_respects_range() {
        // Demo trades were entered on the 13th, 14th and 15th; a week back from the 21st starts on the 14th
        let report = use_case().report("u1", TimeRange::Week).await;
        assert_eq!(report.performance.total_trades, 2);
        assert_eq!(report.range, TimeRange::Week);
    }
}
