use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

use crate::entities::Trade;
use crate::values::{Money, percent_of, round2};

/// Journal-wide performance figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub total_trades: usize,
    pub open_trades: usize,
    pub closed_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Winning share of closed trades, percent
    pub win_rate: Decimal,
    pub average_win: Option<Money>,
    pub average_loss: Option<Money>,
    /// Gross profit over gross loss; None while nothing has lost
    pub profit_factor: Option<Decimal>,
    pub average_trade: Option<Money>,
    pub total_realized_pnl: Money,
    pub total_unrealized_pnl: Money,
    pub total_costs: Money,
    /// Per-trade mean over sample standard deviation (not annualized)
    pub sharpe_ratio: Option<Decimal>,
    /// Largest peak-to-trough fall of cumulative realized P&L
    pub max_drawdown: Money,
}

/// Realized P&L of exited trades, in equity-curve order
pub fn realized_series(trades: &[Trade]) -> Vec<Money> {
    let mut settled: Vec<&Trade> = trades.iter().filter(|t| t.realized().is_some()).collect();
    settled.sort_by_key(|t| (t.settled_on(), t.entry_date));
    settled.iter().filter_map(|t| t.realized()).collect()
}

pub fn performance_report(trades: &[Trade]) -> PerformanceReport {
    let series = realized_series(trades);

    let wins: Vec<Money> = series
        .iter()
        .copied()
        .filter(|p| p.is_sign_positive() && !p.is_zero())
        .collect();
    let losses: Vec<Money> = series
        .iter()
        .copied()
        .filter(|p| p.is_sign_negative() && !p.is_zero())
        .collect();

    let gross_profit: Money = wins.iter().sum();
    let gross_loss: Money = losses.iter().sum();
    let total_realized: Money = series.iter().sum();

    let total_unrealized: Money = trades
        .iter()
        .filter(|t| t.realized().is_none())
        .filter_map(|t| t.unrealized_pnl)
        .sum();

    PerformanceReport {
        total_trades: trades.len(),
        open_trades: trades.iter().filter(|t| t.realized().is_none()).count(),
        closed_trades: series.len(),
        winning_trades: wins.len(),
        losing_trades: losses.len(),
        win_rate: round2(percent_of(
            Decimal::from(wins.len()),
            Decimal::from(series.len()),
        )),
        average_win: mean(&wins).map(round2),
        average_loss: mean(&losses).map(round2),
        profit_factor: gross_profit.checked_div(gross_loss.abs()).map(round2),
        average_trade: mean(&series).map(round2),
        total_realized_pnl: total_realized,
        total_unrealized_pnl: total_unrealized,
        total_costs: trades.iter().map(|t| t.commission + t.slippage).sum(),
        sharpe_ratio: sharpe_ratio(&series).map(round2),
        max_drawdown: max_drawdown(&series),
    }
}

fn mean(values: &[Money]) -> Option<Money> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<Money>() / Decimal::from(values.len()))
}

/// Mean over sample standard deviation; None with fewer than two samples or no dispersion
pub fn sharpe_ratio(series: &[Money]) -> Option<Decimal> {
    if series.len() < 2 {
        return None;
    }
    let avg = mean(series)?;
    let squares = series.iter().try_fold(Decimal::ZERO, |acc, p| {
        let diff = p.checked_sub(avg)?;
        acc.checked_add(diff.checked_mul(diff)?)
    })?;
    let variance = squares / Decimal::from(series.len() - 1);
    let deviation = variance.sqrt()?;
    if deviation.is_zero() {
        return None;
    }
    avg.checked_div(deviation)
}

/// Largest fall from a running peak of the cumulative series (starting at zero)
pub fn max_drawdown(series: &[Money]) -> Money {
    let mut equity = Decimal::ZERO;
    let mut peak = Decimal::ZERO;
    let mut worst = Decimal::ZERO;

    for pnl in series {
        equity += pnl;
        peak = peak.max(equity);
        worst = worst.max(peak - equity);
    }

    worst
}
