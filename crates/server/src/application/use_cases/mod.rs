mod analytics;
mod dashboard;
mod portfolio;
mod session;
mod trades;

pub use analytics::{AnalyticsReport, AnalyticsUseCase};
pub use dashboard::{DashboardOverview, DashboardStats, DashboardUseCase, RECENT_TRADES_LIMIT};
pub use portfolio::{ManagePortfolioUseCase, PortfolioOverview};
pub use session::{CreateSessionCommand, Session, SessionError, SessionUseCase};
pub use trades::{
    ManageTradesUseCase, StatusCounts, StatusFilter, TradeListing, TradeQuery,
};
