pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::JournalError;
pub use ports::{IdentityVerifier, PortfolioRepository, TradeRepository, VerifyError};
pub use use_cases::{
    AnalyticsReport, AnalyticsUseCase, CreateSessionCommand, DashboardOverview, DashboardStats,
    DashboardUseCase, ManagePortfolioUseCase, ManageTradesUseCase, PortfolioOverview, Session,
    SessionError, SessionUseCase, StatusCounts, StatusFilter, TradeListing, TradeQuery,
};
