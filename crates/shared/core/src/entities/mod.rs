mod account;
mod direction;
mod portfolio;
mod position;
mod trade;
mod trade_status;

pub use account::{Account, AccountDraft, AccountId, DEFAULT_CURRENCY};
pub use direction::Direction;
pub use portfolio::{Portfolio, PortfolioDraft, PortfolioId};
pub use position::{Position, PositionId};
pub use trade::{Trade, TradeDraft, TradeId};
pub use trade_status::TradeStatus;
