mod in_memory_portfolio;
mod in_memory_trades;

pub use in_memory_portfolio::InMemoryPortfolioRepository;
pub use in_memory_trades::InMemoryTradeRepository;
