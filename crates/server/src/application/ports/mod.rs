mod identity_verifier;
mod portfolio_repository;
mod trade_repository;

pub use identity_verifier::{IdentityVerifier, VerifyError};
pub use portfolio_repository::PortfolioRepository;
pub use trade_repository::TradeRepository;
